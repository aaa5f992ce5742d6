use model_viewer_engine::engine::core::app_setup::create_app;
use model_viewer_engine::engine::core::config::ViewerConfig;
use model_viewer_engine::engine::core::mount::{mount, report_mount_error};

#[cfg(target_arch = "wasm32")]
use model_viewer_engine::engine::core::dom_bindings::{DomBindings, DomHost};

#[cfg(not(target_arch = "wasm32"))]
use model_viewer_engine::engine::core::mount::NativeHost;

fn main() {
    #[cfg(target_arch = "wasm32")]
    {
        let result = DomHost::new().and_then(|mut host| {
            let mut plan = mount(&mut host, ViewerConfig::default())?;
            match DomBindings::install(&host, &plan.config, &plan.inbox) {
                Ok(bindings) => Ok((plan, bindings)),
                Err(error) => {
                    plan.surface.release();
                    Err(error)
                }
            }
        });

        match result {
            Ok((plan, bindings)) => {
                let mut app = create_app(plan);
                app.insert_non_send_resource(bindings);
                wasm_bindgen_futures::spawn_local(async move {
                    app.run();
                });
            }
            Err(error) => report_mount_error(&error),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        match mount(&mut NativeHost::default(), ViewerConfig::default()) {
            Ok(plan) => {
                create_app(plan).run();
            }
            Err(error) => report_mount_error(&error),
        }
    }
}
