use bevy::asset::AssetMetaCheck;
use bevy::input::mouse::{MouseMotion, MouseWheel};
use bevy::input::touch::Touches;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use constants::mount::ASSET_ROOT;

// Crate engine modules
use crate::engine::camera::orbit_controls::{
    OrbitControls, orbit_pointer_input, update_orbit_controls,
};
use crate::engine::core::host_inbox::{ViewerCommand, drain_host_inbox};
use crate::engine::core::lifecycle::{ViewerLifecycle, handle_unmount_commands};
use crate::engine::core::mount::MountPlan;
use crate::engine::core::render_loop::{FrameSet, RenderLoopPlugin};
use crate::engine::core::window_config::create_window_config;
use crate::engine::loading::model_loader::{
    ModelLoadEvent, ModelLoader, attach_loaded_model, poll_model_load, start_model_load,
};
use crate::engine::loading::progress::ModelLoadStatus;
use crate::engine::scene::model::{ModelHandle, sync_model_orientation};
use crate::engine::scene::scene_context::initialize_scene_context;
use crate::engine::systems::resize::{ContainerResized, handle_viewport_resize};
use crate::engine::systems::spin::{SpinState, apply_spin, handle_spin_commands};
use crate::engine::systems::viewpoints::handle_viewpoint_commands;
// Create Web RPC modules
use crate::rpc::web_rpc::WebRpcPlugin;

#[cfg(not(target_arch = "wasm32"))]
use crate::engine::systems::resize::forward_window_resizes;

#[cfg(not(target_arch = "wasm32"))]
use bevy::window::WindowResized;

/// Full app for a mounted viewer: windowing, rendering, assets and the
/// viewer's own systems.
pub fn create_app(plan: MountPlan) -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins(&plan));
    install_viewer(&mut app, plan);
    app.add_plugins(ModelLoaderPlugin);

    app
}

/// Viewer systems without windowing, rendering or asset IO.
///
/// Model completions are fed in as [`ModelLoadEvent`]s by the caller.
pub fn create_headless_app(plan: MountPlan) -> App {
    let mut app = App::new();

    app.add_plugins(MinimalPlugins);
    install_viewer(&mut app, plan);

    app
}

fn install_viewer(app: &mut App, plan: MountPlan) {
    info!(
        "Mounting viewer on #{} ({}x{})",
        plan.config.container_id, plan.container_size.x, plan.container_size.y
    );

    app.insert_resource(plan.config)
        .insert_resource(plan.inbox)
        .insert_resource(ViewerLifecycle::new(plan.generation))
        .insert_non_send_resource(plan.surface)
        .add_plugins(RenderLoopPlugin)
        .add_plugins(WebRpcPlugin)
        .add_plugins(ViewerCorePlugin);
}

/// Scene, controls, commands and teardown for one viewer instance.
pub struct ViewerCorePlugin;

impl Plugin for ViewerCorePlugin {
    fn build(&self, app: &mut App) {
        // Initialise resources early
        app.init_resource::<SpinState>()
            .init_resource::<ModelHandle>()
            .init_resource::<ModelLoadStatus>()
            .init_resource::<ModelLoader>()
            .init_resource::<OrbitControls>()
            .init_resource::<ButtonInput<MouseButton>>()
            .init_resource::<Touches>()
            .add_event::<ViewerCommand>()
            .add_event::<ContainerResized>()
            .add_event::<ModelLoadEvent>()
            .add_event::<MouseMotion>()
            .add_event::<MouseWheel>()
            .add_event::<AppExit>();

        app.add_systems(Startup, initialize_scene_context)
            .add_systems(
                Update,
                (drain_host_inbox, orbit_pointer_input).in_set(FrameSet::Intake),
            )
            .add_systems(
                Update,
                (
                    (
                        handle_spin_commands,
                        handle_viewpoint_commands,
                        handle_viewport_resize,
                    ),
                    handle_unmount_commands,
                )
                    .chain()
                    .in_set(FrameSet::Commands),
            )
            // Ungated so completions after unmount are still consumed and dropped.
            .add_systems(
                Update,
                attach_loaded_model
                    .after(FrameSet::Loading)
                    .before(FrameSet::Controls),
            )
            .add_systems(Update, update_orbit_controls.in_set(FrameSet::Controls))
            .add_systems(Update, apply_spin.in_set(FrameSet::Spin))
            .add_systems(Update, sync_model_orientation.in_set(FrameSet::Present));

        #[cfg(not(target_arch = "wasm32"))]
        {
            app.add_event::<WindowResized>().add_systems(
                Update,
                forward_window_resizes
                    .in_set(FrameSet::Intake)
                    .before(drain_host_inbox),
            );
        }
    }
}

/// Starts the glTF load at startup and polls it until it settles.
pub struct ModelLoaderPlugin;

impl Plugin for ModelLoaderPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, start_model_load.after(initialize_scene_context))
            .add_systems(Update, poll_model_load.in_set(FrameSet::Loading));
    }
}

fn create_default_plugins(plan: &MountPlan) -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config(&plan.surface)),
        ..default()
    };

    let asset_config = AssetPlugin {
        file_path: ASSET_ROOT.to_string(),
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    let log_config = LogPlugin {
        filter: plan.config.log_filter.clone(),
        ..default()
    };

    DefaultPlugins
        .set(window_config)
        .set(asset_config)
        .set(log_config)
}
