#![allow(dead_code)]

use bevy::prelude::*;
use constants::mount::MODEL_URL;
use model_viewer_engine::engine::core::app_setup::create_headless_app;
use model_viewer_engine::engine::core::config::ViewerConfig;
use model_viewer_engine::engine::core::host_inbox::HostInbox;
use model_viewer_engine::engine::core::mount::{MountHost, mount};
use model_viewer_engine::engine::loading::model_loader::ModelLoadEvent;
use model_viewer_engine::engine::scene::model::{ModelHandle, ModelOrientation};
use model_viewer_engine::engine::scene::render_surface::RenderSurface;
use model_viewer_engine::error::MountResult;

/// In-memory page with at most one container.
pub struct FakeHost {
    pub container: bool,
    pub attribute: Option<String>,
    pub client_width: u32,
    pub prepared_height: Option<u32>,
    pub surfaces: Vec<String>,
}

impl FakeHost {
    pub fn with_container() -> Self {
        Self {
            container: true,
            attribute: None,
            client_width: 1280,
            prepared_height: None,
            surfaces: Vec::new(),
        }
    }

    pub fn empty_page() -> Self {
        Self {
            container: false,
            ..Self::with_container()
        }
    }
}

impl MountHost for FakeHost {
    fn has_container(&self, _container_id: &str) -> bool {
        self.container
    }

    fn config_attribute(&self, _container_id: &str) -> Option<String> {
        self.attribute.clone()
    }

    fn prepare_container(&mut self, _container_id: &str, height_px: u32) -> UVec2 {
        self.prepared_height = Some(height_px);
        UVec2::new(self.client_width, height_px)
    }

    fn create_surface(
        &mut self,
        _container_id: &str,
        surface_id: &str,
        size: UVec2,
    ) -> MountResult<RenderSurface> {
        self.surfaces.push(surface_id.to_string());
        Ok(RenderSurface::detached(surface_id, size))
    }
}

/// Mounted headless viewer after its first frame.
pub fn mounted_app() -> (App, HostInbox) {
    let mut host = FakeHost::with_container();
    let plan = mount(&mut host, ViewerConfig::default()).unwrap();
    let inbox = plan.inbox.clone();
    let mut app = create_headless_app(plan);
    app.update();
    (app, inbox)
}

/// Complete the model load as the asset poller would.
pub fn deliver_model(app: &mut App, generation: u64) {
    app.world_mut().send_event(ModelLoadEvent {
        generation,
        path: MODEL_URL.to_string(),
        result: Ok(Handle::default()),
    });
}

pub fn model_orientation(app: &App) -> Option<Vec3> {
    let entity = app.world().resource::<ModelHandle>().get()?;
    app.world()
        .get::<ModelOrientation>(entity)
        .map(|orientation| orientation.0)
}

pub fn run_frames(app: &mut App, frames: usize) {
    for _ in 0..frames {
        app.update();
    }
}
