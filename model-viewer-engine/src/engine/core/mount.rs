use bevy::prelude::*;

use crate::engine::core::config::ViewerConfig;
use crate::engine::core::host_inbox::HostInbox;
use crate::engine::scene::render_surface::RenderSurface;
use crate::error::{MountError, MountResult};

/// Page-side operations needed to mount a viewer.
///
/// Implemented over the DOM for web builds and by a window-backed stand-in
/// for native builds.
pub trait MountHost {
    fn has_container(&self, container_id: &str) -> bool;

    /// Raw JSON of the container's config attribute, if present.
    fn config_attribute(&self, container_id: &str) -> Option<String>;

    /// Apply mount styling to the container and return its client box.
    fn prepare_container(&mut self, container_id: &str, height_px: u32) -> UVec2;

    /// Insert a render surface into the container, replacing a stale one with
    /// the same id.
    fn create_surface(
        &mut self,
        container_id: &str,
        surface_id: &str,
        size: UVec2,
    ) -> MountResult<RenderSurface>;
}

/// Everything a successful mount produced, handed to the app builder.
pub struct MountPlan {
    pub config: ViewerConfig,
    pub surface: RenderSurface,
    pub container_size: UVec2,
    pub inbox: HostInbox,
    pub generation: u64,
}

/// Locate the container and create the render surface.
///
/// On error nothing has been inserted into the page and no frame loop exists.
pub fn mount<H: MountHost>(host: &mut H, config: ViewerConfig) -> MountResult<MountPlan> {
    if !host.has_container(&config.container_id) {
        return Err(MountError::ContainerMissing(config.container_id));
    }

    let config = match host.config_attribute(&config.container_id) {
        Some(raw) => config.with_attribute_overrides(&raw)?,
        None => config,
    };

    let container_size = host.prepare_container(&config.container_id, config.container_height_px);
    let surface = host.create_surface(&config.container_id, &config.surface_id(), container_size)?;

    Ok(MountPlan {
        config,
        surface,
        container_size,
        inbox: HostInbox::default(),
        generation: 1,
    })
}

/// Write a mount failure to the developer console.
///
/// Runs before any app exists, so bevy's log subscriber is not installed yet.
pub fn report_mount_error(error: &MountError) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::error_1(&format!("Model viewer not started: {error}").into());

    #[cfg(not(target_arch = "wasm32"))]
    error!("Model viewer not started: {error}");
}

/// Native stand-in where the window itself is the container.
#[cfg(not(target_arch = "wasm32"))]
pub struct NativeHost {
    pub width_px: u32,
}

#[cfg(not(target_arch = "wasm32"))]
impl Default for NativeHost {
    fn default() -> Self {
        Self {
            width_px: constants::mount::NATIVE_CONTAINER_WIDTH_PX,
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl MountHost for NativeHost {
    fn has_container(&self, _container_id: &str) -> bool {
        true
    }

    fn config_attribute(&self, _container_id: &str) -> Option<String> {
        None
    }

    fn prepare_container(&mut self, _container_id: &str, height_px: u32) -> UVec2 {
        UVec2::new(self.width_px, height_px)
    }

    fn create_surface(
        &mut self,
        _container_id: &str,
        surface_id: &str,
        size: UVec2,
    ) -> MountResult<RenderSurface> {
        Ok(RenderSurface::detached(surface_id, size))
    }
}
