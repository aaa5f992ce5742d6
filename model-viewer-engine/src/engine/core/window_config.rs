use bevy::prelude::*;
use bevy::window::{PresentMode, WindowResolution};

use crate::engine::scene::render_surface::RenderSurface;

/// Window bound to the mounted surface.
///
/// On the web the window renders into the canvas created at mount and never
/// resizes itself from the parent; container resizes arrive through the
/// inbox instead.
pub fn create_window_config(surface: &RenderSurface) -> Window {
    let size = surface.size().max(UVec2::ONE);
    let resolution = WindowResolution::new(size.x as f32, size.y as f32);

    #[cfg(target_arch = "wasm32")]
    {
        Window {
            canvas: Some(surface.selector()),
            fit_canvas_to_parent: false,
            prevent_default_event_handling: false,
            transparent: true,
            resolution,
            present_mode: PresentMode::AutoVsync,
            ..default()
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        Window {
            title: "Model Viewer".to_string(),
            resolution,
            present_mode: PresentMode::AutoVsync,
            ..default()
        }
    }
}
