use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::engine::camera::orbit_controls::OrbitCamera;
use crate::engine::scene::render_surface::RenderSurface;

#[cfg(not(target_arch = "wasm32"))]
use bevy::window::WindowResized;

/// The container's client box changed.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ContainerResized {
    pub size: UVec2,
}

/// Camera aspect for a client box, `None` while the box is degenerate.
pub fn aspect_ratio(size: UVec2) -> Option<f32> {
    if size.x == 0 || size.y == 0 {
        return None;
    }
    Some(size.x as f32 / size.y as f32)
}

/// Keep camera projection and surface in step with the container.
///
/// Only the latest size of the frame matters; earlier ones are skipped.
pub fn handle_viewport_resize(
    mut events: EventReader<ContainerResized>,
    mut cameras: Query<&mut Projection, With<OrbitCamera>>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
    mut surface: NonSendMut<RenderSurface>,
) {
    let Some(latest) = events.read().last().copied() else {
        return;
    };
    let Some(aspect) = aspect_ratio(latest.size) else {
        debug!("Ignoring resize to empty container {:?}", latest.size);
        return;
    };

    for mut projection in &mut cameras {
        if let Projection::Perspective(ref mut perspective) = *projection {
            perspective.aspect_ratio = aspect;
        }
    }

    surface.resize(latest.size);

    if let Ok(mut window) = windows.single_mut() {
        let (width, height) = (latest.size.x as f32, latest.size.y as f32);
        if window.resolution.width() != width || window.resolution.height() != height {
            window.resolution.set(width, height);
        }
    }
}

/// Native builds have no container; the window is the container.
#[cfg(not(target_arch = "wasm32"))]
pub fn forward_window_resizes(
    mut window_events: EventReader<WindowResized>,
    mut resizes: EventWriter<ContainerResized>,
) {
    for event in window_events.read() {
        resizes.write(ContainerResized {
            size: UVec2::new(event.width.round() as u32, event.height.round() as u32),
        });
    }
}
