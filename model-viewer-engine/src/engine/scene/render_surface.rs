use bevy::prelude::*;

#[cfg(target_arch = "wasm32")]
use web_sys::HtmlCanvasElement;

/// Drawable target presented each frame.
///
/// On the web this owns the canvas inserted into the mount container, which
/// bevy's window backend renders into. Held as a non-send resource because
/// DOM handles are not thread-safe.
pub struct RenderSurface {
    id: String,
    size: UVec2,
    released: bool,
    #[cfg(target_arch = "wasm32")]
    canvas: HtmlCanvasElement,
}

impl RenderSurface {
    #[cfg(target_arch = "wasm32")]
    pub fn attached(canvas: HtmlCanvasElement, size: UVec2) -> Self {
        let mut surface = Self {
            id: canvas.id(),
            size: UVec2::ZERO,
            released: false,
            canvas,
        };
        surface.resize(size);
        surface
    }

    /// Surface without a DOM element, used by native and headless builds.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn detached(id: impl Into<String>, size: UVec2) -> Self {
        Self {
            id: id.into(),
            size,
            released: false,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn size(&self) -> UVec2 {
        self.size
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Selector bevy's window backend uses to find the canvas.
    pub fn selector(&self) -> String {
        format!("#{}", self.id)
    }

    /// Match the canvas CSS box to the container's client box.
    pub fn resize(&mut self, size: UVec2) {
        if self.released {
            return;
        }
        self.size = size;

        #[cfg(target_arch = "wasm32")]
        {
            // Backing buffer size is owned by winit through the window resolution.
            let style = self.canvas.style();
            let width = format!("{}px", size.x);
            let height = format!("{}px", size.y);
            if style.set_property("width", &width).is_err()
                || style.set_property("height", &height).is_err()
            {
                warn!("Failed to apply surface size to #{}", self.id);
            }
        }
    }

    /// Detach the surface from the page. Returns false when already released.
    pub fn release(&mut self) -> bool {
        if self.released {
            return false;
        }
        self.released = true;

        #[cfg(target_arch = "wasm32")]
        self.canvas.remove();

        info!("Render surface #{} released", self.id);
        true
    }
}
