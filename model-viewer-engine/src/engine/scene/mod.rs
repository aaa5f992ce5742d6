//! Scene graph owned by one mounted viewer.
//!
//! The render surface, the root node with camera and lighting, and the model
//! node spawned from the loaded glTF scene.

/// Model node handle and its Euler orientation.
pub mod model;

/// Drawable canvas inserted into the mount container.
///
/// Resized with the container and removed from the page at unmount.
pub mod render_surface;

/// Root node, perspective camera, ambient light and transparent clear colour.
pub mod scene_context;
