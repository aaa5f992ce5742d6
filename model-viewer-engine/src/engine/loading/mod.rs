//! Asynchronous model loading.
//!
//! A single glTF load is started at mount and polled each frame. Completions
//! carry the mount generation so late results after unmount are dropped.

/// Load start, completion polling and attachment under the scene root.
pub mod model_loader;

/// Load status resource reported through `get_viewer_state`.
pub mod progress;
