//! Core mount, lifecycle and app setup.
//!
//! Handles locating the container, building the app for one viewer instance,
//! the per-frame schedule and idempotent teardown for both native and WASM
//! targets.

/// Application setup and plugin configuration for the Bevy engine.
///
/// Creates the full app for a mount and a headless variant without
/// windowing or asset IO.
pub mod app_setup;

/// Per-instance configuration with container attribute overrides.
pub mod config;

/// DOM mount host, page listeners and control buttons.
#[cfg(target_arch = "wasm32")]
pub mod dom_bindings;

/// Queue between page callbacks and the frame loop.
pub mod host_inbox;

/// Active flag, mount generation and the unmount teardown system.
pub mod lifecycle;

/// Container lookup and render surface creation.
pub mod mount;

/// Ordered per-frame system sets gated on the viewer being active.
pub mod render_loop;

/// Platform-specific window configuration for native and WASM builds.
///
/// Binds the window to the mounted canvas on web targets.
pub mod window_config;
