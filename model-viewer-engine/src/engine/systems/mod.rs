//! Per-frame viewer behaviour driven by host commands.

/// Container resize handling for camera aspect and surface size.
pub mod resize;

/// Spin state and the fixed per-frame rotation step.
pub mod spin;

/// Front, side and top orientation presets.
///
/// Applied directly to the model, bypassing damping.
pub mod viewpoints;
