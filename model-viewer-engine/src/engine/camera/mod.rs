//! Orbit camera around the model.
//!
//! Damped rotation from pointer and touch drags, with zoom and pan gates that
//! stay closed for this viewer.

/// Orbit state resource, pointer intake and the per-frame damped update.
pub mod orbit_controls;
