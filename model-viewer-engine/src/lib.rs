//! Interactive 3D model viewer embedded in a host page.
//!
//! A glTF model is shown on a transparent canvas inside a container element,
//! spins until paused, snaps to preset viewpoints and can be orbited with
//! damped pointer drags. Each mount runs its own Bevy app and is torn down
//! through [`engine::core::lifecycle`].

pub mod engine;
pub mod error;
pub mod rpc;
