use bevy::math::Vec3;

/// Vertical field of view of the perspective camera, in degrees.
pub const CAMERA_FOV_DEGREES: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;

/// Initial camera placement. The camera orbits around `CAMERA_TARGET`.
pub const CAMERA_POSITION: Vec3 = Vec3::new(-4.05, 3.37, -6.02);
pub const CAMERA_TARGET: Vec3 = Vec3::ZERO;

/// Brightness of the single white ambient light.
pub const AMBIENT_BRIGHTNESS: f32 = 1000.0;

/// Multisample count used for the antialiased surface.
pub const MSAA_SAMPLES: u32 = 4;
