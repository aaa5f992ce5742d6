use bevy::math::Vec3;

/// Uniform scale applied to the loaded model on every axis.
pub const MODEL_SCALE: f32 = 1.8;

/// Model placement relative to the scene root.
pub const MODEL_POSITION: Vec3 = Vec3::ZERO;
