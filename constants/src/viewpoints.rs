use bevy::math::Vec3;
use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

/// Model orientations as XYZ Euler triples, applied without damping.
pub const FRONT_VIEW: Vec3 = Vec3::new(0.0, 0.0, 0.0);
pub const SIDE_VIEW: Vec3 = Vec3::new(0.0, FRAC_PI_2, 0.0);
pub const TOP_VIEW: Vec3 = Vec3::new(-FRAC_PI_4, FRAC_PI_4, 0.0);

pub const FRONT_VIEW_LABEL: &str = "Front View";
pub const SIDE_VIEW_LABEL: &str = "Side View";
pub const TOP_VIEW_LABEL: &str = "Top View";
pub const SPIN_TOGGLE_LABEL: &str = "Toggle Spin";
