/// Orbit damping is always on for this viewer.
pub const ENABLE_DAMPING: bool = true;

/// Fraction of the pending orbit delta applied each frame.
pub const DAMPING_FACTOR: f32 = 0.25;

pub const ENABLE_ZOOM: bool = false;
pub const ENABLE_PAN: bool = false;

pub const ROTATE_SPEED: f32 = 1.0;
pub const ZOOM_SPEED: f32 = 1.0;
pub const PAN_SPEED: f32 = 1.0;

/// Keeps the polar angle away from the poles so `looking_at` stays defined.
pub const POLAR_EPSILON: f32 = 0.000_001;

/// Vertical-axis rotation added to the model each frame while spinning, in radians.
pub const SPIN_STEP_RADIANS: f32 = 0.01;
