use bevy::{
    input::mouse::{MouseMotion, MouseWheel},
    input::touch::Touches,
    prelude::*,
};
use constants::controls::{
    DAMPING_FACTOR, ENABLE_DAMPING, ENABLE_PAN, ENABLE_ZOOM, PAN_SPEED, POLAR_EPSILON,
    ROTATE_SPEED, ZOOM_SPEED,
};
use constants::render_settings::{CAMERA_POSITION, CAMERA_TARGET};
use std::f32::consts::{PI, TAU};

use crate::engine::scene::render_surface::RenderSurface;

/// Marker for the camera driven by [`OrbitControls`].
#[derive(Component)]
pub struct OrbitCamera;

/// Damped orbit of the camera around a fixed target.
///
/// Angles are spherical coordinates of the camera offset from the target:
/// `azimuth` around +Y measured from +Z, `polar` down from +Y. Pointer input
/// accumulates into the pending deltas; [`OrbitControls::update`] applies a
/// damped share of them once per frame.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct OrbitControls {
    pub target: Vec3,
    pub azimuth: f32,
    pub polar: f32,
    pub radius: f32,
    pub delta_azimuth: f32,
    pub delta_polar: f32,
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub enable_zoom: bool,
    pub enable_pan: bool,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
}

impl OrbitControls {
    pub fn from_position(position: Vec3, target: Vec3) -> Self {
        let offset = position - target;
        let radius = offset.length();
        let polar = if radius > 0.0 {
            (offset.y / radius).clamp(-1.0, 1.0).acos()
        } else {
            0.0
        };

        Self {
            target,
            azimuth: offset.x.atan2(offset.z),
            polar,
            radius,
            delta_azimuth: 0.0,
            delta_polar: 0.0,
            enable_damping: ENABLE_DAMPING,
            damping_factor: DAMPING_FACTOR,
            enable_zoom: ENABLE_ZOOM,
            enable_pan: ENABLE_PAN,
            rotate_speed: ROTATE_SPEED,
            zoom_speed: ZOOM_SPEED,
            pan_speed: PAN_SPEED,
        }
    }

    /// Queue rotation for a pointer drag of `delta` pixels over a surface
    /// `surface_height` pixels tall. A full-height drag is one turn.
    pub fn rotate_by_pointer(&mut self, delta: Vec2, surface_height: f32) {
        if surface_height <= 0.0 {
            return;
        }
        self.delta_azimuth -= TAU * delta.x / surface_height * self.rotate_speed;
        self.delta_polar -= TAU * delta.y / surface_height * self.rotate_speed;
    }

    /// Dolly toward the target. Returns false when zoom is disabled.
    pub fn zoom(&mut self, scroll: f32) -> bool {
        if !self.enable_zoom || scroll == 0.0 {
            return false;
        }
        let scale = 0.95_f32.powf(self.zoom_speed * scroll.signum());
        self.radius *= scale;
        true
    }

    /// Move the target in the camera's screen plane. Returns false when
    /// panning is disabled.
    pub fn pan(&mut self, delta: Vec2, surface_height: f32) -> bool {
        if !self.enable_pan || surface_height <= 0.0 {
            return false;
        }
        let rotation = Quat::from_rotation_y(self.azimuth);
        let right = rotation * Vec3::X;
        let up = Vec3::Y;
        let scale = self.radius / surface_height * self.pan_speed;
        self.target += right * -delta.x * scale + up * delta.y * scale;
        true
    }

    /// Advance the orbit by one frame and return the camera position.
    pub fn update(&mut self) -> Vec3 {
        if self.enable_damping {
            self.azimuth += self.delta_azimuth * self.damping_factor;
            self.polar += self.delta_polar * self.damping_factor;
        } else {
            self.azimuth += self.delta_azimuth;
            self.polar += self.delta_polar;
        }

        self.azimuth = wrap_angle(self.azimuth);
        self.polar = self.polar.clamp(POLAR_EPSILON, PI - POLAR_EPSILON);

        if self.enable_damping {
            self.delta_azimuth *= 1.0 - self.damping_factor;
            self.delta_polar *= 1.0 - self.damping_factor;
        } else {
            self.delta_azimuth = 0.0;
            self.delta_polar = 0.0;
        }

        self.position()
    }

    pub fn position(&self) -> Vec3 {
        let sin_polar = self.polar.sin();
        self.target
            + self.radius
                * Vec3::new(
                    sin_polar * self.azimuth.sin(),
                    self.polar.cos(),
                    sin_polar * self.azimuth.cos(),
                )
    }

    pub fn camera_transform(&self) -> Transform {
        Transform::from_translation(self.position()).looking_at(self.target, Vec3::Y)
    }
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self::from_position(CAMERA_POSITION, CAMERA_TARGET)
    }
}

/// Keep an angle in `(-π, π]`.
fn wrap_angle(angle: f32) -> f32 {
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped == -PI { PI } else { wrapped }
}

/// Feed pointer and touch drags into the orbit controls.
///
/// Primary button or single-finger drags rotate. Wheel and secondary drags
/// go through the zoom and pan gates, which this viewer keeps closed.
pub fn orbit_pointer_input(
    mut controls: ResMut<OrbitControls>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut scroll_events: EventReader<MouseWheel>,
    touches: Res<Touches>,
    surface: NonSend<RenderSurface>,
) {
    let surface_height = surface.size().y as f32;
    let mouse_delta: Vec2 = mouse_motion.read().map(|motion| motion.delta).sum();

    if mouse_delta != Vec2::ZERO {
        if mouse_button.pressed(MouseButton::Left) {
            controls.rotate_by_pointer(mouse_delta, surface_height);
        } else if mouse_button.pressed(MouseButton::Right)
            || mouse_button.pressed(MouseButton::Middle)
        {
            controls.pan(mouse_delta, surface_height);
        }
    }

    let mut active_touches = touches.iter();
    if let (Some(touch), None) = (active_touches.next(), active_touches.next()) {
        let delta = touch.delta();
        if delta != Vec2::ZERO {
            controls.rotate_by_pointer(delta, surface_height);
        }
    }

    for scroll in scroll_events.read() {
        controls.zoom(scroll.y);
    }
}

/// Apply the damped orbit to the camera transform.
pub fn update_orbit_controls(
    mut controls: ResMut<OrbitControls>,
    mut cameras: Query<&mut Transform, With<OrbitCamera>>,
) {
    controls.update();
    let target_transform = controls.camera_transform();
    for mut transform in &mut cameras {
        *transform = target_transform;
    }
}
