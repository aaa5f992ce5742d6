use bevy::math::EulerRot;
use bevy::prelude::*;
use std::f32::consts::TAU;

/// The loaded model node, if any. At most one is live; a replacement
/// returns the previous entity so the caller can despawn it.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ModelHandle(Option<Entity>);

impl ModelHandle {
    pub fn get(&self) -> Option<Entity> {
        self.0
    }

    pub fn is_present(&self) -> bool {
        self.0.is_some()
    }

    pub fn replace(&mut self, entity: Entity) -> Option<Entity> {
        self.0.replace(entity)
    }

    pub fn take(&mut self) -> Option<Entity> {
        self.0.take()
    }
}

/// XYZ Euler orientation of the model node. The transform rotation is
/// derived from it once per frame.
#[derive(Component, Debug, Default, Clone, Copy, PartialEq)]
pub struct ModelOrientation(pub Vec3);

impl ModelOrientation {
    /// Rotate around the vertical axis, keeping the angle in `[0, 2π)`.
    pub fn spin_by(&mut self, radians: f32) {
        self.0.y = (self.0.y + radians).rem_euclid(TAU);
    }

    pub fn set(&mut self, orientation: Vec3) {
        self.0 = orientation;
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.0.x, self.0.y, self.0.z)
    }
}

/// Marker for the model node spawned from the glTF scene.
#[derive(Component)]
pub struct ViewerModel;

/// Copy model orientations into their transforms before rendering.
pub fn sync_model_orientation(
    mut models: Query<(&ModelOrientation, &mut Transform), Changed<ModelOrientation>>,
) {
    for (orientation, mut transform) in &mut models {
        transform.rotation = orientation.rotation();
    }
}
