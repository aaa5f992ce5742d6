use bevy::prelude::*;
use bevy::render::camera::ClearColorConfig;
use constants::render_settings::{
    AMBIENT_BRIGHTNESS, CAMERA_FAR, CAMERA_FOV_DEGREES, CAMERA_NEAR, MSAA_SAMPLES,
};

use crate::engine::camera::orbit_controls::{OrbitCamera, OrbitControls};
use crate::engine::scene::render_surface::RenderSurface;
use crate::engine::systems::resize::aspect_ratio;

/// Entities making up one mounted viewer's scene.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneContext {
    /// Scene graph root the model attaches under.
    pub root: Entity,
    pub camera: Entity,
}

/// Marker for the scene graph root node.
#[derive(Component)]
pub struct ViewerSceneRoot;

/// Build the scene for a fresh mount: root node, camera, ambient light and a
/// transparent clear colour so the host page shows through.
pub fn initialize_scene_context(
    mut commands: Commands,
    controls: Res<OrbitControls>,
    surface: NonSend<RenderSurface>,
    existing: Option<Res<SceneContext>>,
) {
    if let Some(previous) = existing {
        warn!("Scene context re-initialised, replacing previous scene");
        commands.entity(previous.root).despawn();
        commands.entity(previous.camera).despawn();
    }

    let root = commands
        .spawn((
            ViewerSceneRoot,
            Name::new("viewer-root"),
            Transform::default(),
            Visibility::default(),
        ))
        .id();

    let camera = commands
        .spawn((
            Camera3d::default(),
            Camera {
                clear_color: ClearColorConfig::Custom(Color::NONE),
                ..default()
            },
            Projection::Perspective(create_projection(surface.size())),
            controls.camera_transform(),
            create_msaa(),
            OrbitCamera,
            Name::new("viewer-camera"),
        ))
        .id();

    commands.insert_resource(ClearColor(Color::NONE));
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: AMBIENT_BRIGHTNESS,
        ..default()
    });
    commands.insert_resource(SceneContext { root, camera });

    info!(
        "Scene initialised on #{} at {}x{}",
        surface.id(),
        surface.size().x,
        surface.size().y
    );
}

fn create_projection(size: UVec2) -> PerspectiveProjection {
    PerspectiveProjection {
        fov: CAMERA_FOV_DEGREES.to_radians(),
        near: CAMERA_NEAR,
        far: CAMERA_FAR,
        aspect_ratio: aspect_ratio(size).unwrap_or(1.0),
    }
}

fn create_msaa() -> Msaa {
    match MSAA_SAMPLES {
        8 => Msaa::Sample8,
        4 => Msaa::Sample4,
        2 => Msaa::Sample2,
        _ => Msaa::Off,
    }
}
