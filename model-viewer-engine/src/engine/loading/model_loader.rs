use bevy::asset::LoadState;
use bevy::gltf::Gltf;
use bevy::prelude::*;
use constants::asset::{MODEL_POSITION, MODEL_SCALE};

use crate::engine::core::config::ViewerConfig;
use crate::engine::core::lifecycle::ViewerLifecycle;
use crate::engine::loading::progress::ModelLoadStatus;
use crate::engine::scene::model::{ModelHandle, ModelOrientation, ViewerModel};
use crate::engine::scene::scene_context::SceneContext;
use crate::error::LoadError;
use crate::rpc::web_rpc::WebRpcInterface;

/// In-flight glTF load for the current mount.
#[derive(Resource, Default)]
pub struct ModelLoader {
    handle: Option<Handle<Gltf>>,
    path: String,
    generation: u64,
    reported: bool,
}

impl ModelLoader {
    pub fn is_pending(&self) -> bool {
        self.handle.is_some() && !self.reported
    }

    /// Drop the asset handle, cancelling a load that has not finished.
    pub fn release(&mut self) {
        if self.handle.take().is_some() && !self.reported {
            debug!("Cancelled pending model load {}", self.path);
        }
    }
}

/// Completion of a model load, tagged with the mount generation that started it.
#[derive(Event, Debug, Clone)]
pub struct ModelLoadEvent {
    pub generation: u64,
    pub path: String,
    pub result: Result<Handle<Scene>, LoadError>,
}

/// Kick off the model load. Returns immediately; completion is polled.
pub fn start_model_load(
    mut loader: ResMut<ModelLoader>,
    mut status: ResMut<ModelLoadStatus>,
    asset_server: Res<AssetServer>,
    config: Res<ViewerConfig>,
    lifecycle: Res<ViewerLifecycle>,
) {
    info!("Loading model from: {}", config.model_url);
    loader.handle = Some(asset_server.load(config.model_url.clone()));
    loader.path = config.model_url.clone();
    loader.generation = lifecycle.generation();
    loader.reported = false;
    *status = ModelLoadStatus::Loading {
        path: config.model_url.clone(),
    };
}

/// Report the load outcome once it is known. Runs every frame until then.
pub fn poll_model_load(
    mut loader: ResMut<ModelLoader>,
    asset_server: Res<AssetServer>,
    gltfs: Res<Assets<Gltf>>,
    mut events: EventWriter<ModelLoadEvent>,
) {
    if loader.reported {
        return;
    }
    let Some(handle) = loader.handle.as_ref() else {
        return;
    };

    let path = loader.path.clone();
    let result = match asset_server.get_load_state(handle) {
        Some(LoadState::Loaded) => gltfs
            .get(handle)
            .and_then(|gltf| {
                gltf.default_scene
                    .clone()
                    .or_else(|| gltf.scenes.first().cloned())
            })
            .ok_or_else(|| LoadError::MissingScene(path.clone())),
        Some(LoadState::Failed(error)) => Err(LoadError::Failed {
            path: path.clone(),
            reason: error.to_string(),
        }),
        _ => return,
    };

    loader.reported = true;
    events.write(ModelLoadEvent {
        generation: loader.generation,
        path,
        result,
    });
}

/// Attach a finished model under the scene root, or log why there is none.
///
/// Completions from an unmounted viewer are dropped without touching the scene.
pub fn attach_loaded_model(
    mut commands: Commands,
    mut events: EventReader<ModelLoadEvent>,
    lifecycle: Res<ViewerLifecycle>,
    scene: Option<Res<SceneContext>>,
    mut model: ResMut<ModelHandle>,
    mut status: ResMut<ModelLoadStatus>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for event in events.read() {
        if !lifecycle.is_live(event.generation) {
            debug!("Dropping model load for unmounted viewer: {}", event.path);
            continue;
        }
        let Some(scene) = scene.as_ref() else {
            debug!("Dropping model load without a scene: {}", event.path);
            continue;
        };

        match &event.result {
            Ok(scene_handle) => {
                let entity = commands
                    .spawn((
                        SceneRoot(scene_handle.clone()),
                        Transform::from_translation(MODEL_POSITION)
                            .with_scale(Vec3::splat(MODEL_SCALE)),
                        ModelOrientation::default(),
                        ViewerModel,
                        Name::new("viewer-model"),
                    ))
                    .id();
                commands.entity(scene.root).add_child(entity);

                if let Some(previous) = model.replace(entity) {
                    commands.entity(previous).despawn();
                }
                *status = ModelLoadStatus::Loaded {
                    path: event.path.clone(),
                };

                info!("✓ Model attached: {}", event.path);
                rpc_interface.send_notification(
                    "model_loaded",
                    serde_json::json!({
                        "path": event.path
                    }),
                );
            }
            Err(error) => {
                error!("Error loading model: {error}");
                *status = ModelLoadStatus::Failed(error.clone());
                rpc_interface.send_notification(
                    "model_load_failed",
                    serde_json::json!({
                        "path": event.path,
                        "message": error.to_string()
                    }),
                );
            }
        }
    }
}
