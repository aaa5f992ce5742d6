use bevy::prelude::*;

use crate::engine::core::host_inbox::ViewerCommand;
use crate::engine::loading::model_loader::ModelLoader;
use crate::engine::scene::model::ModelHandle;
use crate::engine::scene::render_surface::RenderSurface;
use crate::engine::scene::scene_context::SceneContext;
use crate::rpc::web_rpc::WebRpcInterface;

#[cfg(target_arch = "wasm32")]
use crate::engine::core::dom_bindings::DomBindings;

/// Liveness of one mounted viewer.
///
/// `active` gates every per-frame viewer system. It starts true at mount and
/// is cleared exactly once at unmount. Async completions carry the
/// `generation` they were started under and are ignored when it is no
/// longer live.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct ViewerLifecycle {
    active: bool,
    generation: u64,
    frame: u64,
}

impl ViewerLifecycle {
    pub fn new(generation: u64) -> Self {
        Self {
            active: true,
            generation,
            frame: 0,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Frames run since mount.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn is_live(&self, generation: u64) -> bool {
        self.active && self.generation == generation
    }

    pub fn advance_frame(&mut self) {
        if self.active {
            self.frame += 1;
        }
    }

    /// Stop the loop. Only the first call returns true.
    pub fn stop(&mut self) -> bool {
        if !self.active {
            return false;
        }
        self.active = false;
        true
    }
}

/// Run condition for all per-frame viewer systems.
pub fn viewer_active(lifecycle: Option<Res<ViewerLifecycle>>) -> bool {
    lifecycle.is_some_and(|lifecycle| lifecycle.is_active())
}

/// Tear the viewer down on the first unmount command: stop the loop, cancel
/// the model load, despawn the scene, release the surface and host listeners,
/// then ask the app to exit.
pub fn handle_unmount_commands(
    mut commands: Commands,
    mut events: EventReader<ViewerCommand>,
    mut lifecycle: ResMut<ViewerLifecycle>,
    scene: Option<Res<SceneContext>>,
    mut model: ResMut<ModelHandle>,
    mut loader: Option<ResMut<ModelLoader>>,
    mut surface: NonSendMut<RenderSurface>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut exit: EventWriter<AppExit>,
    #[cfg(target_arch = "wasm32")] mut bindings: Option<NonSendMut<DomBindings>>,
) {
    let requested = events
        .read()
        .fold(false, |found, event| found || *event == ViewerCommand::Unmount);
    if !requested || !lifecycle.stop() {
        return;
    }

    if let Some(loader) = loader.as_mut() {
        loader.release();
    }

    model.take();
    if let Some(scene) = scene {
        commands.entity(scene.root).despawn();
        commands.entity(scene.camera).despawn();
        commands.remove_resource::<SceneContext>();
    }

    surface.release();

    #[cfg(target_arch = "wasm32")]
    if let Some(bindings) = bindings.as_mut() {
        bindings.release();
    }

    info!(
        "Viewer unmounted after {} frames (generation {})",
        lifecycle.frame(),
        lifecycle.generation()
    );
    rpc_interface.send_notification(
        "viewer_unmounted",
        serde_json::json!({
            "frames": lifecycle.frame()
        }),
    );
    exit.write(AppExit::Success);
}
