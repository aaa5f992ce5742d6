use bevy::prelude::*;
use constants::controls::SPIN_STEP_RADIANS;
use serde::{Deserialize, Serialize};

use crate::engine::core::host_inbox::ViewerCommand;
use crate::engine::scene::model::{ModelHandle, ModelOrientation};
use crate::rpc::web_rpc::WebRpcInterface;

/// Whether the render loop turns the model each frame.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpinState {
    #[default]
    Spinning,
    Paused,
}

impl SpinState {
    /// Flip the state. Both directions are always allowed.
    pub fn toggle(&mut self) -> SpinState {
        *self = match self {
            Self::Spinning => Self::Paused,
            Self::Paused => Self::Spinning,
        };
        *self
    }

    pub fn is_spinning(&self) -> bool {
        matches!(self, Self::Spinning)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Spinning => "spinning",
            Self::Paused => "paused",
        }
    }
}

pub fn handle_spin_commands(
    mut events: EventReader<ViewerCommand>,
    mut spin: ResMut<SpinState>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for event in events.read() {
        if *event != ViewerCommand::ToggleSpin {
            continue;
        }

        let state = spin.toggle();
        info!("Spin {}", state.as_str());
        rpc_interface.send_notification(
            "spin_changed",
            serde_json::json!({
                "spin": state.as_str()
            }),
        );
    }
}

/// Advance the model by one fixed step around the vertical axis.
pub fn apply_spin(
    spin: Res<SpinState>,
    model: Res<ModelHandle>,
    mut models: Query<&mut ModelOrientation>,
) {
    if !spin.is_spinning() {
        return;
    }
    let Some(entity) = model.get() else {
        return;
    };
    if let Ok(mut orientation) = models.get_mut(entity) {
        orientation.spin_by(SPIN_STEP_RADIANS);
    }
}
