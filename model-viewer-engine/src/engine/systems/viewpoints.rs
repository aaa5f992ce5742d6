use bevy::prelude::*;
use constants::viewpoints::{
    FRONT_VIEW, FRONT_VIEW_LABEL, SIDE_VIEW, SIDE_VIEW_LABEL, TOP_VIEW, TOP_VIEW_LABEL,
};
use serde::{Deserialize, Serialize};

use crate::engine::core::host_inbox::ViewerCommand;
use crate::engine::scene::model::{ModelHandle, ModelOrientation};

/// Named model orientations offered by the viewpoint buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Viewpoint {
    Front,
    Side,
    Top,
}

impl Viewpoint {
    pub const ALL: [Viewpoint; 3] = [Viewpoint::Front, Viewpoint::Side, Viewpoint::Top];

    /// Convert string identifier to viewpoint for RPC compatibility.
    pub fn from_string(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "front" => Some(Self::Front),
            "side" => Some(Self::Side),
            "top" => Some(Self::Top),
            _ => None,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Front => "front",
            Self::Side => "side",
            Self::Top => "top",
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Front => FRONT_VIEW_LABEL,
            Self::Side => SIDE_VIEW_LABEL,
            Self::Top => TOP_VIEW_LABEL,
        }
    }

    pub const fn orientation(&self) -> Vec3 {
        match self {
            Self::Front => FRONT_VIEW,
            Self::Side => SIDE_VIEW,
            Self::Top => TOP_VIEW,
        }
    }
}

/// Set the model orientation directly, bypassing damping and spin.
///
/// Returns false without touching anything when no model is loaded yet.
pub fn apply_preset(
    orientation: Vec3,
    model: &ModelHandle,
    models: &mut Query<&mut ModelOrientation>,
) -> bool {
    let Some(entity) = model.get() else {
        return false;
    };
    let Ok(mut current) = models.get_mut(entity) else {
        return false;
    };
    current.set(orientation);
    true
}

pub fn handle_viewpoint_commands(
    mut events: EventReader<ViewerCommand>,
    model: Res<ModelHandle>,
    mut models: Query<&mut ModelOrientation>,
) {
    for event in events.read() {
        let ViewerCommand::ApplyViewpoint(viewpoint) = event else {
            continue;
        };

        if apply_preset(viewpoint.orientation(), &model, &mut models) {
            info!("Viewpoint applied: {}", viewpoint.as_str());
        } else {
            debug!("Viewpoint {} ignored, model not loaded", viewpoint.as_str());
        }
    }
}
