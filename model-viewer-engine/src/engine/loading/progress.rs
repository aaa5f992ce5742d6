use bevy::prelude::*;

use crate::error::LoadError;

/// Where the single model load of this mount stands.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub enum ModelLoadStatus {
    #[default]
    NotStarted,
    Loading {
        path: String,
    },
    Loaded {
        path: String,
    },
    Failed(LoadError),
}

impl ModelLoadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::Loading { .. } => "loading",
            Self::Loaded { .. } => "loaded",
            Self::Failed(_) => "failed",
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Loaded { .. } | Self::Failed(_))
    }
}
