use bevy::prelude::*;
use constants::mount::{
    CONTAINER_HEIGHT_PX, CONTAINER_ID, DEFAULT_LOG_FILTER, MODEL_URL, SURFACE_ID_SUFFIX,
};
use serde::{Deserialize, Serialize};

use crate::error::MountError;

/// Per-instance viewer configuration.
///
/// Defaults come from the `constants` crate. Hosts can override any field
/// through a JSON `data-viewer-config` attribute on the container.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub container_id: String,
    pub model_url: String,
    pub container_height_px: u32,
    pub log_filter: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            container_id: CONTAINER_ID.to_string(),
            model_url: MODEL_URL.to_string(),
            container_height_px: CONTAINER_HEIGHT_PX,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl ViewerConfig {
    /// Apply overrides from the container's config attribute.
    ///
    /// Fields missing from the JSON keep their current value. The container id
    /// always stays the one the attribute was read from.
    pub fn with_attribute_overrides(self, raw: &str) -> Result<Self, MountError> {
        let invalid = |reason: String| MountError::InvalidConfig {
            container: self.container_id.clone(),
            reason,
        };

        let overrides: serde_json::Value =
            serde_json::from_str(raw).map_err(|e| invalid(e.to_string()))?;
        let serde_json::Value::Object(overrides) = overrides else {
            return Err(invalid("expected a JSON object".to_string()));
        };

        let mut merged = serde_json::to_value(&self).map_err(|e| invalid(e.to_string()))?;
        if let serde_json::Value::Object(ref mut fields) = merged {
            for (key, value) in overrides {
                fields.insert(key, value);
            }
        }

        let mut config: ViewerConfig =
            serde_json::from_value(merged).map_err(|e| invalid(e.to_string()))?;
        config.container_id = self.container_id;
        Ok(config)
    }

    /// Id of the canvas inserted into the container.
    pub fn surface_id(&self) -> String {
        format!("{}{}", self.container_id, SURFACE_ID_SUFFIX)
    }
}
