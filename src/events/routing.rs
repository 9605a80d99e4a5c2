//! Routing fields embedded in button settings
//!
//! The dispatcher resolves which bundle receives a button-scoped event from
//! two optional fields of the event's settings payload. Malformed settings
//! resolve to empty routing, which drops the event at the call site.

use crate::events::decode::DecodeCtx;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Routing record extracted from a settings payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct RoutingSettings {
    /// Path of the bundle the button instance is bound to
    pub plugin_file: Option<String>,

    /// Name of the action within the bundle
    pub action_name: Option<String>,
}

impl RoutingSettings {
    /// Extract routing fields from a settings payload.
    pub fn from_settings(decode: &DecodeCtx, settings: &Value) -> Self {
        decode.decode(settings).unwrap_or_default()
    }
}
