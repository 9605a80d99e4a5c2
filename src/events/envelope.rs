//! Typed event envelopes
//!
//! One struct per protocol event kind plus the `ProtocolEvent` union the
//! dispatcher consumes. The transport collaborator owns the wire codec and
//! delivers envelopes already typed; settings blobs stay as raw JSON values
//! until a handler decodes them with its per-call decode context.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Title styling delivered with `titleParametersDidChange`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct TitleParameters {
    pub font_family: String,
    pub font_size: u32,
    pub font_style: String,
    pub font_underline: bool,
    pub show_title: bool,
    pub title_alignment: String,
    pub title_color: String,
}

/// Description of a connected device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct DeviceInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub device_type: u32,
    pub size: DeviceSize,
}

/// Button grid dimensions of a device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DeviceSize {
    pub columns: u32,
    pub rows: u32,
}

/// Position of a button instance on the control surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Coordinates {
    pub column: u32,
    pub row: u32,
}

/// Payload common to button-scoped event kinds.
///
/// `settings` is the persisted per-button blob; the routing fields the
/// dispatcher consumes (`pluginFile`, `actionName`) live inside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ButtonPayload {
    pub settings: Value,
    pub coordinates: Option<Coordinates>,
    pub state: Option<u32>,
    pub is_in_multi_action: Option<bool>,
    /// Populated for title change events only
    pub title: Option<String>,
    pub title_parameters: Option<TitleParameters>,
}

impl ButtonPayload {
    /// Payload carrying only a settings blob.
    pub fn with_settings(settings: Value) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }
}

/// Payload of the global settings event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GlobalSettingsPayload {
    pub settings: Value,
}

/// Payload of application launch/terminate events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ApplicationPayload {
    pub application: String,
}

macro_rules! button_event {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
        #[serde(rename_all = "camelCase", default)]
        pub struct $name {
            /// Opaque identifier of the button instance
            pub context: String,
            pub device: Option<String>,
            /// Action name resolved from routing settings at dispatch time
            pub action: Option<String>,
            pub payload: ButtonPayload,
        }
    };
}

button_event!(
    /// A button instance was pressed.
    KeyDown
);
button_event!(
    /// A button instance was released.
    KeyUp
);
button_event!(
    /// A button instance became visible on the surface.
    WillAppear
);
button_event!(
    /// A button instance ceased to be visible on the surface.
    WillDisappear
);
button_event!(
    /// Persisted settings for a button instance were delivered.
    DidReceiveSettings
);
button_event!(
    /// Title or title styling of a button instance changed.
    TitleParametersDidChange
);
button_event!(
    /// The property inspector sent data to the host.
    SendToPlugin
);
button_event!(
    /// The host relayed data towards the property inspector.
    SendToPropertyInspector
);
button_event!(
    /// The property inspector for a button instance appeared.
    PropertyInspectorDidAppear
);
button_event!(
    /// The property inspector for a button instance disappeared.
    PropertyInspectorDidDisappear
);

/// Globally persisted settings were delivered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DidReceiveGlobalSettings {
    pub payload: GlobalSettingsPayload,
}

/// A device was plugged in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct DeviceDidConnect {
    pub device: String,
    pub device_info: Option<DeviceInfo>,
}

/// A device was unplugged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DeviceDidDisconnect {
    pub device: String,
}

/// A monitored application was launched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ApplicationDidLaunch {
    pub payload: ApplicationPayload,
}

/// A monitored application was terminated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ApplicationDidTerminate {
    pub payload: ApplicationPayload,
}

/// The computer woke from sleep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SystemDidWakeUp {}

/// An event kind outside the fixed protocol set.
///
/// Delivered through the generic catch-all only; never re-dispatched as one
/// of the specially handled kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct UnknownEvent {
    /// Kind name as it appeared on the wire
    pub name: String,
    pub context: Option<String>,
    pub payload: Option<Value>,
}

/// Discriminated union over the protocol event kinds.
#[derive(Debug, Clone, PartialEq, strum_macros::IntoStaticStr)]
#[strum(serialize_all = "camelCase")]
pub enum ProtocolEvent {
    ApplicationDidLaunch(ApplicationDidLaunch),
    ApplicationDidTerminate(ApplicationDidTerminate),
    DeviceDidConnect(DeviceDidConnect),
    DeviceDidDisconnect(DeviceDidDisconnect),
    DidReceiveGlobalSettings(DidReceiveGlobalSettings),
    DidReceiveSettings(DidReceiveSettings),
    KeyDown(KeyDown),
    KeyUp(KeyUp),
    PropertyInspectorDidAppear(PropertyInspectorDidAppear),
    PropertyInspectorDidDisappear(PropertyInspectorDidDisappear),
    SendToPlugin(SendToPlugin),
    SendToPropertyInspector(SendToPropertyInspector),
    SystemDidWakeUp(SystemDidWakeUp),
    TitleParametersDidChange(TitleParametersDidChange),
    WillAppear(WillAppear),
    WillDisappear(WillDisappear),
    Unknown(UnknownEvent),
}

impl ProtocolEvent {
    /// Protocol name of the event kind.
    pub fn kind(&self) -> &'static str {
        self.into()
    }

    /// Settings payload consulted for routing, for kinds that carry one.
    pub fn routing_settings(&self) -> Option<&Value> {
        match self {
            ProtocolEvent::KeyDown(e) => Some(&e.payload.settings),
            ProtocolEvent::KeyUp(e) => Some(&e.payload.settings),
            ProtocolEvent::WillAppear(e) => Some(&e.payload.settings),
            ProtocolEvent::WillDisappear(e) => Some(&e.payload.settings),
            ProtocolEvent::DidReceiveSettings(e) => Some(&e.payload.settings),
            ProtocolEvent::TitleParametersDidChange(e) => Some(&e.payload.settings),
            ProtocolEvent::SendToPlugin(e) => Some(&e.payload.settings),
            ProtocolEvent::SendToPropertyInspector(e) => Some(&e.payload.settings),
            ProtocolEvent::PropertyInspectorDidAppear(e) => Some(&e.payload.settings),
            ProtocolEvent::PropertyInspectorDidDisappear(e) => Some(&e.payload.settings),
            ProtocolEvent::DidReceiveGlobalSettings(e) => Some(&e.payload.settings),
            _ => None,
        }
    }

    /// Stamp the action name resolved from routing settings.
    pub(crate) fn set_action(&mut self, action: Option<String>) {
        match self {
            ProtocolEvent::KeyDown(e) => e.action = action,
            ProtocolEvent::KeyUp(e) => e.action = action,
            ProtocolEvent::WillAppear(e) => e.action = action,
            ProtocolEvent::WillDisappear(e) => e.action = action,
            ProtocolEvent::DidReceiveSettings(e) => e.action = action,
            ProtocolEvent::TitleParametersDidChange(e) => e.action = action,
            ProtocolEvent::SendToPlugin(e) => e.action = action,
            ProtocolEvent::SendToPropertyInspector(e) => e.action = action,
            ProtocolEvent::PropertyInspectorDidAppear(e) => e.action = action,
            ProtocolEvent::PropertyInspectorDidDisappear(e) => e.action = action,
            _ => {}
        }
    }

    /// Action name stamped on the envelope, when the kind carries one.
    pub fn action(&self) -> Option<&str> {
        match self {
            ProtocolEvent::KeyDown(e) => e.action.as_deref(),
            ProtocolEvent::KeyUp(e) => e.action.as_deref(),
            ProtocolEvent::WillAppear(e) => e.action.as_deref(),
            ProtocolEvent::WillDisappear(e) => e.action.as_deref(),
            ProtocolEvent::DidReceiveSettings(e) => e.action.as_deref(),
            ProtocolEvent::TitleParametersDidChange(e) => e.action.as_deref(),
            ProtocolEvent::SendToPlugin(e) => e.action.as_deref(),
            ProtocolEvent::SendToPropertyInspector(e) => e.action.as_deref(),
            ProtocolEvent::PropertyInspectorDidAppear(e) => e.action.as_deref(),
            ProtocolEvent::PropertyInspectorDidDisappear(e) => e.action.as_deref(),
            _ => None,
        }
    }
}
