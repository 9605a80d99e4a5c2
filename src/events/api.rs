//! Public API for the event model
//!
//! This module provides the complete public API for the protocol event
//! model. External modules should import from here rather than directly
//! from internal modules.

// Event envelopes and payloads
pub use crate::events::envelope::{
    ApplicationDidLaunch, ApplicationDidTerminate, ApplicationPayload, ButtonPayload, Coordinates,
    DeviceDidConnect, DeviceDidDisconnect, DeviceInfo, DeviceSize, DidReceiveGlobalSettings,
    DidReceiveSettings, GlobalSettingsPayload, KeyDown, KeyUp, PropertyInspectorDidAppear,
    PropertyInspectorDidDisappear, ProtocolEvent, SendToPlugin, SendToPropertyInspector,
    SystemDidWakeUp, TitleParameters, TitleParametersDidChange, UnknownEvent, WillAppear,
    WillDisappear,
};

// Per-call decoding
pub use crate::events::decode::{DecodeCtx, DecodeError};

// Routing resolution
pub use crate::events::routing::RoutingSettings;
