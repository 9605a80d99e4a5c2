//! Handler Trait System
//!
//! The capability contract every bundled handler satisfies. Handlers are
//! discovered purely by the capability names their bundle's entry table
//! exports — no manifest file, no registration call inside the bundle —
//! and must be default-constructible through their entry's factory.
//!
//! # Callback model
//!
//! One method per protocol event kind plus the generic catch-all `event`.
//! Every method has an empty default body, so a handler overrides only the
//! kinds it cares about. Callbacks take `&self` and may run concurrently
//! with each other; a handler owns whatever interior mutability it needs.
//! The shared host context arrives through `bind` exactly once, after
//! construction and before the handler becomes visible to any dispatch.

use crate::events::api::{
    ApplicationDidLaunch, ApplicationDidTerminate, DecodeCtx, DeviceDidConnect,
    DeviceDidDisconnect, DidReceiveGlobalSettings, DidReceiveSettings, KeyDown, KeyUp,
    PropertyInspectorDidAppear, PropertyInspectorDidDisappear, ProtocolEvent, SendToPlugin,
    SendToPropertyInspector, SystemDidWakeUp, TitleParametersDidChange, WillAppear, WillDisappear,
};
use crate::plugin::context::SharedContext;
use crate::plugin::error::HandlerResult;

/// Capability name a bundle entry must export to be discoverable.
pub const HANDLER_CAPABILITY: &str = "deckhost.EventHandler";

/// Event capability contract implemented by bundled handlers.
#[async_trait::async_trait]
pub trait EventHandler: Send + Sync {
    /// Receive the shared host context.
    ///
    /// Called exactly once, immediately after construction and before the
    /// handler is reachable from any task other than the one loading it.
    fn bind(&mut self, _context: SharedContext) {}

    /// Terminal lifecycle hook, invoked exactly once at host teardown.
    async fn on_destroy(&self) {}

    /// Generic catch-all.
    ///
    /// Fires after the kind-specific callback for every delivered event,
    /// and alone for event kinds outside the fixed protocol set.
    async fn event(&self, _event: &ProtocolEvent, _decode: &DecodeCtx) -> HandlerResult<()> {
        Ok(())
    }

    async fn application_did_launch(
        &self,
        _event: &ApplicationDidLaunch,
        _decode: &DecodeCtx,
    ) -> HandlerResult<()> {
        Ok(())
    }

    async fn application_did_terminate(
        &self,
        _event: &ApplicationDidTerminate,
        _decode: &DecodeCtx,
    ) -> HandlerResult<()> {
        Ok(())
    }

    async fn device_did_connect(
        &self,
        _event: &DeviceDidConnect,
        _decode: &DecodeCtx,
    ) -> HandlerResult<()> {
        Ok(())
    }

    async fn device_did_disconnect(
        &self,
        _event: &DeviceDidDisconnect,
        _decode: &DecodeCtx,
    ) -> HandlerResult<()> {
        Ok(())
    }

    async fn did_receive_global_settings(
        &self,
        _event: &DidReceiveGlobalSettings,
        _decode: &DecodeCtx,
    ) -> HandlerResult<()> {
        Ok(())
    }

    async fn did_receive_settings(
        &self,
        _event: &DidReceiveSettings,
        _decode: &DecodeCtx,
    ) -> HandlerResult<()> {
        Ok(())
    }

    async fn key_down(&self, _event: &KeyDown, _decode: &DecodeCtx) -> HandlerResult<()> {
        Ok(())
    }

    async fn key_up(&self, _event: &KeyUp, _decode: &DecodeCtx) -> HandlerResult<()> {
        Ok(())
    }

    async fn property_inspector_did_appear(
        &self,
        _event: &PropertyInspectorDidAppear,
        _decode: &DecodeCtx,
    ) -> HandlerResult<()> {
        Ok(())
    }

    async fn property_inspector_did_disappear(
        &self,
        _event: &PropertyInspectorDidDisappear,
        _decode: &DecodeCtx,
    ) -> HandlerResult<()> {
        Ok(())
    }

    async fn send_to_plugin(&self, _event: &SendToPlugin, _decode: &DecodeCtx) -> HandlerResult<()> {
        Ok(())
    }

    async fn send_to_property_inspector(
        &self,
        _event: &SendToPropertyInspector,
        _decode: &DecodeCtx,
    ) -> HandlerResult<()> {
        Ok(())
    }

    async fn system_did_wake_up(
        &self,
        _event: &SystemDidWakeUp,
        _decode: &DecodeCtx,
    ) -> HandlerResult<()> {
        Ok(())
    }

    async fn title_parameters_did_change(
        &self,
        _event: &TitleParametersDidChange,
        _decode: &DecodeCtx,
    ) -> HandlerResult<()> {
        Ok(())
    }

    async fn will_appear(&self, _event: &WillAppear, _decode: &DecodeCtx) -> HandlerResult<()> {
        Ok(())
    }

    async fn will_disappear(
        &self,
        _event: &WillDisappear,
        _decode: &DecodeCtx,
    ) -> HandlerResult<()> {
        Ok(())
    }
}
