//! Event Dispatcher
//!
//! Receives typed protocol events from the transport and fans each one out
//! to the handlers it is scoped to. Device-, application- and system-scoped
//! kinds broadcast to every loaded bundle; button-scoped kinds route through
//! the bundle path embedded in their settings payload, with the two
//! appearance kinds acting as the sole lazy-load triggers.
//!
//! The dispatch path never blocks on handler completion: per-handler work is
//! handed to spawned tasks, two independent submissions per handler — the
//! kind-specific callback, then the generic catch-all — each with its own
//! fresh decode context. Ordering is guaranteed only as submission order.

use crate::events::api::{DecodeCtx, ProtocolEvent, RoutingSettings};
use crate::plugin::error::HandlerResult;
use crate::plugin::registry::HandlerRegistry;
use crate::plugin::traits::EventHandler;
use crate::plugin::types::HandlerSet;
use std::path::PathBuf;
use std::sync::Arc;

/// Fans protocol events out to the resolved handler sets.
pub struct EventDispatcher {
    registry: Arc<HandlerRegistry>,
}

/// Which callbacks a submission covers.
enum Delivery {
    /// Kind-specific callback followed by the generic catch-all
    Full,
    /// Generic catch-all only (kinds outside the fixed protocol set)
    GenericOnly,
}

impl EventDispatcher {
    pub fn new(registry: Arc<HandlerRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<HandlerRegistry> {
        &self.registry
    }

    /// Deliver one protocol event.
    ///
    /// Awaits only registry resolution (and, for appearance kinds, the lazy
    /// load) — never the handlers themselves.
    pub async fn dispatch(&self, event: ProtocolEvent) {
        match &event {
            ProtocolEvent::DeviceDidConnect(_)
            | ProtocolEvent::DeviceDidDisconnect(_)
            | ProtocolEvent::ApplicationDidLaunch(_)
            | ProtocolEvent::ApplicationDidTerminate(_)
            | ProtocolEvent::SystemDidWakeUp(_) => self.broadcast(event, Delivery::Full).await,
            ProtocolEvent::Unknown(_) => self.broadcast(event, Delivery::GenericOnly).await,
            _ => self.route(event).await,
        }
    }

    /// Deliver to every currently loaded bundle.
    async fn broadcast(&self, event: ProtocolEvent, delivery: Delivery) {
        let event = Arc::new(event);
        for set in self.registry.loaded_sets().await {
            submit_to_set(&set, &event, &delivery);
        }
    }

    /// Resolve the routing key from the event's settings and deliver to the
    /// bundle it names.
    async fn route(&self, mut event: ProtocolEvent) {
        let decode = DecodeCtx::new();
        let routing = match event.routing_settings() {
            Some(settings) => RoutingSettings::from_settings(&decode, settings),
            None => RoutingSettings::default(),
        };

        let Some(plugin_file) = routing.plugin_file else {
            log::debug!(
                "dropping {} event without a bundle path in its settings",
                event.kind()
            );
            return;
        };
        event.set_action(routing.action_name);

        let path = PathBuf::from(plugin_file);
        let set = if matches!(
            event,
            ProtocolEvent::WillAppear(_) | ProtocolEvent::WillDisappear(_)
        ) {
            // appearance kinds are the sole lazy-load triggers
            Some(self.registry.ensure_loaded(&path).await)
        } else {
            self.registry.handlers_for(&path).await
        };

        let Some(set) = set else {
            log::debug!(
                "no loaded bundle {} for {} event",
                path.display(),
                event.kind()
            );
            return;
        };

        let event = Arc::new(event);
        submit_to_set(&set, &event, &Delivery::Full);
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("registry", &self.registry)
            .finish()
    }
}

/// Submit the per-handler calls for every handler in the set.
///
/// The caller never awaits the spawned tasks; failed callbacks surface
/// through the log rather than being silently discarded.
fn submit_to_set(set: &Arc<HandlerSet>, event: &Arc<ProtocolEvent>, delivery: &Delivery) {
    for handler in set.handlers() {
        if matches!(delivery, Delivery::Full) {
            let handler = Arc::clone(handler);
            let event = Arc::clone(event);
            let bundle = set.path().to_path_buf();
            tokio::spawn(async move {
                let decode = DecodeCtx::new();
                if let Err(err) = deliver_specific(handler.as_ref(), &event, &decode).await {
                    log::warn!(
                        "handler callback for {} failed in bundle {}: {}",
                        event.kind(),
                        bundle.display(),
                        err
                    );
                }
            });
        }

        let handler = Arc::clone(handler);
        let event = Arc::clone(event);
        let bundle = set.path().to_path_buf();
        tokio::spawn(async move {
            let decode = DecodeCtx::new();
            if let Err(err) = handler.event(&event, &decode).await {
                log::warn!(
                    "generic callback for {} failed in bundle {}: {}",
                    event.kind(),
                    bundle.display(),
                    err
                );
            }
        });
    }
}

/// Route an envelope to its kind-specific callback.
async fn deliver_specific(
    handler: &dyn EventHandler,
    event: &ProtocolEvent,
    decode: &DecodeCtx,
) -> HandlerResult<()> {
    match event {
        ProtocolEvent::ApplicationDidLaunch(e) => handler.application_did_launch(e, decode).await,
        ProtocolEvent::ApplicationDidTerminate(e) => {
            handler.application_did_terminate(e, decode).await
        }
        ProtocolEvent::DeviceDidConnect(e) => handler.device_did_connect(e, decode).await,
        ProtocolEvent::DeviceDidDisconnect(e) => handler.device_did_disconnect(e, decode).await,
        ProtocolEvent::DidReceiveGlobalSettings(e) => {
            handler.did_receive_global_settings(e, decode).await
        }
        ProtocolEvent::DidReceiveSettings(e) => handler.did_receive_settings(e, decode).await,
        ProtocolEvent::KeyDown(e) => handler.key_down(e, decode).await,
        ProtocolEvent::KeyUp(e) => handler.key_up(e, decode).await,
        ProtocolEvent::PropertyInspectorDidAppear(e) => {
            handler.property_inspector_did_appear(e, decode).await
        }
        ProtocolEvent::PropertyInspectorDidDisappear(e) => {
            handler.property_inspector_did_disappear(e, decode).await
        }
        ProtocolEvent::SendToPlugin(e) => handler.send_to_plugin(e, decode).await,
        ProtocolEvent::SendToPropertyInspector(e) => {
            handler.send_to_property_inspector(e, decode).await
        }
        ProtocolEvent::SystemDidWakeUp(e) => handler.system_did_wake_up(e, decode).await,
        ProtocolEvent::TitleParametersDidChange(e) => {
            handler.title_parameters_did_change(e, decode).await
        }
        ProtocolEvent::WillAppear(e) => handler.will_appear(e, decode).await,
        ProtocolEvent::WillDisappear(e) => handler.will_disappear(e, decode).await,
        // kinds outside the fixed set have no specific callback
        ProtocolEvent::Unknown(_) => Ok(()),
    }
}
