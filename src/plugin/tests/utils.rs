//! Shared fixtures for handler bundle tests

use crate::core::options::HostOptions;
use crate::events::api::{
    ButtonPayload, DecodeCtx, DeviceDidConnect, DidReceiveGlobalSettings, DidReceiveSettings,
    KeyDown, KeyUp, ProtocolEvent, PropertyInspectorDidAppear, SystemDidWakeUp, WillAppear,
    WillDisappear,
};
use crate::plugin::context::SharedContext;
use crate::plugin::scanner::BundleScanner;
use crate::plugin::traits::EventHandler;
use crate::plugin::types::{HandlerEntry, ScanOutcome};
use crate::transport::api::{Connection, ConnectionManager};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

/// A delivered callback observed by a `RecordingHandler`.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Delivered {
    pub handler: String,
    pub callback: &'static str,
    pub action: Option<String>,
}

/// Handler reporting every callback over a channel.
pub(crate) struct RecordingHandler {
    pub name: String,
    pub sender: UnboundedSender<Delivered>,
    pub destroyed: Arc<AtomicUsize>,
    pub bound: Arc<AtomicUsize>,
}

impl RecordingHandler {
    fn record(&self, callback: &'static str, action: Option<&str>) {
        let _ = self.sender.send(Delivered {
            handler: self.name.clone(),
            callback,
            action: action.map(|s| s.to_string()),
        });
    }
}

#[async_trait::async_trait]
impl EventHandler for RecordingHandler {
    fn bind(&mut self, _context: SharedContext) {
        self.bound.fetch_add(1, Ordering::SeqCst);
    }

    async fn on_destroy(&self) {
        self.destroyed.fetch_add(1, Ordering::SeqCst);
    }

    async fn event(
        &self,
        event: &ProtocolEvent,
        _decode: &DecodeCtx,
    ) -> crate::plugin::error::HandlerResult<()> {
        self.record("event", event.action());
        Ok(())
    }

    async fn will_appear(
        &self,
        event: &WillAppear,
        _decode: &DecodeCtx,
    ) -> crate::plugin::error::HandlerResult<()> {
        self.record("willAppear", event.action.as_deref());
        Ok(())
    }

    async fn will_disappear(
        &self,
        event: &WillDisappear,
        _decode: &DecodeCtx,
    ) -> crate::plugin::error::HandlerResult<()> {
        self.record("willDisappear", event.action.as_deref());
        Ok(())
    }

    async fn key_down(
        &self,
        event: &KeyDown,
        _decode: &DecodeCtx,
    ) -> crate::plugin::error::HandlerResult<()> {
        self.record("keyDown", event.action.as_deref());
        Ok(())
    }

    async fn key_up(
        &self,
        event: &KeyUp,
        _decode: &DecodeCtx,
    ) -> crate::plugin::error::HandlerResult<()> {
        self.record("keyUp", event.action.as_deref());
        Ok(())
    }

    async fn did_receive_settings(
        &self,
        event: &DidReceiveSettings,
        _decode: &DecodeCtx,
    ) -> crate::plugin::error::HandlerResult<()> {
        self.record("didReceiveSettings", event.action.as_deref());
        Ok(())
    }

    async fn did_receive_global_settings(
        &self,
        _event: &DidReceiveGlobalSettings,
        _decode: &DecodeCtx,
    ) -> crate::plugin::error::HandlerResult<()> {
        self.record("didReceiveGlobalSettings", None);
        Ok(())
    }

    async fn property_inspector_did_appear(
        &self,
        event: &PropertyInspectorDidAppear,
        _decode: &DecodeCtx,
    ) -> crate::plugin::error::HandlerResult<()> {
        self.record("propertyInspectorDidAppear", event.action.as_deref());
        Ok(())
    }

    async fn device_did_connect(
        &self,
        _event: &DeviceDidConnect,
        _decode: &DecodeCtx,
    ) -> crate::plugin::error::HandlerResult<()> {
        self.record("deviceDidConnect", None);
        Ok(())
    }

    async fn system_did_wake_up(
        &self,
        _event: &SystemDidWakeUp,
        _decode: &DecodeCtx,
    ) -> crate::plugin::error::HandlerResult<()> {
        self.record("systemDidWakeUp", None);
        Ok(())
    }
}

/// Entry constructing a `RecordingHandler`; returns the entry plus its
/// destroy and bind counters.
pub(crate) fn recording_entry(
    type_name: &str,
    sender: UnboundedSender<Delivered>,
) -> (HandlerEntry, Arc<AtomicUsize>, Arc<AtomicUsize>) {
    let destroyed = Arc::new(AtomicUsize::new(0));
    let bound = Arc::new(AtomicUsize::new(0));
    let name = type_name.to_string();
    let destroyed_in_factory = Arc::clone(&destroyed);
    let bound_in_factory = Arc::clone(&bound);
    let entry = HandlerEntry::concrete(type_name, move || {
        Box::new(RecordingHandler {
            name: name.clone(),
            sender: sender.clone(),
            destroyed: Arc::clone(&destroyed_in_factory),
            bound: Arc::clone(&bound_in_factory),
        })
    });
    (entry, destroyed, bound)
}

/// In-memory scanner mapping bundle paths to entry tables.
pub(crate) struct StaticScanner {
    tables: Mutex<HashMap<PathBuf, Vec<HandlerEntry>>>,
    pub(crate) scans: AtomicUsize,
    delay: Option<Duration>,
}

impl StaticScanner {
    pub(crate) fn new() -> Self {
        Self {
            tables: Mutex::new(HashMap::new()),
            scans: AtomicUsize::new(0),
            delay: None,
        }
    }

    /// Scanner that widens the load window, for racing tests.
    pub(crate) fn with_delay(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::new()
        }
    }

    pub(crate) fn insert(&self, path: impl AsRef<Path>, entries: Vec<HandlerEntry>) {
        self.tables
            .lock()
            .unwrap()
            .insert(path.as_ref().to_path_buf(), entries);
    }
}

impl BundleScanner for StaticScanner {
    fn scan(&self, path: &Path, required: &[String]) -> ScanOutcome {
        self.scans.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
        let entries = self
            .tables
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .unwrap_or_default();
        ScanOutcome::with_entries(
            entries
                .into_iter()
                .filter(|entry| entry.conforms_to(required))
                .collect(),
        )
    }
}

/// Context wired to a live (but undrained) transport pair.
pub(crate) fn test_context() -> (SharedContext, UnboundedReceiver<String>) {
    let (connection, outbound) = Connection::pair();
    let context = SharedContext::new(
        connection,
        Arc::new(ConnectionManager::new()),
        Arc::new(HostOptions::default()),
    );
    (context, outbound)
}

/// Settings payload carrying both routing fields.
pub(crate) fn routed_settings(plugin_file: &str, action_name: &str) -> Value {
    json!({"pluginFile": plugin_file, "actionName": action_name})
}

pub(crate) fn will_appear(settings: Value) -> ProtocolEvent {
    ProtocolEvent::WillAppear(WillAppear {
        context: "ctx-1".to_string(),
        payload: ButtonPayload::with_settings(settings),
        ..WillAppear::default()
    })
}

pub(crate) fn key_down(settings: Value) -> ProtocolEvent {
    ProtocolEvent::KeyDown(KeyDown {
        context: "ctx-1".to_string(),
        payload: ButtonPayload::with_settings(settings),
        ..KeyDown::default()
    })
}

/// Await the next delivery, failing the test after two seconds.
pub(crate) async fn recv_delivered(receiver: &mut UnboundedReceiver<Delivered>) -> Delivered {
    tokio::time::timeout(Duration::from_secs(2), receiver.recv())
        .await
        .expect("Timed out waiting for a delivery")
        .expect("Delivery channel closed")
}

/// Await `n` deliveries in whatever order they complete.
pub(crate) async fn recv_deliveries(
    receiver: &mut UnboundedReceiver<Delivered>,
    n: usize,
) -> Vec<Delivered> {
    let mut deliveries = Vec::with_capacity(n);
    for _ in 0..n {
        deliveries.push(recv_delivered(receiver).await);
    }
    deliveries
}

/// Assert the channel stays quiet — nothing further was dispatched.
pub(crate) async fn assert_no_more(receiver: &mut UnboundedReceiver<Delivered>) {
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(
        receiver.try_recv().is_err(),
        "Expected no further deliveries"
    );
}
