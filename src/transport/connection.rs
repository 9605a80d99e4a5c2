//! Live connection to the controlling application
//!
//! `Connection` queues outbound protocol messages for the transport to
//! drain; `ConnectionManager` tracks which connection is active and whether
//! registration with the controlling application has completed. Both are
//! read-mostly shared singletons injected into handlers; handlers must not
//! assume exclusive access.

use crate::transport::error::{TransportError, TransportResult};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

/// Live outbound connection to the controlling application.
pub struct Connection {
    outbound: UnboundedSender<String>,
}

impl Connection {
    /// Create a connection plus the receiver the transport drains.
    pub fn pair() -> (Arc<Connection>, UnboundedReceiver<String>) {
        let (sender, receiver) = unbounded_channel();
        (Arc::new(Self { outbound: sender }), receiver)
    }

    /// Serialize a protocol message and queue it for the transport.
    pub fn send_json<T: Serialize>(&self, message: &T) -> TransportResult<()> {
        let raw = serde_json::to_string(message).map_err(|e| TransportError::Serialize {
            cause: e.to_string(),
        })?;
        self.send_raw(raw)
    }

    /// Queue an already-encoded message for the transport.
    pub fn send_raw(&self, raw: String) -> TransportResult<()> {
        self.outbound
            .send(raw)
            .map_err(|_| TransportError::ChannelClosed)
    }
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("open", &!self.outbound.is_closed())
            .finish()
    }
}

/// Tracks the active connection and registration state.
#[derive(Debug, Default)]
pub struct ConnectionManager {
    active: RwLock<Option<Arc<Connection>>>,
    registered: AtomicBool,
}

impl ConnectionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make a connection the active one.
    pub fn attach(&self, connection: Arc<Connection>) {
        let mut active = self.active.write().expect("connection lock poisoned");
        *active = Some(connection);
    }

    /// Currently active connection, if any.
    pub fn current(&self) -> Option<Arc<Connection>> {
        self.active
            .read()
            .expect("connection lock poisoned")
            .clone()
    }

    /// Record that registration with the controlling application completed.
    pub fn mark_registered(&self) {
        self.registered.store(true, Ordering::Release);
    }

    pub fn is_registered(&self) -> bool {
        self.registered.load(Ordering::Acquire)
    }
}
