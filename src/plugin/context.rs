//! Shared Handler Context
//!
//! The four context values wired into a freshly instantiated handler before
//! it becomes visible to any other task: the shared logger handle, the live
//! transport connection, the connection manager, and the configuration
//! snapshot. All four are read-mostly shared singletons; handlers must not
//! assume exclusive access to them.

use crate::core::logging::HandlerLogger;
use crate::core::options::HostOptions;
use crate::transport::api::{Connection, ConnectionManager};
use std::sync::Arc;

/// Context injected into every handler at load time.
#[derive(Clone)]
pub struct SharedContext {
    /// Shared logger handle
    pub logger: Arc<HandlerLogger>,

    /// Live connection to the controlling application
    pub connection: Arc<Connection>,

    /// Connection manager tracking the active connection
    pub connections: Arc<ConnectionManager>,

    /// Host configuration snapshot
    pub options: Arc<HostOptions>,
}

impl SharedContext {
    pub fn new(
        connection: Arc<Connection>,
        connections: Arc<ConnectionManager>,
        options: Arc<HostOptions>,
    ) -> Self {
        Self {
            logger: Arc::new(HandlerLogger::new("deckhost")),
            connection,
            connections,
            options,
        }
    }
}

impl std::fmt::Debug for SharedContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedContext")
            .field("logger", &self.logger.scope())
            .field("connection", &self.connection)
            .field("options", &self.options)
            .finish()
    }
}
