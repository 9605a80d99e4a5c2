//! Public API for the transport boundary
//!
//! This module provides the complete public API for the transport boundary.
//! External modules should import from here rather than directly from
//! internal modules.

pub use crate::transport::connection::{Connection, ConnectionManager};
pub use crate::transport::error::{TransportError, TransportResult};
