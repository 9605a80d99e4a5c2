//! Transport Boundary
//!
//! Types at the boundary to the controlling application's transport. The
//! wire codec itself is owned by the transport collaborator; this module
//! only carries outbound messages and tracks the active connection.

// Internal modules - all access should go through api module
pub(crate) mod connection;
pub(crate) mod error;

// Public API module - the only public interface for the transport boundary
pub mod api;
