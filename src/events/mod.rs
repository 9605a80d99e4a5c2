//! Protocol Event Model
//!
//! Typed envelopes for the fixed set of control-surface protocol events,
//! the routing fields embedded in button settings, and the per-call decode
//! context handed to handlers.

// Internal modules - all access should go through api module
pub(crate) mod decode;
pub(crate) mod envelope;
pub(crate) mod routing;

// Public API module - the only public interface for the event model
pub mod api;
