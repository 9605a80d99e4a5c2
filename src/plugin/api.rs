//! Public API for the handler bundle system
//!
//! This module provides the complete public API for the handler bundle
//! system. External modules should import from here rather than directly
//! from internal modules.

// Dispatch and registry
pub use crate::plugin::dispatcher::EventDispatcher;
pub use crate::plugin::registry::HandlerRegistry;

// Handler contract
pub use crate::plugin::context::SharedContext;
pub use crate::plugin::traits::{EventHandler, HANDLER_CAPABILITY};

// Bundle scanning and entry tables
pub use crate::plugin::filter::most_specific;
pub use crate::plugin::scanner::{
    BundleApiVersionFn, BundleEntriesFn, BundleScanner, LibraryBundleScanner,
    BUNDLE_API_VERSION_SYMBOL, BUNDLE_ENTRIES_SYMBOL,
};
pub use crate::plugin::types::{
    is_bundle_path, native_bundle_extension, HandlerEntry, HandlerFactory, HandlerSet,
    ScanOutcome, BUNDLE_EXTENSION,
};

// Error handling
pub use crate::plugin::error::{HandlerError, HandlerResult};
