//! Type definitions for the handler bundle system

use crate::plugin::traits::EventHandler;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Factory producing a default-constructed handler instance.
pub type HandlerFactory = Arc<dyn Fn() -> Box<dyn EventHandler> + Send + Sync>;

/// Candidate descriptor exported by a bundle's entry table.
///
/// One entry per compiled handler type in the archive. `supersedes` lists
/// ancestor type names (direct or transitive) — the declared-specialization
/// relation the specificity filter reduces over. An entry without a
/// `construct` factory models a type with no default constructor: it is
/// skipped at instantiation while its siblings still load.
#[derive(Clone)]
pub struct HandlerEntry {
    /// Fully qualified name of the handler type
    pub type_name: String,

    /// Capability names this type satisfies
    pub capabilities: Vec<String>,

    /// Type names this entry declares itself a specialization of
    pub supersedes: Vec<String>,

    /// Whether the type is instantiable
    pub concrete: bool,

    /// Default constructor, when the type has one
    pub construct: Option<HandlerFactory>,
}

impl HandlerEntry {
    /// Concrete leaf entry satisfying the handler capability.
    pub fn concrete<F>(type_name: &str, construct: F) -> Self
    where
        F: Fn() -> Box<dyn EventHandler> + Send + Sync + 'static,
    {
        Self {
            type_name: type_name.to_string(),
            capabilities: vec![crate::plugin::traits::HANDLER_CAPABILITY.to_string()],
            supersedes: Vec::new(),
            concrete: true,
            construct: Some(Arc::new(construct)),
        }
    }

    /// Abstract base entry; participates in specificity filtering but is
    /// never instantiated.
    pub fn abstract_base(type_name: &str) -> Self {
        Self {
            type_name: type_name.to_string(),
            capabilities: vec![crate::plugin::traits::HANDLER_CAPABILITY.to_string()],
            supersedes: Vec::new(),
            concrete: false,
            construct: None,
        }
    }

    /// Declare the ancestor type names this entry supersedes.
    pub fn with_supersedes(mut self, ancestors: &[&str]) -> Self {
        self.supersedes = ancestors.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Replace the capability names this entry exports.
    pub fn with_capabilities(mut self, capabilities: &[&str]) -> Self {
        self.capabilities = capabilities.iter().map(|s| s.to_string()).collect();
        self
    }

    /// True when the entry exports every required capability and is not
    /// itself one of the required capability types.
    pub(crate) fn conforms_to(&self, required: &[String]) -> bool {
        required
            .iter()
            .all(|cap| self.capabilities.contains(cap) && &self.type_name != cap)
    }
}

impl std::fmt::Debug for HandlerEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerEntry")
            .field("type_name", &self.type_name)
            .field("capabilities", &self.capabilities)
            .field("supersedes", &self.supersedes)
            .field("concrete", &self.concrete)
            .field("constructible", &self.construct.is_some())
            .finish()
    }
}

/// Outcome of scanning one bundle archive.
pub struct ScanOutcome {
    /// Capability-conforming candidate entries
    pub entries: Vec<HandlerEntry>,

    /// The opened archive, kept alive for as long as its handlers exist
    pub library: Option<libloading::Library>,
}

impl ScanOutcome {
    /// Outcome of an unreadable or malformed archive.
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
            library: None,
        }
    }

    /// Outcome backed by in-process entries rather than a loaded archive.
    pub fn with_entries(entries: Vec<HandlerEntry>) -> Self {
        Self {
            entries,
            library: None,
        }
    }
}

impl std::fmt::Debug for ScanOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScanOutcome")
            .field("entries", &self.entries)
            .field("library", &self.library.is_some())
            .finish()
    }
}

/// Immutable, ordered handler collection published for one bundle path.
///
/// Once published into the registry a set never gains or loses members.
pub struct HandlerSet {
    path: PathBuf,
    handlers: Vec<Arc<dyn EventHandler>>,
    // declared last: handler instances must drop before their archive
    _library: Option<libloading::Library>,
}

impl HandlerSet {
    pub(crate) fn new(
        path: PathBuf,
        handlers: Vec<Arc<dyn EventHandler>>,
        library: Option<libloading::Library>,
    ) -> Self {
        Self {
            path,
            handlers,
            _library: library,
        }
    }

    /// Bundle path this set was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Handler instances in publication order.
    pub fn handlers(&self) -> &[Arc<dyn EventHandler>] {
        &self.handlers
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl std::fmt::Debug for HandlerSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerSet")
            .field("path", &self.path)
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

/// Bundle file extension owned by this host.
pub const BUNDLE_EXTENSION: &str = "hpk";

/// Native dynamic-library extension for the current platform.
pub fn native_bundle_extension() -> &'static str {
    if cfg!(target_os = "windows") {
        "dll"
    } else if cfg!(target_os = "macos") {
        "dylib"
    } else {
        "so"
    }
}

/// True when the path carries one of the two recognized bundle extensions.
pub fn is_bundle_path(path: &Path) -> bool {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => ext == BUNDLE_EXTENSION || ext == native_bundle_extension(),
        None => false,
    }
}
