//! Handler Registry
//!
//! Lazily loads and caches the handler set for each bundle path. Every path
//! owns its own `OnceCell`, giving an atomic compute-if-absent keyed by
//! bundle path: concurrent callers for the same path observe exactly one
//! scan/instantiate cycle and the same published set, and a slow load never
//! blocks loads or reads of unrelated bundles.
//!
//! A bundle path is loaded at most once for the process lifetime — no
//! re-load, no eviction. An empty scan still records an empty handler set
//! so the archive is never re-scanned.

use crate::plugin::context::SharedContext;
use crate::plugin::error::HandlerError;
use crate::plugin::filter;
use crate::plugin::scanner::BundleScanner;
use crate::plugin::traits::{EventHandler, HANDLER_CAPABILITY};
use crate::plugin::types::{is_bundle_path, HandlerSet, ScanOutcome};
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{OnceCell, RwLock};

/// Per-path lazy cache of published handler sets.
pub struct HandlerRegistry {
    scanner: Arc<dyn BundleScanner>,
    context: SharedContext,
    required: Vec<String>,
    cells: RwLock<HashMap<PathBuf, Arc<OnceCell<Arc<HandlerSet>>>>>,
}

impl HandlerRegistry {
    /// Registry discovering handlers through the standard event capability.
    pub fn new(scanner: Arc<dyn BundleScanner>, context: SharedContext) -> Self {
        Self::with_required(scanner, context, vec![HANDLER_CAPABILITY.to_string()])
    }

    /// Registry requiring a custom, non-empty capability set.
    pub fn with_required(
        scanner: Arc<dyn BundleScanner>,
        context: SharedContext,
        required: Vec<String>,
    ) -> Self {
        debug_assert!(!required.is_empty(), "required capability set is non-empty");
        Self {
            scanner,
            context,
            required,
            cells: RwLock::new(HashMap::new()),
        }
    }

    /// Resolve a bundle path to its cache key: relative paths resolve
    /// against the configured bundle directory, and the result is lexically
    /// normalized.
    fn bundle_key(&self, path: &Path) -> PathBuf {
        let absolute = if path.is_relative() {
            self.context.options.bundle_dir().join(path)
        } else {
            path.to_path_buf()
        };
        normalize_lexically(&absolute)
    }

    /// Idempotent load of the bundle at `path`.
    ///
    /// Returns the published handler set; concurrent callers for the same
    /// path all receive the identical set after a single scan/instantiate
    /// cycle. Paths without a recognized bundle extension are ignored (not
    /// loaded, not cached).
    pub async fn ensure_loaded(&self, path: &Path) -> Arc<HandlerSet> {
        let key = self.bundle_key(path);
        if !is_bundle_path(&key) {
            log::debug!(
                "ignoring bundle path without a recognized extension: {}",
                key.display()
            );
            return Arc::new(HandlerSet::new(key, Vec::new(), None));
        }

        let cell = {
            let mut cells = self.cells.write().await;
            Arc::clone(
                cells
                    .entry(key.clone())
                    .or_insert_with(|| Arc::new(OnceCell::new())),
            )
        };

        cell.get_or_init(|| self.load_bundle(key)).await.clone()
    }

    /// Read-only lookup; never observes a partially populated set.
    pub async fn handlers_for(&self, path: &Path) -> Option<Arc<HandlerSet>> {
        let key = self.bundle_key(path);
        let cells = self.cells.read().await;
        cells.get(&key).and_then(|cell| cell.get().cloned())
    }

    /// Snapshot of every published handler set.
    pub async fn loaded_sets(&self) -> Vec<Arc<HandlerSet>> {
        let cells = self.cells.read().await;
        cells.values().filter_map(|cell| cell.get().cloned()).collect()
    }

    /// Number of published bundle paths.
    pub async fn loaded_count(&self) -> usize {
        let cells = self.cells.read().await;
        cells.values().filter(|cell| cell.get().is_some()).count()
    }

    /// Invoke the terminal hook on every handler of every loaded bundle,
    /// in unspecified order, exactly once each.
    pub async fn shutdown(&self) {
        let drained: Vec<(PathBuf, Arc<OnceCell<Arc<HandlerSet>>>)> = {
            let mut cells = self.cells.write().await;
            cells.drain().collect()
        };

        for (path, cell) in drained {
            if let Some(set) = cell.get() {
                log::debug!("destroying {} handler(s) of bundle {}", set.len(), path.display());
                for handler in set.handlers() {
                    handler.on_destroy().await;
                }
            }
        }
    }

    async fn load_bundle(&self, key: PathBuf) -> Arc<HandlerSet> {
        log::debug!("loading bundle {}", key.display());
        let ScanOutcome { entries, library } = self.scanner.scan(&key, &self.required);
        let survivors = filter::most_specific(entries);

        let mut handlers: Vec<Arc<dyn EventHandler>> = Vec::with_capacity(survivors.len());
        for entry in &survivors {
            let Some(construct) = entry.construct.as_ref() else {
                // a sibling without a constructor never blocks the rest
                log::warn!(
                    "skipping entry in bundle {}: {}",
                    key.display(),
                    HandlerError::NotConstructible {
                        type_name: entry.type_name.clone()
                    }
                );
                continue;
            };
            let mut handler = construct();
            // context is bound before the instance becomes reachable from
            // any other task
            handler.bind(self.context.clone());
            handlers.push(Arc::from(handler));
        }

        if handlers.is_empty() {
            log::info!("bundle {} contributes no handlers", key.display());
        } else {
            log::info!(
                "bundle {} loaded with {} handler(s)",
                key.display(),
                handlers.len()
            );
        }
        Arc::new(HandlerSet::new(key, handlers, library))
    }
}

impl std::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("required", &self.required)
            .finish()
    }
}

/// Lexical normalization: strips `.` components and resolves `..` without
/// touching the filesystem.
fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    normalized.push(Component::ParentDir);
                }
            }
            other => normalized.push(other),
        }
    }
    normalized
}
