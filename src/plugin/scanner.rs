//! Bundle Archive Scanner
//!
//! Opens a bundle archive in a namespace isolated to that file, enumerates
//! the handler entries it exports, and keeps the ones satisfying the
//! required capability set. An unreadable or malformed archive contributes
//! no handlers — the failure is logged, never escalated to the caller.
//!
//! A bundle is a dynamic library exporting two well-known symbols:
//! `deckhost_bundle_api_version` (compatibility check, matched on the major
//! year component) and `deckhost_bundle_entries` (the entry table). Bundle
//! authors declare both with the [`export_bundle!`](crate::export_bundle)
//! macro.

use crate::plugin::error::{HandlerError, HandlerResult};
use crate::plugin::types::{HandlerEntry, ScanOutcome};
use libloading::{Library, Symbol};
use std::path::Path;

/// Exported symbol naming the bundle's entry table.
pub const BUNDLE_ENTRIES_SYMBOL: &[u8] = b"deckhost_bundle_entries";

/// Exported symbol naming the bundle's API version.
pub const BUNDLE_API_VERSION_SYMBOL: &[u8] = b"deckhost_bundle_api_version";

/// Signature of the exported entry-table constructor.
pub type BundleEntriesFn = extern "C" fn() -> *mut Vec<HandlerEntry>;

/// Signature of the exported API version getter.
pub type BundleApiVersionFn = extern "C" fn() -> u32;

/// Scans one bundle archive for capability-conforming handler entries.
pub trait BundleScanner: Send + Sync {
    /// Scan the archive at `path`, keeping entries that satisfy every
    /// capability in `required`. Unreadable or malformed archives yield an
    /// empty outcome, never an error.
    fn scan(&self, path: &Path, required: &[String]) -> ScanOutcome;
}

/// Production scanner backed by dynamic-library loading.
///
/// Each archive is opened as its own `Library`, which scopes the loaded
/// symbols to that file.
pub struct LibraryBundleScanner {
    host_api_version: u32,
}

impl LibraryBundleScanner {
    pub fn new() -> Self {
        Self {
            host_api_version: crate::get_bundle_api_version(),
        }
    }

    /// Scanner pinned to an explicit host API version.
    pub fn with_api_version(host_api_version: u32) -> Self {
        Self { host_api_version }
    }

    fn open(&self, path: &Path, required: &[String]) -> HandlerResult<ScanOutcome> {
        // SAFETY: opening an archive the user installed as a bundle; the
        // archive is expected to uphold the exported-symbol contract.
        let library = unsafe { Library::new(path) }.map_err(|e| HandlerError::BundleUnreadable {
            path: path.to_path_buf(),
            cause: e.to_string(),
        })?;

        // SAFETY: symbol signature fixed by the bundle contract.
        let api_version: Symbol<BundleApiVersionFn> =
            unsafe { library.get(BUNDLE_API_VERSION_SYMBOL) }.map_err(|e| {
                HandlerError::BundleUnreadable {
                    path: path.to_path_buf(),
                    cause: e.to_string(),
                }
            })?;
        let found = api_version();
        if !is_api_compatible(self.host_api_version, found) {
            return Err(HandlerError::ApiVersionMismatch {
                expected: self.host_api_version,
                found,
            });
        }

        // SAFETY: symbol signature fixed by the bundle contract; the bundle
        // hands over ownership of the boxed entry table.
        let entries_fn: Symbol<BundleEntriesFn> = unsafe { library.get(BUNDLE_ENTRIES_SYMBOL) }
            .map_err(|e| HandlerError::BundleUnreadable {
                path: path.to_path_buf(),
                cause: e.to_string(),
            })?;
        let table = unsafe { Box::from_raw(entries_fn()) };

        let entries: Vec<HandlerEntry> = table
            .into_iter()
            .filter(|entry| entry.conforms_to(required))
            .collect();

        Ok(ScanOutcome {
            entries,
            library: Some(library),
        })
    }
}

impl BundleScanner for LibraryBundleScanner {
    fn scan(&self, path: &Path, required: &[String]) -> ScanOutcome {
        match self.open(path, required) {
            Ok(outcome) => {
                log::debug!(
                    "scanned bundle {}: {} conforming entries",
                    path.display(),
                    outcome.entries.len()
                );
                outcome
            }
            Err(err) => {
                log::debug!(
                    "bundle {} contributes no handlers: {}",
                    path.display(),
                    err
                );
                ScanOutcome::empty()
            }
        }
    }
}

impl Default for LibraryBundleScanner {
    fn default() -> Self {
        Self::new()
    }
}

/// Same major (year) version is compatible.
pub(crate) fn is_api_compatible(host: u32, bundle: u32) -> bool {
    host / 10000 == bundle / 10000
}

/// Declare the two well-known symbols a bundle must export.
///
/// Takes the bundle's handler entries; the API version is stamped from the
/// host crate the bundle was compiled against.
#[macro_export]
macro_rules! export_bundle {
    ($($entry:expr),+ $(,)?) => {
        #[no_mangle]
        pub extern "C" fn deckhost_bundle_api_version() -> u32 {
            $crate::get_bundle_api_version()
        }

        #[no_mangle]
        pub extern "C" fn deckhost_bundle_entries(
        ) -> *mut ::std::vec::Vec<$crate::plugin::api::HandlerEntry> {
            ::std::boxed::Box::into_raw(::std::boxed::Box::new(vec![$($entry),+]))
        }
    };
}
