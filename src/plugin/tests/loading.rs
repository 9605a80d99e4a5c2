//! Loading behaviour across scanner, filter, and injector

use crate::plugin::registry::HandlerRegistry;
use crate::plugin::tests::utils::{recording_entry, test_context, StaticScanner};
use crate::plugin::traits::EventHandler;
use crate::plugin::types::HandlerEntry;
use std::path::Path;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::unbounded_channel;

struct NoopHandler;
impl EventHandler for NoopHandler {}

#[tokio::test]
async fn test_abstract_base_with_concrete_subtype_instantiates_the_subtype_once() {
    let scanner = Arc::new(StaticScanner::new());
    let (sender, _receiver) = unbounded_channel();
    let (concrete, _, bound) = recording_entry("bundle_b::Z", sender);
    scanner.insert(
        "/bundles/b.hpk",
        vec![
            HandlerEntry::abstract_base("bundle_b::Y"),
            concrete.with_supersedes(&["bundle_b::Y"]),
        ],
    );

    let (context, _outbound) = test_context();
    let registry = HandlerRegistry::new(scanner, context);
    let set = registry.ensure_loaded(Path::new("/bundles/b.hpk")).await;

    // exactly one instance, of the concrete subtype
    assert_eq!(set.len(), 1);
    assert_eq!(bound.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_entry_without_constructor_is_skipped_siblings_still_load() {
    let scanner = Arc::new(StaticScanner::new());
    let (sender, _receiver) = unbounded_channel();
    let (good, _, bound) = recording_entry("bundle_a::Good", sender);
    let broken = HandlerEntry {
        construct: None,
        ..HandlerEntry::concrete("bundle_a::Broken", || Box::new(NoopHandler))
    };
    scanner.insert("/bundles/a.hpk", vec![broken, good]);

    let (context, _outbound) = test_context();
    let registry = HandlerRegistry::new(scanner, context);
    let set = registry.ensure_loaded(Path::new("/bundles/a.hpk")).await;

    assert_eq!(set.len(), 1);
    assert_eq!(bound.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_nonconforming_entry_is_not_discovered() {
    let scanner = Arc::new(StaticScanner::new());
    let (sender, _receiver) = unbounded_channel();
    let (conforming, _, _) = recording_entry("bundle_a::InContract", sender);
    let foreign = HandlerEntry::concrete("bundle_a::Foreign", || Box::new(NoopHandler))
        .with_capabilities(&["vendor.Telemetry"]);
    scanner.insert("/bundles/a.hpk", vec![foreign, conforming]);

    let (context, _outbound) = test_context();
    let registry = HandlerRegistry::new(scanner, context);
    let set = registry.ensure_loaded(Path::new("/bundles/a.hpk")).await;

    assert_eq!(set.len(), 1);
}

#[tokio::test]
async fn test_context_is_bound_before_the_set_becomes_visible() {
    let scanner = Arc::new(StaticScanner::with_delay(Duration::from_millis(30)));
    let (sender, _receiver) = unbounded_channel();
    let (entry, _, bound) = recording_entry("bundle_a::X", sender);
    scanner.insert("/bundles/a.hpk", vec![entry]);

    let (context, _outbound) = test_context();
    let registry = Arc::new(HandlerRegistry::new(scanner, context));

    let loader = {
        let registry = Arc::clone(&registry);
        tokio::spawn(async move { registry.ensure_loaded(Path::new("/bundles/a.hpk")).await })
    };

    // poll until the set is published; the instant it is visible, every
    // member must already carry its context
    let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
    loop {
        if let Some(set) = registry.handlers_for(Path::new("/bundles/a.hpk")).await {
            assert_eq!(bound.load(Ordering::SeqCst), set.len());
            break;
        }
        assert!(
            tokio::time::Instant::now() < deadline,
            "Timed out waiting for the bundle to publish"
        );
        tokio::time::sleep(Duration::from_millis(1)).await;
    }

    loader.await.unwrap();
}

#[tokio::test]
async fn test_loaded_sets_snapshot_contains_each_published_bundle() {
    let scanner = Arc::new(StaticScanner::new());
    let (sender, _receiver) = unbounded_channel();
    let (entry_a, _, _) = recording_entry("bundle_a::X", sender.clone());
    let (entry_b, _, _) = recording_entry("bundle_b::Y", sender);
    scanner.insert("/bundles/a.hpk", vec![entry_a]);
    scanner.insert("/bundles/b.hpk", vec![entry_b]);

    let (context, _outbound) = test_context();
    let registry = HandlerRegistry::new(scanner, context);
    registry.ensure_loaded(Path::new("/bundles/a.hpk")).await;
    registry.ensure_loaded(Path::new("/bundles/b.hpk")).await;

    let mut paths: Vec<_> = registry
        .loaded_sets()
        .await
        .iter()
        .map(|set| set.path().to_path_buf())
        .collect();
    paths.sort();
    assert_eq!(
        paths,
        vec![
            Path::new("/bundles/a.hpk").to_path_buf(),
            Path::new("/bundles/b.hpk").to_path_buf()
        ]
    );
}
