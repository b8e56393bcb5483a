//! Copyright (c) 2025, Kirky.X
//!
//! MIT License
//!
//! 覆盖层读写语义测试

use scratchcache::{CacheExt, MemoryStore, ScratchCache, Store};
use serde::{Deserialize, Serialize};

mod common;

#[test]
fn test_set_visible_before_commit() {
    common::setup_logging();

    let mut store = MemoryStore::new();
    let mut cache = ScratchCache::new(&mut store);

    cache.set("key1", b"value1".to_vec()).expect("Set should succeed");

    // Pending value is visible through the overlay
    assert_eq!(cache.get("key1").unwrap(), Some(b"value1".to_vec()));
    assert!(cache.contains("key1").unwrap());
    assert_eq!(cache.pending_len(), 1);

    // Nothing reached the backing store
    drop(cache);
    assert!(store.is_empty());
}

#[test]
fn test_delete_shadows_backing_store() {
    common::setup_logging();

    let mut store: MemoryStore = [("a".to_string(), b"1".to_vec())].into_iter().collect();
    let mut cache = ScratchCache::new(&mut store);

    // Read-through before any local change
    assert_eq!(cache.get("a").unwrap(), Some(b"1".to_vec()));
    assert!(cache.contains("a").unwrap());

    cache.delete("a").expect("Delete should succeed");

    // Tombstone shadows the store copy even though nothing was flushed
    assert_eq!(cache.get("a").unwrap(), None);
    assert!(!cache.contains("a").unwrap());

    drop(cache);
    assert_eq!(store.get("a").unwrap(), Some(b"1".to_vec()));
}

#[test]
fn test_delete_is_idempotent() {
    common::setup_logging();

    let mut store: MemoryStore = [("a".to_string(), b"1".to_vec())].into_iter().collect();
    let mut cache = ScratchCache::new(&mut store);

    cache.delete("a").unwrap();
    cache.delete("a").unwrap();

    assert_eq!(cache.get("a").unwrap(), None);
    assert!(!cache.contains("a").unwrap());
    assert_eq!(cache.pending_len(), 1);
}

#[test]
fn test_delete_never_seen_key() {
    common::setup_logging();

    let mut store = MemoryStore::new();
    let mut cache = ScratchCache::new(&mut store);

    // Deleting a key absent everywhere just records a tombstone
    cache.delete("ghost").unwrap();
    assert_eq!(cache.get("ghost").unwrap(), None);
    assert!(!cache.contains("ghost").unwrap());
    assert!(cache.is_dirty());
}

#[test]
fn test_pending_entry_overwrites() {
    common::setup_logging();

    let mut store = MemoryStore::new();
    let mut cache = ScratchCache::new(&mut store);

    cache.set("k", b"v1".to_vec()).unwrap();
    cache.set("k", b"v2".to_vec()).unwrap();
    assert_eq!(cache.get("k").unwrap(), Some(b"v2".to_vec()));

    // Set then delete leaves a tombstone
    cache.delete("k").unwrap();
    assert_eq!(cache.get("k").unwrap(), None);

    // Delete then set leaves the value again
    cache.set("k", b"v3".to_vec()).unwrap();
    assert_eq!(cache.get("k").unwrap(), Some(b"v3".to_vec()));
    assert_eq!(cache.pending_len(), 1);
}

#[test]
fn test_read_falls_through_to_store() {
    common::setup_logging();

    let mut store: MemoryStore = [
        ("a".to_string(), b"1".to_vec()),
        ("b".to_string(), b"2".to_vec()),
    ]
    .into_iter()
    .collect();
    let cache = ScratchCache::new(&mut store);

    assert_eq!(cache.get("a").unwrap(), Some(b"1".to_vec()));
    assert_eq!(cache.get("b").unwrap(), Some(b"2".to_vec()));
    assert_eq!(cache.get("c").unwrap(), None);
    assert!(cache.contains("a").unwrap());
    assert!(!cache.contains("c").unwrap());
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Account {
    id: u64,
    name: String,
}

#[test]
fn test_typed_value_roundtrip() {
    common::setup_logging();

    let mut store = MemoryStore::new();
    let mut cache = ScratchCache::new(&mut store);

    let account = Account {
        id: 7,
        name: "alice".to_string(),
    };
    cache.set_value("acct:7", &account).expect("Set should succeed");

    let loaded: Option<Account> = cache.get_value("acct:7").expect("Get should succeed");
    assert_eq!(loaded, Some(account));
}

#[test]
fn test_typed_value_decode_error() {
    common::setup_logging();

    let mut store = MemoryStore::new();
    let mut cache = ScratchCache::new(&mut store);

    cache.set("acct:8", b"not json".to_vec()).unwrap();

    let result: scratchcache::Result<Option<Account>> = cache.get_value("acct:8");
    assert!(matches!(
        result,
        Err(scratchcache::CacheError::Serialization(_))
    ));
}

#[test]
fn test_stacked_scratch_caches() {
    common::setup_logging();

    let mut store: MemoryStore = [("a".to_string(), b"1".to_vec())].into_iter().collect();
    let mut lower = ScratchCache::new(&mut store);
    lower.set("b", b"2".to_vec()).unwrap();

    // A scratch cache is itself a Store, so layers can stack
    let mut upper = ScratchCache::new(&mut lower);
    assert_eq!(upper.get("a").unwrap(), Some(b"1".to_vec()));
    assert_eq!(upper.get("b").unwrap(), Some(b"2".to_vec()));

    upper.delete("a").unwrap();
    assert!(!upper.contains("a").unwrap());
    drop(upper);
    assert!(lower.contains("a").unwrap());
}
