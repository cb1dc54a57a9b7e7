use std::sync::{Mutex, MutexGuard};

use crate::observer::{CatalogObserver, TracingObserver};
use crate::types::{CatalogError, CatalogLimits, CatalogSnapshot, Item};

/// Bounded in-memory catalog with lazy initialization.
///
/// Items are kept in insertion order and duplicates are allowed. Every
/// operation, read or write, goes through one mutex so that the
/// initialize-then-append sequence of [`CatalogStore::add_item`] is observed
/// atomically by concurrent callers.
#[derive(Debug)]
pub struct CatalogStore<O = TracingObserver> {
    state: Mutex<CatalogState>,
    limits: CatalogLimits,
    observer: O,
}

#[derive(Debug, Default)]
struct CatalogState {
    items: Vec<Item>,
    initialized: bool,
}

impl CatalogStore<TracingObserver> {
    /// Creates an empty store with default limits that logs through `tracing`.
    pub fn new() -> Self {
        Self::with_limits(CatalogLimits::default())
    }

    pub fn with_limits(limits: CatalogLimits) -> Self {
        Self::with_observer(limits, TracingObserver)
    }
}

impl Default for CatalogStore<TracingObserver> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: CatalogObserver> CatalogStore<O> {
    /// Creates an empty store that reports events to `observer`.
    pub fn with_observer(limits: CatalogLimits, observer: O) -> Self {
        Self {
            state: Mutex::new(CatalogState::default()),
            limits,
            observer,
        }
    }

    pub fn limits(&self) -> CatalogLimits {
        self.limits
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Returns items containing `keyword` as a substring, in insertion order.
    ///
    /// At most `min(limit, max_search_results)` items are returned. An absent
    /// or empty keyword yields an empty result and is reported to the
    /// observer as a warning.
    pub fn search_by_keyword<'a>(
        &self,
        keyword: impl Into<Option<&'a str>>,
        limit: usize,
    ) -> Vec<Item> {
        let Some(keyword) = keyword.into().filter(|keyword| !keyword.is_empty()) else {
            self.observer.empty_keyword();
            return Vec::new();
        };

        let limit = self.limits.clamp_limit(limit);
        let state = self.lock();
        state
            .items
            .iter()
            .filter(|item| item.contains(keyword))
            .take(limit)
            .cloned()
            .collect()
    }

    /// Returns the first item whose content starts with `id`.
    ///
    /// Matching is by prefix, unlike [`CatalogStore::exists`] which requires
    /// exact equality.
    pub fn find_by_id<'a>(&self, id: impl Into<Option<&'a str>>) -> Option<Item> {
        let id = id.into()?;
        let state = self.lock();
        state.items.iter().find(|item| item.starts_with(id)).cloned()
    }

    /// Appends `value` to the catalog, initializing the store on first use.
    ///
    /// Absent or whitespace-only values are rejected with
    /// [`CatalogError::InvalidArgument`] and leave the store untouched,
    /// including its initialization state.
    pub fn add_item<'a>(&self, value: impl Into<Option<&'a str>>) -> Result<(), CatalogError> {
        let value = match value.into() {
            Some(value) if !value.trim().is_empty() => value,
            _ => {
                return Err(CatalogError::InvalidArgument(
                    "item value is required".to_string(),
                ))
            }
        };

        let mut state = self.lock();
        self.ensure_initialized(&mut state);
        state.items.push(value.to_string());
        self.observer.item_added(value);
        Ok(())
    }

    /// Returns an owned copy of every item in insertion order.
    pub fn list_all(&self) -> Vec<Item> {
        self.lock().items.clone()
    }

    /// Returns `true` when some item is exactly equal to `id`.
    pub fn exists<'a>(&self, id: impl Into<Option<&'a str>>) -> bool {
        match id.into() {
            Some(id) => self.lock().items.iter().any(|item| item == id),
            None => false,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.lock().initialized
    }

    pub fn len(&self) -> usize {
        self.lock().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().items.is_empty()
    }

    /// Captures the initialization flag and items together.
    pub fn snapshot(&self) -> CatalogSnapshot {
        let state = self.lock();
        CatalogSnapshot {
            initialized: state.initialized,
            items: state.items.clone(),
        }
    }

    /// Checks that a raw payload is present and at least `default_page_size`
    /// characters long.
    pub fn validate_payload<'a>(
        &self,
        data: impl Into<Option<&'a str>>,
    ) -> Result<(), CatalogError> {
        match data.into() {
            Some(data) if data.chars().count() >= self.limits.default_page_size => Ok(()),
            Some(data) => Err(CatalogError::Validation(format!(
                "payload has {} characters, expected at least {}",
                data.chars().count(),
                self.limits.default_page_size
            ))),
            None => Err(CatalogError::Validation("payload is missing".to_string())),
        }
    }

    // Must be called with the state lock held; runs at most once per store.
    fn ensure_initialized(&self, state: &mut CatalogState) {
        if state.initialized {
            return;
        }
        state.items.clear();
        state.initialized = true;
        self.observer.initialized();
    }

    fn lock(&self) -> MutexGuard<'_, CatalogState> {
        self.state.lock().expect("catalog guard")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::NoopObserver;
    use std::{sync::Arc, thread};

    #[derive(Debug, Default)]
    struct RecordingObserver {
        events: Mutex<Vec<String>>,
    }

    impl RecordingObserver {
        fn events(&self) -> Vec<String> {
            self.events.lock().expect("events guard").clone()
        }

        fn count(&self, event: &str) -> usize {
            self.events().iter().filter(|e| *e == event).count()
        }
    }

    impl CatalogObserver for RecordingObserver {
        fn empty_keyword(&self) {
            self.events.lock().expect("events guard").push("empty_keyword".into());
        }

        fn initialized(&self) {
            self.events.lock().expect("events guard").push("initialized".into());
        }

        fn item_added(&self, item: &str) {
            self.events
                .lock()
                .expect("events guard")
                .push(format!("added:{item}"));
        }
    }

    fn recording_store(limits: CatalogLimits) -> CatalogStore<Arc<RecordingObserver>> {
        CatalogStore::with_observer(limits, Arc::new(RecordingObserver::default()))
    }

    fn quiet_store() -> CatalogStore<NoopObserver> {
        CatalogStore::with_observer(CatalogLimits::default(), NoopObserver)
    }

    #[test]
    fn new_store_is_empty_and_uninitialized() {
        let store = CatalogStore::new();
        assert!(!store.is_initialized());
        assert!(store.is_empty());
        assert!(store.list_all().is_empty());
        assert_eq!(store.limits(), CatalogLimits::default());
    }

    #[test]
    fn widget_scenario() {
        let store = quiet_store();
        store.add_item("Widget-A").expect("add Widget-A");
        store.add_item("Widget-B").expect("add Widget-B");

        assert_eq!(store.search_by_keyword("Widget", 1), vec!["Widget-A"]);
        assert_eq!(store.find_by_id("Widget-B").as_deref(), Some("Widget-B"));
        assert!(!store.exists("Widget"));
        assert!(store.exists("Widget-A"));
    }

    #[test]
    fn rejected_empty_insert_leaves_store_untouched() {
        let store = recording_store(CatalogLimits::default());

        let err = store.add_item("").expect_err("empty value should be rejected");
        assert!(matches!(err, CatalogError::InvalidArgument(_)));
        assert!(store.list_all().is_empty());
        assert!(!store.is_initialized());
        assert!(store.observer().events().is_empty());
    }

    #[test]
    fn rejected_insert_keeps_existing_items() {
        let store = recording_store(CatalogLimits::default());
        store.add_item("a-1").expect("add a-1");
        store.add_item("a-2").expect("add a-2");
        let before = store.list_all();

        for value in [Some("  "), Some(""), None] {
            let err = store.add_item(value).expect_err("blank value should be rejected");
            assert!(matches!(err, CatalogError::InvalidArgument(_)));
        }

        assert_eq!(store.list_all(), before);
        assert!(store.is_initialized());
        assert_eq!(
            store.observer().events(),
            vec!["initialized", "added:a-1", "added:a-2"]
        );
    }

    #[test]
    fn rejects_absent_and_whitespace_values() {
        let store = quiet_store();
        for value in [None, Some("   "), Some("\t\n")] {
            let err = store.add_item(value).expect_err("blank value should be rejected");
            assert_eq!(err.kind(), "invalid_argument");
        }
        assert!(store.is_empty());
        assert!(!store.is_initialized());
    }

    #[test]
    fn stores_value_verbatim_without_trimming() {
        let store = quiet_store();
        store.add_item("  padded  ").expect("add padded");
        assert!(store.exists("  padded  "));
        assert!(!store.exists("padded"));
    }

    #[test]
    fn added_items_exist() {
        let store = quiet_store();
        for value in ["a", "Gadget 42", "日本語の商品", "x y z"] {
            store.add_item(value).expect("add item");
            assert!(store.exists(value), "{value} should exist after insert");
        }
    }

    #[test]
    fn initializes_once_and_stays_initialized() {
        let store = recording_store(CatalogLimits::default());
        assert!(!store.is_initialized());

        store.add_item("first").expect("add first");
        assert!(store.is_initialized());
        store.add_item("second").expect("add second");
        let _ = store.add_item("");
        let _ = store.search_by_keyword("", 10);
        let _ = store.list_all();
        assert!(store.is_initialized());

        assert_eq!(store.observer().count("initialized"), 1);
        assert_eq!(
            store.observer().events(),
            vec!["initialized", "added:first", "added:second", "empty_keyword"]
        );
    }

    #[test]
    fn empty_keyword_returns_nothing_and_warns() {
        let store = recording_store(CatalogLimits::default());
        store.add_item("anything").expect("add item");

        assert!(store.search_by_keyword("", 10).is_empty());
        assert!(store.search_by_keyword(None, 10).is_empty());
        assert_eq!(store.observer().count("empty_keyword"), 2);
        assert_eq!(store.list_all(), vec!["anything"]);
    }

    #[test]
    fn search_respects_requested_limit_and_maximum() {
        let store = recording_store(CatalogLimits::new(3, 20));
        for i in 0..10 {
            store.add_item(format!("item-{i}").as_str()).expect("add item");
        }

        for limit in [0, 1, 2, 3, 4, 50, usize::MAX] {
            let results = store.search_by_keyword("item", limit);
            assert!(results.len() <= limit.min(3));
        }
        assert_eq!(
            store.search_by_keyword("item", 100),
            vec!["item-0", "item-1", "item-2"]
        );
        assert!(store.search_by_keyword("item", 0).is_empty());
    }

    #[test]
    fn search_matches_substrings_in_insertion_order() {
        let store = quiet_store();
        for value in ["red apple", "green pear", "apple pie", "banana"] {
            store.add_item(value).expect("add item");
        }

        assert_eq!(
            store.search_by_keyword("apple", 10),
            vec!["red apple", "apple pie"]
        );
        assert!(store.search_by_keyword("cherry", 10).is_empty());
    }

    #[test]
    fn search_on_empty_store_returns_empty() {
        let store = quiet_store();
        assert!(store.search_by_keyword("anything", 10).is_empty());
    }

    #[test]
    fn find_by_id_returns_first_prefix_match() {
        let store = quiet_store();
        for value in ["P-100 lamp", "P-10 chair", "P-1 desk"] {
            store.add_item(value).expect("add item");
        }

        assert_eq!(store.find_by_id("P-1").as_deref(), Some("P-100 lamp"));
        assert_eq!(store.find_by_id("P-10 ").as_deref(), Some("P-10 chair"));
        assert_eq!(store.find_by_id("lamp"), None);
    }

    #[test]
    fn absent_ids_degrade_to_empty_results() {
        let store = quiet_store();
        store.add_item("Widget-A").expect("add item");

        assert_eq!(store.find_by_id(None), None);
        assert!(!store.exists(None));
    }

    #[test]
    fn duplicates_are_kept() {
        let store = quiet_store();
        store.add_item("dup").expect("add first");
        store.add_item("dup").expect("add second");
        assert_eq!(store.list_all(), vec!["dup", "dup"]);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn list_all_returns_independent_copies() {
        let store = quiet_store();
        store.add_item("one").expect("add item");
        store.add_item("two").expect("add item");

        let mut first = store.list_all();
        let second = store.list_all();
        assert_eq!(first, second);

        first.clear();
        first.push("mutated".into());
        assert_eq!(store.list_all(), second);
    }

    #[test]
    fn snapshot_reflects_state() {
        let store = quiet_store();
        assert_eq!(
            store.snapshot(),
            CatalogSnapshot {
                initialized: false,
                items: Vec::new(),
            }
        );

        store.add_item("only").expect("add item");
        let snapshot = store.snapshot();
        assert!(snapshot.initialized);
        assert_eq!(snapshot.items, vec!["only"]);
    }

    #[test]
    fn validate_payload_uses_page_size_threshold() {
        let store = recording_store(CatalogLimits::new(100, 5));

        assert!(store.validate_payload("12345").is_ok());
        assert!(store.validate_payload("ｱｲｳｴｵ").is_ok());
        let err = store.validate_payload("1234").expect_err("short payload");
        assert!(matches!(err, CatalogError::Validation(_)));
        let err = store.validate_payload(None).expect_err("missing payload");
        assert_eq!(err.kind(), "validation");

        assert!(store.is_empty());
        assert!(!store.is_initialized());
    }

    #[test]
    fn concurrent_inserts_initialize_exactly_once() {
        let store = Arc::new(recording_store(CatalogLimits::default()));

        thread::scope(|scope| {
            for worker in 0..8 {
                let store = Arc::clone(&store);
                scope.spawn(move || {
                    for i in 0..25 {
                        store
                            .add_item(format!("w{worker}-{i}").as_str())
                            .expect("add item");
                    }
                });
            }
        });

        assert!(store.is_initialized());
        assert_eq!(store.len(), 200);
        assert_eq!(store.observer().count("initialized"), 1);
        assert_eq!(store.observer().events()[0], "initialized");
        assert!(store.exists("w7-24"));
    }
}
