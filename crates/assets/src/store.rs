use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use arc_swap::ArcSwap;
use tracing::{debug, warn};

use crate::dump::parse_dump;
use crate::source::{BundledSource, RegistrySource};
use crate::RegistryError;

/// Immutable name-to-identifier table for one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryMapping {
    category: String,
    version: String,
    entries: HashMap<String, String>,
}

impl RegistryMapping {
    /// Build a mapping from explicit entries.
    pub fn new(
        category: impl Into<String>,
        version: impl Into<String>,
        entries: impl IntoIterator<Item = (String, String)>,
    ) -> Self {
        Self {
            category: category.into(),
            version: version.into(),
            entries: entries.into_iter().collect(),
        }
    }

    /// Game version recorded in the dump.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Number of names in the mapping.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the mapping holds no names.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Identifier for `name`, if present.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    /// Identifier for `name`, or [`RegistryError::UnknownName`].
    pub fn lookup(&self, name: &str) -> Result<&str, RegistryError> {
        self.get(name).ok_or_else(|| RegistryError::UnknownName {
            category: self.category.clone(),
            name: name.to_string(),
        })
    }

    /// All names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// Process-wide registry cache.
///
/// Each category is read from the source at most once; the resulting mapping
/// is shared behind an `Arc` and never mutated again. Readers see an immutable
/// snapshot of every loaded category without taking a lock. Source reads run
/// under a per-category guard, so a slow or failing category never stalls
/// lookups in another. Failed loads are not cached; a later call retries.
pub struct RegistryStore {
    source: Box<dyn RegistrySource>,
    loaded: ArcSwap<HashMap<String, Arc<RegistryMapping>>>,
    loading: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl RegistryStore {
    /// Store backed by `source`.
    pub fn new(source: impl RegistrySource + 'static) -> Self {
        Self {
            source: Box::new(source),
            loaded: ArcSwap::from_pointee(HashMap::new()),
            loading: Mutex::new(HashMap::new()),
        }
    }

    /// Store backed by the dumps compiled into the crate.
    pub fn bundled() -> Self {
        Self::new(BundledSource)
    }

    /// Load every category up front so request-time lookups never touch the source.
    pub fn preload<'a>(
        &self,
        categories: impl IntoIterator<Item = &'a str>,
    ) -> Result<(), RegistryError> {
        for category in categories {
            self.load(category)?;
        }
        Ok(())
    }

    /// Whether `category` has been loaded already.
    pub fn is_loaded(&self, category: &str) -> bool {
        self.loaded.load().contains_key(category)
    }

    /// Mapping for `category`, loading it on first use.
    pub fn load(&self, category: &str) -> Result<Arc<RegistryMapping>, RegistryError> {
        if let Some(mapping) = self.cached(category) {
            return Ok(mapping);
        }

        let guard = self.guard_for(category);
        let _loading = guard.lock().unwrap_or_else(PoisonError::into_inner);
        // Another caller may have finished loading while we waited for the guard.
        if let Some(mapping) = self.cached(category) {
            return Ok(mapping);
        }

        let raw = self.source.read(category)?;
        let dump = parse_dump(&raw).map_err(|source| RegistryError::DataCorrupt {
            category: category.to_string(),
            source,
        })?;
        let mapping = Arc::new(RegistryMapping::new(category, dump.version, dump.data));
        if mapping.is_empty() {
            warn!(category, "registry dump holds no names");
        }
        debug!(
            category,
            version = mapping.version(),
            entries = mapping.len(),
            "loaded registry dump"
        );
        self.loaded.rcu(|current| {
            let mut next = HashMap::clone(current);
            next.insert(category.to_string(), Arc::clone(&mapping));
            next
        });
        Ok(mapping)
    }

    /// Resolve `name` within `category` to its game identifier.
    pub fn lookup(&self, category: &str, name: &str) -> Result<String, RegistryError> {
        let mapping = self.load(category)?;
        mapping.lookup(name).map(str::to_string)
    }

    fn cached(&self, category: &str) -> Option<Arc<RegistryMapping>> {
        self.loaded.load().get(category).cloned()
    }

    fn guard_for(&self, category: &str) -> Arc<Mutex<()>> {
        let mut loading = self.loading.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(loading.entry(category.to_string()).or_default())
    }
}

impl std::fmt::Debug for RegistryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let loaded = self.loaded.load();
        let mut categories: Vec<&String> = loaded.keys().collect();
        categories.sort();
        f.debug_struct("RegistryStore")
            .field("loaded", &categories)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{StaticSource, ITEM_CATEGORY};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Barrier;
    use std::time::{Duration, Instant};

    const ITEMS: &str = r#"{"version": "1.16.4", "data": {"sand": "minecraft:sand", "grass": "minecraft:grass_block"}}"#;

    struct CountingSource {
        reads: Arc<AtomicUsize>,
    }

    impl RegistrySource for CountingSource {
        fn read(&self, category: &str) -> Result<String, RegistryError> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            StaticSource::new().with(ITEM_CATEGORY, ITEMS).read(category)
        }
    }

    /// Serves `item` immediately; `slow` waits for the test, then sleeps.
    struct SlowSource {
        entered: Arc<Barrier>,
    }

    impl RegistrySource for SlowSource {
        fn read(&self, category: &str) -> Result<String, RegistryError> {
            if category == "slow" {
                self.entered.wait();
                std::thread::sleep(Duration::from_millis(600));
            }
            StaticSource::new()
                .with(ITEM_CATEGORY, ITEMS)
                .with("slow", ITEMS)
                .read(category)
        }
    }

    #[test]
    fn looks_up_names() {
        let store = RegistryStore::new(StaticSource::new().with(ITEM_CATEGORY, ITEMS));
        assert_eq!(store.lookup("item", "grass").unwrap(), "minecraft:grass_block");
        assert!(matches!(
            store.lookup("item", "unobtainium"),
            Err(RegistryError::UnknownName { category, name })
                if category == "item" && name == "unobtainium"
        ));
    }

    #[test]
    fn missing_category_is_unavailable() {
        let store = RegistryStore::new(StaticSource::new());
        assert!(matches!(
            store.load("weather"),
            Err(RegistryError::DataUnavailable { .. })
        ));
        assert!(!store.is_loaded("weather"));
    }

    #[test]
    fn malformed_dump_is_corrupt() {
        let store = RegistryStore::new(StaticSource::new().with("item", "{\"data\": 1}"));
        assert!(matches!(
            store.load("item"),
            Err(RegistryError::DataCorrupt { .. })
        ));
    }

    #[test]
    fn source_is_read_once_under_contention() {
        let reads = Arc::new(AtomicUsize::new(0));
        let store = RegistryStore::new(CountingSource {
            reads: Arc::clone(&reads),
        });

        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    for _ in 0..50 {
                        assert_eq!(store.lookup("item", "sand").unwrap(), "minecraft:sand");
                    }
                });
            }
        });

        assert_eq!(reads.load(Ordering::SeqCst), 1);
        assert!(store.is_loaded("item"));
    }

    #[test]
    fn loaded_category_does_not_wait_for_another_load() {
        let entered = Arc::new(Barrier::new(2));
        let store = RegistryStore::new(SlowSource {
            entered: Arc::clone(&entered),
        });
        store.preload([ITEM_CATEGORY]).unwrap();

        std::thread::scope(|scope| {
            let slow = scope.spawn(|| store.load("slow"));
            entered.wait();

            let started = Instant::now();
            assert_eq!(store.lookup("item", "sand").unwrap(), "minecraft:sand");
            assert!(!store.is_loaded("slow"));
            assert!(started.elapsed() < Duration::from_millis(300));

            assert!(slow.join().unwrap().is_ok());
        });
        assert!(store.is_loaded("slow"));
    }

    #[test]
    fn failed_load_leaves_other_categories_readable() {
        let store = RegistryStore::new(StaticSource::new().with(ITEM_CATEGORY, ITEMS));
        store.preload([ITEM_CATEGORY]).unwrap();
        assert!(store.load("biome").is_err());
        assert!(store.load("biome").is_err());
        assert_eq!(store.lookup("item", "sand").unwrap(), "minecraft:sand");
        assert_eq!(format!("{store:?}"), r#"RegistryStore { loaded: ["item"], .. }"#);
    }

    #[test]
    fn empty_dump_loads_as_empty_mapping() {
        let store = RegistryStore::new(
            StaticSource::new().with("biome", r#"{"version": "1.16.4", "data": {}}"#),
        );
        let mapping = store.load("biome").unwrap();
        assert!(mapping.is_empty());
        assert!(matches!(
            mapping.lookup("plains"),
            Err(RegistryError::UnknownName { category, .. }) if category == "biome"
        ));
    }

    #[test]
    fn loads_share_one_snapshot() {
        let store = RegistryStore::new(StaticSource::new().with(ITEM_CATEGORY, ITEMS));
        let a = store.load("item").unwrap();
        let b = store.load("item").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(a.version(), "1.16.4");
        assert_eq!(a.names(), vec!["grass", "sand"]);
    }

    #[test]
    fn bundled_items_cover_common_blocks() {
        let store = RegistryStore::bundled();
        store.preload(["item"]).unwrap();
        assert_eq!(store.lookup("item", "sand").unwrap(), "minecraft:sand");
        assert_eq!(store.lookup("item", "gold").unwrap(), "minecraft:gold_block");
        assert_eq!(store.lookup("item", "iron sword").unwrap(), "minecraft:iron_sword");
        assert_eq!(store.lookup("item", "grass").unwrap(), "minecraft:grass_block");
    }
}
