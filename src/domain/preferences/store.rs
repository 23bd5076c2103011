//! Key/value persistence port for console preferences.

use dashmap::DashMap;

/// Storage for small serialized preference blobs
pub trait PreferenceStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: String);
}

/// In-memory preference storage
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    values: DashMap<String, String>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).map(|v| v.clone())
    }

    fn set(&self, key: &str, value: String) {
        self.values.insert(key.to_string(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryPreferenceStore::new();
        assert!(store.get("missing").is_none());

        store.set("k", "v1".to_string());
        store.set("k", "v2".to_string());
        assert_eq!(store.get("k").as_deref(), Some("v2"));
    }
}
