use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// Successful explanations keyed by `category::text`. Entries live for the
/// lifetime of the process.
#[derive(Debug, Default)]
pub(super) struct ExplainCache {
    entries: Mutex<HashMap<String, String>>,
}

pub(super) fn cache_key(category: &str, text: &str) -> String {
    format!("{category}::{text}")
}

impl ExplainCache {
    pub(super) fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    pub(super) fn insert(&self, key: String, explanation: String) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, explanation);
    }

    pub(super) fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_joins_category_and_text() {
        assert_eq!(cache_key("verdict", "a claim"), "verdict::a claim");
    }

    #[test]
    fn insert_then_get() {
        let cache = ExplainCache::default();
        assert!(cache.get("k").is_none());
        cache.insert("k".to_owned(), "v".to_owned());
        assert_eq!(cache.get("k").as_deref(), Some("v"));
        cache.insert("k".to_owned(), "w".to_owned());
        assert_eq!(cache.get("k").as_deref(), Some("w"));
        assert_eq!(cache.len(), 1);
    }
}
