/// Process-wide cache of parsed lambda templates, keyed by exact source text.
///
/// Entries are never evicted. Two threads missing on the same source may both
/// parse it; the later insert wins and either template behaves the same.
use std::sync::Arc;

use dashmap::DashMap;
use once_cell::sync::Lazy;

use super::Template;

static CACHE: Lazy<DashMap<String, Arc<Template>>> = Lazy::new(DashMap::new);

pub struct LambdaCache;

impl LambdaCache {
    pub fn get(source: &str) -> Option<Arc<Template>> {
        CACHE.get(source).map(|entry| Arc::clone(entry.value()))
    }

    pub fn insert(source: &str, template: Arc<Template>) {
        CACHE.insert(source.to_string(), template);
    }

    pub fn contains(source: &str) -> bool {
        CACHE.contains_key(source)
    }

    pub fn len() -> usize {
        CACHE.len()
    }
}
