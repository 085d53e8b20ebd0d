use crate::core::resolver::ContentResolver;
use crate::domain::ports::ContentStore;
use crate::utils::error::Result;
use std::collections::HashMap;
use tokio::sync::Mutex;

/// Per-number memo for one category, e.g. `cores` or `pedras`.
///
/// Lives as long as the process or session that owns it. Failed lookups are
/// not stored so a later call can try the store again.
pub struct NumberCache {
    category: String,
    entries: Mutex<HashMap<u32, Option<String>>>,
}

impl NumberCache {
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn cores() -> Self {
        Self::new("cores")
    }

    pub fn pedras() -> Self {
        Self::new("pedras")
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub async fn get<S: ContentStore>(
        &self,
        resolver: &ContentResolver<S>,
        number: u32,
    ) -> Result<Option<String>> {
        if let Some(cached) = self.entries.lock().await.get(&number) {
            return Ok(cached.clone());
        }

        let resolved = resolver.resolve(&self.category, number, None).await?;
        self.entries
            .lock()
            .await
            .insert(number, resolved.clone());
        Ok(resolved)
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }

    pub async fn clear(&self) {
        self.entries.lock().await.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::content::InterpretationContent;
    use crate::utils::error::NumerologiaError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingStore {
        calls: Arc<AtomicUsize>,
        fail: bool,
    }

    #[async_trait]
    impl ContentStore for CountingStore {
        async fn get(&self, topic_key: &str) -> Result<Option<InterpretationContent>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(NumerologiaError::lookup_failure(topic_key, "offline"));
            }
            Ok(match topic_key {
                "cores_07" => Some(InterpretationContent::from("Violeta, verde")),
                _ => None,
            })
        }
    }

    #[tokio::test]
    async fn test_cache_hits_store_once_per_number() {
        let calls = Arc::new(AtomicUsize::new(0));
        let resolver = ContentResolver::new(CountingStore {
            calls: calls.clone(),
            fail: false,
        });
        let cache = NumberCache::cores();

        assert_eq!(cache.get(&resolver, 7).await.unwrap().as_deref(), Some("Violeta, verde"));
        assert_eq!(cache.get(&resolver, 7).await.unwrap().as_deref(), Some("Violeta, verde"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        // misses are cached too
        assert_eq!(cache.get(&resolver, 4).await.unwrap(), None);
        assert_eq!(cache.get(&resolver, 4).await.unwrap(), None);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(cache.len().await, 2);

        cache.clear().await;
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let calls = Arc::new(AtomicUsize::new(0));
        let resolver = ContentResolver::new(CountingStore {
            calls: calls.clone(),
            fail: true,
        })
        .with_retry(false);
        let cache = NumberCache::pedras();

        assert!(cache.get(&resolver, 3).await.is_err());
        assert!(cache.get(&resolver, 3).await.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(cache.is_empty().await);
        assert_eq!(cache.category(), "pedras");
    }
}
