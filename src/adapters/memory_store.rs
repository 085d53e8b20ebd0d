use crate::domain::content::InterpretationContent;
use crate::domain::ports::ContentStore;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

/// Map-backed store for embedding and tests.
#[derive(Debug, Default)]
pub struct InMemoryContentStore {
    entries: RwLock<HashMap<String, InterpretationContent>>,
}

impl InMemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, topic_key: &str, content: InterpretationContent) {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.insert(topic_key.to_string(), content);
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FromIterator<(String, InterpretationContent)> for InMemoryContentStore {
    fn from_iter<I: IntoIterator<Item = (String, InterpretationContent)>>(iter: I) -> Self {
        Self {
            entries: RwLock::new(iter.into_iter().collect()),
        }
    }
}

#[async_trait]
impl ContentStore for InMemoryContentStore {
    async fn get(&self, topic_key: &str) -> Result<Option<InterpretationContent>> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        Ok(entries.get(topic_key).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_and_get() {
        let store = InMemoryContentStore::new();
        assert!(store.is_empty());
        store.insert("destino_01", InterpretationContent::from("Liderança"));

        assert_eq!(store.len(), 1);
        assert_eq!(
            store.get("destino_01").await.unwrap(),
            Some(InterpretationContent::from("Liderança"))
        );
        assert_eq!(store.get("destino_02").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_from_iterator() {
        let store: InMemoryContentStore = vec![(
            "cores_07".to_string(),
            InterpretationContent::from("Violeta"),
        )]
        .into_iter()
        .collect();
        assert!(store.get("cores_07").await.unwrap().is_some());
    }
}
