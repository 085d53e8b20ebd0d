use crate::domain::content::InterpretationContent;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Read side of the external content store.
///
/// `Ok(None)` means the store answered and has nothing under `topic_key`;
/// `Err` is reserved for an unreachable store or a malformed answer.
#[async_trait]
pub trait ContentStore: Send + Sync {
    async fn get(&self, topic_key: &str) -> Result<Option<InterpretationContent>>;
}

#[async_trait]
impl<S: ContentStore + ?Sized> ContentStore for std::sync::Arc<S> {
    async fn get(&self, topic_key: &str) -> Result<Option<InterpretationContent>> {
        (**self).get(topic_key).await
    }
}

#[async_trait]
impl<S: ContentStore + ?Sized> ContentStore for Box<S> {
    async fn get(&self, topic_key: &str) -> Result<Option<InterpretationContent>> {
        (**self).get(topic_key).await
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Http,
    Local,
    Memory,
}

/// Where the content store lives and how to talk to it.
pub trait ConfigProvider: Send + Sync {
    fn store_kind(&self) -> StoreKind;
    fn store_endpoint(&self) -> Option<&str>;
    fn store_api_key(&self) -> Option<&str>;
    fn store_table(&self) -> &str;
    fn topic_column(&self) -> &str;
    fn content_column(&self) -> &str;
    fn store_path(&self) -> Option<&str>;
    fn timeout_seconds(&self) -> u64;
    fn retry_once(&self) -> bool;
}
