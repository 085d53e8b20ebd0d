use crate::domain::content::InterpretationContent;
use crate::domain::ports::ContentStore;
use crate::utils::error::{NumerologiaError, Result};
use async_trait::async_trait;
use std::path::PathBuf;

/// Directory of `{topic_key}.json` files, one per topic, the same naming the
/// ingestion bundle uses.
#[derive(Debug, Clone)]
pub struct LocalContentStore {
    base_path: PathBuf,
}

impl LocalContentStore {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// `None` when the key cannot name a file in the directory.
    fn file_for(&self, topic_key: &str) -> Option<PathBuf> {
        let valid = !topic_key.is_empty()
            && topic_key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        valid.then(|| self.base_path.join(format!("{}.json", topic_key)))
    }
}

#[async_trait]
impl ContentStore for LocalContentStore {
    async fn get(&self, topic_key: &str) -> Result<Option<InterpretationContent>> {
        let Some(path) = self.file_for(topic_key) else {
            tracing::warn!("⚠️ Topic key '{}' is not a valid file name, no content", topic_key);
            return Ok(None);
        };

        let data = match tokio::fs::read(&path).await {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No content file at {}", path.display());
                return Ok(None);
            }
            Err(e) => {
                return Err(NumerologiaError::lookup_failure(
                    topic_key,
                    format!("cannot read {}: {}", path.display(), e),
                ))
            }
        };

        let value: serde_json::Value = serde_json::from_slice(&data).map_err(|e| {
            NumerologiaError::lookup_failure(topic_key, format!("malformed JSON: {}", e))
        })?;

        InterpretationContent::from_stored_value(value).map_err(|e| {
            NumerologiaError::lookup_failure(topic_key, format!("unexpected content shape: {}", e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_reads_plain_and_structured_files() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("motivacao_01.json"), r#""Independência""#).unwrap();
        std::fs::write(
            dir.path().join("destino_22.json"),
            r#"{"titulo": "Destino 22", "caracteristicas": ["Construtor"]}"#,
        )
        .unwrap();

        let store = LocalContentStore::new(dir.path());
        assert_eq!(
            store.get("motivacao_01").await.unwrap(),
            Some(InterpretationContent::from("Independência"))
        );
        assert_eq!(
            store.get("destino_22").await.unwrap().unwrap().render(),
            "Destino 22\n\nCaracterísticas:\n- Construtor"
        );
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let store = LocalContentStore::new(dir.path());
        assert_eq!(store.get("expressao_09").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_malformed_file_is_lookup_failure() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("missao_04.json"), "not json").unwrap();

        let store = LocalContentStore::new(dir.path());
        let err = store.get("missao_04").await.unwrap_err();
        assert!(matches!(err, NumerologiaError::LookupFailure { .. }));
    }

    #[tokio::test]
    async fn test_path_like_keys_have_no_content() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("passwd.json"), r#""segredo""#).unwrap();
        let store = LocalContentStore::new(dir.path().join("conteudos"));
        assert_eq!(store.get("../passwd").await.unwrap(), None);
        assert_eq!(store.get("").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_invalid_key_resolves_as_missing_without_retry() {
        use crate::core::resolver::ContentResolver;
        use crate::domain::content::InterpretationLookup;

        let dir = TempDir::new().unwrap();
        let resolver = ContentResolver::new(LocalContentStore::new(dir.path()));
        assert_eq!(
            resolver.lookup("cores/pedras", 7, None).await,
            InterpretationLookup::Missing
        );
    }
}
