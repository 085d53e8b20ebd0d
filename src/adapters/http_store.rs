use crate::domain::content::InterpretationContent;
use crate::domain::ports::{ConfigProvider, ContentStore};
use crate::utils::error::{NumerologiaError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

pub const DEFAULT_TABLE: &str = "conteudos";
pub const DEFAULT_TOPIC_COLUMN: &str = "topico";
pub const DEFAULT_CONTENT_COLUMN: &str = "conteudo";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

/// Content table on a hosted PostgREST backend.
///
/// Issues `GET {endpoint}/rest/v1/{table}?select={content}&{topic}=eq.{key}`
/// and reads the first row of the JSON array answer.
#[derive(Debug, Clone)]
pub struct HttpContentStore {
    client: Client,
    endpoint: String,
    table: String,
    topic_column: String,
    content_column: String,
    api_key: Option<String>,
}

impl HttpContentStore {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| NumerologiaError::ConfigError {
                message: format!("cannot build HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            table: DEFAULT_TABLE.to_string(),
            topic_column: DEFAULT_TOPIC_COLUMN.to_string(),
            content_column: DEFAULT_CONTENT_COLUMN.to_string(),
            api_key: None,
        })
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let endpoint = config
            .store_endpoint()
            .ok_or_else(|| NumerologiaError::MissingConfigError {
                field: "store.endpoint".to_string(),
            })?;

        let mut store = Self::new(endpoint, Duration::from_secs(config.timeout_seconds()))?
            .with_table(config.store_table())
            .with_columns(config.topic_column(), config.content_column());
        if let Some(key) = config.store_api_key() {
            store = store.with_api_key(key);
        }
        Ok(store)
    }

    pub fn with_table(mut self, table: &str) -> Self {
        self.table = table.to_string();
        self
    }

    pub fn with_columns(mut self, topic_column: &str, content_column: &str) -> Self {
        self.topic_column = topic_column.to_string();
        self.content_column = content_column.to_string();
        self
    }

    pub fn with_api_key(mut self, api_key: &str) -> Self {
        self.api_key = Some(api_key.to_string());
        self
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.endpoint.trim_end_matches('/'), self.table)
    }
}

#[async_trait]
impl ContentStore for HttpContentStore {
    async fn get(&self, topic_key: &str) -> Result<Option<InterpretationContent>> {
        let filter = format!("eq.{}", topic_key);
        let mut request = self.client.get(self.table_url()).query(&[
            ("select", self.content_column.as_str()),
            (self.topic_column.as_str(), filter.as_str()),
        ]);

        if let Some(api_key) = &self.api_key {
            request = request.header("apikey", api_key).bearer_auth(api_key);
        }

        tracing::debug!("Making content request for '{}' to {}", topic_key, self.table_url());
        let response = request
            .send()
            .await
            .map_err(|e| NumerologiaError::lookup_failure(topic_key, e.to_string()))?;

        let status = response.status();
        tracing::debug!("Content store response status: {}", status);
        if !status.is_success() {
            return Err(NumerologiaError::lookup_failure(
                topic_key,
                format!("content store answered {}", status),
            ));
        }

        let body: serde_json::Value = response.json().await.map_err(|e| {
            NumerologiaError::lookup_failure(topic_key, format!("malformed response: {}", e))
        })?;

        let serde_json::Value::Array(rows) = body else {
            return Err(NumerologiaError::lookup_failure(
                topic_key,
                "expected a JSON array of rows",
            ));
        };

        let Some(row) = rows.into_iter().next() else {
            return Ok(None);
        };

        let value = match row {
            serde_json::Value::Object(mut columns) => columns
                .remove(&self.content_column)
                .unwrap_or(serde_json::Value::Null),
            other => {
                return Err(NumerologiaError::lookup_failure(
                    topic_key,
                    format!("unexpected row shape: {}", other),
                ))
            }
        };

        InterpretationContent::from_stored_value(value).map_err(|e| {
            NumerologiaError::lookup_failure(topic_key, format!("unexpected content shape: {}", e))
        })
    }
}
