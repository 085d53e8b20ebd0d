use crate::adapters::http_store::{
    DEFAULT_CONTENT_COLUMN, DEFAULT_TABLE, DEFAULT_TIMEOUT_SECONDS, DEFAULT_TOPIC_COLUMN,
};
use crate::core::topics::TopicTable;
use crate::domain::ports::{ConfigProvider, StoreKind};
use crate::utils::error::{NumerologiaError, Result};
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub store: StoreConfig,
    pub resolver: Option<ResolverConfig>,
    pub topics: Option<TopicsConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub r#type: String,
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub table: Option<String>,
    pub topic_column: Option<String>,
    pub content_column: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub path: Option<String>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            r#type: "memory".to_string(),
            endpoint: None,
            api_key: None,
            table: None,
            topic_column: None,
            content_column: None,
            timeout_seconds: None,
            path: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    pub retry_once: Option<bool>,
    pub profile: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicsConfig {
    /// alias -> canonical category
    pub synonyms: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub json: Option<bool>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(NumerologiaError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| NumerologiaError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unset variables stay as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| NumerologiaError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        use crate::utils::validation::*;

        let kind = parse_store_kind(&self.store.r#type)?;
        match kind {
            StoreKind::Http => {
                let endpoint = validate_required_field("store.endpoint", &self.store.endpoint)?;
                validate_url("store.endpoint", endpoint)?;
                validate_non_empty_string("store.table", self.store_table())?;
                validate_non_empty_string("store.topic_column", self.topic_column())?;
                validate_non_empty_string("store.content_column", self.content_column())?;
            }
            StoreKind::Local => {
                let path = validate_required_field("store.path", &self.store.path)?;
                validate_path("store.path", path)?;
            }
            StoreKind::Memory => {}
        }

        if let Some(api_key) = &self.store.api_key {
            if api_key.contains("${") {
                return Err(NumerologiaError::MissingConfigError {
                    field: format!("store.api_key (environment variable in {})", api_key),
                });
            }
        }

        if let Some(timeout) = self.store.timeout_seconds {
            validate_positive_number("store.timeout_seconds", timeout, 1)?;
        }

        if let Some(level) = self.log_level() {
            let valid_levels = ["trace", "debug", "info", "warn", "error"];
            if !valid_levels.contains(&level) {
                return Err(NumerologiaError::InvalidConfigValueError {
                    field: "logging.level".to_string(),
                    value: level.to_string(),
                    reason: format!("Valid levels: {}", valid_levels.join(", ")),
                });
            }
        }

        Ok(())
    }

    /// Built-in synonym table plus the `[topics.synonyms]` entries.
    pub fn topic_table(&self) -> TopicTable {
        let synonyms = self.topics.as_ref().and_then(|t| t.synonyms.as_ref());
        let mut table = TopicTable::default();
        if let Some(synonyms) = synonyms {
            for (alias, canonical) in synonyms {
                table = table.with_synonym(alias, canonical);
            }
        }
        table
    }

    pub fn profile(&self) -> Option<&str> {
        self.resolver.as_ref().and_then(|r| r.profile.as_deref())
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.level.as_deref())
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }
}

fn parse_store_kind(kind: &str) -> Result<StoreKind> {
    match kind {
        "http" => Ok(StoreKind::Http),
        "local" => Ok(StoreKind::Local),
        "memory" => Ok(StoreKind::Memory),
        other => Err(NumerologiaError::InvalidConfigValueError {
            field: "store.type".to_string(),
            value: other.to_string(),
            reason: "Valid store types: http, local, memory".to_string(),
        }),
    }
}

impl ConfigProvider for TomlConfig {
    fn store_kind(&self) -> StoreKind {
        // validate() reports unknown types; fall back to the empty store here
        parse_store_kind(&self.store.r#type).unwrap_or(StoreKind::Memory)
    }

    fn store_endpoint(&self) -> Option<&str> {
        self.store.endpoint.as_deref()
    }

    fn store_api_key(&self) -> Option<&str> {
        self.store.api_key.as_deref()
    }

    fn store_table(&self) -> &str {
        self.store.table.as_deref().unwrap_or(DEFAULT_TABLE)
    }

    fn topic_column(&self) -> &str {
        self.store.topic_column.as_deref().unwrap_or(DEFAULT_TOPIC_COLUMN)
    }

    fn content_column(&self) -> &str {
        self.store
            .content_column
            .as_deref()
            .unwrap_or(DEFAULT_CONTENT_COLUMN)
    }

    fn store_path(&self) -> Option<&str> {
        self.store.path.as_deref()
    }

    fn timeout_seconds(&self) -> u64 {
        self.store.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }

    fn retry_once(&self) -> bool {
        self.resolver
            .as_ref()
            .and_then(|r| r.retry_once)
            .unwrap_or(true)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_http_store_config() {
        let toml_content = r#"
[store]
type = "http"
endpoint = "https://abc.supabase.co"
api_key = "anon"
table = "conteudos"
timeout_seconds = 3

[resolver]
retry_once = false
profile = "cliente"

[topics.synonyms]
alma = "motivacao"
"Número da Alma" = "motivação"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.store_kind(), StoreKind::Http);
        assert_eq!(config.store_endpoint(), Some("https://abc.supabase.co"));
        assert_eq!(config.timeout_seconds(), 3);
        assert_eq!(config.topic_column(), "topico");
        assert!(!config.retry_once());
        assert_eq!(config.profile(), Some("cliente"));

        let topics = config.topic_table();
        assert_eq!(topics.canonicalize("alma"), "motivacao");
        assert_eq!(topics.canonicalize("numero da alma"), "motivacao");
    }

    #[test]
    fn test_defaults_to_memory_store() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config.store_kind(), StoreKind::Memory);
        assert!(config.retry_once());
        assert!(config.validate().is_ok());
        assert!(!config.json_logs());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("NUMEROLOGIA_TEST_ANON_KEY", "secret-anon");

        let toml_content = r#"
[store]
type = "http"
endpoint = "https://abc.supabase.co"
api_key = "${NUMEROLOGIA_TEST_ANON_KEY}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.store_api_key(), Some("secret-anon"));

        std::env::remove_var("NUMEROLOGIA_TEST_ANON_KEY");
    }

    #[test]
    fn test_unset_env_var_fails_validation() {
        let toml_content = r#"
[store]
type = "http"
endpoint = "https://abc.supabase.co"
api_key = "${NUMEROLOGIA_TEST_UNSET_KEY}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(matches!(
            config.validate(),
            Err(NumerologiaError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_config_validation() {
        let missing_endpoint = TomlConfig::from_toml_str("[store]\ntype = \"http\"\n").unwrap();
        assert!(missing_endpoint.validate().is_err());

        let bad_url =
            TomlConfig::from_toml_str("[store]\ntype = \"http\"\nendpoint = \"invalid-url\"\n")
                .unwrap();
        assert!(bad_url.validate().is_err());

        let local_without_path = TomlConfig::from_toml_str("[store]\ntype = \"local\"\n").unwrap();
        assert!(local_without_path.validate().is_err());

        let unknown = TomlConfig::from_toml_str("[store]\ntype = \"s3\"\n").unwrap();
        assert!(unknown.validate().is_err());

        let bad_level = TomlConfig::from_toml_str("[logging]\nlevel = \"loud\"\n").unwrap();
        assert!(bad_level.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[store]
type = "local"
path = "./conteudos"

[logging]
level = "debug"
json = true
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.store_kind(), StoreKind::Local);
        assert_eq!(config.store_path(), Some("./conteudos"));
        assert_eq!(config.log_level(), Some("debug"));
        assert!(config.json_logs());
        assert!(config.validate().is_ok());
    }
}
