use thiserror::Error;

#[derive(Error, Debug)]
pub enum NumerologiaError {
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Content lookup failed for '{key}': {message}")]
    LookupFailure { key: String, message: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Content,
    Io,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl NumerologiaError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    pub fn lookup_failure(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::LookupFailure {
            key: key.into(),
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput { .. } => ErrorCategory::Input,
            Self::LookupFailure { .. } => ErrorCategory::Content,
            Self::CsvError(_) | Self::IoError(_) | Self::SerializationError(_) => {
                ErrorCategory::Io
            }
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Content => ErrorSeverity::Medium,
            ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::Io => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Critical,
        }
    }

    /// Only store failures are worth another attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::LookupFailure { .. })
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::InvalidInput { .. } => {
                "Check the name (at least one letter) and the date format (YYYY-MM-DD)"
            }
            Self::LookupFailure { .. } => {
                "Check the content store endpoint and credentials, then retry"
            }
            Self::CsvError(_) => "Make sure the CSV has a header row: nome,data_nascimento",
            Self::IoError(_) => "Check that the file exists and is readable",
            Self::SerializationError(_) => "Stored content must be a JSON string or object",
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => "Review the TOML configuration file",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::InvalidInput { message } => format!("Dados inválidos: {}", message),
            Self::LookupFailure { .. } => "Conteúdo indisponível no momento".to_string(),
            Self::MissingConfigError { field } => {
                format!("Configuração obrigatória ausente: {}", field)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, NumerologiaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_failure_is_retryable() {
        let err = NumerologiaError::lookup_failure("motivacao_11", "connection refused");
        assert!(err.is_retryable());
        assert_eq!(err.category(), ErrorCategory::Content);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert_eq!(err.user_friendly_message(), "Conteúdo indisponível no momento");
    }

    #[test]
    fn test_invalid_input_is_not_retryable() {
        let err = NumerologiaError::invalid_input("empty name");
        assert!(!err.is_retryable());
        assert_eq!(err.category(), ErrorCategory::Input);
        assert!(err.to_string().contains("empty name"));
    }
}
