use thiserror::Error;

#[derive(Error, Debug)]
pub enum PredictError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Failed to load {artifact} artifact from '{path}': {reason}")]
    ArtifactLoadError {
        artifact: String,
        path: String,
        reason: String,
    },

    #[error("Schema mismatch in {artifact} artifact: {message}")]
    SchemaMismatchError { artifact: String, message: String },

    #[error("Unknown category '{value}' for column '{column}'")]
    UnknownCategoryError { column: String, value: String },

    #[error("Invalid value '{value}' for field '{field}': {reason}")]
    InvalidRecordError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Row {row} failed: {source}")]
    BatchRowError {
        row: usize,
        source: Box<PredictError>,
    },

    #[error("Model returned label {label}, expected 0 or 1")]
    ContractViolationError { label: i64 },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value for '{field}' ('{value}'): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, PredictError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Artifact,
    Input,
    Model,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl PredictError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PredictError::BatchRowError { source, .. } => source.category(),
            PredictError::ArtifactLoadError { .. } | PredictError::SchemaMismatchError { .. } => {
                ErrorCategory::Artifact
            }
            PredictError::UnknownCategoryError { .. }
            | PredictError::InvalidRecordError { .. }
            | PredictError::CsvError(_) => ErrorCategory::Input,
            PredictError::ContractViolationError { .. } => ErrorCategory::Model,
            PredictError::ConfigError { .. }
            | PredictError::InvalidConfigValueError { .. }
            | PredictError::TomlError(_) => ErrorCategory::Configuration,
            PredictError::IoError(_) | PredictError::SerializationError(_) => {
                ErrorCategory::System
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 單筆請求失敗，下一筆仍可處理
            ErrorCategory::Input => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Model | ErrorCategory::Artifact | ErrorCategory::System => {
                ErrorSeverity::Critical
            }
        }
    }

    /// 判斷是否為使用者輸入造成的錯誤
    pub fn is_client_error(&self) -> bool {
        match self {
            PredictError::BatchRowError { source, .. } => source.is_client_error(),
            other => matches!(
                other,
                PredictError::UnknownCategoryError { .. } | PredictError::InvalidRecordError { .. }
            ),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            PredictError::ArtifactLoadError { artifact, path, .. } => {
                format!("Could not load the {} from '{}'", artifact, path)
            }
            PredictError::SchemaMismatchError { artifact, .. } => {
                format!("The {} artifact does not match the expected feature layout", artifact)
            }
            PredictError::UnknownCategoryError { column, value } => format!(
                "The value '{}' for '{}' was not seen when the encoder was fitted",
                value, column
            ),
            PredictError::InvalidRecordError { field, reason, .. } => {
                format!("Invalid input for '{}': {}", field, reason)
            }
            PredictError::BatchRowError { row, source } => {
                format!("Row {}: {}", row, source.user_friendly_message())
            }
            PredictError::ContractViolationError { label } => {
                format!("The model produced an unexpected label ({})", label)
            }
            PredictError::ConfigError { message } => format!("Configuration problem: {}", message),
            PredictError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration value '{}' is invalid: {}", field, reason)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            PredictError::ArtifactLoadError { .. } => {
                "Check that the model, encoder and scaler files exist and are valid JSON exports"
            }
            PredictError::SchemaMismatchError { .. } => {
                "Re-export the artifacts from the same training run so their feature order matches"
            }
            PredictError::UnknownCategoryError { .. } => {
                "Choose one of the options the encoder was fitted on, or refit the encoder"
            }
            PredictError::InvalidRecordError { .. } => {
                "Correct the highlighted field and submit again"
            }
            PredictError::BatchRowError { source, .. } => source.recovery_suggestion(),
            PredictError::ContractViolationError { .. } => {
                "The model must be a binary classifier with classes 0 and 1"
            }
            PredictError::ConfigError { .. }
            | PredictError::InvalidConfigValueError { .. }
            | PredictError::TomlError(_) => "Review the configuration file and command line flags",
            PredictError::CsvError(_) => {
                "Make sure the CSV header contains all 15 booking fields"
            }
            PredictError::IoError(_) | PredictError::SerializationError(_) => {
                "Check file permissions and available disk space"
            }
        }
    }
}
