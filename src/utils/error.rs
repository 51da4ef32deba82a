use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExplorerError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Source file '{path}' could not be read: {source}")]
    MissingSourceFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Required column '{column}' is missing from '{file}'")]
    MissingColumn { file: String, column: String },

    #[error("Source file '{path}' is not valid {encoding}")]
    EncodingError { path: String, encoding: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Data,
    Configuration,
    Validation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ExplorerError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::IoError(_) | Self::MissingSourceFile { .. } => ErrorCategory::Io,
            Self::CsvError(_)
            | Self::SerializationError(_)
            | Self::MissingColumn { .. }
            | Self::EncodingError { .. } => ErrorCategory::Data,
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            Self::ValidationError { .. } => ErrorCategory::Validation,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 沒有基礎資料集就無法啟動
            Self::MissingSourceFile { .. } | Self::MissingColumn { .. } => ErrorSeverity::Critical,
            Self::IoError(_) | Self::EncodingError { .. } => ErrorSeverity::Medium,
            _ => ErrorSeverity::High,
        }
    }

    /// 給終端使用者看的訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::MissingSourceFile { path, .. } => {
                format!("Cannot start: data file '{}' is missing or unreadable", path)
            }
            Self::MissingColumn { file, column } => {
                format!("Cannot start: '{}' has no '{}' column", file, column)
            }
            Self::EncodingError { path, encoding } => {
                format!("'{}' could not be decoded as {}", path, encoding)
            }
            Self::CsvError(e) => format!("A data file is not valid CSV: {}", e),
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => format!("Configuration problem: {}", self),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Io => "Check that the data files exist at the configured paths",
            ErrorCategory::Data => "Check the CSV headers and encoding of the data files",
            ErrorCategory::Configuration => "Fix the configuration file or command-line flags",
            ErrorCategory::Validation => "Adjust the request and try again",
        }
    }
}

pub type Result<T> = std::result::Result<T, ExplorerError>;
