use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompareError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Record '{country}' is missing a valid {field} value")]
    MissingFieldError { country: String, field: String },

    #[error("Reference country '{country}' not found in dataset")]
    ReferenceNotFoundError { country: String },

    #[error("Reference country '{country}' has an unusable {field} baseline ({value})")]
    InvalidReferenceError {
        country: String,
        field: String,
        value: f64,
    },

    #[error("Reference country '{country}' matches {matches} records")]
    AmbiguousReferenceError { country: String, matches: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Computation,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl CompareError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CompareError::CsvError(_)
            | CompareError::ValidationError { .. }
            | CompareError::MissingFieldError { .. } => ErrorCategory::Input,
            CompareError::TomlError(_)
            | CompareError::ConfigError { .. }
            | CompareError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            CompareError::ReferenceNotFoundError { .. }
            | CompareError::InvalidReferenceError { .. }
            | CompareError::AmbiguousReferenceError { .. } => ErrorCategory::Computation,
            CompareError::IoError(_) | CompareError::SerializationError(_) => {
                ErrorCategory::System
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 換一個參考國家即可重試
            ErrorCategory::Computation => ErrorSeverity::Medium,
            ErrorCategory::Input | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 程序退出碼
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            CompareError::CsvError(_) => {
                "Check that the data file is valid CSV/TSV with a header row".to_string()
            }
            CompareError::IoError(_) => {
                "Check that the file exists and that you have permission to read/write it"
                    .to_string()
            }
            CompareError::SerializationError(_) => "Retry; this is most likely a bug".to_string(),
            CompareError::TomlError(_) => {
                "Fix the TOML syntax in the configuration file".to_string()
            }
            CompareError::ConfigError { .. } => {
                "Review the configuration file and command line flags".to_string()
            }
            CompareError::InvalidConfigValueError { field, .. } => {
                format!("Provide a valid value for '{}'", field)
            }
            CompareError::ValidationError { .. } => {
                "Clean the dataset so every row has a country name".to_string()
            }
            CompareError::MissingFieldError { country, field } => {
                format!("Fill in the {} value for '{}' in the dataset", field, country)
            }
            CompareError::ReferenceNotFoundError { .. } => {
                "Run with --list-countries to see the available reference countries".to_string()
            }
            CompareError::InvalidReferenceError { .. } => {
                "Pick a reference country with positive, realistic salary and cost of living"
                    .to_string()
            }
            CompareError::AmbiguousReferenceError { .. } => {
                "Remove duplicate rows or set comparison.on_duplicate = \"first\"".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            CompareError::ReferenceNotFoundError { country } => {
                format!("'{}' is not in the dataset", country)
            }
            CompareError::InvalidReferenceError { country, field, .. } => format!(
                "Cannot compare against '{}': its {} is zero, negative or too small",
                country, field
            ),
            CompareError::MissingFieldError { country, field } => {
                format!("'{}' has no usable {} figure", country, field)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CompareError>;
