use crate::domain::model::FileOutcome;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("{file}: missing required columns [{}]", .columns.join(", "))]
    MissingColumnsError { file: String, columns: Vec<String> },

    #[error("{file}: invalid CSV ({message})")]
    ParseError { file: String, message: String },

    #[error("No usable input: none of the {} file(s) could be converted", .outcomes.len())]
    NoUsableInputError {
        outcomes: Vec<FileOutcome>,
        required: Vec<String>,
    },

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
    Configuration,
    Input,
    Output,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl EtlError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::ConfigValidationError { .. }
            | EtlError::InvalidConfigValueError { .. }
            | EtlError::MissingConfigError { .. } => ErrorCategory::Configuration,
            EtlError::MissingColumnsError { .. }
            | EtlError::ParseError { .. }
            | EtlError::NoUsableInputError { .. }
            | EtlError::CsvError(_) => ErrorCategory::Input,
            EtlError::SerializationError(_) => ErrorCategory::Output,
            EtlError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // Per-file failures only skip that file.
            EtlError::MissingColumnsError { .. } | EtlError::ParseError { .. } => {
                ErrorSeverity::Low
            }
            EtlError::NoUsableInputError { .. } => ErrorSeverity::Medium,
            EtlError::ConfigValidationError { .. }
            | EtlError::InvalidConfigValueError { .. }
            | EtlError::MissingConfigError { .. }
            | EtlError::CsvError(_) => ErrorSeverity::High,
            EtlError::IoError(_) | EtlError::SerializationError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            EtlError::MissingColumnsError { columns, .. } => format!(
                "Add the missing columns ({}) to the export and try again",
                columns.join(", ")
            ),
            EtlError::ParseError { .. } | EtlError::CsvError(_) => {
                "Make sure the file is a UTF-8 encoded CSV with a header row".to_string()
            }
            EtlError::NoUsableInputError { required, .. } => format!(
                "Every input file must contain these columns: {}",
                required.join(", ")
            ),
            EtlError::ConfigValidationError { field, .. }
            | EtlError::InvalidConfigValueError { field, .. } => {
                format!("Check the value of '{}' in your flags or config file", field)
            }
            EtlError::MissingConfigError { field } => {
                format!("Provide '{}' on the command line or in the config file", field)
            }
            EtlError::IoError(_) => {
                "Check that the input files exist and the output directory is writable"
                    .to_string()
            }
            EtlError::SerializationError(_) => {
                "Re-run with --verbose and report the failing record".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            EtlError::NoUsableInputError { outcomes, .. } => {
                let mut message = String::from("None of the uploaded files could be converted:");
                for outcome in outcomes {
                    message.push_str(&format!("\n  {}: {}", outcome.filename, outcome.status));
                }
                message
            }
            EtlError::IoError(e) => format!("File access failed: {}", e),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
