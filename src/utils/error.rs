use crate::domain::model::{BlockReason, CourseId};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PickerError {
    #[error("Invalid catalog row {row}: {reason}")]
    InvalidRow { row: usize, reason: String },

    #[error("Duplicate course code {id} in rows {first_row} and {row}")]
    DuplicateId {
        id: CourseId,
        first_row: usize,
        row: usize,
    },

    #[error("Course {id} cannot be selected: {reason}")]
    BlockedSelection { id: CourseId, reason: BlockReason },

    #[error("Catalog file not found: {path}")]
    CatalogNotFound { path: String },

    #[error("Catalog is missing required column '{column}'")]
    MissingColumn { column: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid command: {message}")]
    CommandError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Catalog,
    Selection,
    Configuration,
    Input,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PickerError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PickerError::InvalidRow { .. }
            | PickerError::DuplicateId { .. }
            | PickerError::CatalogNotFound { .. }
            | PickerError::MissingColumn { .. }
            | PickerError::CsvError(_) => ErrorCategory::Catalog,
            PickerError::BlockedSelection { .. } => ErrorCategory::Selection,
            PickerError::ConfigValidationError { .. }
            | PickerError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            PickerError::CommandError { .. } => ErrorCategory::Input,
            PickerError::IoError(_) | PickerError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            PickerError::BlockedSelection { .. } | PickerError::CommandError { .. } => {
                ErrorSeverity::Low
            }
            PickerError::ConfigValidationError { .. }
            | PickerError::InvalidConfigValueError { .. } => ErrorSeverity::Medium,
            PickerError::InvalidRow { .. }
            | PickerError::DuplicateId { .. }
            | PickerError::CatalogNotFound { .. }
            | PickerError::MissingColumn { .. }
            | PickerError::CsvError(_) => ErrorSeverity::High,
            PickerError::IoError(_) | PickerError::SerializationError(_) => {
                ErrorSeverity::Critical
            }
        }
    }

    /// Selection and command errors leave the session usable.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::Selection | ErrorCategory::Input
        )
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            PickerError::InvalidRow { row, reason } => {
                format!("The course catalog has a bad entry on row {}: {}", row, reason)
            }
            PickerError::DuplicateId { id, first_row, row } => format!(
                "Course code {} appears twice in the catalog (rows {} and {})",
                id, first_row, row
            ),
            PickerError::BlockedSelection { id, reason } => match reason {
                BlockReason::LimitReached => format!(
                    "Course {} was not added: the selection limit has been reached",
                    id
                ),
                _ => format!(
                    "Course {} was not added: it is incompatible with a selected course",
                    id
                ),
            },
            PickerError::CatalogNotFound { path } => {
                format!("Could not find the course catalog at '{}'", path)
            }
            PickerError::MissingColumn { column } => {
                format!("The course catalog has no '{}' column", column)
            }
            PickerError::CsvError(e) => format!("The course catalog could not be read: {}", e),
            PickerError::ConfigValidationError { field, message } => {
                format!("Configuration problem in '{}': {}", field, message)
            }
            PickerError::InvalidConfigValueError { field, value, reason } => {
                format!("'{}' is not a valid value for '{}': {}", value, field, reason)
            }
            PickerError::CommandError { message } => format!("Unrecognized command: {}", message),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self.category() {
            ErrorCategory::Catalog => format!(
                "Provide a CSV or TSV file with the columns {} (Incompatibilities may be empty)",
                EXPECTED_COLUMNS
            ),
            ErrorCategory::Selection => {
                "Deselect a conflicting course or one of your current picks first".to_string()
            }
            ErrorCategory::Configuration => {
                "Check the configuration file and command line flags".to_string()
            }
            ErrorCategory::Input => "Type 'help' to list the available commands".to_string(),
            ErrorCategory::System => "Check file permissions and available disk space".to_string(),
        }
    }
}

pub const EXPECTED_COLUMNS: &str = "Code, Course, Incompatibilities";

pub type Result<T> = std::result::Result<T, PickerError>;
