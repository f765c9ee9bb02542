use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum UsfError {
    #[error("IO error on {}: {}", .path.display(), .source)]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error parsing JSON: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Serialization error: {message}")]
    SerializationError { message: String },

    #[error("Missing field: {field}")]
    MissingFieldError { field: String },

    #[error("Error reading field {field}: {message}")]
    TypeMismatchError { field: String, message: String },

    #[error("Invalid USF data: {0}")]
    ValidationError(#[from] ValidationError),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

/// 錯誤分類，方便呼叫端依類型處理
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Parse,
    Schema,
    Validation,
    Config,
}

impl UsfError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::IoError {
            path: path.into(),
            source,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::IoError { .. } => ErrorCategory::Io,
            Self::ParseError(_) | Self::SerializationError { .. } => ErrorCategory::Parse,
            Self::MissingFieldError { .. } | Self::TypeMismatchError { .. } => {
                ErrorCategory::Schema
            }
            Self::ValidationError(_) => ErrorCategory::Validation,
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                ErrorCategory::Config
            }
        }
    }

    /// 驗證失敗時取得具體的違規類型
    pub fn validation_kind(&self) -> Option<ValidationErrorKind> {
        match self {
            Self::ValidationError(e) => Some(e.kind),
            _ => None,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::IoError { path, .. } => format!("Failed to open file {}", path.display()),
            Self::ParseError(_) => "The file is not valid JSON".to_string(),
            Self::SerializationError { .. } => "The document could not be serialized".to_string(),
            Self::MissingFieldError { .. } => "Missing required fields in the JSON data".to_string(),
            Self::TypeMismatchError { field, .. } => {
                format!("Field '{}' has an unexpected shape", field)
            }
            Self::ValidationError(e) => format!("Invalid data format in USF file: {}", e.message),
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                "The configuration file could not be used".to_string()
            }
        }
    }
}

/// A broken document invariant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind}: {message}")]
pub struct ValidationError {
    pub kind: ValidationErrorKind,
    pub message: String,
}

impl ValidationError {
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A period is missing its start or end time.
    EmptyPeriodTime,
    /// A timetable entry does not hold exactly four items.
    MalformedTimetableEntry,
    DayOutOfRange,
    InvalidWeekType,
    /// The entry names a subject absent from `subjects`.
    UnknownSubjectReference,
    PeriodOutOfRange,
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::EmptyPeriodTime => "Invalid periods data",
            Self::MalformedTimetableEntry
            | Self::DayOutOfRange
            | Self::InvalidWeekType
            | Self::UnknownSubjectReference
            | Self::PeriodOutOfRange => "Invalid timetable data",
        };
        f.write_str(label)
    }
}

pub type Result<T> = std::result::Result<T, UsfError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categories() {
        let missing = UsfError::MissingFieldError {
            field: "periods".to_string(),
        };
        assert_eq!(missing.category(), ErrorCategory::Schema);
        assert_eq!(missing.to_string(), "Missing field: periods");

        let io = UsfError::io(
            "nope.json",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert_eq!(io.category(), ErrorCategory::Io);
        assert!(io.user_friendly_message().contains("nope.json"));
    }

    #[test]
    fn test_validation_kind_passthrough() {
        let err: UsfError =
            ValidationError::new(ValidationErrorKind::DayOutOfRange, "entry 0: day 8").into();
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert_eq!(err.validation_kind(), Some(ValidationErrorKind::DayOutOfRange));
        assert_eq!(
            err.to_string(),
            "Invalid USF data: Invalid timetable data: entry 0: day 8"
        );
    }
}
