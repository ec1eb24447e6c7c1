use thiserror::Error;

#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("Invalid {field} '{value}': {reason}")]
    ValidationError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Employee ID already exists: {id}")]
    DuplicateIdError { id: String },

    #[error("Employee not found: {id}")]
    NotFoundError { id: String },

    #[error("Notification failed: {message}")]
    NotificationError { message: String },

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value for {field} '{value}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing configuration field: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Lookup,
    Notification,
    Storage,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl DirectoryError {
    pub fn validation(field: &str, value: &str, reason: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ValidationError { .. } | Self::DuplicateIdError { .. } => ErrorCategory::Input,
            Self::NotFoundError { .. } => ErrorCategory::Lookup,
            Self::NotificationError { .. } | Self::HttpError(_) => ErrorCategory::Notification,
            Self::CsvError(_) | Self::IoError(_) => ErrorCategory::Storage,
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 使用者輸入錯誤只需重新輸入
            ErrorCategory::Input | ErrorCategory::Lookup => ErrorSeverity::Low,
            ErrorCategory::Notification => ErrorSeverity::Medium,
            ErrorCategory::Storage => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Critical,
        }
    }

    /// 給終端使用者看的訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ValidationError { field, reason, .. } => format!("Invalid {}: {}", field, reason),
            Self::DuplicateIdError { id } => format!("Employee ID {} already exists.", id),
            Self::NotFoundError { .. } => "Employee not found.".to_string(),
            Self::NotificationError { message } => format!("Failed to send email: {}", message),
            Self::HttpError(e) => format!("Failed to send email: {}", e),
            Self::CsvError(_) | Self::IoError(_) => {
                format!("Could not write export file: {}", self)
            }
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => format!("Configuration problem: {}", self),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::ValidationError { .. } => "Check the value format and try again",
            Self::DuplicateIdError { .. } => "Choose an unused employee ID",
            Self::NotFoundError { .. } => "List all employees to find the correct ID",
            Self::NotificationError { .. } | Self::HttpError(_) => {
                "Check the [notification] endpoint and credentials; the record was still saved"
            }
            Self::CsvError(_) | Self::IoError(_) => {
                "Check that the export directory exists and is writable"
            }
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => "Fix the configuration file and restart",
        }
    }
}

pub type Result<T> = std::result::Result<T, DirectoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_errors_are_low_severity() {
        let err = DirectoryError::validation("salary", "-1", "must not be negative");
        assert_eq!(err.category(), ErrorCategory::Input);
        assert_eq!(err.severity(), ErrorSeverity::Low);
        assert_eq!(err.user_friendly_message(), "Invalid salary: must not be negative");
    }

    #[test]
    fn test_not_found_message() {
        let err = DirectoryError::NotFoundError {
            id: "E99999999".to_string(),
        };
        assert!(err.user_friendly_message().contains("Employee not found"));
        assert_eq!(err.severity(), ErrorSeverity::Low);
    }

    #[test]
    fn test_config_errors_are_critical() {
        let err = DirectoryError::MissingConfigError {
            field: "notification.endpoint".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::Critical);
    }
}
