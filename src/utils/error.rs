use thiserror::Error;

#[derive(Error, Debug)]
pub enum DiagError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Database error: {0}")]
    DatabaseError(#[from] mongodb::error::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Command '{program}' failed: {message}")]
    CommandError { program: String, message: String },

    #[error("Step '{step}' failed: {message}")]
    StepError { step: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Database,
    Configuration,
    Process,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl DiagError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::HttpError(_) => ErrorCategory::Network,
            Self::DatabaseError(_) | Self::StepError { .. } => ErrorCategory::Database,
            Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            Self::CommandError { .. } => ErrorCategory::Process,
            Self::IoError(_) | Self::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network | ErrorCategory::Database | ErrorCategory::Process => {
                ErrorSeverity::High
            }
            ErrorCategory::Configuration => ErrorSeverity::Medium,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 對應到 CLI 的退出碼
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
            Self::HttpError(e) if e.is_connect() || e.is_timeout() => {
                "Make sure the backend server is running and the base URL is correct".to_string()
            }
            Self::HttpError(_) => "Check the request URL and payload".to_string(),
            Self::DatabaseError(_) | Self::StepError { .. } => {
                "Verify the connection string, network access and database credentials".to_string()
            }
            Self::MissingConfigError { field } => {
                format!("Set {} in the environment or in a .env file", field)
            }
            Self::InvalidConfigValueError { field, .. } => {
                format!("Fix the value of '{}' in stackcheck.toml or on the command line", field)
            }
            Self::ConfigError { .. } => "Check stackcheck.toml for syntax errors".to_string(),
            Self::CommandError { program, .. } => {
                format!("Make sure '{}' is installed and available on PATH", program)
            }
            Self::IoError(_) | Self::SerializationError(_) => {
                "Check file permissions and available disk space".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Could not complete the HTTP request: {}", self),
            ErrorCategory::Database => format!("Database check failed: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::Process => format!("Deployment tool failed: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, DiagError>;
