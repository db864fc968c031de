use thiserror::Error;

#[derive(Error, Debug)]
pub enum FilterError {
    #[error("Failed to read '{path}': {source}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write '{path}': {source}")]
    WriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

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
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Output,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl FilterError {
    pub fn read(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::ReadError {
            path: path.into(),
            source,
        }
    }

    pub fn write(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::WriteError {
            path: path.into(),
            source,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ReadError { .. } => ErrorCategory::Input,
            Self::WriteError { .. } => ErrorCategory::Output,
            Self::TomlError(_) | Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // the target may already be truncated
            Self::WriteError { .. } => ErrorSeverity::Critical,
            Self::ReadError { .. } => ErrorSeverity::High,
            Self::TomlError(_) | Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                ErrorSeverity::Medium
            }
        }
    }

    pub fn is_write_failure(&self) -> bool {
        matches!(self, Self::WriteError { .. })
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ReadError { path, source } => {
                format!("Could not read index file '{}' ({})", path, source.kind())
            }
            Self::WriteError { path, source } => {
                format!("Could not write index file '{}' ({})", path, source.kind())
            }
            Self::TomlError(e) => format!("Config file is not valid TOML: {}", e.message()),
            Self::ConfigError { message } => format!("Invalid configuration: {}", message),
            Self::InvalidConfigValueError {
                field,
                value,
                reason,
            } => format!("Setting '{}' has invalid value '{}': {}", field, value, reason),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::ReadError { .. } => {
                "Check that the path exists, is a regular file and is readable"
            }
            Self::WriteError { .. } => {
                "Check permissions and free disk space; the file may be truncated, restore it from version control"
            }
            Self::TomlError(_) => "Fix the syntax of the --config file",
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                "Review the --config file and command line flags"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, FilterError>;
