use thiserror::Error;

#[derive(Error, Debug)]
pub enum MenuError {
    #[error("Persisted price snapshot is malformed: {message}")]
    MalformedPersistedData { message: String },

    #[error("Invalid price input '{input}': {reason}")]
    InvalidPriceInput { input: String, reason: String },

    #[error("Failed to persist price snapshot under '{key}': {message}")]
    PersistenceWriteFailure { key: String, message: String },

    #[error("Size {size_id} is not active for item {item_id}")]
    InactiveSize { item_id: u32, size_id: u32 },

    #[error("Unknown menu item: {item_id}")]
    UnknownItem { item_id: u32 },

    #[error("Unknown size: {size_id}")]
    UnknownSize { size_id: u32 },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value for {field} ('{value}'): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad input from whoever drives the menu
    UserInput,
    Persistence,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl MenuError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            MenuError::InvalidPriceInput { .. }
            | MenuError::InactiveSize { .. }
            | MenuError::UnknownItem { .. }
            | MenuError::UnknownSize { .. } => ErrorCategory::UserInput,
            MenuError::MalformedPersistedData { .. }
            | MenuError::PersistenceWriteFailure { .. }
            | MenuError::SerializationError(_) => ErrorCategory::Persistence,
            MenuError::ConfigValidationError { .. }
            | MenuError::InvalidConfigValueError { .. }
            | MenuError::TomlError(_) => ErrorCategory::Configuration,
            MenuError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::UserInput => ErrorSeverity::Low,
            ErrorCategory::Persistence => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// Errors the menu recovers from on its own; the session stays usable.
    pub fn is_recoverable(&self) -> bool {
        self.severity() <= ErrorSeverity::Medium
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            MenuError::MalformedPersistedData { .. } => {
                "Saved prices were discarded; re-enter any custom prices".to_string()
            }
            MenuError::InvalidPriceInput { .. } => {
                "Enter a non-negative number such as 9.50".to_string()
            }
            MenuError::PersistenceWriteFailure { .. } => {
                "Check free space and permissions of the storage directory".to_string()
            }
            MenuError::InactiveSize { item_id, size_id } => {
                format!("Enable the size first: toggle {} {}", item_id, size_id)
            }
            MenuError::UnknownItem { .. } | MenuError::UnknownSize { .. } => {
                "Run 'show' to list valid item and size ids".to_string()
            }
            MenuError::ConfigValidationError { field, .. }
            | MenuError::InvalidConfigValueError { field, .. } => {
                format!("Fix '{}' in the menu file", field)
            }
            MenuError::TomlError(_) => "Make sure the menu file is valid TOML".to_string(),
            MenuError::IoError(_) => "Check that the file exists and is readable".to_string(),
            MenuError::SerializationError(_) => {
                "Remove the saved snapshot with 'reset'".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            MenuError::InvalidPriceInput { input, .. } => {
                format!("'{}' is not a valid price; nothing was changed", input)
            }
            MenuError::InactiveSize { item_id, size_id } => format!(
                "Size {} of item {} is switched off; its price cannot be edited",
                size_id, item_id
            ),
            MenuError::UnknownItem { item_id } => format!("There is no item {}", item_id),
            MenuError::UnknownSize { size_id } => format!("There is no size {}", size_id),
            MenuError::PersistenceWriteFailure { .. } => {
                "Your change is active but could not be saved".to_string()
            }
            MenuError::MalformedPersistedData { .. } => {
                "Saved prices could not be read and were ignored".to_string()
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MenuError>;
