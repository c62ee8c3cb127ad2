use thiserror::Error;

/// Application-wide error types for schemata.
#[derive(Error, Debug)]
pub enum AppError {
    /// Loader configuration is invalid (empty or missing base directory,
    /// partials requested without a partials directory).
    #[error("Config error: {0}")]
    Config(String),

    /// A file path could not be resolved to a logical schema name.
    #[error("Name error: {0}")]
    Name(String),

    /// A partial fragment could not be loaded.
    #[error("Partial error: {0}")]
    Partial(String),

    /// A schema factory failed to produce a schema value.
    #[error("Factory error: {0}")]
    Factory(String),

    /// Model registration was rejected by the registry.
    #[error("Registry error: {0}")]
    Registry(String),

    /// JSON serialization/deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Filesystem I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Returns true if this error stems from how the loader was configured
    /// rather than from the contents of the schema tree.
    pub fn is_config(&self) -> bool {
        matches!(self, AppError::Config(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_errors() {
        assert!(AppError::Config("basedir must not be empty".into()).is_config());
        assert!(!AppError::Name("empty logical name".into()).is_config());
        assert!(!AppError::Registry("duplicate".into()).is_config());
    }

    #[test]
    fn test_error_display() {
        let err = AppError::Partial("partials/user.json not found".into());
        assert!(err.to_string().contains("partials/user.json"));
    }
}
