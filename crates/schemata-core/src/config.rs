use std::path::{Path, PathBuf};

use crate::error::AppError;

/// The schema file extension recognized by the walker.
pub const SCHEMA_EXT: &str = "json";

/// Caller-owned loader configuration.
///
/// There is no process-wide state: every [`crate::SchemaLoader`] owns its own
/// configuration, so independent loaders with different base directories can
/// coexist.
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Root of the schema tree. Required, must be an existing directory.
    pub basedir: PathBuf,
    /// Directory holding partial fragments. Files under it are never
    /// registered as models.
    pub partialsdir: Option<PathBuf>,
    /// Extra arguments passed to every schema factory, in order, after the
    /// builder handle.
    pub arguments: Vec<serde_json::Value>,
}

impl LoaderConfig {
    pub fn new(basedir: impl Into<PathBuf>) -> Self {
        Self {
            basedir: basedir.into(),
            partialsdir: None,
            arguments: Vec::new(),
        }
    }

    pub fn with_partialsdir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.partialsdir = Some(dir.into());
        self
    }

    pub fn with_arguments(mut self, arguments: Vec<serde_json::Value>) -> Self {
        self.arguments = arguments;
        self
    }

    /// Check the configuration invariants.
    ///
    /// - `basedir` must be a non-empty path to an existing directory
    /// - `partialsdir`, when set, must be non-empty
    pub fn validate(&self) -> Result<(), AppError> {
        if self.basedir.as_os_str().is_empty() {
            return Err(AppError::Config("basedir must not be empty".into()));
        }

        if !self.basedir.is_dir() {
            return Err(AppError::Config(format!(
                "basedir {} is not a directory",
                self.basedir.display()
            )));
        }

        if let Some(dir) = &self.partialsdir
            && dir.as_os_str().is_empty()
        {
            return Err(AppError::Config("partialsdir must not be empty".into()));
        }

        Ok(())
    }

    /// Resolve both directories against the current working directory.
    ///
    /// `basedir` and `partialsdir` may arrive in different forms (one
    /// relative, one absolute); the partials exclusion compares path
    /// prefixes, so both sides must be in the same form before any
    /// traversal. Symlinks are not resolved.
    pub fn absolutized(mut self) -> Result<Self, AppError> {
        self.basedir = std::path::absolute(&self.basedir).map_err(|e| {
            AppError::Config(format!(
                "cannot resolve basedir {}: {e}",
                self.basedir.display()
            ))
        })?;

        if let Some(dir) = self.partialsdir.take() {
            self.partialsdir = Some(std::path::absolute(&dir).map_err(|e| {
                AppError::Config(format!("cannot resolve partialsdir {}: {e}", dir.display()))
            })?);
        }

        Ok(self)
    }

    /// Returns true if `path` lives under the configured partials directory.
    pub fn is_partial_path(&self, path: &Path) -> bool {
        match &self.partialsdir {
            Some(dir) => path.starts_with(dir),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_empty_basedir_rejected() {
        let err = LoaderConfig::new("").validate().unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
        assert!(err.to_string().contains("basedir"));
    }

    #[test]
    fn test_missing_basedir_rejected() {
        let err = LoaderConfig::new("/no/such/schemata/dir")
            .validate()
            .unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_valid_config() {
        let tmp = TempDir::new().unwrap();
        let config = LoaderConfig::new(tmp.path())
            .with_partialsdir(tmp.path().join("partials"))
            .with_arguments(vec![serde_json::json!({"timestamps": true})]);
        assert!(config.validate().is_ok());
        assert!(config.partialsdir.is_some());
        assert_eq!(config.arguments.len(), 1);
    }

    #[test]
    fn test_absolutized_resolves_relative_paths() {
        let config = LoaderConfig::new(".")
            .with_partialsdir("partials")
            .absolutized()
            .unwrap();

        assert!(config.basedir.is_absolute());
        assert!(config.partialsdir.unwrap().is_absolute());
    }

    #[test]
    fn test_absolutized_keeps_absolute_paths() {
        let tmp = TempDir::new().unwrap();
        let config = LoaderConfig::new(tmp.path())
            .with_partialsdir(tmp.path().join("partials"))
            .absolutized()
            .unwrap();

        assert_eq!(config.basedir, tmp.path());
        assert_eq!(config.partialsdir.unwrap(), tmp.path().join("partials"));
    }

    #[test]
    fn test_is_partial_path() {
        let config = LoaderConfig::new("/schemas").with_partialsdir("/schemas/partials");
        assert!(config.is_partial_path(Path::new("/schemas/partials/user.json")));
        assert!(!config.is_partial_path(Path::new("/schemas/user.json")));

        let bare = LoaderConfig::new("/schemas");
        assert!(!bare.is_partial_path(Path::new("/schemas/partials/user.json")));
    }
}
