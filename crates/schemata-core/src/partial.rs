use std::collections::HashMap;
use std::path::PathBuf;

use crate::config::SCHEMA_EXT;
use crate::error::AppError;

/// A callable partial: invoked with no arguments, produces a fragment value.
pub type PartialFactory = Box<dyn Fn() -> Result<serde_json::Value, AppError> + Send + Sync>;

/// Loads reusable schema fragments ("partials") by dotted name.
///
/// A partial resolves either to a registered callable (invoked with no
/// arguments) or to a JSON file under the partials directory, where the
/// dotted name maps back to a relative path: `user` → `user.json`,
/// `static.gender` → `static/gender.json`.
pub struct Partials {
    dir: Option<PathBuf>,
    factories: HashMap<String, PartialFactory>,
}

impl Partials {
    pub fn new(dir: Option<PathBuf>) -> Self {
        Self {
            dir,
            factories: HashMap::new(),
        }
    }

    /// Register a callable partial under a dotted name.
    ///
    /// Registered callables take precedence over files of the same name.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn() -> Result<serde_json::Value, AppError> + Send + Sync + 'static,
    {
        self.factories.insert(name.into(), Box::new(factory));
    }

    /// Load the partial fragment for a dotted name.
    pub fn load(&self, name: &str) -> Result<serde_json::Value, AppError> {
        if name.is_empty() {
            return Err(AppError::Partial("partial name must not be empty".into()));
        }

        if let Some(factory) = self.factories.get(name) {
            return factory();
        }

        let Some(dir) = &self.dir else {
            return Err(AppError::Config(
                "partials directory not configured".into(),
            ));
        };

        let mut path = dir.clone();
        for segment in name.split('.') {
            path.push(segment);
        }
        path.set_extension(SCHEMA_EXT);

        let raw = std::fs::read_to_string(&path).map_err(|e| {
            AppError::Partial(format!("failed to read partial {}: {e}", path.display()))
        })?;

        serde_json::from_str(&raw).map_err(|e| {
            AppError::Partial(format!("invalid JSON in partial {}: {e}", path.display()))
        })
    }
}

impl std::fmt::Debug for Partials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("Partials")
            .field("dir", &self.dir)
            .field("names", &names)
            .finish()
    }
}
