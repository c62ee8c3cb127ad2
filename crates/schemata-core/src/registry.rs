use std::collections::HashMap;

use serde_json::Value;

use crate::error::AppError;

/// The model-registration seam towards an object-document mapper.
///
/// The loader only ever calls `register_model(name, schema, collection)`;
/// adapters over real ODM crates implement this to feed their own model
/// registries.
pub trait ModelRegistry {
    fn register_model(
        &mut self,
        name: &str,
        schema: Value,
        collection: &str,
    ) -> Result<(), AppError>;
}

/// A registered model: schema value plus its storage collection.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ModelEntry {
    pub schema: Value,
    pub collection: String,
}

/// In-memory [`ModelRegistry`] used by tests, the CLI, and as a reference
/// for adapter implementations.
#[derive(Debug, Default)]
pub struct MemoryRegistry {
    models: HashMap<String, ModelEntry>,
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn model(&self, name: &str) -> Option<&ModelEntry> {
        self.models.get(name)
    }

    /// Registered model names, sorted.
    pub fn model_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.models.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

impl ModelRegistry for MemoryRegistry {
    fn register_model(
        &mut self,
        name: &str,
        schema: Value,
        collection: &str,
    ) -> Result<(), AppError> {
        if self.models.contains_key(name) {
            return Err(AppError::Registry(format!(
                "model {name} is already registered"
            )));
        }

        self.models.insert(
            name.to_string(),
            ModelEntry {
                schema,
                collection: collection.to_string(),
            },
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_register_and_lookup() {
        let mut registry = MemoryRegistry::new();
        registry
            .register_model("user", json!({"fields": {}}), "users")
            .unwrap();

        let entry = registry.model("user").unwrap();
        assert_eq!(entry.collection, "users");
        assert!(registry.model("post").is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let mut registry = MemoryRegistry::new();
        registry
            .register_model("user", json!({}), "users")
            .unwrap();

        let err = registry
            .register_model("user", json!({}), "users")
            .unwrap_err();
        assert!(matches!(err, AppError::Registry(_)));
    }

    #[test]
    fn test_model_names_sorted() {
        let mut registry = MemoryRegistry::new();
        registry
            .register_model("post.comment", json!({}), "posts.comments")
            .unwrap();
        registry.register_model("user", json!({}), "users").unwrap();
        registry.register_model("post", json!({}), "posts").unwrap();

        assert_eq!(registry.model_names(), vec!["post", "post.comment", "user"]);
    }
}
