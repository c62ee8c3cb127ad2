use std::collections::HashMap;

use serde_json::{Map, Value, json};

use crate::error::AppError;
use crate::partial::Partials;

/// The handle passed to schema factories, standing in for the ODM's schema
/// constructor.
///
/// A schema value is a JSON object with a `fields` definition and an
/// `options` object, which is what a registry adapter hands to the real ODM.
/// The builder also gives factories access to partial fragments so they can
/// be merged into full definitions.
pub struct SchemaBuilder<'a> {
    partials: &'a Partials,
}

impl<'a> SchemaBuilder<'a> {
    pub fn new(partials: &'a Partials) -> Self {
        Self { partials }
    }

    /// Build a schema value from a field definition with empty options.
    pub fn define(&self, fields: Value) -> Value {
        json!({ "fields": fields, "options": {} })
    }

    /// Build a schema value from a field definition and an options object.
    pub fn define_with_options(&self, fields: Value, options: Value) -> Value {
        json!({ "fields": fields, "options": options })
    }

    /// Load a partial fragment by dotted name.
    pub fn partial(&self, name: &str) -> Result<Value, AppError> {
        self.partials.load(name)
    }

    /// Shallow-merge two JSON objects; keys in `overlay` win.
    ///
    /// Non-object inputs make the overlay replace the base wholesale.
    pub fn merge(&self, base: Value, overlay: Value) -> Value {
        match (base, overlay) {
            (Value::Object(mut base), Value::Object(overlay)) => {
                for (key, value) in overlay {
                    base.insert(key, value);
                }
                Value::Object(base)
            }
            (_, overlay) => overlay,
        }
    }
}

/// A schema factory: given the builder handle and the configured extra
/// arguments, produce a schema value.
pub type SchemaFactory =
    Box<dyn Fn(&SchemaBuilder<'_>, &[Value]) -> Result<Value, AppError> + Send + Sync>;

/// Explicit mapping from logical names to schema factories.
///
/// This replaces dynamic module loading: the directory scan decides which
/// names exist, the registry decides how each schema value is produced. Names
/// without a registered factory fall back to the file's own JSON content.
#[derive(Default)]
pub struct FactoryRegistry {
    factories: HashMap<String, SchemaFactory>,
}

impl FactoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory for a logical name, replacing any previous one.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn(&SchemaBuilder<'_>, &[Value]) -> Result<Value, AppError> + Send + Sync + 'static,
    {
        self.factories.insert(name.into(), Box::new(factory));
    }

    pub fn get(&self, name: &str) -> Option<&SchemaFactory> {
        self.factories.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Registered logical names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl std::fmt::Debug for FactoryRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FactoryRegistry")
            .field("names", &self.names())
            .finish()
    }
}

/// Extract the `fields` object from a schema value, if present.
pub fn schema_fields(schema: &Value) -> Option<&Map<String, Value>> {
    schema.get("fields").and_then(Value::as_object)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder_fixture() -> Partials {
        let mut partials = Partials::new(None);
        partials.register("user", || {
            Ok(json!({"name": {"type": "String"}, "email": {"type": "String"}}))
        });
        partials
    }

    #[test]
    fn test_define() {
        let partials = builder_fixture();
        let builder = SchemaBuilder::new(&partials);

        let schema = builder.define(json!({"title": {"type": "String"}}));
        assert_eq!(schema["fields"]["title"]["type"], "String");
        assert_eq!(schema["options"], json!({}));
    }

    #[test]
    fn test_define_with_options() {
        let partials = builder_fixture();
        let builder = SchemaBuilder::new(&partials);

        let schema =
            builder.define_with_options(json!({"title": {}}), json!({"timestamps": true}));
        assert_eq!(schema["options"]["timestamps"], true);
    }

    #[test]
    fn test_merge_partial_into_definition() {
        let partials = builder_fixture();
        let builder = SchemaBuilder::new(&partials);

        let base = builder.partial("user").unwrap();
        let merged = builder.merge(base, json!({"role": {"type": "ObjectId"}}));

        let fields = merged.as_object().unwrap();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("role"));
    }

    #[test]
    fn test_merge_overlay_wins() {
        let partials = builder_fixture();
        let builder = SchemaBuilder::new(&partials);

        let merged = builder.merge(json!({"a": 1, "b": 1}), json!({"b": 2}));
        assert_eq!(merged, json!({"a": 1, "b": 2}));
    }

    #[test]
    fn test_registry_register_and_get() {
        let mut registry = FactoryRegistry::new();
        assert!(registry.is_empty());

        registry.register("user", |builder, _args| {
            Ok(builder.define(json!({"name": {}})))
        });

        assert!(registry.contains("user"));
        assert!(!registry.contains("post"));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.names(), vec!["user"]);
    }

    #[test]
    fn test_factory_receives_arguments_in_order() {
        let mut registry = FactoryRegistry::new();
        registry.register("user", |builder, args| {
            assert_eq!(args[0], json!({"timestamps": true}));
            assert_eq!(args[1], json!("A default text"));
            Ok(builder.define_with_options(json!({}), args[0].clone()))
        });

        let partials = Partials::new(None);
        let builder = SchemaBuilder::new(&partials);
        let args = vec![json!({"timestamps": true}), json!("A default text")];

        let schema = registry.get("user").unwrap()(&builder, &args).unwrap();
        assert_eq!(schema["options"]["timestamps"], true);
    }

    #[test]
    fn test_schema_fields() {
        let partials = Partials::new(None);
        let builder = SchemaBuilder::new(&partials);
        let schema = builder.define(json!({"title": {}}));

        assert!(schema_fields(&schema).unwrap().contains_key("title"));
        assert!(schema_fields(&json!("not an object")).is_none());
    }
}
