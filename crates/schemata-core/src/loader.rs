use std::path::PathBuf;

use serde_json::Value;
use walkdir::WalkDir;

use crate::config::{LoaderConfig, SCHEMA_EXT};
use crate::error::AppError;
use crate::factory::{FactoryRegistry, SchemaBuilder};
use crate::name::{collection_name, logical_name};
use crate::partial::Partials;
use crate::registry::ModelRegistry;
use crate::report::{LoadEvent, LoadReporter, NoopReporter, SkipReason};

/// A model registered during a traversal.
#[derive(Debug, Clone, serde::Serialize)]
pub struct RegisteredModel {
    pub name: String,
    pub collection: String,
    pub path: PathBuf,
}

/// Walks a schema tree and registers every discovered schema under its
/// derived logical and collection names.
///
/// The loader owns its configuration, factory registry, and partials handle;
/// nothing is process-wide, so independent loaders can coexist.
#[derive(Debug)]
pub struct SchemaLoader {
    config: LoaderConfig,
    factories: FactoryRegistry,
    partials: Partials,
}

impl SchemaLoader {
    /// Create a loader from a validated configuration.
    ///
    /// Both configured directories are resolved to absolute paths up front,
    /// so a relative `basedir` and an absolute `partialsdir` (or the
    /// reverse) still exclude the same files.
    pub fn new(config: LoaderConfig) -> Result<Self, AppError> {
        config.validate()?;
        let config = config.absolutized()?;
        let partials = Partials::new(config.partialsdir.clone());

        Ok(Self {
            config,
            factories: FactoryRegistry::new(),
            partials,
        })
    }

    /// Replace the factory registry wholesale.
    pub fn with_factories(mut self, factories: FactoryRegistry) -> Self {
        self.factories = factories;
        self
    }

    /// Register a schema factory for a logical name.
    pub fn register_factory<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn(&SchemaBuilder<'_>, &[Value]) -> Result<Value, AppError> + Send + Sync + 'static,
    {
        self.factories.register(name, factory);
    }

    /// Register a callable partial for a dotted name.
    pub fn register_partial<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn() -> Result<Value, AppError> + Send + Sync + 'static,
    {
        self.partials.register(name, factory);
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    pub fn partials(&self) -> &Partials {
        &self.partials
    }

    /// Load the partial fragment for a dotted name.
    pub fn partial(&self, name: &str) -> Result<Value, AppError> {
        self.partials.load(name)
    }

    /// Resolve names for every file that a [`Self::load`] would register,
    /// without building or registering anything.
    pub fn scan(&self) -> Result<Vec<RegisteredModel>, AppError> {
        self.traverse(&NoopReporter, |_, _| Ok(()))
    }

    /// Walk the base directory and register every discovered schema.
    ///
    /// Returns the registered models in traversal (sorted) order.
    pub fn load(&self, registry: &mut dyn ModelRegistry) -> Result<Vec<RegisteredModel>, AppError> {
        self.load_with_reporter(registry, &NoopReporter)
    }

    /// Like [`Self::load`], reporting progress through `reporter`.
    pub fn load_with_reporter<R: LoadReporter>(
        &self,
        registry: &mut dyn ModelRegistry,
        reporter: &R,
    ) -> Result<Vec<RegisteredModel>, AppError> {
        self.traverse(reporter, |model, reporter| {
            let builder = SchemaBuilder::new(&self.partials);

            let schema = match self.factories.get(&model.name) {
                Some(factory) => factory(&builder, &self.config.arguments)?,
                None => builder.define(read_definition(&model.path)?),
            };

            reporter.report(LoadEvent::SchemaBuilt {
                name: &model.name,
                path: &model.path,
            });

            registry.register_model(&model.name, schema, &model.collection)?;

            reporter.report(LoadEvent::ModelRegistered {
                name: &model.name,
                collection: &model.collection,
            });

            Ok(())
        })
    }

    /// Shared walk: visit every qualifying file in sorted order, resolve its
    /// names, and hand it to `visit`.
    ///
    /// Per-entry walk errors are reported and skipped; name resolution and
    /// `visit` errors abort the traversal.
    fn traverse<R, V>(&self, reporter: &R, mut visit: V) -> Result<Vec<RegisteredModel>, AppError>
    where
        R: LoadReporter,
        V: FnMut(&RegisteredModel, &R) -> Result<(), AppError>,
    {
        let mut models = Vec::new();

        for entry in WalkDir::new(&self.config.basedir).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(error) => {
                    reporter.report(LoadEvent::WalkError { error: &error });
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();

            if self.config.is_partial_path(path) {
                reporter.report(LoadEvent::EntrySkipped {
                    path,
                    reason: SkipReason::Partial,
                });
                continue;
            }

            if path.extension().and_then(|e| e.to_str()) != Some(SCHEMA_EXT) {
                reporter.report(LoadEvent::EntrySkipped {
                    path,
                    reason: SkipReason::Extension,
                });
                continue;
            }

            let name = logical_name(&self.config.basedir, path)?;
            let collection = collection_name(&name);

            let model = RegisteredModel {
                name,
                collection,
                path: path.to_path_buf(),
            };

            visit(&model, reporter)?;
            models.push(model);
        }

        Ok(models)
    }
}

/// Read a schema file's JSON content as a field definition (the fallback for
/// logical names with no registered factory).
fn read_definition(path: &std::path::Path) -> Result<Value, AppError> {
    let raw = std::fs::read_to_string(path).map_err(|e| {
        AppError::Factory(format!("failed to read schema file {}: {e}", path.display()))
    })?;

    serde_json::from_str(&raw).map_err(|e| {
        AppError::Factory(format!("invalid JSON in schema file {}: {e}", path.display()))
    })
}
