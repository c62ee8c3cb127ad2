pub mod config;
pub mod error;
pub mod factory;
pub mod loader;
pub mod name;
pub mod partial;
pub mod pluralize;
pub mod registry;
pub mod report;
pub mod testutil;

pub use config::LoaderConfig;
pub use error::AppError;
pub use factory::{FactoryRegistry, SchemaBuilder};
pub use loader::{RegisteredModel, SchemaLoader};
pub use partial::Partials;
pub use registry::{MemoryRegistry, ModelRegistry};
pub use report::{LoadReporter, NoopReporter, TracingReporter};
