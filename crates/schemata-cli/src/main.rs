use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use schemata_core::{LoaderConfig, MemoryRegistry, SchemaLoader, TracingReporter};

#[derive(Parser)]
#[command(name = "schemata", version, about = "Convention-based schema registration")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Preview the logical and collection names a traversal would register
    Scan {
        /// Root of the schema tree
        #[arg(short, long, env = "SCHEMATA_BASEDIR")]
        basedir: PathBuf,

        /// Partials directory to exclude from registration
        #[arg(short, long, env = "SCHEMATA_PARTIALSDIR")]
        partialsdir: Option<PathBuf>,
    },

    /// Run a full traversal into an in-memory registry and print the result
    Load {
        /// Root of the schema tree
        #[arg(short, long, env = "SCHEMATA_BASEDIR")]
        basedir: PathBuf,

        /// Partials directory to exclude from registration
        #[arg(short, long, env = "SCHEMATA_PARTIALSDIR")]
        partialsdir: Option<PathBuf>,

        /// Extra factory arguments as a JSON array (e.g. '[{"timestamps":true}]')
        #[arg(short, long)]
        arguments: Option<String>,
    },
}

fn main() -> Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Setup tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("schemata=debug".parse()?))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Scan {
            basedir,
            partialsdir,
        } => {
            let loader = build_loader(basedir, partialsdir, None)?;
            let models = loader.scan().context("Traversal failed")?;

            for model in &models {
                println!(
                    "{}\t{}\t{}",
                    model.name,
                    model.collection,
                    model.path.display()
                );
            }
            eprintln!("{} schema(s) discovered", models.len());
        }

        Commands::Load {
            basedir,
            partialsdir,
            arguments,
        } => {
            let loader = build_loader(basedir, partialsdir, arguments)?;
            let mut registry = MemoryRegistry::new();
            let models = loader
                .load_with_reporter(&mut registry, &TracingReporter)
                .context("Traversal failed")?;

            for model in &models {
                println!("{}\t{}", model.name, model.collection);
            }
            eprintln!("{} model(s) registered", models.len());
        }
    }

    Ok(())
}

fn build_loader(
    basedir: PathBuf,
    partialsdir: Option<PathBuf>,
    arguments: Option<String>,
) -> Result<SchemaLoader> {
    let mut config = LoaderConfig::new(basedir);

    if let Some(dir) = partialsdir {
        config = config.with_partialsdir(dir);
    }

    if let Some(raw) = arguments {
        let parsed: serde_json::Value =
            serde_json::from_str(&raw).context("Invalid JSON in --arguments")?;
        let serde_json::Value::Array(values) = parsed else {
            bail!("--arguments must be a JSON array");
        };
        config = config.with_arguments(values);
    }

    SchemaLoader::new(config).map_err(Into::into)
}
