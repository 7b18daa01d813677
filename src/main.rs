use clap::{Parser, Subcommand};
use iiif_fragments::body::AnnotationBody;
use iiif_fragments::context::BuildContext;
use iiif_fragments::descriptor::ResourceDescriptor;
use iiif_fragments::rendering::Rendering;
use iiif_fragments::{batch, classify, config, output};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "iiif-fragments")]
#[command(about = "Derive IIIF annotation bodies and renderings from media metadata")]
#[command(long_about = "\
Derive IIIF annotation bodies and renderings from media metadata

Each resource is described by a JSON object:

  {
    \"id\": 42,
    \"media_type\": \"image/jpeg\",
    \"renderer\": \"file\",
    \"extension\": \"jpg\",
    \"width\": 800,
    \"height\": 600,
    \"source_url\": \"https://repo.example.org/files/original/42.jpg\",
    \"site_page_url\": \"https://repo.example.org/s/{slug}/media/42\"
  }

Fragments are printed as JSON on stdout; summaries and logs go to stderr.
Set RUST_LOG=debug to trace how each resource was classified.

Run 'iiif-fragments gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Directory holding config.toml
    #[arg(long, default_value = ".", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the IIIF category of a resource and which lookup decided it
    Classify {
        /// Descriptor JSON file
        descriptor: PathBuf,
    },
    /// Build the annotation body of a resource
    Body {
        /// Descriptor JSON file
        descriptor: PathBuf,
    },
    /// Build the rendering of a media resource
    Rendering {
        /// Descriptor JSON file
        descriptor: PathBuf,
    },
    /// Build bodies and renderings for a JSON array of descriptors
    Batch {
        /// Resources JSON file
        resources: PathBuf,
        /// Write the report here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Classify { descriptor } => {
            let descriptor = read_descriptor(&descriptor)?;
            let classification = classify::explain(&descriptor);
            output::print_classification(&descriptor, &classification);
            println!("{}", serde_json::to_string_pretty(&classification)?);
        }
        Command::Body { descriptor } => {
            let ctx = load_context(&cli.config)?;
            let descriptor = read_descriptor(&descriptor)?;
            let fragment = AnnotationBody::new(Some(&descriptor), &ctx)?.to_fragment()?;
            println!("{}", serde_json::to_string_pretty(&fragment)?);
        }
        Command::Rendering { descriptor } => {
            let ctx = load_context(&cli.config)?;
            let descriptor = read_descriptor(&descriptor)?;
            let fragment = Rendering::new(Some(&descriptor), &ctx)?.to_fragment()?;
            println!("{}", serde_json::to_string_pretty(&fragment)?);
        }
        Command::Batch { resources, out } => {
            let ctx = load_context(&cli.config)?;
            let resources = batch::load_resources(&resources)?;
            let report = batch::build_all(&resources, &ctx);
            let json = serde_json::to_string_pretty(&report)?;
            match out {
                Some(path) => std::fs::write(path, json)?,
                None => println!("{}", json),
            }
            output::print_batch_report(&report);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

fn load_context(config_dir: &Path) -> Result<BuildContext, config::ConfigError> {
    let site_config = config::load_config(config_dir)?;
    Ok(BuildContext::from_config(&site_config))
}

fn read_descriptor(path: &Path) -> Result<ResourceDescriptor, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
