use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use hue_collage::{generate_collage, CollageConfig, CollageError};

#[derive(Parser, Debug)]
#[command(author, version, about = "Arrange images into a collage sorted by color warmth")]
struct Args {
    /// Root directory to scan for images (defaults to the current directory)
    root: Option<PathBuf>,

    /// Output path for the rendered collage (defaults to <root>/hue_collage.jpg)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Seed for the aspect-ratio distortion, for reproducible layouts
    #[arg(long)]
    seed: Option<u64>,

    /// JSON configuration file overriding the built-in defaults
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let root = match args.root {
        Some(root) => root,
        None => default_root()?,
    };
    let output = args
        .output
        .unwrap_or_else(|| root.join("hue_collage.jpg"));

    let mut config = match &args.config {
        Some(path) => CollageConfig::from_json_file(path)
            .map_err(|e| anyhow::anyhow!("Failed to load config {}: {e}", path.display()))?,
        None => CollageConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    println!("Creating collage in {}", output.display());
    println!("Processing images in {}", root.display());

    match generate_collage(&root, &output, &config).await {
        Ok(summary) => {
            println!(
                "Created {}x{} collage from {} images in {} columns",
                summary.width, summary.height, summary.discovered, summary.columns
            );
            println!("Collage saved to {}", summary.output.display());
            Ok(())
        }
        // Nothing to lay out is a clean no-op, not a failure
        Err(CollageError::EmptyInput) => {
            println!("No images found to create collage");
            Ok(())
        }
        Err(e) => {
            Err(e).with_context(|| format!("Failed to create collage from {}", root.display()))
        }
    }
}

/// Current directory, resolving to the parent when invoked from inside a
/// directory literally named `scripts`
fn default_root() -> Result<PathBuf> {
    let cwd = env::current_dir().context("Failed to resolve current directory")?;
    if cwd.file_name().map(|name| name == "scripts").unwrap_or(false) {
        if let Some(parent) = cwd.parent() {
            return Ok(parent.to_path_buf());
        }
    }
    Ok(cwd)
}
