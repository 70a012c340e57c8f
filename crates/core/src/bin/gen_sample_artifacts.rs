use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use farecast_core::sample;

/// Writes the sample artifact pair for local runs and demos.
fn main() -> Result<()> {
    let dir = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("artifacts"));

    fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create artifact directory {}", dir.display()))?;
    let (transform_path, model_path) =
        sample::write_sample_artifacts(&dir).context("failed to write sample artifacts")?;

    println!("wrote {}", transform_path.display());
    println!("wrote {}", model_path.display());
    Ok(())
}
