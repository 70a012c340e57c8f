use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use farecast_core::ArtifactSet;

/// Loads an artifact pair and prints what the server would see at
/// startup. Exits non-zero on any load or consistency failure.
fn main() -> Result<()> {
    let mut args = env::args().skip(1);
    let transform_path = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("artifacts/transform.json"));
    let model_path = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("artifacts/model.json"));

    let artifacts = ArtifactSet::load(&transform_path, &model_path).with_context(|| {
        format!(
            "artifact pair failed verification ({} / {})",
            transform_path.display(),
            model_path.display()
        )
    })?;

    println!("transform: {}", transform_path.display());
    println!("  hash:    {}", artifacts.transform_hash);
    println!("  fields:  {}", artifacts.transform.categorical.len());
    println!("  numeric: {}", artifacts.transform.numeric.len());
    println!("model:     {}", model_path.display());
    println!("  hash:    {}", artifacts.model_hash);
    println!("  trees:   {}", artifacts.model.num_trees());
    println!("width:     {}", artifacts.model.expected_width());
    println!("artifact pair is consistent");

    Ok(())
}
