//! Server configuration
//!
//! TOML file plus `FARECAST_`-prefixed environment overrides. Only the
//! serving layer is configured here; everything the pipeline needs is
//! frozen inside the artifacts themselves.

use anyhow::{Context, Result};
use config::{Config, Environment, File as ConfigFile};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address, `host:port`
    pub listen_addr: String,
    /// Path to the transform-parameter artifact
    pub transform_path: PathBuf,
    /// Path to the model artifact
    pub model_path: PathBuf,
    /// Origins allowed by CORS
    pub allowed_origins: Vec<String>,
    /// `json` or `pretty` log output
    pub log_format: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8000".to_string(),
            transform_path: PathBuf::from("artifacts/transform.json"),
            model_path: PathBuf::from("artifacts/model.json"),
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://localhost:5173".to_string(),
            ],
            log_format: "pretty".to_string(),
        }
    }
}

impl ServerConfig {
    /// Load configuration, layering an optional TOML file under
    /// environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(ConfigFile::from(path));
        }
        builder = builder.add_source(Environment::with_prefix("FARECAST"));

        let config = builder
            .build()
            .context("failed to read server configuration")?;

        // Missing keys fall back to the defaults above.
        config
            .try_deserialize()
            .context("invalid server configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_without_file() {
        let config = ServerConfig::load(None).unwrap();
        assert_eq!(config.listen_addr, "127.0.0.1:8000");
        assert_eq!(config.allowed_origins.len(), 2);
    }

    #[test]
    fn reads_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "listen_addr = \"0.0.0.0:9100\"\ntransform_path = \"t.json\"\nmodel_path = \"m.json\""
        )
        .unwrap();

        let config = ServerConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.listen_addr, "0.0.0.0:9100");
        assert_eq!(config.transform_path, PathBuf::from("t.json"));
        // Untouched keys keep their defaults.
        assert_eq!(config.log_format, "pretty");
    }
}
