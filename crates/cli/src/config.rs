use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tidy_vector_store::{default_store_path_rel, EmbedMode};

pub const DEFAULT_EMBED_DIMENSION: usize = 512;
pub const DEFAULT_SEARCH_LIMIT: usize = 50;

/// Settings resolved from defaults, an optional TOML file, then env/flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub store_path: PathBuf,
    pub embed_mode: EmbedMode,
    pub embed_dimension: usize,
    pub search_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: default_store_path_rel(),
            embed_mode: EmbedMode::Stub,
            embed_dimension: DEFAULT_EMBED_DIMENSION,
            search_limit: DEFAULT_SEARCH_LIMIT,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    store_path: Option<PathBuf>,
    embed_mode: Option<String>,
    embed_dimension: Option<usize>,
    search_limit: Option<usize>,
}

/// Values that win over the file: environment variables and command-line flags.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub store_path: Option<PathBuf>,
    pub embed_mode: Option<String>,
    pub embed_dimension: Option<usize>,
}

impl Config {
    pub fn resolve(file: Option<&Path>, overrides: Overrides) -> Result<Self> {
        let raw = match file {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config {}", path.display()))?;
                toml::from_str::<RawConfig>(&text)
                    .with_context(|| format!("Invalid config {}", path.display()))?
            }
            None => RawConfig::default(),
        };

        let mut cfg = Self::default();
        if let Some(store_path) = overrides.store_path.or(raw.store_path) {
            cfg.store_path = store_path;
        }
        if let Some(mode) = overrides.embed_mode.or(raw.embed_mode) {
            cfg.embed_mode = mode.parse()?;
        }
        if let Some(dimension) = overrides.embed_dimension.or(raw.embed_dimension) {
            anyhow::ensure!(dimension > 0, "embed_dimension must be positive");
            cfg.embed_dimension = dimension;
        }
        if let Some(limit) = raw.search_limit {
            cfg.search_limit = limit;
        }

        log::debug!("Resolved config: {cfg:?}");
        Ok(cfg)
    }
}
