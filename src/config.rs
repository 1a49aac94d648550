//! Configuration management for graph construction

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::assembler::{AssemblerConfig, ShareWindow};
use crate::normalizer::DEFAULT_CLIP;
use crate::split::SplitConfig;

pub const DEFAULT_CONFIG_PATH: &str = "config/graph.toml";
pub const ENV_PREFIX: &str = "FRAUD_GRAPH";

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub input: InputConfig,
    pub output: OutputConfig,
    #[serde(default)]
    pub features: FeaturesConfig,
    #[serde(default)]
    pub split: SplitConfig,
    #[serde(default)]
    pub graph: GraphConfig,
    pub logging: LoggingConfig,
}

/// Relational snapshot exported as CSV
#[derive(Debug, Clone, Deserialize)]
pub struct InputConfig {
    pub transactions: PathBuf,
    /// Optional entity listings; when given, transactions are checked against them
    #[serde(default)]
    pub accounts: Option<PathBuf>,
    #[serde(default)]
    pub merchants: Option<PathBuf>,
    #[serde(default)]
    pub devices: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory receiving the graph artifact and statistics
    pub dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeaturesConfig {
    /// Symmetric bound applied after standardization
    #[serde(default = "default_clip")]
    pub clip: f64,
}

fn default_clip() -> f64 {
    DEFAULT_CLIP
}

impl Default for FeaturesConfig {
    fn default() -> Self {
        Self { clip: DEFAULT_CLIP }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GraphConfig {
    #[serde(default)]
    pub share_window: ShareWindow,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl AppConfig {
    /// Load configuration from the default file plus environment overrides
    pub fn load() -> Result<Self> {
        Self::load_from_path(DEFAULT_CONFIG_PATH)
    }

    /// Load configuration from a specific path.
    ///
    /// `FRAUD_GRAPH__SECTION__KEY` environment variables override file values,
    /// e.g. `FRAUD_GRAPH__SPLIT__SEED=7`.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("Failed to build configuration from {}", path.as_ref().display()))?;

        let app: AppConfig = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;
        app.validate()?;
        Ok(app)
    }

    pub fn validate(&self) -> Result<()> {
        self.assembler()
            .validate()
            .context("Invalid features or graph configuration")?;
        self.split.validate().context("Invalid split configuration")?;
        Ok(())
    }

    pub fn assembler(&self) -> AssemblerConfig {
        AssemblerConfig {
            clip: self.features.clip,
            share_window: self.graph.share_window,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            input: InputConfig {
                transactions: PathBuf::from("data/transactions.csv"),
                accounts: None,
                merchants: None,
                devices: None,
            },
            output: OutputConfig {
                dir: PathBuf::from("artifacts"),
            },
            features: FeaturesConfig::default(),
            split: SplitConfig::default(),
            graph: GraphConfig::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
            },
        }
    }
}
