/// Configuration module for clozegen.
///
/// Handles loading, validating, and providing default run configuration:
/// the four input tables and the output path.
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

// ── Default value functions ──────────────────────────────────────────

fn default_source_sentences() -> PathBuf {
    PathBuf::from("fra_sentences.tsv")
}

fn default_target_sentences() -> PathBuf {
    PathBuf::from("eng_sentences.tsv")
}

fn default_links() -> PathBuf {
    PathBuf::from("links.tsv")
}

fn default_frequency_list() -> PathBuf {
    PathBuf::from("fr_full.txt")
}

fn default_output() -> PathBuf {
    PathBuf::from("cards.csv")
}

// ── Config struct ────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    /// Source-language sentence table (tab-delimited: id, language code, text).
    #[serde(default = "default_source_sentences")]
    pub source_sentences: PathBuf,

    /// Target-language sentence table, same shape.
    #[serde(default = "default_target_sentences")]
    pub target_sentences: PathBuf,

    /// Translation-pair table (tab-delimited: source id, target id).
    #[serde(default = "default_links")]
    pub links: PathBuf,

    /// Word frequency list (space-delimited: word, rank; most frequent first).
    #[serde(default = "default_frequency_list")]
    pub frequency_list: PathBuf,

    /// Output card table (tab-delimited).
    #[serde(default = "default_output")]
    pub output: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_sentences: default_source_sentences(),
            target_sentences: default_target_sentences(),
            links: default_links(),
            frequency_list: default_frequency_list(),
            output: default_output(),
        }
    }
}

// ── Config implementation ────────────────────────────────────────────

impl Config {
    /// Load configuration from a JSON file.
    ///
    /// If `config_path` is empty, defaults to `"clozegen.json"`.
    /// If the file does not exist, returns a default config and generates a
    /// template file for the default path.
    pub fn load(config_path: &str) -> Result<Self> {
        let path = if config_path.is_empty() {
            "clozegen.json"
        } else {
            config_path
        };

        if !std::path::Path::new(path).exists() {
            info!("{path} not found, using defaults");
            let cfg = Self::default();

            // Generate template only for the default path
            if path == "clozegen.json" {
                match cfg.save(path) {
                    Ok(()) => info!("Generated config template: {path}"),
                    Err(e) => warn!("Failed to generate config template: {e}"),
                }
            }

            return Ok(cfg);
        }

        let data = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {path}"))?;

        let cfg: Config = match serde_json::from_str(&data) {
            Ok(c) => c,
            Err(e) => {
                warn!("Invalid JSON in {path}: {e}");
                warn!("Using default configuration");
                return Ok(Self::default());
            }
        };

        info!("Loaded configuration from {path}");
        Ok(cfg)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &str) -> Result<()> {
        let data = serde_json::to_string_pretty(self).context("failed to marshal config")?;
        std::fs::write(path, data).with_context(|| format!("failed to write config: {path}"))?;
        Ok(())
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            !self.source_sentences.as_os_str().is_empty(),
            "source_sentences path must not be empty"
        );
        anyhow::ensure!(
            !self.target_sentences.as_os_str().is_empty(),
            "target_sentences path must not be empty"
        );
        anyhow::ensure!(!self.links.as_os_str().is_empty(), "links path must not be empty");
        anyhow::ensure!(
            !self.frequency_list.as_os_str().is_empty(),
            "frequency_list path must not be empty"
        );
        anyhow::ensure!(!self.output.as_os_str().is_empty(), "output path must not be empty");

        for input in [
            &self.source_sentences,
            &self.target_sentences,
            &self.links,
            &self.frequency_list,
        ] {
            anyhow::ensure!(
                input != &self.output,
                "output path {} would overwrite an input table",
                self.output.display()
            );
        }

        Ok(())
    }
}

// ── Tests ────────────────────────────────────────────────────────────
