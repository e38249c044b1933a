//! Configuration handling for the seqalign CLI
//!
//! Supports loading configuration from seqalign.toml files with CLI argument overrides.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use seqalign_core::seed::DEFAULT_KMER_LEN;
use seqalign_core::scoring::DEFAULT_GAP_COST;
use seqalign_core::{DiagonalBand, ScoringPreset, ScoringScheme};

use crate::error::{CliError, CliResult};

pub const DEFAULT_CONFIG_FILE: &str = "seqalign.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub dotplot: DotplotConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Cost added per gap position
    #[serde(default = "default_gap_cost")]
    pub gap_cost: i64,

    /// Named substitution table, used when `costs` is absent
    #[serde(default)]
    pub preset: ScoringPreset,

    /// Explicit 4x4 substitution costs in A, G, C, T order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub costs: Option<[[i64; 4]; 4]>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DotplotConfig {
    #[serde(default = "default_kmer_len")]
    pub kmer_len: usize,

    #[serde(default = "default_width")]
    pub width: u32,

    #[serde(default = "default_height")]
    pub height: u32,

    #[serde(default = "default_point_color")]
    pub point_color: String,

    /// Diagonal band for the on-diagonal statistic
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub band: Option<DiagonalBand>,
}

fn default_gap_cost() -> i64 { DEFAULT_GAP_COST as i64 }
fn default_kmer_len() -> usize { DEFAULT_KMER_LEN }
fn default_width() -> u32 { 800 }
fn default_height() -> u32 { 800 }
fn default_point_color() -> String { "#ff0000".to_string() }

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            gap_cost: default_gap_cost(),
            preset: ScoringPreset::default(),
            costs: None,
        }
    }
}

impl Default for DotplotConfig {
    fn default() -> Self {
        Self {
            kmer_len: default_kmer_len(),
            width: default_width(),
            height: default_height(),
            point_color: default_point_color(),
            band: None,
        }
    }
}

impl ScoringConfig {
    /// Validated scoring scheme; negative costs are rejected
    pub fn scheme(&self) -> CliResult<ScoringScheme> {
        let costs = match self.costs {
            Some(costs) => costs,
            None => self.preset.costs().map(|row| row.map(i64::from)),
        };
        Ok(ScoringScheme::from_signed(costs, self.gap_cost)?)
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(config_path: Option<&Path>) -> CliResult<Self> {
        let config = match config_path {
            Some(path) => {
                log::info!("Loading configuration from: {}", path.display());
                Self::load_from_file(path)?
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    log::info!("Loading configuration from: {}", DEFAULT_CONFIG_FILE);
                    Self::load_from_file(&default_path)?
                } else {
                    log::debug!("Using default configuration");
                    Self::default()
                }
            }
        };

        Ok(config)
    }

    /// Load configuration from a specific TOML file
    pub fn load_from_file(path: &Path) -> CliResult<Self> {
        if !path.exists() {
            return Err(CliError::file_not_found(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file(&self, path: &Path) -> CliResult<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Generate example configuration file content
    pub fn example_toml() -> CliResult<String> {
        let mut content = toml::to_string_pretty(&Self::default())?;
        content.push_str(
            "\n# Explicit substitution costs (A, G, C, T order) replace the preset:\n\
             # [scoring]\n\
             # costs = [[0, 1, 2, 2], [1, 0, 2, 2], [2, 2, 0, 1], [2, 2, 1, 0]]\n",
        );

        let band = toml::to_string_pretty(&DiagonalBand::hoxa())?;
        content.push_str("\n# Diagonal band (human/mouse HOXA comparison):\n# [dotplot.band]\n");
        for line in band.lines() {
            content.push_str(&format!("# {}\n", line));
        }
        Ok(content)
    }
}
