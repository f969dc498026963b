// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration type definitions
//!
//! This module defines all configuration structs that map to sections in
//! `brainmap_configuration.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct BrainmapConfig {
    pub layout: LayoutConfig,
    pub palette: PaletteConfig,
    pub simulation: SimulationConfig,
    pub logging: LoggingConfig,
}

/// Network shape and diagram geometry
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Neuron count per layer, input first
    pub layers: Vec<usize>,
    pub layer_gap: f32,
    pub neuron_size: f32,
    pub neuron_gap: f32,
    pub right_padding: f32,
    pub border: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            layers: vec![2, 3, 5, 3, 1],
            layer_gap: 120.0,
            neuron_size: 50.0,
            neuron_gap: 10.0,
            right_padding: 100.0,
            border: 3.0,
        }
    }
}

/// Gradient base colors as `#RRGGBB` or `#AARRGGBB`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PaletteConfig {
    pub low: String,
    pub neuron: String,
    pub synapse: String,
    pub high: String,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            low: "#000000".to_string(),
            neuron: "#0000FF".to_string(),
            synapse: "#008000".to_string(),
            high: "#FFFFFF".to_string(),
        }
    }
}

impl PaletteConfig {
    /// `(field name, value)` pairs, used by validation
    pub fn entries(&self) -> [(&'static str, &str); 4] {
        [
            ("low", self.low.as_str()),
            ("neuron", self.neuron.as_str()),
            ("synapse", self.synapse.as_str()),
            ("high", self.high.as_str()),
        ]
    }
}

/// Parse `#RRGGBB` (opaque) or `#AARRGGBB` into `[a, r, g, b]`
pub fn parse_argb(value: &str) -> Option<[u8; 4]> {
    let hex = value.strip_prefix('#')?;
    if !hex.is_ascii() {
        return None;
    }
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    match hex.len() {
        6 => Some([0xFF, byte(0)?, byte(2)?, byte(4)?]),
        8 => Some([byte(0)?, byte(2)?, byte(4)?, byte(6)?]),
        _ => None,
    }
}

/// Host-side scalar simulation
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Seed for reproducible biases and weights; unset draws from entropy
    pub seed: Option<u64>,
    /// Randomization rounds applied after construction
    pub ticks: usize,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// `text` or `json`
    pub format: String,
    /// Crates to force to debug level (e.g. `brainmap-diagram`)
    pub debug_crates: Vec<String>,
    pub file_logging: bool,
    pub log_dir: PathBuf,
    pub retention_days: u32,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
            debug_crates: Vec::new(),
            file_logging: false,
            log_dir: PathBuf::from("logs"),
            retention_days: 7,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_section_keeps_defaults() {
        let config: BrainmapConfig = toml::from_str("[layout]\nlayers = [4, 2]\n").unwrap();
        assert_eq!(config.layout.layers, vec![4, 2]);
        assert_eq!(config.layout.layer_gap, 120.0);
        assert_eq!(config.palette, PaletteConfig::default());
        assert_eq!(config.simulation.seed, None);
    }

    #[test]
    fn test_parse_argb() {
        assert_eq!(parse_argb("#0000FF"), Some([255, 0, 0, 255]));
        assert_eq!(parse_argb("#80ff0000"), Some([128, 255, 0, 0]));
        assert_eq!(parse_argb("0000FF"), None);
        assert_eq!(parse_argb("#00FF"), None);
        assert_eq!(parse_argb("#GG0000"), None);
        assert_eq!(parse_argb("#ééé"), None);
    }

    #[test]
    fn test_shipped_file_matches_defaults() {
        let shipped = include_str!("../../../brainmap_configuration.toml");
        let config: BrainmapConfig = toml::from_str(shipped).unwrap();
        assert_eq!(config, BrainmapConfig::default());
    }

    #[test]
    fn test_round_trips_through_json() {
        let config = BrainmapConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: BrainmapConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
