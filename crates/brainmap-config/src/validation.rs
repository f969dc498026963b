// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration validation
//!
//! Collects every problem instead of stopping at the first one, so a user fixing a
//! config file sees the whole list at once.

use crate::types::parse_argb;
use crate::{BrainmapConfig, ConfigError, ConfigResult};

/// Levels accepted by `logging.level` (case-insensitive)
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
/// Values accepted by `logging.format`
pub const LOG_FORMATS: [&str; 2] = ["text", "json"];

/// Validation errors that can occur during config validation
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValidationError {
    MissingRequired { field: String },
    InvalidValue { field: String, reason: String },
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingRequired { field } => {
                write!(f, "Missing required configuration: {}", field)
            }
            Self::InvalidValue { field, reason } => {
                write!(f, "Invalid configuration value for {}: {}", field, reason)
            }
        }
    }
}

/// Validate the complete configuration
///
/// Checks for:
/// - at least two layers, none empty
/// - positive, finite geometry with the layer gap wider than a neuron
/// - parseable palette colors
/// - known log level and format
///
/// # Errors
///
/// Returns `ConfigError::ValidationError` listing every problem found
pub fn validate_config(config: &BrainmapConfig) -> ConfigResult<()> {
    let errors = collect_errors(config);
    if errors.is_empty() {
        return Ok(());
    }

    let error_messages = errors
        .iter()
        .map(|e| format!("  - {}", e))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ConfigError::ValidationError(format!(
        "Configuration validation failed:\n{}",
        error_messages
    )))
}

/// Every validation problem, in section order
pub fn collect_errors(config: &BrainmapConfig) -> Vec<ConfigValidationError> {
    let mut errors = Vec::new();
    validate_layers(config, &mut errors);
    validate_geometry(config, &mut errors);
    validate_palette(config, &mut errors);
    validate_logging(config, &mut errors);
    errors
}

fn validate_layers(config: &BrainmapConfig, errors: &mut Vec<ConfigValidationError>) {
    let layers = &config.layout.layers;
    if layers.is_empty() {
        errors.push(ConfigValidationError::MissingRequired {
            field: "layout.layers".to_string(),
        });
        return;
    }
    if layers.len() < 2 {
        errors.push(invalid(
            "layout.layers",
            format!("need at least 2 layers, got {}", layers.len()),
        ));
    }
    for (i, &count) in layers.iter().enumerate() {
        if count == 0 {
            errors.push(invalid(&format!("layout.layers[{}]", i), "layer has no neurons"));
        }
    }
}

fn validate_geometry(config: &BrainmapConfig, errors: &mut Vec<ConfigValidationError>) {
    let layout = &config.layout;
    let positive = [
        ("layout.layer_gap", layout.layer_gap),
        ("layout.neuron_size", layout.neuron_size),
    ];
    let non_negative = [
        ("layout.neuron_gap", layout.neuron_gap),
        ("layout.right_padding", layout.right_padding),
        ("layout.border", layout.border),
    ];

    for (field, value) in positive {
        if !value.is_finite() || value <= 0.0 {
            errors.push(invalid(field, format!("must be a positive number, got {}", value)));
        }
    }
    for (field, value) in non_negative {
        if !value.is_finite() || value < 0.0 {
            errors.push(invalid(field, format!("must not be negative, got {}", value)));
        }
    }
    if layout.layer_gap <= layout.neuron_size {
        errors.push(invalid(
            "layout.layer_gap",
            format!(
                "must be wider than layout.neuron_size ({} <= {})",
                layout.layer_gap, layout.neuron_size
            ),
        ));
    }
}

fn validate_palette(config: &BrainmapConfig, errors: &mut Vec<ConfigValidationError>) {
    for (name, value) in config.palette.entries() {
        if parse_argb(value).is_none() {
            errors.push(invalid(
                &format!("palette.{}", name),
                format!("'{}' is not #RRGGBB or #AARRGGBB", value),
            ));
        }
    }
}

fn validate_logging(config: &BrainmapConfig, errors: &mut Vec<ConfigValidationError>) {
    let logging = &config.logging;
    if !LOG_LEVELS.contains(&logging.level.to_lowercase().as_str()) {
        errors.push(invalid(
            "logging.level",
            format!("'{}' is not one of {:?}", logging.level, LOG_LEVELS),
        ));
    }
    if !LOG_FORMATS.contains(&logging.format.to_lowercase().as_str()) {
        errors.push(invalid(
            "logging.format",
            format!("'{}' is not one of {:?}", logging.format, LOG_FORMATS),
        ));
    }
}

fn invalid(field: &str, reason: impl Into<String>) -> ConfigValidationError {
    ConfigValidationError::InvalidValue {
        field: field.to_string(),
        reason: reason.into(),
    }
}
