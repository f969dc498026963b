// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Bridges loaded configuration into diagram and logging types

use crate::config::{parse_argb, ConfigError, ConfigResult, LayoutConfig, PaletteConfig};
use crate::diagram::{Color, LayoutParams, PaletteSpec};

pub fn layout_params(layout: &LayoutConfig) -> LayoutParams {
    LayoutParams {
        layer_gap: layout.layer_gap,
        neuron_size: layout.neuron_size,
        neuron_gap: layout.neuron_gap,
        right_padding: layout.right_padding,
        border: layout.border,
    }
}

/// # Errors
/// `InvalidValue` naming the first color that is not `#RRGGBB`/`#AARRGGBB`
pub fn palette_spec(palette: &PaletteConfig) -> ConfigResult<PaletteSpec> {
    let color = |field: &str, value: &str| {
        parse_argb(value).map(Color::from).ok_or_else(|| {
            ConfigError::InvalidValue(format!("palette.{} = '{}'", field, value))
        })
    };
    Ok(PaletteSpec {
        low: color("low", &palette.low)?,
        neuron: color("neuron", &palette.neuron)?,
        synapse: color("synapse", &palette.synapse)?,
        high: color("high", &palette.high)?,
    })
}

#[cfg(feature = "observability")]
mod logging {
    use crate::config::{ConfigError, ConfigResult, LoggingConfig};
    use crate::observability::{self, CrateDebugFlags, FileLoggingConfig, LogFormat, LogOutput};

    /// Console/file logging settings for the observability crate
    pub fn logging_config(logging: &LoggingConfig) -> ConfigResult<observability::LoggingConfig> {
        let format: LogFormat = logging
            .format
            .parse()
            .map_err(|e: observability::UnknownLogFormat| ConfigError::InvalidValue(e.to_string()))?;
        let file = logging.file_logging.then(|| FileLoggingConfig {
            log_dir: logging.log_dir.clone(),
            retention_days: u64::from(logging.retention_days),
            ..FileLoggingConfig::default()
        });
        Ok(observability::LoggingConfig {
            level: logging.level.to_lowercase(),
            format,
            output: LogOutput::Stderr,
            file,
        })
    }

    /// Command-line and `BRAINMAP_DEBUG` flags plus `logging.debug_crates`
    pub fn debug_flags<I>(logging: &LoggingConfig, args: I) -> CrateDebugFlags
    where
        I: IntoIterator<Item = String>,
    {
        let mut flags = CrateDebugFlags::from_args(args);
        if let Ok(value) = std::env::var(observability::DEBUG_ENV) {
            flags.merge_env_value(&value);
        }
        for crate_name in &logging.debug_crates {
            flags.enable(crate_name);
        }
        flags
    }
}

#[cfg(feature = "observability")]
pub use logging::{debug_flags, logging_config};
