// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration file loading with override support
//!
//! Three tiers, later ones winning:
//! 1. TOML file (base values; missing keys take defaults)
//! 2. Environment variables (runtime overrides)
//! 3. CLI arguments (explicit user overrides)

use crate::{BrainmapConfig, ConfigError, ConfigResult};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// File name searched for when no path is given
pub const CONFIG_FILE_NAME: &str = "brainmap_configuration.toml";
/// Environment variable naming an explicit config file
pub const CONFIG_PATH_ENV: &str = "BRAINMAP_CONFIG_PATH";

/// Find the brainmap configuration file
///
/// Search order:
/// 1. `BRAINMAP_CONFIG_PATH` environment variable
/// 2. Current working directory
/// 3. Up to 5 parent directories
///
/// # Errors
///
/// Returns `ConfigError::FileNotFound` if no config file is found in any location
pub fn find_config_file() -> ConfigResult<PathBuf> {
    if let Ok(env_path) = env::var(CONFIG_PATH_ENV) {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return Ok(path);
        }
        return Err(ConfigError::FileNotFound(format!(
            "Config file specified by {} not found: {}",
            CONFIG_PATH_ENV,
            path.display()
        )));
    }

    let mut search_paths = Vec::new();
    if let Ok(cwd) = env::current_dir() {
        search_paths.push(cwd.join(CONFIG_FILE_NAME));
        search_paths.extend(cwd.ancestors().skip(1).take(5).map(|dir| dir.join(CONFIG_FILE_NAME)));
    }

    if let Some(found) = search_paths.iter().find(|p| p.exists()) {
        return Ok(found.clone());
    }

    let search_list = search_paths
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ConfigError::FileNotFound(format!(
        "'{}' not found in any of these locations:\n{}\n\nSet {} to specify a custom location.",
        CONFIG_FILE_NAME, search_list, CONFIG_PATH_ENV
    )))
}

/// Load configuration from TOML file
///
/// # Arguments
///
/// * `config_path` - Optional path to config file. If `None`, will search for config file.
/// * `cli_args` - Optional CLI argument overrides
///
/// # Errors
///
/// Returns error if the file is missing, unreadable or not valid TOML. Values are not
/// validated here; call [`crate::validate_config`] on the result.
pub fn load_config(
    config_path: Option<&Path>,
    cli_args: Option<&HashMap<String, String>>,
) -> ConfigResult<BrainmapConfig> {
    let config_file = match config_path {
        Some(path) => path.to_path_buf(),
        None => find_config_file()?,
    };

    let content = fs::read_to_string(&config_file)?;
    let mut config: BrainmapConfig = toml::from_str(&content)?;

    apply_environment_overrides(&mut config)?;
    if let Some(cli) = cli_args {
        apply_cli_overrides(&mut config, cli)?;
    }

    Ok(config)
}

/// Apply environment variable overrides to configuration
///
/// Supported environment variables:
/// - `BRAINMAP_LAYERS` -> `layout.layers` (comma separated, e.g. `2,3,1`)
/// - `BRAINMAP_LAYER_GAP` -> `layout.layer_gap`
/// - `BRAINMAP_NEURON_SIZE` -> `layout.neuron_size`
/// - `BRAINMAP_NEURON_GAP` -> `layout.neuron_gap`
/// - `BRAINMAP_SEED` -> `simulation.seed`
/// - `BRAINMAP_TICKS` -> `simulation.ticks`
/// - `BRAINMAP_LOG_LEVEL` -> `logging.level`
/// - `BRAINMAP_LOG_FORMAT` -> `logging.format`
/// - `BRAINMAP_LOG_DIR` -> `logging.log_dir`
///
/// # Errors
///
/// `InvalidValue` when a variable is set but cannot be parsed
pub fn apply_environment_overrides(config: &mut BrainmapConfig) -> ConfigResult<()> {
    let lookup: HashMap<String, String> = OVERRIDE_KEYS
        .iter()
        .filter_map(|key| {
            let var = format!("BRAINMAP_{}", key.to_uppercase());
            env::var(&var).ok().map(|value| (key.to_string(), value))
        })
        .collect();
    apply_overrides(config, &lookup, |key| format!("BRAINMAP_{}", key.to_uppercase()))
}

/// Apply CLI argument overrides to configuration
///
/// # Arguments
///
/// * `config` - Configuration to modify
/// * `cli_args` - CLI arguments keyed like the environment variables without the
///   prefix, lowercase (e.g. `{"layers": "2,3,1", "seed": "7"}`)
pub fn apply_cli_overrides(
    config: &mut BrainmapConfig,
    cli_args: &HashMap<String, String>,
) -> ConfigResult<()> {
    apply_overrides(config, cli_args, |key| format!("--{}", key.replace('_', "-")))
}

const OVERRIDE_KEYS: [&str; 9] = [
    "layers",
    "layer_gap",
    "neuron_size",
    "neuron_gap",
    "seed",
    "ticks",
    "log_level",
    "log_format",
    "log_dir",
];

fn apply_overrides(
    config: &mut BrainmapConfig,
    values: &HashMap<String, String>,
    source: impl Fn(&str) -> String,
) -> ConfigResult<()> {
    for key in OVERRIDE_KEYS {
        let Some(value) = values.get(key) else {
            continue;
        };
        let value = value.trim();
        match key {
            "layers" => config.layout.layers = parse_layers(value, &source(key))?,
            "layer_gap" => config.layout.layer_gap = parse(value, &source(key))?,
            "neuron_size" => config.layout.neuron_size = parse(value, &source(key))?,
            "neuron_gap" => config.layout.neuron_gap = parse(value, &source(key))?,
            "seed" => config.simulation.seed = Some(parse(value, &source(key))?),
            "ticks" => config.simulation.ticks = parse(value, &source(key))?,
            "log_level" => config.logging.level = value.to_string(),
            "log_format" => config.logging.format = value.to_string(),
            "log_dir" => config.logging.log_dir = PathBuf::from(value),
            _ => {}
        }
    }
    Ok(())
}

fn parse<T: FromStr>(value: &str, source: &str) -> ConfigResult<T> {
    value
        .parse::<T>()
        .map_err(|_| ConfigError::InvalidValue(format!("{} = '{}'", source, value)))
}

/// Parse a comma separated layer list such as `2,3,5,3,1`
pub fn parse_layers(value: &str, source: &str) -> ConfigResult<Vec<usize>> {
    value
        .split(',')
        .map(|part| parse::<usize>(part.trim(), source))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use std::sync::Mutex;
    use tempfile::tempdir;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn clear_overrides() {
        for key in OVERRIDE_KEYS {
            env::remove_var(format!("BRAINMAP_{}", key.to_uppercase()));
        }
    }

    #[test]
    fn test_find_config_file_env_var() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("custom_config.toml");
        File::create(&config_path).unwrap();

        env::set_var(CONFIG_PATH_ENV, config_path.to_str().unwrap());
        let result = find_config_file();
        env::remove_var(CONFIG_PATH_ENV);

        assert_eq!(result.unwrap(), config_path);
    }

    #[test]
    fn test_find_config_file_env_var_missing_file() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let dir = tempdir().unwrap();
        env::set_var(CONFIG_PATH_ENV, dir.path().join("nope.toml"));
        let result = find_config_file();
        env::remove_var(CONFIG_PATH_ENV);

        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_load_minimal_config() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        clear_overrides();

        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);
        let mut file = File::create(&config_path).unwrap();
        writeln!(file, "[layout]").unwrap();
        writeln!(file, "layers = [4, 4, 2]").unwrap();
        writeln!(file, "neuron_gap = 20.0").unwrap();
        writeln!(file, "[simulation]").unwrap();
        writeln!(file, "seed = 99").unwrap();

        let config = load_config(Some(&config_path), None).unwrap();
        assert_eq!(config.layout.layers, vec![4, 4, 2]);
        assert_eq!(config.layout.neuron_gap, 20.0);
        assert_eq!(config.layout.neuron_size, 50.0);
        assert_eq!(config.simulation.seed, Some(99));
    }

    #[test]
    fn test_environment_overrides() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        clear_overrides();
        let mut config = BrainmapConfig::default();

        env::set_var("BRAINMAP_LAYERS", "3, 1");
        env::set_var("BRAINMAP_LOG_LEVEL", "debug");
        let result = apply_environment_overrides(&mut config);
        clear_overrides();

        result.unwrap();
        assert_eq!(config.layout.layers, vec![3, 1]);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_unparseable_environment_value() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        clear_overrides();
        let mut config = BrainmapConfig::default();

        env::set_var("BRAINMAP_TICKS", "many");
        let result = apply_environment_overrides(&mut config);
        clear_overrides();

        match result {
            Err(ConfigError::InvalidValue(message)) => {
                assert_eq!(message, "BRAINMAP_TICKS = 'many'")
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = BrainmapConfig::default();
        let mut cli_args = HashMap::new();
        cli_args.insert("layers".to_string(), "2,2".to_string());
        cli_args.insert("seed".to_string(), "7".to_string());
        cli_args.insert("layer_gap".to_string(), "150".to_string());

        apply_cli_overrides(&mut config, &cli_args).unwrap();

        assert_eq!(config.layout.layers, vec![2, 2]);
        assert_eq!(config.simulation.seed, Some(7));
        assert_eq!(config.layout.layer_gap, 150.0);

        cli_args.insert("layers".to_string(), "2,x".to_string());
        let err = apply_cli_overrides(&mut config, &cli_args).unwrap_err();
        assert!(err.to_string().contains("--layers"));
    }

    #[test]
    fn test_override_precedence() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        clear_overrides();

        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);
        let mut file = File::create(&config_path).unwrap();
        writeln!(file, "[simulation]").unwrap();
        writeln!(file, "seed = 1").unwrap();
        writeln!(file, "ticks = 1").unwrap();

        env::set_var("BRAINMAP_SEED", "2");
        env::set_var("BRAINMAP_TICKS", "2");

        let mut cli_args = HashMap::new();
        cli_args.insert("seed".to_string(), "3".to_string());

        let config = load_config(Some(&config_path), Some(&cli_args));
        clear_overrides();
        let config = config.unwrap();

        // CLI wins for seed, env wins for ticks (no CLI override)
        assert_eq!(config.simulation.seed, Some(3));
        assert_eq!(config.simulation.ticks, 2);
    }
}
