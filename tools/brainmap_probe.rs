// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Headless diagram host
//!
//! Builds a network from configuration, runs a few random scalar updates, then
//! resolves pointer clicks to tooltip text and optionally dumps the scene as JSON.
//!
//! ```text
//! brainmap-probe --layers 2,3,1 --seed 7 --ticks 3 --click 25,55 --click 85,40
//! ```

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use brainmap::config::{self, BrainmapConfig, ConfigError};
use brainmap::diagram::{describe, NetworkModel, Point, Scene};
use brainmap::observability::init_logging;
use brainmap::settings::{debug_flags, layout_params, logging_config, palette_spec};

/// Probe a feed-forward network diagram without a display
#[derive(Parser, Debug)]
#[command(name = "brainmap-probe", version, long_about = None)]
struct Args {
    /// Configuration file (default: search for brainmap_configuration.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Neurons per layer, comma separated (e.g. "2,3,1")
    #[arg(long)]
    layers: Option<String>,

    /// Seed for biases and weights
    #[arg(long)]
    seed: Option<u64>,

    /// Randomization rounds after construction
    #[arg(long)]
    ticks: Option<usize>,

    /// Log level for crates without a debug flag
    #[arg(long)]
    log_level: Option<String>,

    /// Pointer position "X,Y" to resolve; repeatable
    #[arg(long = "click", value_name = "X,Y", value_parser = parse_point)]
    clicks: Vec<Point>,

    /// Print the composed scene as JSON on stdout
    #[arg(long, default_value_t = false)]
    scene_json: bool,

    /// Debug logging for every brainmap crate
    #[arg(long, default_value_t = false)]
    debug_all: bool,

    /// Debug logging for one crate (e.g. "brainmap-diagram"); repeatable
    #[arg(long = "debug", value_name = "CRATE")]
    debug_crates: Vec<String>,
}

impl Args {
    /// Overrides in the key format of `brainmap_config::apply_cli_overrides`
    fn overrides(&self) -> HashMap<String, String> {
        let mut overrides = HashMap::new();
        if let Some(layers) = &self.layers {
            overrides.insert("layers".to_string(), layers.clone());
        }
        if let Some(seed) = self.seed {
            overrides.insert("seed".to_string(), seed.to_string());
        }
        if let Some(ticks) = self.ticks {
            overrides.insert("ticks".to_string(), ticks.to_string());
        }
        if let Some(level) = &self.log_level {
            overrides.insert("log_level".to_string(), level.clone());
        }
        overrides
    }

    /// Debug switches in `--debug-<crate>` form
    fn debug_args(&self) -> Vec<String> {
        let mut args: Vec<String> = self
            .debug_crates
            .iter()
            .map(|name| format!("--debug-{}", name))
            .collect();
        if self.debug_all {
            args.push("--debug-all".to_string());
        }
        args
    }
}

fn parse_point(value: &str) -> std::result::Result<Point, String> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got '{}'", value))?;
    let coordinate = |s: &str| {
        s.trim()
            .parse::<f32>()
            .map_err(|e| format!("bad coordinate '{}': {}", s.trim(), e))
    };
    Ok(Point::new(coordinate(x)?, coordinate(y)?))
}

/// File (explicit or discovered), then env, then CLI; defaults when no file exists
fn load(args: &Args) -> Result<BrainmapConfig> {
    let overrides = args.overrides();
    let loaded = match &args.config {
        Some(path) => config::load_config(Some(path), Some(&overrides))
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => match config::find_config_file() {
            Ok(path) => config::load_config(Some(&path), Some(&overrides))
                .with_context(|| format!("Failed to load {}", path.display()))?,
            Err(ConfigError::FileNotFound(_)) => {
                let mut defaults = BrainmapConfig::default();
                config::apply_environment_overrides(&mut defaults)?;
                config::apply_cli_overrides(&mut defaults, &overrides)?;
                defaults
            }
            Err(e) => return Err(e.into()),
        },
    };
    config::validate_config(&loaded)?;
    Ok(loaded)
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = load(&args)?;

    let flags = debug_flags(&config.logging, args.debug_args());
    let _logging = init_logging(&logging_config(&config.logging)?, &flags)?;

    let params = layout_params(&config.layout);
    let palette = palette_spec(&config.palette)?;
    let mut rng = match config.simulation.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut model = NetworkModel::with_random_scalars(&config.layout.layers, &params, &mut rng)
        .context("Failed to build the network")?;
    for tick in 0..config.simulation.ticks {
        model.randomize_scalars(&mut rng);
        debug!(target: "brainmap", "Tick {} applied", tick + 1);
    }

    let canvas = model.layout().canvas;
    info!(
        target: "brainmap",
        "Network {:?}: canvas {}x{}, {} synapses",
        model.layer_sizes(),
        canvas.width,
        canvas.height,
        model.iter_synapses().count()
    );

    for point in &args.clicks {
        println!("click ({}, {})", point.x, point.y);
        let hit = model.hit_test(*point);
        match describe(&model, &hit) {
            Some(text) => {
                for line in text.lines() {
                    println!("  {}", line);
                }
            }
            None => println!("  miss"),
        }
    }

    if args.scene_json {
        let scene = Scene::compose(&model, &palette)?;
        println!("{}", scene.to_json()?);
    }

    if args.clicks.is_empty() && !args.scene_json {
        println!(
            "layers {:?}, canvas {}x{}, bias range {:?}, weight range {:?}",
            model.layer_sizes(),
            canvas.width,
            canvas.height,
            model.bias_range(),
            model.weight_range()
        );
    }
    Ok(())
}
