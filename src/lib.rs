// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # brainmap
//!
//! Diagrams of layered, fully connected feed-forward networks: neurons placed in
//! columns, every neuron linked to every neuron of the next layer, both colored by a
//! multi-stop gradient over their current bias/weight, and pointer hit-testing that
//! names the element under a click.
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! brainmap = "0.1"  # Default: config + observability
//! ```
//!
//! ## Feature Flags
//! - **`config`** (default): `brainmap_configuration.toml` loading with env/CLI overrides
//! - **`observability`** (default): tracing subscriber setup and per-crate debug flags
//! - **`file-logging`**: per-run rotating log files
//!
//! ## Usage
//!
//! ```rust
//! use brainmap::prelude::*;
//!
//! let mut model = NetworkModel::new(&[2, 3, 1]).unwrap();
//! model.set_bias(NeuronId::new(0, 0), 0.8).unwrap();
//!
//! let hit = model.hit_test(Point::new(25.0, 55.0));
//! assert_eq!(
//!     describe(&model, &hit).as_deref(),
//!     Some("Neuron 1 at Layer 1\nIts Bias is 0.80")
//! );
//!
//! let scene = Scene::compose(&model, &PaletteSpec::default()).unwrap();
//! assert_eq!(scene.synapses.len(), 9);
//! ```

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Re-export foundation
pub use brainmap_diagram as diagram;

// Re-export infrastructure
#[cfg(feature = "config")]
pub use brainmap_config as config;

#[cfg(feature = "observability")]
pub use brainmap_observability as observability;

#[cfg(feature = "config")]
pub mod settings;

/// Prelude - commonly used types and traits
pub mod prelude {
    pub use crate::diagram::types::*;
    pub use crate::diagram::{
        describe, layout, layout_with, ColorDistributor, GradientStop, HitResult, HitTester,
        Layout, LayoutParams, NetworkModel, NeuronKind, NeuronStyle, PaletteSpec, ScalarChange,
        ScalarKind, Scene,
    };

    #[cfg(feature = "config")]
    pub use crate::config::{load_config, validate_config, BrainmapConfig};

    #[cfg(feature = "config")]
    pub use crate::settings::{layout_params, palette_spec};

    #[cfg(feature = "observability")]
    pub use crate::observability::{init_logging, parse_debug_flags, CrateDebugFlags};
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_facade_imports() {
        use crate::prelude::*;
        let geometry = layout(&[1, 1]).unwrap();
        assert_eq!(geometry.total_synapses(), 1);
        assert_eq!(crate::diagram::VERSION, crate::VERSION);
    }
}
