// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Brainmap Diagram
//!
//! Geometry and interaction core for drawing a layered, fully connected
//! feed-forward network:
//! - **layout**: deterministic placement of neurons and synapses from layer counts
//! - **gradient**: piecewise-linear color interpolation over value breakpoints
//! - **model**: neurons, synapses and their observable biases/weights
//! - **hit_test**: pointer position to nearest neuron or synapse
//! - **scene**: renderer-neutral draw list for one frame
//!
//! ## Usage
//!
//! ```rust
//! use brainmap_diagram::{NetworkModel, PaletteSpec, Point, Scene};
//!
//! let model = NetworkModel::new(&[2, 3, 1]).unwrap();
//! let hit = model.hit_test(Point::new(25.0, 55.0));
//! assert_eq!(hit.neuron_id().map(|id| id.index), Some(0));
//!
//! let scene = Scene::compose(&model, &PaletteSpec::default()).unwrap();
//! assert_eq!(scene.neurons.len(), 6);
//! assert_eq!(scene.synapses.len(), 9);
//! ```
//!
//! Everything here is single-threaded and renderer-agnostic.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod gradient;
pub mod label;
pub mod layout;
pub mod model;
pub mod scene;
pub mod types;

pub use gradient::{ColorDistributor, GradientStop};
pub use hit_test::{HitResult, HitTester};
pub use label::describe;
pub use layout::{layout, layout_with, Layout, LayoutParams};
pub use model::{ElementId, NetworkModel, Neuron, NeuronKind, NeuronStyle, ScalarChange, ScalarKind, Synapse};
pub use scene::{PaletteSpec, Scene};
pub use types::*;
