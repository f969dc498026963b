// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! Layer layout engine
//!
//! Converts per-layer neuron counts into absolute positions:
//!
//! ```text
//!  x = 0        x = 120       x = 240
//!  ┌──┐
//!  │  │╲        ┌──┐
//!  └──┘ ╲──────▶│  │╲
//!  ┌──┐ ╱──────▶└──┘ ╲       ┌──┐
//!  │  │╱        ┌──┐  ╲─────▶│  │
//!  └──┘         │  │  ╱─────▶└──┘
//!               └──┘ ╱
//! ```
//!
//! Shorter layers are centered against the tallest one (half-neuron offsets allowed).
//! Synapses run from the right-center of the source neuron to the left-center of
//! the target neuron, one per (source, target) pair of adjacent layers.
//!
//! The layout is a pure function of its inputs.

use crate::types::{DiagramError, NeuronId, Point, Rect, Result, Size, SynapseId};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Horizontal distance between the left edges of consecutive layers
pub const LAYER_GAP: f32 = 120.0;
/// Neurons are square
pub const NEURON_SIZE: f32 = 50.0;
/// Vertical space between neurons of the same layer
pub const NEURON_GAP: f32 = 10.0;
/// Extra width to the right of the output layer (room for readout boxes)
pub const RIGHT_PADDING: f32 = 100.0;
/// Border margin added to both canvas axes
pub const BORDER: f32 = 3.0;

/// Geometry constants used by layout and hit-testing
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LayoutParams {
    pub layer_gap: f32,
    pub neuron_size: f32,
    pub neuron_gap: f32,
    pub right_padding: f32,
    pub border: f32,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            layer_gap: LAYER_GAP,
            neuron_size: NEURON_SIZE,
            neuron_gap: NEURON_GAP,
            right_padding: RIGHT_PADDING,
            border: BORDER,
        }
    }
}

impl LayoutParams {
    /// Vertical distance between the tops of two consecutive neurons
    #[inline]
    pub fn row_pitch(&self) -> f32 {
        self.neuron_size + self.neuron_gap
    }

    pub fn validate(&self) -> Result<()> {
        let all = [
            ("layer_gap", self.layer_gap),
            ("neuron_size", self.neuron_size),
            ("neuron_gap", self.neuron_gap),
            ("right_padding", self.right_padding),
            ("border", self.border),
        ];
        for (name, value) in all {
            if !value.is_finite() || value < 0.0 {
                return Err(DiagramError::configuration(format!(
                    "{} must be a finite, non-negative number (got {})",
                    name, value
                )));
            }
        }
        if self.neuron_size <= 0.0 {
            return Err(DiagramError::configuration("neuron_size must be > 0"));
        }
        // Hit-testing splits every column into a neuron band and a synapse corridor
        if self.layer_gap <= self.neuron_size {
            return Err(DiagramError::configuration(format!(
                "layer_gap ({}) must be wider than neuron_size ({})",
                self.layer_gap, self.neuron_size
            )));
        }
        Ok(())
    }
}

/// Position of one neuron
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NeuronPlacement {
    pub id: NeuronId,
    pub bounds: Rect,
}

impl NeuronPlacement {
    #[inline]
    pub fn center(&self) -> Point {
        self.bounds.center()
    }

    /// Attachment point of outgoing synapses
    #[inline]
    pub fn right_center(&self) -> Point {
        Point::new(self.bounds.right(), self.center().y)
    }

    /// Attachment point of incoming synapses
    #[inline]
    pub fn left_center(&self) -> Point {
        Point::new(self.bounds.left(), self.center().y)
    }
}

/// Endpoints of one synapse
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SynapsePlacement {
    pub id: SynapseId,
    pub start: Point,
    pub end: Point,
}

/// Complete diagram geometry
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Layout {
    pub params: LayoutParams,
    pub layer_sizes: Vec<usize>,
    /// `neurons[layer][index]`
    pub neurons: Vec<Vec<NeuronPlacement>>,
    /// `synapses[layer]` in row-major order: `source * target_layer_size + target`
    pub synapses: Vec<Vec<SynapsePlacement>>,
    /// Height of the tallest layer, without the border
    pub max_column_height: f32,
    /// Overall canvas size, border included
    pub canvas: Size,
}

impl Layout {
    pub fn layer_count(&self) -> usize {
        self.layer_sizes.len()
    }

    /// Mid-height of the tallest column; every layer is symmetric about it
    pub fn vertical_center(&self) -> f32 {
        self.max_column_height / 2.0
    }

    pub fn neuron(&self, id: NeuronId) -> Option<&NeuronPlacement> {
        self.neurons.get(id.layer)?.get(id.index)
    }

    pub fn synapse(&self, id: SynapseId) -> Option<&SynapsePlacement> {
        let target_size = *self.layer_sizes.get(id.layer + 1)?;
        if id.source >= self.layer_sizes[id.layer] || id.target >= target_size {
            return None;
        }
        self.synapses
            .get(id.layer)?
            .get(id.source * target_size + id.target)
    }

    pub fn total_synapses(&self) -> usize {
        self.synapses.iter().map(Vec::len).sum()
    }
}

/// Check layer counts: at least two layers, none empty
pub fn validate_layer_sizes(layer_sizes: &[usize]) -> Result<()> {
    if layer_sizes.len() < 2 {
        return Err(DiagramError::configuration(format!(
            "a network needs at least 2 layers (got {})",
            layer_sizes.len()
        )));
    }
    if let Some(layer) = layer_sizes.iter().position(|&size| size == 0) {
        return Err(DiagramError::configuration(format!(
            "layer {} has no neurons",
            layer
        )));
    }
    Ok(())
}

/// Lay out a network with the default geometry constants
///
/// # Example
/// ```
/// use brainmap_diagram::layout::layout;
///
/// let geometry = layout(&[2, 3, 1]).unwrap();
/// assert_eq!(geometry.synapses[0].len(), 6);
/// assert_eq!(geometry.synapses[1].len(), 3);
/// assert_eq!(geometry.neurons[0][0].bounds.origin.y, 30.0);
/// ```
pub fn layout(layer_sizes: &[usize]) -> Result<Layout> {
    layout_with(layer_sizes, &LayoutParams::default())
}

/// Lay out a network with explicit geometry constants
pub fn layout_with(layer_sizes: &[usize], params: &LayoutParams) -> Result<Layout> {
    validate_layer_sizes(layer_sizes)?;
    params.validate()?;

    let largest = layer_sizes.iter().copied().max().unwrap_or(0);
    let pitch = params.row_pitch();
    let max_column_height = pitch * largest as f32 - params.neuron_gap;
    let neuron_extent = Size::new(params.neuron_size, params.neuron_size);

    let neurons: Vec<Vec<NeuronPlacement>> = layer_sizes
        .iter()
        .enumerate()
        .map(|(layer, &size)| {
            let x = params.layer_gap * layer as f32;
            let offset = (largest - size) as f32 / 2.0;
            (0..size)
                .map(|index| NeuronPlacement {
                    id: NeuronId::new(layer, index),
                    bounds: Rect::new(
                        Point::new(x, pitch * (index as f32 + offset)),
                        neuron_extent,
                    ),
                })
                .collect()
        })
        .collect();

    let synapses: Vec<Vec<SynapsePlacement>> = neurons
        .windows(2)
        .enumerate()
        .map(|(layer, pair)| {
            let (sources, targets) = (&pair[0], &pair[1]);
            let mut corridor = Vec::with_capacity(sources.len() * targets.len());
            for source in sources {
                for target in targets {
                    corridor.push(SynapsePlacement {
                        id: SynapseId::new(layer, source.id.index, target.id.index),
                        start: source.right_center(),
                        end: target.left_center(),
                    });
                }
            }
            corridor
        })
        .collect();

    let width = params.layer_gap * (layer_sizes.len() - 1) as f32
        + params.neuron_size
        + params.right_padding;
    let canvas = Size::new(width, max_column_height).inflate(params.border);

    Ok(Layout {
        params: *params,
        layer_sizes: layer_sizes.to_vec(),
        neurons,
        synapses,
        max_column_height,
        canvas,
    })
}
