// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! Renderer-neutral draw list
//!
//! A [`Scene`] is everything a renderer needs for one frame: shapes, fills,
//! outlines and label text, already resolved from the model and the palette.
//! Nothing here rasterizes.
//!
//! Colors are relative: the neuron gradient spans the current smallest..largest bias
//! and the synapse gradient the current smallest..largest weight, each going
//! `low -> base -> high`. Paint `synapses` first, then `neurons`.

use tracing::debug;

use crate::gradient::ColorDistributor;
use crate::model::{NetworkModel, NeuronKind, NeuronStyle};
use crate::types::{Color, NeuronId, Point, Rect, Result, Size, SynapseId};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Neuron outline thickness
pub const OUTLINE_WIDTH: f32 = 3.0;
/// Colored synapse stroke thickness
pub const SYNAPSE_WIDTH: f32 = 6.0;
/// Thin line drawn on top of every synapse stroke
pub const SYNAPSE_CORE_WIDTH: f32 = 1.0;
/// Length of the line joining an output neuron to its readout box
pub const READOUT_STUB: f32 = 10.0;

/// Base colors of the two gradients
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PaletteSpec {
    pub low: Color,
    pub neuron: Color,
    pub synapse: Color,
    pub high: Color,
}

impl Default for PaletteSpec {
    fn default() -> Self {
        Self {
            low: Color::BLACK,
            neuron: Color::BLUE,
            synapse: Color::GREEN,
            high: Color::WHITE,
        }
    }
}

impl PaletteSpec {
    /// `low -> neuron -> high` over `[min, max]`
    pub fn neuron_gradient(&self, min: f32, max: f32) -> Result<ColorDistributor> {
        ColorDistributor::evenly_spaced(&[self.low, self.neuron, self.high], min, max)
    }

    /// `low -> synapse -> high` over `[min, max]`
    pub fn synapse_gradient(&self, min: f32, max: f32) -> Result<ColorDistributor> {
        ColorDistributor::evenly_spaced(&[self.low, self.synapse, self.high], min, max)
    }
}

/// Boxed value shown to the right of an output neuron
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Readout {
    pub stub_start: Point,
    pub stub_end: Point,
    pub value: f32,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NeuronGlyph {
    pub id: NeuronId,
    pub kind: NeuronKind,
    pub style: NeuronStyle,
    pub bounds: Rect,
    pub fill: Color,
    pub outline: Color,
    pub outline_width: f32,
    /// Bias, two decimals, centered on the glyph
    pub label: String,
    pub label_color: Color,
    pub readout: Option<Readout>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SynapseStroke {
    pub id: SynapseId,
    pub start: Point,
    pub end: Point,
    pub color: Color,
    pub width: f32,
    pub core_color: Color,
    pub core_width: f32,
}

/// One frame worth of shapes
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Scene {
    pub canvas: Size,
    pub synapses: Vec<SynapseStroke>,
    pub neurons: Vec<NeuronGlyph>,
}

impl Scene {
    /// Resolve every neuron and synapse of `model` into drawable shapes
    pub fn compose(model: &NetworkModel, palette: &PaletteSpec) -> Result<Scene> {
        let (bias_min, bias_max) = model.bias_range();
        let (weight_min, weight_max) = model.weight_range();
        let neuron_colors = palette.neuron_gradient(bias_min, bias_max)?;
        let synapse_colors = palette.synapse_gradient(weight_min, weight_max)?;

        debug!(
            target: "brainmap-diagram",
            "Composing scene: bias range [{}, {}], weight range [{}, {}]",
            bias_min, bias_max, weight_min, weight_max
        );

        let synapses = model
            .iter_synapses()
            .map(|s| SynapseStroke {
                id: s.id(),
                start: s.start(),
                end: s.end(),
                color: synapse_colors.color_at(s.weight()),
                width: SYNAPSE_WIDTH,
                core_color: Color::BLACK,
                core_width: SYNAPSE_CORE_WIDTH,
            })
            .collect();

        let neurons = model
            .iter_neurons()
            .map(|n| {
                let fill = neuron_colors.color_at(n.bias());
                let readout = n.output().map(|value| {
                    let stub_start = Point::new(n.right(), n.center().y);
                    Readout {
                        stub_start,
                        stub_end: Point::new(stub_start.x + READOUT_STUB, stub_start.y),
                        value,
                        text: format!("{:.2}", value),
                    }
                });
                NeuronGlyph {
                    id: n.id(),
                    kind: n.kind(),
                    style: n.style(),
                    bounds: n.bounds(),
                    fill,
                    outline: Color::BLACK,
                    outline_width: OUTLINE_WIDTH,
                    label: format!("{:.2}", n.bias()),
                    label_color: fill.contrast(),
                    readout,
                }
            })
            .collect();

        Ok(Scene {
            canvas: model.layout().canvas,
            synapses,
            neurons,
        })
    }

    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
