// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Neuron record and variant selection

use crate::types::{NeuronId, Point, Rect};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Position of a neuron's layer within the network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NeuronKind {
    Input,
    Hidden,
    Output,
}

impl NeuronKind {
    /// First layer is input, last layer is output, everything between is hidden
    pub fn for_layer(layer: usize, layer_count: usize) -> Self {
        if layer == 0 {
            NeuronKind::Input
        } else if layer + 1 == layer_count {
            NeuronKind::Output
        } else {
            NeuronKind::Hidden
        }
    }

    pub fn style(&self) -> NeuronStyle {
        match self {
            NeuronKind::Input => NeuronStyle::Rectangle,
            NeuronKind::Hidden => NeuronStyle::Ellipse,
            NeuronKind::Output => NeuronStyle::EllipseWithReadout,
        }
    }
}

/// How a renderer should draw a neuron
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NeuronStyle {
    /// Filled square with an outline
    Rectangle,
    /// Filled circle with an outline
    Ellipse,
    /// Circle plus a short stub to a boxed output value on its right
    EllipseWithReadout,
}

/// A neuron of the diagram
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Neuron {
    pub(crate) id: NeuronId,
    pub(crate) kind: NeuronKind,
    pub(crate) bounds: Rect,
    pub(crate) bias: f32,
    /// Readout value; only output neurons have one
    pub(crate) output: Option<f32>,
}

impl Neuron {
    pub(crate) fn new(id: NeuronId, kind: NeuronKind, bounds: Rect, bias: f32) -> Self {
        let output = (kind == NeuronKind::Output).then_some(0.0);
        Self {
            id,
            kind,
            bounds,
            bias,
            output,
        }
    }

    pub fn id(&self) -> NeuronId {
        self.id
    }

    pub fn kind(&self) -> NeuronKind {
        self.kind
    }

    pub fn style(&self) -> NeuronStyle {
        self.kind.style()
    }

    /// Top-left corner
    pub fn position(&self) -> Point {
        self.bounds.origin
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn center(&self) -> Point {
        self.bounds.center()
    }

    pub fn left(&self) -> f32 {
        self.bounds.left()
    }

    pub fn right(&self) -> f32 {
        self.bounds.right()
    }

    pub fn top(&self) -> f32 {
        self.bounds.top()
    }

    pub fn bottom(&self) -> f32 {
        self.bounds.bottom()
    }

    pub fn bias(&self) -> f32 {
        self.bias
    }

    pub fn output(&self) -> Option<f32> {
        self.output
    }

    /// Euclidean distance from the neuron center
    pub fn distance(&self, point: Point) -> f32 {
        self.center().distance_to(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Size;

    #[test]
    fn test_kind_for_layer() {
        assert_eq!(NeuronKind::for_layer(0, 3), NeuronKind::Input);
        assert_eq!(NeuronKind::for_layer(1, 3), NeuronKind::Hidden);
        assert_eq!(NeuronKind::for_layer(2, 3), NeuronKind::Output);
        assert_eq!(NeuronKind::for_layer(1, 2), NeuronKind::Output);
    }

    #[test]
    fn test_style_per_kind() {
        assert_eq!(NeuronKind::Input.style(), NeuronStyle::Rectangle);
        assert_eq!(NeuronKind::Hidden.style(), NeuronStyle::Ellipse);
        assert_eq!(NeuronKind::Output.style(), NeuronStyle::EllipseWithReadout);
    }

    #[test]
    fn test_only_output_neurons_have_readout() {
        let bounds = Rect::new(Point::new(0.0, 0.0), Size::new(50.0, 50.0));
        let hidden = Neuron::new(NeuronId::new(1, 0), NeuronKind::Hidden, bounds, 0.3);
        let output = Neuron::new(NeuronId::new(2, 0), NeuronKind::Output, bounds, 0.3);
        assert_eq!(hidden.output(), None);
        assert_eq!(output.output(), Some(0.0));
        assert_eq!(output.distance(Point::new(25.0, 25.0)), 0.0);
    }
}
