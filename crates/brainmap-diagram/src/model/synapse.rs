// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Synapse record and line geometry

use crate::types::{Point, SynapseId};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A synapse of the diagram
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Synapse {
    pub(crate) id: SynapseId,
    pub(crate) start: Point,
    pub(crate) end: Point,
    pub(crate) weight: f32,
}

impl Synapse {
    pub(crate) fn new(id: SynapseId, start: Point, end: Point, weight: f32) -> Self {
        Self {
            id,
            start,
            end,
            weight,
        }
    }

    pub fn id(&self) -> SynapseId {
        self.id
    }

    /// Right-center of the source neuron
    pub fn start(&self) -> Point {
        self.start
    }

    /// Left-center of the target neuron
    pub fn end(&self) -> Point {
        self.end
    }

    pub fn center(&self) -> Point {
        self.start.midpoint(self.end)
    }

    pub fn weight(&self) -> f32 {
        self.weight
    }

    pub fn slope(&self) -> f32 {
        (self.end.y - self.start.y) / (self.end.x - self.start.x)
    }

    pub fn intercept(&self) -> f32 {
        self.start.y - self.slope() * self.start.x
    }

    /// Perpendicular distance to the infinite line through `start` and `end`.
    ///
    /// Not clamped to the segment: points past either endpoint but colinear with
    /// the synapse are at distance 0.
    pub fn distance(&self, point: Point) -> f32 {
        distance_to_line(self.start, self.end, point)
    }
}

/// `|y - slope*x - intercept| / sqrt(slope^2 + 1)` for the line through `a` and `b`
pub fn distance_to_line(a: Point, b: Point, point: Point) -> f32 {
    if a.x == b.x {
        return (point.x - a.x).abs();
    }
    let slope = (b.y - a.y) / (b.x - a.x);
    let intercept = a.y - slope * a.x;
    (point.y - slope * point.x - intercept).abs() / (slope * slope + 1.0).sqrt()
}
