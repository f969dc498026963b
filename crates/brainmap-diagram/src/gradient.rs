// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! Multi-stop color gradients
//!
//! A [`ColorDistributor`] is built from N ordered `(breakpoint, color)` stops and
//! holds N-1 segments. Each segment carries four independent linear functions
//! (alpha, red, green, blue) of the form `channel(v) = slope * v + intercept`.
//!
//! Evaluation picks the first segment whose upper breakpoint is `>= value`.
//! Values outside `[first, last]` are clamped onto the range, so anything above the
//! last breakpoint gets the last color and anything below the first gets the first.

use crate::types::{Color, DiagramError, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One `(value, color)` pair of a gradient
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GradientStop {
    pub value: f32,
    pub color: Color,
}

impl GradientStop {
    pub const fn new(value: f32, color: Color) -> Self {
        Self { value, color }
    }
}

/// `slope * v + intercept`, evaluated in f64
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFn {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFn {
    pub const fn constant(value: f64) -> Self {
        Self {
            slope: 0.0,
            intercept: value,
        }
    }

    /// Line through `(x0, y0)` and `(x1, y1)`; `x0 != x1`
    fn through(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        let slope = (y1 - y0) / (x1 - x0);
        Self {
            slope,
            intercept: y0 - x0 * slope,
        }
    }

    #[inline]
    pub fn eval(&self, v: f64) -> f64 {
        self.slope * v + self.intercept
    }
}

/// Linear interpolation between two adjacent breakpoints
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    /// Channel functions in A, R, G, B order
    pub channels: [LinearFn; 4],
}

impl Segment {
    fn eval(&self, value: f64) -> Color {
        let mut out = [0u8; 4];
        for (slot, channel) in out.iter_mut().zip(&self.channels) {
            *slot = channel.eval(value).round().clamp(0.0, 255.0) as u8;
        }
        Color::from_channels(out)
    }
}

/// Piecewise-linear scalar-to-color mapping
#[derive(Debug, Clone, PartialEq)]
pub struct ColorDistributor {
    breakpoints: Vec<f32>,
    colors: Vec<Color>,
    segments: Vec<Segment>,
}

impl ColorDistributor {
    /// Build from ordered stops
    ///
    /// # Errors
    /// `Configuration` when there are fewer than two stops, or when breakpoints are
    /// not finite or decrease.
    pub fn new(stops: &[GradientStop]) -> Result<Self> {
        let colors: Vec<Color> = stops.iter().map(|s| s.color).collect();
        let breakpoints: Vec<f32> = stops.iter().map(|s| s.value).collect();
        Self::from_parts(&colors, &breakpoints)
    }

    /// Build from parallel color/breakpoint slices
    pub fn from_parts(colors: &[Color], breakpoints: &[f32]) -> Result<Self> {
        if colors.len() < 2 {
            return Err(DiagramError::configuration(format!(
                "a gradient needs at least 2 stops (got {})",
                colors.len()
            )));
        }
        if colors.len() != breakpoints.len() {
            return Err(DiagramError::configuration(format!(
                "{} colors but {} breakpoints",
                colors.len(),
                breakpoints.len()
            )));
        }
        if let Some(bad) = breakpoints.iter().find(|v| !v.is_finite()) {
            return Err(DiagramError::configuration(format!(
                "gradient breakpoint {} is not finite",
                bad
            )));
        }
        if let Some(r) = breakpoints.windows(2).position(|w| w[1] < w[0]) {
            return Err(DiagramError::configuration(format!(
                "gradient breakpoints must not decrease ({} then {})",
                breakpoints[r],
                breakpoints[r + 1]
            )));
        }

        let first = breakpoints[0];
        let last = breakpoints[breakpoints.len() - 1];
        let last_color = colors[colors.len() - 1].channels();
        let degenerate = first == last;

        let segments = (0..colors.len() - 1)
            .map(|r| {
                let (lo, hi) = (colors[r].channels(), colors[r + 1].channels());
                let (x0, x1) = (breakpoints[r] as f64, breakpoints[r + 1] as f64);
                let channels = core::array::from_fn(|c| {
                    if degenerate {
                        LinearFn::constant(last_color[c] as f64)
                    } else if x0 == x1 {
                        // zero-width segment: only reachable at x1, show the upper stop
                        LinearFn::constant(hi[c] as f64)
                    } else {
                        LinearFn::through(x0, lo[c] as f64, x1, hi[c] as f64)
                    }
                });
                Segment { channels }
            })
            .collect();

        Ok(Self {
            breakpoints: breakpoints.to_vec(),
            colors: colors.to_vec(),
            segments,
        })
    }

    /// Evenly spaced breakpoints from `min` to `max`, one per color
    ///
    /// # Example
    /// ```
    /// use brainmap_diagram::gradient::ColorDistributor;
    /// use brainmap_diagram::Color;
    ///
    /// let gradient =
    ///     ColorDistributor::evenly_spaced(&[Color::BLACK, Color::GREEN, Color::WHITE], 0.0, 1.0)
    ///         .unwrap();
    /// assert_eq!(gradient.breakpoints(), &[0.0, 0.5, 1.0]);
    /// assert_eq!(gradient.color_at(0.5), Color::GREEN);
    /// ```
    pub fn evenly_spaced(colors: &[Color], min: f32, max: f32) -> Result<Self> {
        let n = colors.len();
        if n < 2 {
            return Err(DiagramError::configuration(format!(
                "a gradient needs at least 2 stops (got {})",
                n
            )));
        }
        let breakpoints: Vec<f32> = (0..n)
            .map(|i| {
                if i == n - 1 {
                    max
                } else {
                    ((max as f64 - min as f64) * (i as f64 / (n - 1) as f64) + min as f64) as f32
                }
            })
            .collect();
        Self::from_parts(colors, &breakpoints)
    }

    /// Map a scalar to a color
    ///
    /// NaN maps to the last color, like values above the range.
    pub fn color_at(&self, value: f32) -> Color {
        let first = self.breakpoints[0];
        let last = self.breakpoints[self.breakpoints.len() - 1];
        let v = if value.is_nan() {
            last
        } else {
            value.clamp(first, last)
        };

        let r = self.breakpoints[1..]
            .iter()
            .position(|&bp| v <= bp)
            .unwrap_or(self.segments.len() - 1);
        self.segments[r].eval(v as f64)
    }

    pub fn breakpoints(&self) -> &[f32] {
        &self.breakpoints
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// All breakpoints equal: every value maps to the last color
    pub fn is_degenerate(&self) -> bool {
        self.breakpoints[0] == self.breakpoints[self.breakpoints.len() - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn black_green_white() -> ColorDistributor {
        ColorDistributor::evenly_spaced(&[Color::BLACK, Color::GREEN, Color::WHITE], 0.0, 1.0)
            .unwrap()
    }

    #[test]
    fn test_requires_two_stops() {
        let err = ColorDistributor::new(&[GradientStop::new(0.0, Color::BLACK)]).unwrap_err();
        assert!(matches!(err, DiagramError::Configuration(_)));
        assert!(ColorDistributor::evenly_spaced(&[Color::BLACK], 0.0, 1.0).is_err());
    }

    #[test]
    fn test_rejects_decreasing_breakpoints() {
        let stops = [
            GradientStop::new(1.0, Color::BLACK),
            GradientStop::new(0.0, Color::WHITE),
        ];
        assert!(ColorDistributor::new(&stops).is_err());
    }

    #[test]
    fn test_rejects_non_finite_breakpoints() {
        assert!(ColorDistributor::from_parts(&[Color::BLACK, Color::WHITE], &[0.0, f32::NAN]).is_err());
    }

    #[test]
    fn test_rejects_mismatched_lengths() {
        assert!(ColorDistributor::from_parts(&[Color::BLACK, Color::WHITE], &[0.0]).is_err());
    }

    #[test]
    fn test_stops_are_exact() {
        let gradient = black_green_white();
        assert_eq!(gradient.color_at(0.0), Color::BLACK);
        assert_eq!(gradient.color_at(0.5), Color::GREEN);
        assert_eq!(gradient.color_at(1.0), Color::WHITE);
    }

    #[test]
    fn test_interpolates_between_stops() {
        let gradient = black_green_white();
        // 0.25 -> halfway black..green
        assert_eq!(gradient.color_at(0.25), Color::from_rgb(0, 64, 0));
        // 0.75 -> halfway green..white (128 + 63.5 rounds to 192)
        assert_eq!(gradient.color_at(0.75), Color::from_rgb(128, 192, 128));
    }

    #[test]
    fn test_segment_coefficients() {
        let gradient = black_green_white();
        let green = gradient.segments()[0].channels[2];
        assert_eq!(green.slope, 256.0);
        assert_eq!(green.intercept, 0.0);
        let red = gradient.segments()[1].channels[1];
        assert_eq!(red.slope, 510.0);
        assert_eq!(red.intercept, -255.0);
    }

    #[test]
    fn test_beyond_range_clamps() {
        let gradient = black_green_white();
        assert_eq!(gradient.color_at(7.0), Color::WHITE);
        assert_eq!(gradient.color_at(f32::INFINITY), Color::WHITE);
        assert_eq!(gradient.color_at(-3.0), Color::BLACK);
        assert_eq!(gradient.color_at(f32::NAN), Color::WHITE);
    }

    #[test]
    fn test_degenerate_range_is_last_color() {
        let gradient =
            ColorDistributor::evenly_spaced(&[Color::BLACK, Color::BLUE, Color::WHITE], 0.4, 0.4)
                .unwrap();
        assert!(gradient.is_degenerate());
        for v in [-10.0, 0.0, 0.4, 0.5, 99.0] {
            assert_eq!(gradient.color_at(v), Color::WHITE);
        }
    }

    #[test]
    fn test_zero_width_inner_segment() {
        let gradient = ColorDistributor::from_parts(
            &[Color::BLACK, Color::BLUE, Color::WHITE],
            &[0.0, 0.0, 1.0],
        )
        .unwrap();
        assert!(!gradient.is_degenerate());
        assert_eq!(gradient.color_at(0.0), Color::BLUE);
        assert_eq!(gradient.color_at(1.0), Color::WHITE);
    }

    #[test]
    fn test_alpha_is_interpolated() {
        let gradient = ColorDistributor::new(&[
            GradientStop::new(-1.0, Color::from_argb(0, 0, 0, 0)),
            GradientStop::new(1.0, Color::from_argb(200, 0, 0, 0)),
        ])
        .unwrap();
        assert_eq!(gradient.color_at(0.0).a, 100);
    }
}
