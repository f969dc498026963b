// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! ARGB color type

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 8-bit-per-channel color with alpha
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Color {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::from_rgb(0, 0, 0);
    pub const WHITE: Color = Color::from_rgb(255, 255, 255);
    pub const BLUE: Color = Color::from_rgb(0, 0, 255);
    /// Web "green" (half intensity), not pure #00FF00
    pub const GREEN: Color = Color::from_rgb(0, 128, 0);

    pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }

    /// Opaque color
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self::from_argb(255, r, g, b)
    }

    /// Channels in A, R, G, B order
    pub const fn channels(&self) -> [u8; 4] {
        [self.a, self.r, self.g, self.b]
    }

    pub const fn from_channels(channels: [u8; 4]) -> Self {
        Self::from_argb(channels[0], channels[1], channels[2], channels[3])
    }

    /// Black or white, whichever reads better on top of `self`. Alpha is kept.
    pub fn contrast(&self) -> Color {
        let average = (self.r as u16 + self.g as u16 + self.b as u16) / 3;
        let c = if average < 128 { 255 } else { 0 };
        Color::from_argb(self.a, c, c, c)
    }

    /// Per-channel complement. Alpha is kept.
    pub fn inverted(&self) -> Color {
        Color::from_argb(self.a, 255 - self.r, 255 - self.g, 255 - self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}{:02X}", self.a, self.r, self.g, self.b)
    }
}

impl From<[u8; 4]> for Color {
    fn from(channels: [u8; 4]) -> Self {
        Color::from_channels(channels)
    }
}
