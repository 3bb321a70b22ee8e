// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Color preprocessing: RGB/YUV conversion and grayscale reduction.
//!
//! All functions are pure and work per sample or per block. The YUV pair
//! uses fixed 8-bit style coefficients and is only approximately inverse:
//! saturated colors drift by a few levels over a round trip.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::StegoError;

/// RGB to YCbCr.
pub fn rgb_to_yuv(r: f64, g: f64, b: f64) -> (f64, f64, f64) {
    (
        (77.0 / 256.0) * r + (150.0 / 256.0) * g + (29.0 / 256.0) * b,
        -(44.0 / 256.0) * r - (87.0 / 256.0) * g + (131.0 / 256.0) * b + 128.0,
        (131.0 / 256.0) * r - (110.0 / 256.0) * g - (21.0 / 256.0) * b + 128.0,
    )
}

/// YCbCr to RGB. Not clamped.
pub fn yuv_to_rgb(y: f64, cb: f64, cr: f64) -> (f64, f64, f64) {
    (
        y + 1.4075 * (cr - 128.0),
        y - 0.3455 * (cb - 128.0) - 0.7169 * (cr - 128.0),
        y + 1.779 * (cb - 128.0),
    )
}

fn map_block(
    a: &[f64],
    b: &[f64],
    c: &[f64],
    f: fn(f64, f64, f64) -> (f64, f64, f64),
) -> [Vec<f64>; 3] {
    let mut out = [
        Vec::with_capacity(a.len()),
        Vec::with_capacity(a.len()),
        Vec::with_capacity(a.len()),
    ];
    for ((&x, &y), &z) in a.iter().zip(b).zip(c) {
        let (p, q, s) = f(x, y, z);
        out[0].push(p);
        out[1].push(q);
        out[2].push(s);
    }
    out
}

/// [`rgb_to_yuv`] over three same-length blocks.
pub fn rgb_to_yuv_block(r: &[f64], g: &[f64], b: &[f64]) -> [Vec<f64>; 3] {
    map_block(r, g, b, rgb_to_yuv)
}

/// [`yuv_to_rgb`] over three same-length blocks.
pub fn yuv_to_rgb_block(y: &[f64], cb: &[f64], cr: &[f64]) -> [Vec<f64>; 3] {
    map_block(y, cb, cr, yuv_to_rgb)
}

/// Grayscale reduction formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GrayscaleAlgorithm {
    /// (r + g + b) / 3
    #[default]
    #[serde(rename = "AVG")]
    Average,
    /// 0.3 r + 0.59 g + 0.11 b
    #[serde(rename = "LUMA")]
    Luminance,
    /// Rec. 709 weights.
    #[serde(rename = "LUMA_II")]
    LuminanceII,
    /// Midpoint of max and min.
    #[serde(rename = "DESATURATION")]
    Desaturation,
    #[serde(rename = "MAX_DECOMPOSITION")]
    MaxDecomposition,
    #[serde(rename = "MIN_DECOMPOSITION")]
    MinDecomposition,
    /// Median of the three samples.
    #[serde(rename = "MID_DECOMPOSITION")]
    MidDecomposition,
    #[serde(rename = "R")]
    SingleR,
    #[serde(rename = "G")]
    SingleG,
    #[serde(rename = "B")]
    SingleB,
    /// Average posterized to `shades` evenly spaced levels.
    #[serde(rename = "SHADES")]
    Shades,
}

impl GrayscaleAlgorithm {
    pub const ALL: [GrayscaleAlgorithm; 11] = [
        Self::Average,
        Self::Luminance,
        Self::LuminanceII,
        Self::Desaturation,
        Self::MaxDecomposition,
        Self::MinDecomposition,
        Self::MidDecomposition,
        Self::SingleR,
        Self::SingleG,
        Self::SingleB,
        Self::Shades,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Average => "AVG",
            Self::Luminance => "LUMA",
            Self::LuminanceII => "LUMA_II",
            Self::Desaturation => "DESATURATION",
            Self::MaxDecomposition => "MAX_DECOMPOSITION",
            Self::MinDecomposition => "MIN_DECOMPOSITION",
            Self::MidDecomposition => "MID_DECOMPOSITION",
            Self::SingleR => "R",
            Self::SingleG => "G",
            Self::SingleB => "B",
            Self::Shades => "SHADES",
        }
    }
}

impl fmt::Display for GrayscaleAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GrayscaleAlgorithm {
    type Err = StegoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| StegoError::InvalidConfig(format!("unknown grayscale algorithm: {s}")))
    }
}

/// Output range and posterization settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrayscaleOptions {
    /// Result is clamped to `[clip, 255 - clip]`.
    pub clip: f64,
    /// Level count for [`GrayscaleAlgorithm::Shades`]; values below 2 act as 2.
    pub shades: u32,
}

impl Default for GrayscaleOptions {
    fn default() -> Self {
        Self { clip: 15.0, shades: 2 }
    }
}

/// Reduce one RGB sample to a gray level.
pub fn grayscale(r: f64, g: f64, b: f64, algorithm: GrayscaleAlgorithm, options: GrayscaleOptions) -> f64 {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let gray = match algorithm {
        GrayscaleAlgorithm::Average => (r + g + b) / 3.0,
        GrayscaleAlgorithm::Luminance => r * 0.3 + g * 0.59 + b * 0.11,
        GrayscaleAlgorithm::LuminanceII => r * 0.2126 + g * 0.7152 + b * 0.0722,
        GrayscaleAlgorithm::Desaturation => (max + min) / 2.0,
        GrayscaleAlgorithm::MaxDecomposition => max,
        GrayscaleAlgorithm::MinDecomposition => min,
        GrayscaleAlgorithm::MidDecomposition => r + g + b - max - min,
        GrayscaleAlgorithm::SingleR => r,
        GrayscaleAlgorithm::SingleG => g,
        GrayscaleAlgorithm::SingleB => b,
        GrayscaleAlgorithm::Shades => {
            let step = 255.0 / (options.shades.max(2) - 1) as f64;
            ((r + g + b) / 3.0 / step).round() * step
        }
    };
    gray.clamp(options.clip, 255.0 - options.clip)
}

/// Replace every sample of the three blocks with its gray level.
pub fn grayscale_block(
    r: &mut [f64],
    g: &mut [f64],
    b: &mut [f64],
    algorithm: GrayscaleAlgorithm,
    options: GrayscaleOptions,
) {
    for ((r, g), b) in r.iter_mut().zip(g.iter_mut()).zip(b.iter_mut()) {
        let gray = grayscale(*r, *g, *b, algorithm, options);
        *r = gray;
        *g = gray;
        *b = gray;
    }
}
