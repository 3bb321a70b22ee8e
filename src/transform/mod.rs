// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Reversible block transforms.
//!
//! Each [`Algorithm`] variant maps to one [`BlockTransform`] plan (forward and
//! inverse over a single flattened block) and one coefficient position
//! policy. Plans are built once per block size with [`Algorithm::plan`] and
//! shared by every block of an image.
//!
//! | Algorithm | Transform                         | Carrier coefficient        |
//! |-----------|-----------------------------------|----------------------------|
//! | FFT1D     | complex FFT over all `size²` samples | keyed by password, else 0 |
//! | FFT2D     | complex FFT over rows and columns | 0 (DC)                     |
//! | DCT2D     | orthonormal DCT, level shift 128  | 0 (DC)                     |
//! | FDCT8     | straight 8×8 DCT                  | 63 (highest frequency)     |
//! | FDCTLEE   | Lee-factored 8×8 DCT              | 63 (highest frequency)     |

pub mod dct;
pub mod fdct8;
pub mod fft;
pub mod lee;

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::stego::error::StegoError;
use crate::stego::locator::PositionPolicy;

/// In-place forward/inverse transform over one block.
///
/// `re` and `im` always have the same length (`size²`). Real-valued
/// transforms ignore `im`. Implementations assume validated input: a buffer
/// of the wrong length is a programming error and panics.
pub trait BlockTransform: Send + Sync {
    fn forward(&self, re: &mut [f64], im: &mut [f64]);
    fn inverse(&self, re: &mut [f64], im: &mut [f64]);
}

/// Transform algorithm selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Algorithm {
    Fft1d,
    Fft2d,
    Dct2d,
    Fdct8,
    FdctLee,
}

impl Algorithm {
    pub const ALL: [Algorithm; 5] = [
        Algorithm::Fft1d,
        Algorithm::Fft2d,
        Algorithm::Dct2d,
        Algorithm::Fdct8,
        Algorithm::FdctLee,
    ];

    /// Stable selector name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Fft1d => "FFT1D",
            Self::Fft2d => "FFT2D",
            Self::Dct2d => "DCT2D",
            Self::Fdct8 => "FDCT8",
            Self::FdctLee => "FDCTLEE",
        }
    }

    /// Block side this algorithm is restricted to, if any.
    pub fn required_block_size(self) -> Option<usize> {
        match self {
            Self::Fdct8 | Self::FdctLee => Some(8),
            _ => None,
        }
    }

    /// Whether the transform produces complex coefficients, so that the
    /// imaginary buffers must be carried between embed and extract.
    pub fn is_complex(self) -> bool {
        matches!(self, Self::Fft1d | Self::Fft2d)
    }

    /// Which coefficient carries the payload bit for blocks of side `size`.
    pub fn position_policy(self, size: usize) -> PositionPolicy {
        let last = size * size - 1;
        match self {
            Self::Fft1d => PositionPolicy::Keyed { unkeyed: 0 },
            Self::Fft2d | Self::Dct2d => PositionPolicy::Fixed(0),
            Self::Fdct8 | Self::FdctLee => PositionPolicy::Fixed(last),
        }
    }

    /// Build the transform plan for blocks of side `size`.
    ///
    /// # Panics
    /// If the algorithm is restricted to a different block size. Callers
    /// validate parameters first (see [`crate::EmbedParams::validate`]).
    pub fn plan(self, size: usize) -> Box<dyn BlockTransform> {
        if let Some(required) = self.required_block_size() {
            assert_eq!(size, required, "{self} is only defined for {required}x{required} blocks");
        }
        match self {
            Self::Fft1d => Box::new(fft::Fft1d::new(size)),
            Self::Fft2d => Box::new(fft::Fft2d::new(size)),
            Self::Dct2d => Box::new(dct::Dct2d::new(size)),
            Self::Fdct8 => Box::new(fdct8::Fdct8),
            Self::FdctLee => Box::new(lee::FdctLee),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = StegoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| StegoError::UnknownAlgorithm(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_roundtrip_through_from_str() {
        for a in Algorithm::ALL {
            assert_eq!(a.name().parse::<Algorithm>().unwrap(), a);
            assert_eq!(a.to_string(), a.name());
        }
        assert_eq!("fdctlee".parse::<Algorithm>().unwrap(), Algorithm::FdctLee);
    }

    #[test]
    fn unknown_selector_is_rejected() {
        match "WAVELET".parse::<Algorithm>() {
            Err(StegoError::UnknownAlgorithm(name)) => assert_eq!(name, "WAVELET"),
            other => panic!("expected UnknownAlgorithm, got {other:?}"),
        }
    }

    #[test]
    fn serde_uses_selector_names() {
        let json = serde_json::to_string(&Algorithm::FdctLee).unwrap();
        assert_eq!(json, "\"FDCTLEE\"");
        let back: Algorithm = serde_json::from_str("\"FFT1D\"").unwrap();
        assert_eq!(back, Algorithm::Fft1d);
    }

    #[test]
    fn every_plan_roundtrips() {
        for a in Algorithm::ALL {
            let size = a.required_block_size().unwrap_or(8);
            let plan = a.plan(size);
            let original: Vec<f64> = (0..size * size).map(|i| ((i * 13 + 40) % 200) as f64).collect();
            let mut re = original.clone();
            let mut im = vec![0.0; size * size];
            plan.forward(&mut re, &mut im);
            plan.inverse(&mut re, &mut im);
            for i in 0..original.len() {
                assert!((re[i] - original[i]).abs() < 1e-9, "{a}: mismatch at {i}");
            }
        }
    }

    #[test]
    fn fixed_positions() {
        assert_eq!(Algorithm::Fft2d.position_policy(8), PositionPolicy::Fixed(0));
        assert_eq!(Algorithm::Dct2d.position_policy(4), PositionPolicy::Fixed(0));
        assert_eq!(Algorithm::Fdct8.position_policy(8), PositionPolicy::Fixed(63));
        assert_eq!(Algorithm::FdctLee.position_policy(8), PositionPolicy::Fixed(63));
    }

    #[test]
    #[should_panic(expected = "only defined for 8x8")]
    fn fast_dct_plan_rejects_other_sizes() {
        let _ = Algorithm::Fdct8.plan(16);
    }
}
