// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Embedding parameters.
//!
//! [`EmbedParams`] is plain serde data so that callers can keep settings in
//! JSON; missing fields take their defaults. Always [`EmbedParams::validate`]
//! before use: the transforms and the embedder assume checked values.

use core::fmt;
use core::ops::Range;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use super::color::{GrayscaleAlgorithm, GrayscaleOptions};
use super::error::StegoError;
use crate::transform::Algorithm;

/// Which channel triple carries the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ColorSpace {
    /// Channels 0..3 (R, G, B).
    #[default]
    Rgb,
    /// Channels 3..6 (Y, Cb, Cr); R, G, B are refreshed from the result.
    Yuv,
}

impl ColorSpace {
    /// Minimum number of channels the caller must supply.
    pub fn required_channels(self) -> usize {
        match self {
            Self::Rgb => 3,
            Self::Yuv => 6,
        }
    }

    /// Channel indices that are embedded into and read back.
    pub fn carrier_channels(self) -> Range<usize> {
        match self {
            Self::Rgb => 0..3,
            Self::Yuv => 3..6,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Rgb => "RGB",
            Self::Yuv => "YUV",
        }
    }
}

impl fmt::Display for ColorSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ColorSpace {
    type Err = StegoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "RGB" => Ok(Self::Rgb),
            "YUV" => Ok(Self::Yuv),
            _ => Err(StegoError::InvalidConfig(format!("unknown color space: {s}"))),
        }
    }
}

/// Settings shared by embed, extract and capacity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbedParams {
    pub algorithm: Algorithm,
    /// Block side in samples.
    pub block_size: usize,
    /// Quantization step of the carrier coefficient.
    pub tolerance: f64,
    /// Redundancy factor.
    pub copies: usize,
    /// Keys the FFT1D locator. Ignored by the other algorithms.
    pub password: Option<String>,
    /// Reduce the three working blocks to gray before embedding.
    pub use_grayscale: bool,
    pub grayscale: GrayscaleAlgorithm,
    pub shades: u32,
    /// Gray levels are kept within `[clip, 255 - clip]`.
    pub clip: u32,
    pub color_space: ColorSpace,
}

impl Default for EmbedParams {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Dct2d,
            block_size: 8,
            tolerance: 16.0,
            copies: 5,
            password: None,
            use_grayscale: false,
            grayscale: GrayscaleAlgorithm::Average,
            shades: 2,
            clip: 15,
            color_space: ColorSpace::Rgb,
        }
    }
}

impl EmbedParams {
    /// Parse from JSON and validate.
    pub fn from_json(json: &str) -> Result<Self, StegoError> {
        let params: Self = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    pub fn to_json(&self) -> Result<String, StegoError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Reject values the transforms and the embedder cannot handle.
    pub fn validate(&self) -> Result<(), StegoError> {
        if self.block_size < 2 {
            return Err(StegoError::InvalidBlockSize);
        }
        if let Some(required) = self.algorithm.required_block_size() {
            if self.block_size != required {
                return Err(StegoError::UnsupportedBlockSize {
                    algorithm: self.algorithm,
                    size: self.block_size,
                });
            }
        }
        if !self.tolerance.is_finite() || self.tolerance < 1.0 {
            return Err(StegoError::InvalidTolerance);
        }
        if self.copies == 0 {
            return Err(StegoError::InvalidCopies);
        }
        if self.clip > 127 {
            return Err(StegoError::InvalidClip);
        }
        Ok(())
    }

    /// Password for the locator, if one is set and non-empty.
    pub fn locator_password(&self) -> Option<&str> {
        self.password.as_deref().filter(|p| !p.is_empty())
    }

    pub fn grayscale_options(&self) -> GrayscaleOptions {
        GrayscaleOptions {
            clip: f64::from(self.clip),
            shades: self.shades,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let p = EmbedParams::default();
        assert!(p.validate().is_ok());
        assert_eq!(p.block_size, 8);
        assert_eq!(p.copies, 5);
        assert_eq!(p.tolerance, 16.0);
    }

    #[test]
    fn rejects_bad_values() {
        let base = EmbedParams::default();
        let cases = [
            (EmbedParams { block_size: 1, ..base.clone() }, StegoError::InvalidBlockSize),
            (EmbedParams { tolerance: 0.5, ..base.clone() }, StegoError::InvalidTolerance),
            (EmbedParams { tolerance: f64::NAN, ..base.clone() }, StegoError::InvalidTolerance),
            (EmbedParams { copies: 0, ..base.clone() }, StegoError::InvalidCopies),
            (EmbedParams { clip: 128, ..base.clone() }, StegoError::InvalidClip),
            (
                EmbedParams { algorithm: Algorithm::FdctLee, block_size: 16, ..base.clone() },
                StegoError::UnsupportedBlockSize { algorithm: Algorithm::FdctLee, size: 16 },
            ),
        ];
        for (params, expected) in cases {
            assert_eq!(params.validate(), Err(expected));
        }
    }

    #[test]
    fn json_fills_defaults() {
        let p = EmbedParams::from_json(r#"{"algorithm":"FFT1D","password":"pw","copies":3}"#).unwrap();
        assert_eq!(p.algorithm, Algorithm::Fft1d);
        assert_eq!(p.copies, 3);
        assert_eq!(p.block_size, 8);
        assert_eq!(p.locator_password(), Some("pw"));
    }

    #[test]
    fn json_unknown_algorithm_is_config_error() {
        let err = EmbedParams::from_json(r#"{"algorithm":"WAVELET"}"#).unwrap_err();
        assert!(matches!(err, StegoError::InvalidConfig(_)), "{err:?}");
    }

    #[test]
    fn json_is_validated() {
        let err = EmbedParams::from_json(r#"{"tolerance":0}"#).unwrap_err();
        assert_eq!(err, StegoError::InvalidTolerance);
    }

    #[test]
    fn json_roundtrip_keeps_names() {
        let p = EmbedParams {
            color_space: ColorSpace::Yuv,
            grayscale: GrayscaleAlgorithm::Shades,
            ..EmbedParams::default()
        };
        let json = p.to_json().unwrap();
        assert!(json.contains("\"YUV\""), "{json}");
        assert!(json.contains("\"SHADES\""), "{json}");
        assert_eq!(EmbedParams::from_json(&json).unwrap(), p);
    }

    #[test]
    fn empty_password_disables_locator_key() {
        let p = EmbedParams { password: Some(String::new()), ..EmbedParams::default() };
        assert_eq!(p.locator_password(), None);
    }

    #[test]
    fn color_space_channels() {
        assert_eq!(ColorSpace::Rgb.carrier_channels(), 0..3);
        assert_eq!(ColorSpace::Yuv.carrier_channels(), 3..6);
        assert_eq!("yuv".parse::<ColorSpace>().unwrap(), ColorSpace::Yuv);
        assert!("hsv".parse::<ColorSpace>().is_err());
    }
}
