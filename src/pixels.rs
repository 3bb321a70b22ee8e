// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Interleaved RGBA bytes to and from planar channels.
//!
//! Decoding an image file is left to the caller; this module only bridges
//! an 8-bit RGBA buffer (4 bytes per pixel, row-major) and the planar
//! `f64` channels the pipeline works on. Planes come out in the order
//! R, G, B, Y, Cb, Cr, each paired with a zeroed imaginary buffer.

use crate::stego::color::rgb_to_yuv;
use crate::stego::{embed, extract, EmbedParams, EmbedReport, StegoError};

/// Planes produced by [`deinterleave_rgba`].
pub const PLANES: usize = 6;

/// An image split into planar channels.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanarImage {
    pub width: usize,
    pub height: usize,
    /// R, G, B, Y, Cb, Cr.
    pub channels: Vec<Vec<f64>>,
    /// Imaginary parts, one per channel. Zero until an FFT embed.
    pub imaginary: Vec<Vec<f64>>,
}

impl PlanarImage {
    pub fn from_rgba(rgba: &[u8], width: usize, height: usize) -> Result<Self, StegoError> {
        deinterleave_rgba(rgba, width, height)
    }

    /// Re-interleave R, G, B with opaque alpha.
    pub fn to_rgba(&self) -> Vec<u8> {
        interleave_rgba(&self.channels, self.width, self.height)
    }

    pub fn embed(&mut self, message: &str, params: &EmbedParams) -> Result<EmbedReport, StegoError> {
        embed(&mut self.channels, &mut self.imaginary, self.width, self.height, message, params)
    }

    pub fn extract(&self, params: &EmbedParams) -> Result<String, StegoError> {
        extract(&self.channels, &self.imaginary, self.width, self.height, params)
    }
}

/// Split an RGBA buffer into R, G, B, Y, Cb, Cr planes. Alpha is dropped.
///
/// # Errors
/// [`StegoError::PixelBufferLength`] if `rgba` is not `width * height * 4`
/// bytes.
pub fn deinterleave_rgba(rgba: &[u8], width: usize, height: usize) -> Result<PlanarImage, StegoError> {
    let samples = width * height;
    if rgba.len() != samples * 4 {
        return Err(StegoError::PixelBufferLength { expected: samples * 4, actual: rgba.len() });
    }
    let mut channels = vec![Vec::with_capacity(samples); PLANES];
    for px in rgba.chunks_exact(4) {
        let (r, g, b) = (f64::from(px[0]), f64::from(px[1]), f64::from(px[2]));
        let (y, cb, cr) = rgb_to_yuv(r, g, b);
        for (plane, v) in channels.iter_mut().zip([r, g, b, y, cb, cr]) {
            plane.push(v);
        }
    }
    Ok(PlanarImage {
        width,
        height,
        channels,
        imaginary: vec![vec![0.0; samples]; PLANES],
    })
}

/// Write channels 0..3 to byte offsets 0, 1, 2 of each pixel, alpha 255.
/// Samples are rounded and clamped to [0, 255].
pub fn interleave_rgba(channels: &[Vec<f64>], width: usize, height: usize) -> Vec<u8> {
    let samples = width * height;
    let mut rgba = vec![255u8; samples * 4];
    for (offset, plane) in channels.iter().take(3).enumerate() {
        for (i, &v) in plane.iter().take(samples).enumerate() {
            rgba[i * 4 + offset] = v.round().clamp(0.0, 255.0) as u8;
        }
    }
    rgba
}
