// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Embed and extract pipelines.
//!
//! Embed: validate params, buffers and capacity, then escape the message,
//! repeat every bit, append the terminator and lay the result over
//! pseudo-random filler spanning the full capacity. Block `i` carries bits
//! `3i..3i+3`, one per carrier channel, all at the same coefficient position.
//! Blocks are processed independently (in parallel with the `parallel`
//! feature) and written back in a final sequential pass, so nothing is
//! mutated unless every check has passed.
//!
//! Extract mirrors the same walk without writing and ends in a majority vote.

use crate::transform::BlockTransform;

use super::bits::{bits_to_text, bytes_to_bits, escape};
use super::blocks::{blocks_per_channel, read_block, write_block, write_block_raw};
use super::capacity::{capacity, required_bits, CARRIER_CHANNELS};
use super::color::{grayscale_block, yuv_to_rgb_block};
use super::embedding::{embed_block, extract_block};
use super::error::StegoError;
use super::locator::precompute_positions;
use super::params::{ColorSpace, EmbedParams};
use super::repetition::{expand, filler_seed, generate_filler, merge, terminator};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Summary of a successful embed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmbedReport {
    /// Escaped message length in bytes.
    pub message_bytes: usize,
    /// Bits taken by the copies and the terminator.
    pub required_bits: usize,
    /// Carrier bits available (and written, filler included).
    pub capacity_bits: usize,
    /// Blocks per carrier channel.
    pub blocks: usize,
}

/// Check channel and imaginary buffer shapes for the carriers of `color_space`.
fn check_buffers(
    channels: &[Vec<f64>],
    imaginary: &[Vec<f64>],
    width: usize,
    height: usize,
    color_space: ColorSpace,
) -> Result<(), StegoError> {
    let expected = color_space.required_channels();
    for buffers in [channels, imaginary] {
        if buffers.len() < expected {
            return Err(StegoError::ChannelCount { expected, actual: buffers.len() });
        }
    }
    let samples = width * height;
    let checked = match color_space {
        ColorSpace::Rgb => 0..3,
        // RGB is refreshed from the embedded YUV planes.
        ColorSpace::Yuv => 0..6,
    };
    for c in checked {
        if channels[c].len() != samples {
            return Err(StegoError::ChannelLength { expected: samples, actual: channels[c].len() });
        }
    }
    for c in color_space.carrier_channels() {
        if imaginary[c].len() != samples {
            return Err(StegoError::ChannelLength { expected: samples, actual: imaginary[c].len() });
        }
    }
    Ok(())
}

/// Per-block result of the embed pass.
struct EmbeddedBlock {
    carriers: [Vec<f64>; 3],
    imaginary: [Vec<f64>; 3],
}

/// Hide `message` in the carrier channels.
///
/// `channels` holds R, G, B (and Y, Cb, Cr for [`ColorSpace::Yuv`]) as
/// row-major planes of `width * height` samples in [0, 255]. `imaginary`
/// holds one buffer per channel; for FFT algorithms it receives the
/// imaginary part left by the inverse transform and must be passed back
/// unchanged to [`extract`].
///
/// # Errors
/// Parameter, buffer shape, empty message and capacity errors. On error no
/// buffer has been touched.
pub fn embed(
    channels: &mut [Vec<f64>],
    imaginary: &mut [Vec<f64>],
    width: usize,
    height: usize,
    message: &str,
    params: &EmbedParams,
) -> Result<EmbedReport, StegoError> {
    params.validate()?;
    check_buffers(channels, imaginary, width, height, params.color_space)?;
    if message.is_empty() {
        return Err(StegoError::EmptyMessage);
    }

    let info = capacity(width, height, params)?;
    let escaped = escape(message);
    let message_bits = bytes_to_bits(&escaped);
    let required = required_bits(message_bits.len(), params.copies);
    log::debug!(
        "embed {}: {} escaped bytes, {} bits required, {} available",
        params.algorithm,
        escaped.len(),
        required,
        info.bits
    );
    if required > info.bits {
        return Err(StegoError::MessageTooLarge { required, capacity: info.bits });
    }

    let password = params.locator_password();
    let filler = generate_filler(info.bits, filler_seed(password.unwrap_or(""), message));
    let payload = merge(filler, &expand(&message_bits, params.copies), &terminator(params.copies));

    let size = params.block_size;
    let blocks = info.blocks_per_channel;
    let positions = precompute_positions(params.algorithm, password, size, blocks);
    let plan = params.algorithm.plan(size);
    let carrier = params.color_space.carrier_channels();
    let gray = params.grayscale_options();

    let outputs: Vec<EmbeddedBlock> = {
        let source: &[Vec<f64>] = channels;
        let source_im: &[Vec<f64>] = imaginary;
        let plan: &dyn BlockTransform = plan.as_ref();
        let embed_one = |&i: &usize| -> EmbeddedBlock {
            let mut re: [Vec<f64>; 3] =
                core::array::from_fn(|c| read_block(&source[carrier.start + c], width, size, i));
            let mut im: [Vec<f64>; 3] =
                core::array::from_fn(|c| read_block(&source_im[carrier.start + c], width, size, i));
            if params.use_grayscale {
                let [r, g, b] = &mut re;
                grayscale_block(r, g, b, params.grayscale, gray);
            }
            for c in 0..CARRIER_CHANNELS {
                let bit = payload[i * CARRIER_CHANNELS + c];
                embed_block(plan, &mut re[c], &mut im[c], bit, params.tolerance, positions[i]);
            }
            log::trace!("block {i}: position {}", positions[i]);
            EmbeddedBlock { carriers: re, imaginary: im }
        };
        let indices: Vec<usize> = (0..blocks).collect();
        #[cfg(feature = "parallel")]
        let outputs: Vec<EmbeddedBlock> = indices.par_iter().map(embed_one).collect();
        #[cfg(not(feature = "parallel"))]
        let outputs: Vec<EmbeddedBlock> = indices.iter().map(embed_one).collect();
        outputs
    };

    for (i, out) in outputs.iter().enumerate() {
        for c in 0..CARRIER_CHANNELS {
            write_block(&mut channels[carrier.start + c], width, size, i, &out.carriers[c]);
            if params.algorithm.is_complex() {
                write_block_raw(&mut imaginary[carrier.start + c], width, size, i, &out.imaginary[c]);
            }
        }
        if params.color_space == ColorSpace::Yuv {
            // Carriers come back from `embed_block` already clamped.
            let [y, cb, cr] = &out.carriers;
            let rgb = yuv_to_rgb_block(y, cb, cr);
            for (c, plane) in rgb.iter().enumerate() {
                write_block(&mut channels[c], width, size, i, plane);
            }
        }
    }

    log::debug!("embedded {} blocks x {} channels", blocks, CARRIER_CHANNELS);
    Ok(EmbedReport {
        message_bytes: escaped.len(),
        required_bits: required,
        capacity_bits: info.bits,
        blocks,
    })
}

/// Recover the message hidden by [`embed`] with the same `params`.
///
/// Returns whatever decodes before the terminator. A carrier without a
/// message yields arbitrary text rather than an error.
///
/// # Errors
/// Parameter and buffer shape errors.
pub fn extract(
    channels: &[Vec<f64>],
    imaginary: &[Vec<f64>],
    width: usize,
    height: usize,
    params: &EmbedParams,
) -> Result<String, StegoError> {
    params.validate()?;
    check_buffers(channels, imaginary, width, height, params.color_space)?;

    let size = params.block_size;
    let blocks = blocks_per_channel(width, height, size);
    let positions = precompute_positions(params.algorithm, params.locator_password(), size, blocks);
    let plan = params.algorithm.plan(size);
    let plan: &dyn BlockTransform = plan.as_ref();
    let carrier = params.color_space.carrier_channels();

    let extract_one = |&i: &usize| -> [u8; 3] {
        core::array::from_fn(|c| {
            let mut re = read_block(&channels[carrier.start + c], width, size, i);
            let mut im = read_block(&imaginary[carrier.start + c], width, size, i);
            extract_block(plan, &mut re, &mut im, params.tolerance, positions[i])
        })
    };
    let indices: Vec<usize> = (0..blocks).collect();
    #[cfg(feature = "parallel")]
    let per_block: Vec<[u8; 3]> = indices.par_iter().map(extract_one).collect();
    #[cfg(not(feature = "parallel"))]
    let per_block: Vec<[u8; 3]> = indices.iter().map(extract_one).collect();

    let bits: Vec<u8> = per_block.into_iter().flatten().collect();
    log::debug!("extract {}: read {} bits from {} blocks", params.algorithm, bits.len(), blocks);
    Ok(bits_to_text(&bits, params.copies))
}
