// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Payload capacity.
//!
//! Every full block of every carrier channel holds one bit. A message of
//! `n` escaped bytes needs `8 * n * copies` bits plus a terminator run of
//! `8 * copies` bits.

use serde::Serialize;

use super::blocks::blocks_per_channel;
use super::error::StegoError;
use super::params::EmbedParams;

/// Number of carrier channels per pass.
pub const CARRIER_CHANNELS: usize = 3;

/// Capacity of one image under one parameter set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CapacityInfo {
    pub blocks_per_channel: usize,
    pub channels: usize,
    /// Total carrier bits.
    pub bits: usize,
    /// Longest message, in escaped bytes, that still fits with all copies
    /// and the terminator. Plain ASCII letters and digits are one byte each;
    /// other characters escape to three.
    pub max_message_bytes: usize,
}

/// Bits needed for `message_bits` payload bits at `copies` redundancy.
pub fn required_bits(message_bits: usize, copies: usize) -> usize {
    message_bits * copies + 8 * copies
}

/// Carrier capacity of a `width`×`height` image.
///
/// # Errors
/// Any [`EmbedParams::validate`] failure.
pub fn capacity(width: usize, height: usize, params: &EmbedParams) -> Result<CapacityInfo, StegoError> {
    params.validate()?;
    let blocks = blocks_per_channel(width, height, params.block_size);
    let bits = blocks * CARRIER_CHANNELS;
    Ok(CapacityInfo {
        blocks_per_channel: blocks,
        channels: CARRIER_CHANNELS,
        bits,
        max_message_bytes: (bits / params.copies).saturating_sub(8) / 8,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_image() {
        let params = EmbedParams { copies: 1, ..EmbedParams::default() };
        let info = capacity(64, 64, &params).unwrap();
        assert_eq!(info.blocks_per_channel, 64);
        assert_eq!(info.bits, 192);
        assert_eq!(info.max_message_bytes, 23);
        assert!(required_bits(23 * 8, 1) <= info.bits);
        assert!(required_bits(24 * 8, 1) > info.bits);
    }

    #[test]
    fn copies_reduce_message_room() {
        let params = EmbedParams { copies: 3, ..EmbedParams::default() };
        let info = capacity(64, 64, &params).unwrap();
        assert_eq!(info.max_message_bytes, 7);
        assert_eq!(required_bits(7 * 8, 3), 192);
    }

    #[test]
    fn too_small_for_anything() {
        let info = capacity(7, 100, &EmbedParams::default()).unwrap();
        assert_eq!(info.bits, 0);
        assert_eq!(info.max_message_bytes, 0);
    }

    #[test]
    fn invalid_params_rejected() {
        let params = EmbedParams { block_size: 0, ..EmbedParams::default() };
        assert_eq!(capacity(64, 64, &params), Err(StegoError::InvalidBlockSize));
    }
}
