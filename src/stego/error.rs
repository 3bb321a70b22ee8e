// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Error types for the embedding pipeline.
//!
//! [`StegoError`] covers parameter validation, buffer shape checks and the
//! capacity check. Every variant is raised before any channel is written.

use thiserror::Error;

use crate::transform::Algorithm;

/// Errors that can occur during embedding, extraction or configuration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StegoError {
    /// Nothing to embed.
    #[error("message is empty")]
    EmptyMessage,
    /// The message, its copies and the terminator do not fit.
    #[error("message too large: {required} bits required, {capacity} available")]
    MessageTooLarge { required: usize, capacity: usize },
    /// Quantization step below 1.
    #[error("tolerance must be a finite value >= 1")]
    InvalidTolerance,
    /// Block side below 2.
    #[error("block size must be at least 2")]
    InvalidBlockSize,
    /// A fast DCT was asked for a block side it does not implement.
    #[error("{algorithm} only supports 8x8 blocks, got {size}x{size}")]
    UnsupportedBlockSize { algorithm: Algorithm, size: usize },
    /// Redundancy factor of zero.
    #[error("copies must be at least 1")]
    InvalidCopies,
    /// Grayscale clip would leave an empty range.
    #[error("clip must be at most 127")]
    InvalidClip,
    #[error("expected {expected} channels, got {actual}")]
    ChannelCount { expected: usize, actual: usize },
    #[error("channel has {actual} samples, expected {expected}")]
    ChannelLength { expected: usize, actual: usize },
    /// Selector name that maps to no transform.
    #[error("unknown algorithm: {0}")]
    UnknownAlgorithm(String),
    /// Malformed serialized parameters.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// Interleaved RGBA buffer does not match the stated dimensions.
    #[error("pixel buffer has {actual} bytes, expected {expected}")]
    PixelBufferLength { expected: usize, actual: usize },
}

impl From<serde_json::Error> for StegoError {
    fn from(e: serde_json::Error) -> Self {
        Self::InvalidConfig(e.to_string())
    }
}
