// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! # spectral-stego
//!
//! Hides a text message in an image by forcing the parity of one quantized
//! transform coefficient per block and color channel, and recovers it by
//! reading those parities back.
//!
//! Five block transforms are available ([`Algorithm`]): a 1-D FFT over the
//! flattened block, a 2-D FFT, an orthonormal 2-D DCT of any side, and two
//! fast 8×8 DCTs (straight and Lee-factored). FFT1D can key the carrier
//! position on a password. Every message bit is repeated and decoded by
//! majority vote, and the message ends in an all-ones terminator byte.
//!
//! There is no encryption and no robustness against recompression: the
//! payload survives exactly as long as the pixel values do.
//!
//! # Quick start
//!
//! ```rust
//! use spectral_stego::{EmbedParams, PlanarImage};
//!
//! let rgba: Vec<u8> = (0..64 * 64).flat_map(|i| [90, 120 + (i % 7) as u8, 150, 255]).collect();
//! let mut image = PlanarImage::from_rgba(&rgba, 64, 64).unwrap();
//!
//! let params = EmbedParams { copies: 3, ..EmbedParams::default() };
//! image.embed("hello", &params).unwrap();
//! assert_eq!(image.extract(&params).unwrap(), "hello");
//! ```

pub mod pixels;
pub mod stego;
pub mod transform;

pub use pixels::{deinterleave_rgba, interleave_rgba, PlanarImage};
pub use stego::{capacity, embed, extract, CapacityInfo, EmbedReport, StegoError};
pub use stego::{ColorSpace, EmbedParams, GrayscaleAlgorithm, GrayscaleOptions, LocatorState};
pub use transform::{Algorithm, BlockTransform};
