// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Block parity steganography.
//!
//! Leaves first: [`bits`] turns text into a bitstream, [`repetition`] adds
//! copies and filler, [`blocks`] slices channels, [`locator`] picks the
//! carrier coefficient, [`embedding`] forces its parity and [`color`]
//! optionally preprocesses the working blocks. [`pipeline`] ties them
//! together behind [`embed`] and [`extract`].

pub mod bits;
pub mod blocks;
pub mod capacity;
pub mod color;
pub mod embedding;
pub mod error;
pub mod locator;
pub mod params;
pub mod pipeline;
pub mod repetition;

pub use capacity::{capacity, CapacityInfo};
pub use color::{GrayscaleAlgorithm, GrayscaleOptions};
pub use error::StegoError;
pub use locator::{LocatorState, PositionPolicy};
pub use params::{ColorSpace, EmbedParams};
pub use pipeline::{embed, extract, EmbedReport};
