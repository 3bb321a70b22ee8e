// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Block partitioning of one channel.
//!
//! Blocks are emitted in raster order (block rows outer, block columns
//! inner). A block that would cross the right or bottom edge is dropped, so
//! the trailing `width % size` columns and `height % size` rows never carry
//! payload. The position in the returned vector is the canonical block index.

/// Lowest sample value kept at write-back.
pub const SAMPLE_MIN: f64 = 0.0;
/// Highest sample value kept at write-back.
pub const SAMPLE_MAX: f64 = 255.0;

/// Number of full blocks in one channel.
pub fn blocks_per_channel(width: usize, height: usize, size: usize) -> usize {
    if size == 0 {
        return 0;
    }
    (width / size) * (height / size)
}

/// Top-left sample of block `block_index`.
fn block_origin(width: usize, size: usize, block_index: usize) -> (usize, usize) {
    let blocks_wide = width / size;
    let row = block_index / blocks_wide;
    let col = block_index % blocks_wide;
    (row * size, col * size)
}

/// Copy block `block_index` out of `channel`.
pub fn read_block(channel: &[f64], width: usize, size: usize, block_index: usize) -> Vec<f64> {
    let (y0, x0) = block_origin(width, size, block_index);
    let mut block = Vec::with_capacity(size * size);
    for y in y0..y0 + size {
        block.extend_from_slice(&channel[y * width + x0..y * width + x0 + size]);
    }
    block
}

/// Slice `channel` into full `size`×`size` blocks.
pub fn divide_blocks(width: usize, height: usize, size: usize, channel: &[f64]) -> Vec<Vec<f64>> {
    (0..blocks_per_channel(width, height, size))
        .map(|i| read_block(channel, width, size, i))
        .collect()
}

/// Write `block` back at `block_index`, clamping samples to [0, 255].
pub fn write_block(channel: &mut [f64], width: usize, size: usize, block_index: usize, block: &[f64]) {
    let (y0, x0) = block_origin(width, size, block_index);
    for (dy, row) in block.chunks_exact(size).enumerate() {
        let start = (y0 + dy) * width + x0;
        for (dst, &v) in channel[start..start + size].iter_mut().zip(row) {
            *dst = v.clamp(SAMPLE_MIN, SAMPLE_MAX);
        }
    }
}

/// Write `block` back without clamping (imaginary parts).
pub fn write_block_raw(channel: &mut [f64], width: usize, size: usize, block_index: usize, block: &[f64]) {
    let (y0, x0) = block_origin(width, size, block_index);
    for (dy, row) in block.chunks_exact(size).enumerate() {
        let start = (y0 + dy) * width + x0;
        channel[start..start + size].copy_from_slice(row);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(width: usize, height: usize) -> Vec<f64> {
        (0..width * height).map(|i| i as f64).collect()
    }

    #[test]
    fn raster_order_and_layout() {
        // 4x4 image, 2x2 blocks.
        let channel = ramp(4, 4);
        let blocks = divide_blocks(4, 4, 2, &channel);
        assert_eq!(blocks.len(), 4);
        assert_eq!(blocks[0], vec![0.0, 1.0, 4.0, 5.0]);
        assert_eq!(blocks[1], vec![2.0, 3.0, 6.0, 7.0]);
        assert_eq!(blocks[2], vec![8.0, 9.0, 12.0, 13.0]);
        assert_eq!(blocks[3], vec![10.0, 11.0, 14.0, 15.0]);
    }

    #[test]
    fn partial_edge_blocks_dropped() {
        assert_eq!(blocks_per_channel(10, 7, 3), 6);
        assert_eq!(blocks_per_channel(7, 7, 8), 0);
        let channel = ramp(5, 3);
        let blocks = divide_blocks(5, 3, 2, &channel);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[1], vec![2.0, 3.0, 7.0, 8.0]);
    }

    #[test]
    fn write_back_clamps() {
        let mut channel = vec![100.0; 16];
        write_block(&mut channel, 4, 2, 3, &[-3.5, 12.25, 300.0, 255.0]);
        assert_eq!(channel[10], 0.0);
        assert_eq!(channel[11], 12.25);
        assert_eq!(channel[14], 255.0);
        assert_eq!(channel[15], 255.0);
        assert_eq!(channel[0], 100.0);
    }

    #[test]
    fn raw_write_keeps_sign() {
        let mut channel = vec![0.0; 16];
        write_block_raw(&mut channel, 4, 2, 0, &[-3.5, 1.0, 2.0, 400.0]);
        assert_eq!(&channel[0..2], &[-3.5, 1.0]);
        assert_eq!(&channel[4..6], &[2.0, 400.0]);
    }

    #[test]
    fn divide_then_write_is_identity() {
        let original = ramp(6, 6).iter().map(|v| v * 7.0 % 256.0).collect::<Vec<_>>();
        let mut channel = vec![0.0; 36];
        for (i, block) in divide_blocks(6, 6, 3, &original).iter().enumerate() {
            write_block(&mut channel, 6, 3, i, block);
        }
        assert_eq!(channel, original);
    }
}
