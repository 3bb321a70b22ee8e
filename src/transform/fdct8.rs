// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Straight 8×8 DCT with a fixed cosine table.
//!
//! Orthonormal scaling on both sides: C(0) = 1/sqrt(8), C(u>0) = 1/2.
//! No level shift. Only defined for 64-sample blocks.

use std::sync::OnceLock;

use super::BlockTransform;

/// Pre-computed 8×8 cosine table.
/// `COSINE[u][x] = cos((2*x + 1) * u * PI / 16)`
static COSINE: OnceLock<[[f64; 8]; 8]> = OnceLock::new();

/// Normalization constants: C(0) = 1/sqrt(8), C(u>0) = 1/2.
static NORM: OnceLock<[f64; 8]> = OnceLock::new();

fn cosine_table() -> &'static [[f64; 8]; 8] {
    COSINE.get_or_init(|| {
        let mut table = [[0.0f64; 8]; 8];
        for (u, row) in table.iter_mut().enumerate() {
            for (x, v) in row.iter_mut().enumerate() {
                *v = ((2 * x + 1) as f64 * u as f64 * std::f64::consts::PI / 16.0).cos();
            }
        }
        table
    })
}

fn norm_table() -> &'static [f64; 8] {
    NORM.get_or_init(|| {
        let mut n = [0.5f64; 8];
        n[0] = 1.0 / (8.0f64).sqrt();
        n
    })
}

pub struct Fdct8;

impl BlockTransform for Fdct8 {
    fn forward(&self, re: &mut [f64], _im: &mut [f64]) {
        assert_eq!(re.len(), 64, "FDCT8 requires an 8x8 block");
        let cos = cosine_table();
        let c = norm_table();

        // Rows.
        let mut temp = [0.0f64; 64];
        for row in 0..8 {
            for u in 0..8 {
                let mut sum = 0.0;
                for x in 0..8 {
                    sum += re[row * 8 + x] * cos[u][x];
                }
                temp[row * 8 + u] = c[u] * sum;
            }
        }

        // Columns.
        for col in 0..8 {
            for v in 0..8 {
                let mut sum = 0.0;
                for y in 0..8 {
                    sum += temp[y * 8 + col] * cos[v][y];
                }
                re[v * 8 + col] = c[v] * sum;
            }
        }
    }

    fn inverse(&self, re: &mut [f64], _im: &mut [f64]) {
        assert_eq!(re.len(), 64, "FDCT8 requires an 8x8 block");
        let cos = cosine_table();
        let c = norm_table();

        // Columns.
        let mut temp = [0.0f64; 64];
        for col in 0..8 {
            for y in 0..8 {
                let mut sum = 0.0;
                for v in 0..8 {
                    sum += c[v] * re[v * 8 + col] * cos[v][y];
                }
                temp[y * 8 + col] = sum;
            }
        }

        // Rows.
        for row in 0..8 {
            for x in 0..8 {
                let mut sum = 0.0;
                for u in 0..8 {
                    sum += c[u] * temp[row * 8 + u] * cos[u][x];
                }
                re[row * 8 + x] = sum;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::dct::{Dct2d, LEVEL_SHIFT};

    #[test]
    fn roundtrip_identity() {
        let original: Vec<f64> = (0..64).map(|i| ((i * 29 + 5) % 256) as f64).collect();
        let mut block = original.clone();
        let mut im = vec![0.0; 64];
        Fdct8.forward(&mut block, &mut im);
        Fdct8.inverse(&mut block, &mut im);
        for i in 0..64 {
            assert!((block[i] - original[i]).abs() < 1e-9, "mismatch at {i}");
        }
    }

    #[test]
    fn matches_general_dct_on_shifted_input() {
        let original: Vec<f64> = (0..64).map(|i| ((i * 17 + 3) % 200) as f64 + 20.0).collect();

        let mut general = original.clone();
        let mut im = vec![0.0; 64];
        Dct2d::new(8).forward(&mut general, &mut im);

        let mut straight: Vec<f64> = original.iter().map(|v| v - LEVEL_SHIFT).collect();
        Fdct8.forward(&mut straight, &mut im);

        for i in 0..64 {
            assert!(
                (general[i] - straight[i]).abs() < 1e-9,
                "coefficient {i}: general {} vs straight {}",
                general[i],
                straight[i]
            );
        }
    }

    #[test]
    #[should_panic(expected = "8x8")]
    fn rejects_other_block_sizes() {
        let mut block = vec![0.0; 16];
        let mut im = vec![0.0; 16];
        Fdct8.forward(&mut block, &mut im);
    }
}
