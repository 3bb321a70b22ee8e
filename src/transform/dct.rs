// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Orthonormal 2-D DCT of arbitrary side length.
//!
//! Samples are level-shifted by -128 before the forward transform and by
//! +128 after the inverse, so byte-range input is centered around zero.

use std::f64::consts::PI;

use super::BlockTransform;

/// Level shift applied around the transform.
pub const LEVEL_SHIFT: f64 = 128.0;

/// Precomputed cosine table for side length `n`.
///
/// `table[k * n + i] = cos(PI * (2*i + 1) * k / (2*n))`, with orthonormal
/// scale factors in `alpha`.
pub struct Dct2d {
    n: usize,
    table: Vec<f64>,
    alpha: Vec<f64>,
}

impl Dct2d {
    pub fn new(n: usize) -> Self {
        let nf = n as f64;
        let mut table = vec![0.0; n * n];
        let alpha = (0..n)
            .map(|k| if k == 0 { (1.0 / nf).sqrt() } else { (2.0 / nf).sqrt() })
            .collect();
        for k in 0..n {
            for i in 0..n {
                table[k * n + i] = (PI * (2.0 * i as f64 + 1.0) * k as f64 / (2.0 * nf)).cos();
            }
        }
        Self { n, table, alpha }
    }

    fn dct1d(&self, input: &[f64], output: &mut [f64]) {
        let n = self.n;
        for k in 0..n {
            let row = &self.table[k * n..(k + 1) * n];
            let sum: f64 = input.iter().zip(row).map(|(x, c)| x * c).sum();
            output[k] = self.alpha[k] * sum;
        }
    }

    fn idct1d(&self, input: &[f64], output: &mut [f64]) {
        let n = self.n;
        for i in 0..n {
            let mut sum = 0.0;
            for k in 0..n {
                sum += self.alpha[k] * input[k] * self.table[k * n + i];
            }
            output[i] = sum;
        }
    }

    /// Apply a 1-D kernel to every row, then every column, in place.
    fn separable(&self, block: &mut [f64], kernel: impl Fn(&Self, &[f64], &mut [f64])) {
        let n = self.n;
        let mut line = vec![0.0; n];
        let mut out = vec![0.0; n];

        for r in 0..n {
            line.copy_from_slice(&block[r * n..(r + 1) * n]);
            kernel(self, &line, &mut out);
            block[r * n..(r + 1) * n].copy_from_slice(&out);
        }
        for c in 0..n {
            for r in 0..n {
                line[r] = block[r * n + c];
            }
            kernel(self, &line, &mut out);
            for r in 0..n {
                block[r * n + c] = out[r];
            }
        }
    }
}

impl BlockTransform for Dct2d {
    fn forward(&self, re: &mut [f64], _im: &mut [f64]) {
        assert_eq!(re.len(), self.n * self.n, "block does not match DCT size");
        for v in re.iter_mut() {
            *v -= LEVEL_SHIFT;
        }
        self.separable(re, Self::dct1d);
    }

    fn inverse(&self, re: &mut [f64], _im: &mut [f64]) {
        assert_eq!(re.len(), self.n * self.n, "block does not match DCT size");
        self.separable(re, Self::idct1d);
        for v in re.iter_mut() {
            *v += LEVEL_SHIFT;
        }
    }
}
