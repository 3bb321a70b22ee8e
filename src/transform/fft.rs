// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Complex FFT over one block, in 1-D and 2-D layouts.
//!
//! - Radix-2 Cooley-Tukey for power-of-2 lengths
//! - Bluestein's chirp-z transform for arbitrary lengths
//!
//! Both transforms operate in place on paired real/imaginary buffers. The
//! forward direction is unnormalized; the inverse divides by the number of
//! samples so that `inverse(forward(x)) == x` up to rounding.
//!
//! Plans are built once per block size and shared by every block of an image,
//! so chirp factors and `FFT(b_hat)` are computed only once.

use num_complex::Complex64;
use std::f64::consts::PI;

use super::BlockTransform;

const FORWARD: f64 = -1.0;
const INVERSE: f64 = 1.0;

// ──────────────────────────────────────────────────────────────────────────
// Bluestein plan: precomputed chirp factors for reuse
// ──────────────────────────────────────────────────────────────────────────

/// Precomputed Bluestein chirp factors and FFT(b_hat) for a given (n, sign).
struct BluesteinPlan {
    n: usize,
    m: usize, // next_pow2(2*n - 1)
    chirp: Vec<Complex64>,
    b_hat: Vec<Complex64>,
}

impl BluesteinPlan {
    fn new(n: usize, sign: f64) -> Self {
        let m = next_pow2(2 * n - 1);

        // w_k = exp(sign * i * pi * k^2 / n)
        let chirp: Vec<Complex64> = (0..n)
            .map(|k| {
                // k^2 mod 2n keeps the angle small for large n
                let k2 = (k * k) % (2 * n);
                let angle = sign * PI * k2 as f64 / n as f64;
                Complex64::new(angle.cos(), angle.sin())
            })
            .collect();

        // b[k] = conj(w_k), wrapped for negative indices, zero-padded
        let mut b = vec![Complex64::new(0.0, 0.0); m];
        b[0] = chirp[0].conj();
        for k in 1..n {
            b[k] = chirp[k].conj();
            b[m - k] = chirp[k].conj();
        }
        fft_radix2(&mut b, FORWARD);

        BluesteinPlan { n, m, chirp, b_hat: b }
    }

    /// Transform `data` in place using the precomputed chirp.
    fn execute(&self, data: &mut [Complex64]) {
        debug_assert_eq!(data.len(), self.n);

        let mut a = vec![Complex64::new(0.0, 0.0); self.m];
        for k in 0..self.n {
            a[k] = data[k] * self.chirp[k];
        }

        // Circular convolution with b: IFFT(FFT(a) * b_hat)
        fft_radix2(&mut a, FORWARD);
        for (x, b) in a.iter_mut().zip(&self.b_hat) {
            *x = *x * *b;
        }
        fft_radix2(&mut a, INVERSE);

        let inv_m = 1.0 / self.m as f64;
        for k in 0..self.n {
            data[k] = a[k] * inv_m * self.chirp[k];
        }
    }
}

/// A line transform of fixed length: radix-2 when possible, Bluestein otherwise.
struct LinePlan {
    len: usize,
    bluestein: Option<BluesteinPlan>,
}

impl LinePlan {
    fn new(len: usize, sign: f64) -> Self {
        let bluestein = if len > 1 && !len.is_power_of_two() {
            Some(BluesteinPlan::new(len, sign))
        } else {
            None
        };
        Self { len, bluestein }
    }

    fn run(&self, data: &mut [Complex64], sign: f64) {
        debug_assert_eq!(data.len(), self.len);
        if self.len <= 1 {
            return;
        }
        match &self.bluestein {
            Some(plan) => plan.execute(data),
            None => fft_radix2(data, sign),
        }
    }
}

// ──────────────────────────────────────────────────────────────────────────
// 1D FFT primitives
// ──────────────────────────────────────────────────────────────────────────

/// Next power of 2 >= n.
fn next_pow2(n: usize) -> usize {
    let mut p = 1;
    while p < n {
        p <<= 1;
    }
    p
}

/// In-place radix-2 Cooley-Tukey FFT. `data.len()` must be a power of 2.
/// `sign`: -1.0 for forward, +1.0 for inverse (unnormalized).
fn fft_radix2(data: &mut [Complex64], sign: f64) {
    let n = data.len();
    debug_assert!(n.is_power_of_two());
    if n <= 1 {
        return;
    }

    // Bit-reversal permutation
    let mut j = 0usize;
    for i in 1..n {
        let mut bit = n >> 1;
        while j & bit != 0 {
            j ^= bit;
            bit >>= 1;
        }
        j ^= bit;
        if i < j {
            data.swap(i, j);
        }
    }

    // Butterfly stages
    let mut len = 2;
    while len <= n {
        let half = len / 2;
        let angle_step = sign * PI / half as f64;
        for start in (0..n).step_by(len) {
            for k in 0..half {
                let (s, c) = (angle_step * k as f64).sin_cos();
                let w = Complex64::new(c, s);
                let u = data[start + k];
                let v = data[start + k + half] * w;
                data[start + k] = u + v;
                data[start + k + half] = u - v;
            }
        }
        len <<= 1;
    }
}

fn gather(re: &[f64], im: &[f64]) -> Vec<Complex64> {
    re.iter().zip(im).map(|(&r, &i)| Complex64::new(r, i)).collect()
}

fn scatter(data: &[Complex64], re: &mut [f64], im: &mut [f64], scale: f64) {
    for (k, c) in data.iter().enumerate() {
        re[k] = c.re * scale;
        im[k] = c.im * scale;
    }
}

// ──────────────────────────────────────────────────────────────────────────
// Block transforms
// ──────────────────────────────────────────────────────────────────────────

/// FFT over the whole flattened block, treated as one signal of `size²` samples.
pub struct Fft1d {
    len: usize,
    forward: LinePlan,
    inverse: LinePlan,
}

impl Fft1d {
    pub fn new(size: usize) -> Self {
        let len = size * size;
        Self {
            len,
            forward: LinePlan::new(len, FORWARD),
            inverse: LinePlan::new(len, INVERSE),
        }
    }
}

impl BlockTransform for Fft1d {
    fn forward(&self, re: &mut [f64], im: &mut [f64]) {
        assert_eq!(re.len(), self.len, "real buffer does not match block size");
        assert_eq!(im.len(), self.len, "imaginary buffer does not match block size");
        let mut data = gather(re, im);
        self.forward.run(&mut data, FORWARD);
        scatter(&data, re, im, 1.0);
    }

    fn inverse(&self, re: &mut [f64], im: &mut [f64]) {
        assert_eq!(re.len(), self.len, "real buffer does not match block size");
        assert_eq!(im.len(), self.len, "imaginary buffer does not match block size");
        let mut data = gather(re, im);
        self.inverse.run(&mut data, INVERSE);
        scatter(&data, re, im, 1.0 / self.len as f64);
    }
}

/// Separable 2-D FFT over a `size × size` block: rows, then columns.
pub struct Fft2d {
    size: usize,
    forward: LinePlan,
    inverse: LinePlan,
}

impl Fft2d {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            forward: LinePlan::new(size, FORWARD),
            inverse: LinePlan::new(size, INVERSE),
        }
    }

    fn run(&self, data: &mut [Complex64], plan: &LinePlan, sign: f64) {
        let n = self.size;

        for row in data.chunks_mut(n) {
            plan.run(row, sign);
        }

        // Columns via gather-FFT-scatter with a single column buffer.
        let mut col_buf = vec![Complex64::new(0.0, 0.0); n];
        for col in 0..n {
            for r in 0..n {
                col_buf[r] = data[r * n + col];
            }
            plan.run(&mut col_buf, sign);
            for r in 0..n {
                data[r * n + col] = col_buf[r];
            }
        }
    }
}

impl BlockTransform for Fft2d {
    fn forward(&self, re: &mut [f64], im: &mut [f64]) {
        let area = self.size * self.size;
        assert_eq!(re.len(), area, "real buffer does not match block size");
        assert_eq!(im.len(), area, "imaginary buffer does not match block size");
        let mut data = gather(re, im);
        self.run(&mut data, &self.forward, FORWARD);
        scatter(&data, re, im, 1.0);
    }

    fn inverse(&self, re: &mut [f64], im: &mut [f64]) {
        let area = self.size * self.size;
        assert_eq!(re.len(), area, "real buffer does not match block size");
        assert_eq!(im.len(), area, "imaginary buffer does not match block size");
        let mut data = gather(re, im);
        self.run(&mut data, &self.inverse, INVERSE);
        scatter(&data, re, im, 1.0 / area as f64);
    }
}
