// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Lee-factored fast 8×8 DCT.
//!
//! Lee's recursive decimation splits an N-point DCT-II into two N/2-point
//! transforms over the sum and the cosine-weighted difference of mirrored
//! samples. The forward pass is unscaled
//! (`X[k] = sum x[n] cos(pi (n + 1/2) k / N)`); the inverse halves term 0 and
//! rescales by `(2/N)²` after both passes so that a round trip is the identity.

use std::f64::consts::PI;

use super::BlockTransform;

const N: usize = 8;

/// Round-trip scale for the separable pair: (2/N)².
const INVERSE_SCALE: f64 = (2.0 / N as f64) * (2.0 / N as f64);

fn forward_1d(vector: &mut [f64], temp: &mut [f64]) {
    let len = vector.len();
    if len == 1 {
        return;
    }
    let half = len / 2;
    for i in 0..half {
        let x = vector[i];
        let y = vector[len - 1 - i];
        temp[i] = x + y;
        temp[i + half] = (x - y) / (((i as f64 + 0.5) * PI / len as f64).cos() * 2.0);
    }
    {
        let (t_lo, t_hi) = temp.split_at_mut(half);
        let (v_lo, v_hi) = vector.split_at_mut(half);
        forward_1d(t_lo, v_lo);
        forward_1d(t_hi, v_hi);
    }
    for i in 0..half - 1 {
        vector[i * 2] = temp[i];
        vector[i * 2 + 1] = temp[i + half] + temp[i + half + 1];
    }
    vector[len - 2] = temp[half - 1];
    vector[len - 1] = temp[len - 1];
}

fn inverse_1d(vector: &mut [f64], temp: &mut [f64]) {
    let len = vector.len();
    if len == 1 {
        return;
    }
    let half = len / 2;
    temp[0] = vector[0];
    temp[half] = vector[1];
    for i in 1..half {
        temp[i] = vector[i * 2];
        temp[i + half] = vector[i * 2 - 1] + vector[i * 2 + 1];
    }
    {
        let (t_lo, t_hi) = temp.split_at_mut(half);
        let (v_lo, v_hi) = vector.split_at_mut(half);
        inverse_1d(t_lo, v_lo);
        inverse_1d(t_hi, v_hi);
    }
    for i in 0..half {
        let x = temp[i];
        let y = temp[i + half] / (((i as f64 + 0.5) * PI / len as f64).cos() * 2.0);
        vector[i] = x + y;
        vector[len - 1 - i] = x - y;
    }
}

fn dct_line(line: &mut [f64; N]) {
    let mut temp = [0.0; N];
    forward_1d(line, &mut temp);
}

fn idct_line(line: &mut [f64; N]) {
    let mut temp = [0.0; N];
    line[0] /= 2.0;
    inverse_1d(line, &mut temp);
}

fn separable(block: &mut [f64], kernel: fn(&mut [f64; N])) {
    let mut line = [0.0; N];
    for r in 0..N {
        line.copy_from_slice(&block[r * N..(r + 1) * N]);
        kernel(&mut line);
        block[r * N..(r + 1) * N].copy_from_slice(&line);
    }
    for c in 0..N {
        for r in 0..N {
            line[r] = block[r * N + c];
        }
        kernel(&mut line);
        for r in 0..N {
            block[r * N + c] = line[r];
        }
    }
}

pub struct FdctLee;

impl BlockTransform for FdctLee {
    fn forward(&self, re: &mut [f64], _im: &mut [f64]) {
        assert_eq!(re.len(), N * N, "FDCTLEE requires an 8x8 block");
        separable(re, dct_line);
    }

    fn inverse(&self, re: &mut [f64], _im: &mut [f64]) {
        assert_eq!(re.len(), N * N, "FDCTLEE requires an 8x8 block");
        separable(re, idct_line);
        for v in re.iter_mut() {
            *v *= INVERSE_SCALE;
        }
    }
}
