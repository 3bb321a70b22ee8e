// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Quantized parity embedding on a single coefficient.
//!
//! The carrier is snapped to a multiple of the tolerance `t` whose quotient
//! parity equals the payload bit: odd multiples carry 1, even multiples
//! carry 0. Reading rounds `|c| / t`, so any drift smaller than `t / 2`
//! introduced by the inverse transform or the next forward transform leaves
//! the bit intact.
//!
//! Clamping to the sample range can cut off much more than that on dark or
//! bright blocks. `embed_block` therefore checks the carrier the extractor
//! will see after clamping, pushes past the loss, and falls back to the
//! same-parity lattice point on the other side of the original value.

use super::blocks::{SAMPLE_MAX, SAMPLE_MIN};
use crate::transform::BlockTransform;

/// Absorbs transform round-off sitting just below a lattice point.
const QUOTIENT_EPSILON: f64 = 1e-9;

/// Correction rounds per lattice target before giving up on it.
const SETTLE_ROUNDS: usize = 12;

/// Force the parity of `coeffs[position]` to `bit`.
///
/// `tolerance` must be >= 1 (validated by callers).
pub fn set_bit(coeffs: &mut [f64], bit: u8, tolerance: f64, position: usize) {
    let c = coeffs[position];
    let v = (c / tolerance + QUOTIENT_EPSILON).floor();
    let odd = (v as i64).rem_euclid(2) == 1;
    let q = match (bit & 1 == 1, odd) {
        (true, true) => v,
        (true, false) => v + 1.0,
        (false, true) => v - 1.0,
        (false, false) => v,
    };
    coeffs[position] = q * tolerance;
}

/// Read the parity of `coeffs[position]`.
pub fn get_bit(coeffs: &[f64], tolerance: f64, position: usize) -> u8 {
    let q = (coeffs[position].abs() / tolerance).round();
    (q as u64 % 2) as u8
}

/// Rebuild the block from `spectrum` with the carrier set to `value`, clamp
/// the real samples, and return the carrier as a fresh forward transform
/// reads it. `re`/`im` receive the clamped block.
fn settle(
    plan: &dyn BlockTransform,
    spectrum_re: &[f64],
    spectrum_im: &[f64],
    position: usize,
    value: f64,
    re: &mut [f64],
    im: &mut [f64],
) -> f64 {
    re.copy_from_slice(spectrum_re);
    im.copy_from_slice(spectrum_im);
    re[position] = value;
    plan.inverse(re, im);
    for v in re.iter_mut() {
        *v = v.clamp(SAMPLE_MIN, SAMPLE_MAX);
    }

    let mut check_re = re.to_vec();
    let mut check_im = im.to_vec();
    plan.forward(&mut check_re, &mut check_im);
    check_re[position]
}

/// Forward transform, set the carrier, inverse transform.
///
/// The real samples come back clamped to the sample range, and the carrier
/// parity is checked after that clamp. Imaginary parts are left unclamped.
pub fn embed_block(
    plan: &dyn BlockTransform,
    re: &mut [f64],
    im: &mut [f64],
    bit: u8,
    tolerance: f64,
    position: usize,
) {
    plan.forward(re, im);
    let spectrum_re = re.to_vec();
    let spectrum_im = im.to_vec();

    set_bit(re, bit, tolerance, position);
    let target = re[position];
    let other_side = if target >= spectrum_re[position] {
        target - 2.0 * tolerance
    } else {
        target + 2.0 * tolerance
    };

    let mut readable = None;
    for goal in [target, other_side] {
        let mut value = goal;
        for _ in 0..SETTLE_ROUNDS {
            let reached = settle(plan, &spectrum_re, &spectrum_im, position, value, re, im);
            if (reached - goal).abs() <= tolerance / 4.0 {
                return;
            }
            if readable.is_none() && get_bit(&[reached], tolerance, 0) == bit & 1 {
                readable = Some(value);
            }
            value += goal - reached;
        }
    }

    // No target settled within a quarter step. Keep a value that still reads
    // back correctly, or the plain lattice point if the clamp forbids any.
    let value = readable.unwrap_or(target);
    settle(plan, &spectrum_re, &spectrum_im, position, value, re, im);
}

/// Forward transform and read the carrier. The buffers are left in the
/// transform domain.
pub fn extract_block(
    plan: &dyn BlockTransform,
    re: &mut [f64],
    im: &mut [f64],
    tolerance: f64,
    position: usize,
) -> u8 {
    plan.forward(re, im);
    get_bit(re, tolerance, position)
}
