// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Repetition coding with majority voting.
//!
//! Each message bit is repeated `copies` times contiguously, followed by a
//! terminator run of `8 * copies` ones. The result is written over a
//! pseudo-random filler buffer that spans the full capacity, so unused
//! carriers hold noise rather than a recognizable tail.

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use sha2::{Digest, Sha256};

/// Repeat every bit `copies` times in place.
pub fn expand(bits: &[u8], copies: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(bits.len() * copies);
    for &bit in bits {
        out.extend(std::iter::repeat(bit).take(copies));
    }
    out
}

/// The all-ones end marker: one byte of ones, each bit repeated `copies` times.
pub fn terminator(copies: usize) -> Vec<u8> {
    vec![1u8; 8 * copies]
}

/// Overwrite `filler` from the left with `message` followed by `terminator`.
///
/// Whatever does not fit is silently cut; callers check capacity first.
pub fn merge(mut filler: Vec<u8>, message: &[u8], terminator: &[u8]) -> Vec<u8> {
    for (slot, &bit) in filler.iter_mut().zip(message.iter().chain(terminator)) {
        *slot = bit;
    }
    filler
}

/// Seed for [`generate_filler`], derived from the password and message so
/// that repeated runs write identical carriers.
pub fn filler_seed(password: &str, message: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hasher.update([0u8]);
    hasher.update(message.as_bytes());
    hasher.finalize().into()
}

/// `len` pseudo-random bits from a ChaCha20 stream.
pub fn generate_filler(len: usize, seed: [u8; 32]) -> Vec<u8> {
    let mut rng = ChaCha20Rng::from_seed(seed);
    (0..len).map(|_| (rng.next_u32() & 1) as u8).collect()
}

/// Reduce each group of `copies` bits to one bit.
///
/// A group votes 1 when at least half its members are 1. A trailing partial
/// group is dropped. `copies == 0` is treated as 1.
pub fn majority_vote(bits: &[u8], copies: usize) -> Vec<u8> {
    let copies = copies.max(1);
    bits.chunks_exact(copies)
        .map(|group| {
            let ones = group.iter().filter(|&&b| b & 1 == 1).count();
            u8::from(ones * 2 >= copies)
        })
        .collect()
}
