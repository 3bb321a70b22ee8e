// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Carrier coefficient selection.
//!
//! Most algorithms use a fixed coefficient. FFT1D with a password instead
//! walks a SHA-256 hash chain over `(password, block_index, channel,
//! previous_code)` and places each block's carrier in an open-addressed
//! table covering the upper three quarters of the spectrum, so that no
//! coefficient index repeats until every slot has been used once.
//!
//! The chain is sequential: the position of block `i` depends on every block
//! before it. [`LocatorState`] carries that dependency explicitly and must be
//! driven in ascending block order; [`precompute_positions`] does so up front
//! when blocks are later processed in parallel.

use sha2::{Digest, Sha256};

use crate::transform::Algorithm;

/// How an algorithm picks its carrier coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionPolicy {
    /// Always the same index.
    Fixed(usize),
    /// Hash-chain position when a password is given, `unkeyed` otherwise.
    Keyed { unkeyed: usize },
}

/// Sequential state of the keyed locator.
#[derive(Debug, Clone, Default)]
pub struct LocatorState {
    previous_index: Option<usize>,
    previous_position: usize,
    previous_code: u64,
    occupied: Vec<bool>,
    filled: usize,
}

impl LocatorState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the chain and every occupied slot.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn clear_table(&mut self, len: usize) {
        self.occupied.clear();
        self.occupied.resize(len, false);
        self.filled = 0;
    }
}

fn chain_code(password: &str, block_index: usize, channel: usize, previous_code: u64) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hasher.update((block_index as u64).to_le_bytes());
    hasher.update((channel as u64).to_le_bytes());
    hasher.update(previous_code.to_le_bytes());
    let digest = hasher.finalize();
    let mut head = [0u8; 8];
    head.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(head)
}

/// Find a free slot starting at `home`.
///
/// Quadratic probing `base + step²`; once `step` exceeds half the table the
/// step restarts and the base moves one slot on. After `2 * len` probes the
/// lowest free slot is taken. The table always has a free slot here.
fn probe(occupied: &[bool], home: usize) -> usize {
    let len = occupied.len();
    let mut base = home;
    let mut step = 0usize;
    for _ in 0..2 * len {
        let slot = (base + step * step) % len;
        if !occupied[slot] {
            return slot;
        }
        step += 1;
        if step > len / 2 {
            step = 0;
            base = (base + 1) % len;
        }
    }
    occupied.iter().position(|&taken| !taken).unwrap_or(home)
}

fn keyed_position(
    password: &str,
    block_index: usize,
    channel: usize,
    size: usize,
    state: &mut LocatorState,
) -> usize {
    if state.previous_index == Some(block_index) {
        return state.previous_position;
    }
    if block_index == 0 {
        state.reset();
    }

    let area = size * size;
    let offset = area / 4;
    let len = area - offset;
    if state.occupied.len() != len || state.filled >= len {
        state.clear_table(len);
    }

    let code = chain_code(password, block_index, channel, state.previous_code);
    let slot = probe(&state.occupied, (code % len as u64) as usize);
    state.occupied[slot] = true;
    state.filled += 1;

    let position = slot + offset;
    state.previous_index = Some(block_index);
    state.previous_position = position;
    state.previous_code = code;
    log::trace!("block {block_index}: keyed position {position} (slot {slot})");
    position
}

/// Carrier coefficient for one block and channel.
///
/// For the keyed policy `state` must see block indices in ascending order
/// starting from 0; index 0 resets it, and repeated calls for the same block
/// (the other channels) return the same position.
pub fn position(
    algorithm: Algorithm,
    password: Option<&str>,
    block_index: usize,
    channel: usize,
    size: usize,
    state: &mut LocatorState,
) -> usize {
    match algorithm.position_policy(size) {
        PositionPolicy::Fixed(p) => p,
        PositionPolicy::Keyed { unkeyed } => match password {
            Some(pw) if !pw.is_empty() => keyed_position(pw, block_index, channel, size, state),
            _ => unkeyed,
        },
    }
}

/// Positions for blocks `0..blocks`, computed in sequence.
pub fn precompute_positions(
    algorithm: Algorithm,
    password: Option<&str>,
    size: usize,
    blocks: usize,
) -> Vec<usize> {
    let mut state = LocatorState::new();
    (0..blocks)
        .map(|i| position(algorithm, password, i, 0, size, &mut state))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn static_positions() {
        let mut state = LocatorState::new();
        assert_eq!(position(Algorithm::Dct2d, Some("pw"), 5, 1, 8, &mut state), 0);
        assert_eq!(position(Algorithm::Fft2d, Some("pw"), 5, 1, 16, &mut state), 0);
        assert_eq!(position(Algorithm::Fdct8, None, 0, 0, 8, &mut state), 63);
        assert_eq!(position(Algorithm::FdctLee, None, 3, 2, 8, &mut state), 63);
        assert_eq!(position(Algorithm::Fft1d, None, 3, 0, 8, &mut state), 0);
        assert_eq!(position(Algorithm::Fft1d, Some(""), 3, 0, 8, &mut state), 0);
    }

    #[test]
    fn keyed_positions_do_not_repeat_before_exhaustion() {
        for size in [2, 3, 5, 8] {
            let area = size * size;
            let len = area - area / 4;
            let positions = precompute_positions(Algorithm::Fft1d, Some("secret"), size, len);
            let unique: HashSet<_> = positions.iter().copied().collect();
            assert_eq!(unique.len(), len, "size {size}: repeated position");
            assert!(positions.iter().all(|&p| p >= area / 4 && p < area));
        }
    }

    #[test]
    fn table_is_reused_after_exhaustion() {
        let positions = precompute_positions(Algorithm::Fft1d, Some("secret"), 8, 48 * 2 + 5);
        assert_eq!(positions.len(), 101);
        let second: HashSet<_> = positions[48..96].iter().copied().collect();
        assert_eq!(second.len(), 48);
        assert!(positions.iter().all(|&p| (16..64).contains(&p)));
    }

    #[test]
    fn channels_share_block_position() {
        let mut state = LocatorState::new();
        for block in 0..10 {
            let p0 = position(Algorithm::Fft1d, Some("pw"), block, 0, 8, &mut state);
            let p1 = position(Algorithm::Fft1d, Some("pw"), block, 1, 8, &mut state);
            let p2 = position(Algorithm::Fft1d, Some("pw"), block, 2, 8, &mut state);
            assert_eq!(p0, p1);
            assert_eq!(p0, p2);
        }
    }

    #[test]
    fn block_zero_restarts_chain() {
        let first = precompute_positions(Algorithm::Fft1d, Some("pw"), 8, 20);
        let mut state = LocatorState::new();
        for i in 0..7 {
            position(Algorithm::Fft1d, Some("pw"), i, 0, 8, &mut state);
        }
        let again: Vec<_> = (0..20)
            .map(|i| position(Algorithm::Fft1d, Some("pw"), i, 0, 8, &mut state))
            .collect();
        assert_eq!(first, again);
    }

    #[test]
    fn password_changes_sequence() {
        let a = precompute_positions(Algorithm::Fft1d, Some("alpha"), 8, 48);
        let b = precompute_positions(Algorithm::Fft1d, Some("beta"), 8, 48);
        assert_ne!(a, b);
    }

    #[test]
    fn probe_terminates_on_nearly_full_table() {
        let mut occupied = vec![true; 48];
        occupied[17] = false;
        for home in 0..48 {
            assert_eq!(probe(&occupied, home), 17);
        }
    }
}
