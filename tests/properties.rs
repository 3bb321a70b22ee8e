// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Property tests for the building blocks.

use std::collections::HashSet;

use proptest::prelude::*;

use spectral_stego::stego::bits::{bits_to_text, bytes_to_bits, text_to_bits, TERMINATOR_BYTE};
use spectral_stego::stego::embedding::{get_bit, set_bit};
use spectral_stego::stego::locator::precompute_positions;
use spectral_stego::stego::repetition::{expand, majority_vote};
use spectral_stego::{embed, extract, Algorithm, EmbedParams};

const AREA: usize = 64 * 64;

fn planes_from(samples: Vec<u8>) -> Vec<Vec<f64>> {
    samples.chunks(AREA).map(|plane| plane.iter().map(|&v| v as f64).collect()).collect()
}

/// 64x64 RGB covers over the full byte range, saturated ones included.
fn full_range_cover() -> impl Strategy<Value = Vec<Vec<f64>>> {
    prop_oneof![
        Just(vec![vec![0.0; AREA]; 3]),
        Just(vec![vec![255.0; AREA]; 3]),
        any::<u8>().prop_map(|v| vec![vec![v as f64; AREA]; 3]),
        proptest::collection::vec(any::<u8>(), 3 * AREA).prop_map(planes_from),
        proptest::collection::vec(prop_oneof![Just(0u8), Just(255u8)], 3 * AREA).prop_map(planes_from),
    ]
}

proptest! {
    #[test]
    fn parity_is_forced(c in -5000.0f64..5000.0, t in 1.0f64..64.0, bit in 0u8..2) {
        let mut coeffs = [c];
        set_bit(&mut coeffs, bit, t, 0);
        prop_assert_eq!(get_bit(&coeffs, t, 0), bit);
        prop_assert!((coeffs[0] - c).abs() <= 2.0 * t + 1e-9);

        // Re-embedding keeps the parity.
        set_bit(&mut coeffs, bit, t, 0);
        prop_assert_eq!(get_bit(&coeffs, t, 0), bit);
    }

    #[test]
    fn minority_flips_are_outvoted(
        bits in proptest::collection::vec(0u8..2, 1..64),
        half in 0usize..5,
        seed in any::<u64>(),
    ) {
        let copies = 2 * half + 1;
        let mut coded = expand(&bits, copies);
        for (g, group) in coded.chunks_mut(copies).enumerate() {
            let flips = ((seed >> (g % 60)) as usize) % (half + 1);
            for b in group.iter_mut().take(flips) {
                *b ^= 1;
            }
        }
        prop_assert_eq!(majority_vote(&coded, copies), bits);
    }

    #[test]
    fn text_survives_codec(text in "\\PC{0,40}", copies in 1usize..6) {
        let mut bits = expand(&text_to_bits(&text), copies);
        bits.extend(expand(&bytes_to_bits(&[TERMINATOR_BYTE]), copies));
        prop_assert_eq!(bits_to_text(&bits, copies), text);
    }

    #[test]
    fn decoding_arbitrary_bits_never_panics(bits in proptest::collection::vec(0u8..2, 0..300), copies in 1usize..8) {
        let _ = bits_to_text(&bits, copies);
    }

    #[test]
    fn keyed_positions_are_a_permutation(password in "[a-z0-9]{1,12}", size in 2usize..12) {
        let area = size * size;
        let len = area - area / 4;
        let positions = precompute_positions(Algorithm::Fft1d, Some(&password), size, len);
        let unique: HashSet<usize> = positions.iter().copied().collect();
        prop_assert_eq!(unique.len(), len);
        prop_assert!(positions.iter().all(|&p| p >= area / 4 && p < area));
    }

    #[test]
    fn transforms_invert(values in proptest::collection::vec(0.0f64..255.0, 64)) {
        for algorithm in Algorithm::ALL {
            let plan = algorithm.plan(8);
            let mut re = values.clone();
            let mut im = vec![0.0; 64];
            plan.forward(&mut re, &mut im);
            plan.inverse(&mut re, &mut im);
            for (a, b) in re.iter().zip(&values) {
                prop_assert!((a - b).abs() < 1e-7, "{}: {} vs {}", algorithm, a, b);
            }
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn full_range_covers_roundtrip(
        planes in full_range_cover(),
        message in "[a-zA-Z0-9]{1,5}",
        keyed in any::<bool>(),
    ) {
        for algorithm in Algorithm::ALL {
            let params = EmbedParams {
                algorithm,
                copies: 3,
                password: keyed.then(|| "key".to_string()),
                ..EmbedParams::default()
            };
            let mut channels = planes.clone();
            let mut imaginary = vec![vec![0.0; AREA]; 3];
            embed(&mut channels, &mut imaginary, 64, 64, &message, &params).unwrap();
            prop_assert_eq!(extract(&channels, &imaginary, 64, 64, &params).unwrap(), message.clone(), "{}", algorithm);
        }
    }
}
