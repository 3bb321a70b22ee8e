// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Text to bitstream codec.
//!
//! Text is first percent-escaped with the URI rule (unreserved and reserved
//! URI characters pass through, every other UTF-8 byte becomes `%XX`), so
//! every escaped byte is printable ASCII and can never collide with the
//! [`TERMINATOR_BYTE`]. Each escaped byte becomes 8 bits, MSB first.

use super::repetition::majority_vote;

/// Byte value that ends a decoded message.
pub const TERMINATOR_BYTE: u8 = 0xFF;

const HEX_UPPER: &[u8; 16] = b"0123456789ABCDEF";

/// Bytes that pass through escaping unchanged.
fn is_uri_safe(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b";,/?:@&=+$-_.!~*'()#".contains(&b)
}

/// Percent-escape `text` byte by byte.
pub fn escape(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    for &b in text.as_bytes() {
        if is_uri_safe(b) {
            out.push(b);
        } else {
            out.push(b'%');
            out.push(HEX_UPPER[(b >> 4) as usize]);
            out.push(HEX_UPPER[(b & 0x0F) as usize]);
        }
    }
    out
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

/// Reverse [`escape`]. Malformed `%` sequences are kept literally and
/// invalid UTF-8 is replaced.
pub fn unescape(escaped: &[u8]) -> String {
    let mut out = Vec::with_capacity(escaped.len());
    let mut i = 0;
    while i < escaped.len() {
        if escaped[i] == b'%' && i + 2 < escaped.len() {
            if let (Some(hi), Some(lo)) = (hex_value(escaped[i + 1]), hex_value(escaped[i + 2])) {
                out.push(hi << 4 | lo);
                i += 3;
                continue;
            }
        }
        out.push(escaped[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// Convert bytes to a bit vector (MSB first within each byte).
pub fn bytes_to_bits(bytes: &[u8]) -> Vec<u8> {
    let mut bits = Vec::with_capacity(bytes.len() * 8);
    for &byte in bytes {
        for bit_pos in (0..8).rev() {
            bits.push((byte >> bit_pos) & 1);
        }
    }
    bits
}

/// Escape `text` and emit its bits.
pub fn text_to_bits(text: &str) -> Vec<u8> {
    bytes_to_bits(&escape(text))
}

/// Decode a redundant bitstream back to text.
///
/// Each group of `copies` bits is reduced by majority vote, every 8 voted
/// bits form one byte, and decoding stops before the first
/// [`TERMINATOR_BYTE`]. Trailing bits that do not fill a byte are dropped.
/// Never fails.
pub fn bits_to_text(bits: &[u8], copies: usize) -> String {
    let voted = majority_vote(bits, copies);
    let mut bytes = Vec::with_capacity(voted.len() / 8);
    for chunk in voted.chunks_exact(8) {
        let byte = chunk.iter().fold(0u8, |acc, &bit| acc << 1 | (bit & 1));
        if byte == TERMINATOR_BYTE {
            break;
        }
        bytes.push(byte);
    }
    unescape(&bytes)
}
