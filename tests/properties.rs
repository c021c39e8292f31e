//! Property-based tests over random byte buffers, driving the invariants
//! from spec.md §8 that aren't pinned to one concrete vector.
//!
//! The uvlc round-trip property itself lives alongside `BitReader` in
//! `src/bitreader.rs`, since `BitReader` isn't part of this crate's public
//! surface.

use av1_obu_parser::{get_next_obu, parse_metadata, parse_sequence_header, ParseError};
use proptest::prelude::*;

proptest! {
    /// Property 1: for every buffer, `get_next_obu` either fails or returns
    /// an offset/size pair that stays within bounds.
    #[test]
    fn framing_offset_and_size_stay_in_bounds(buf in prop::collection::vec(any::<u8>(), 0..64)) {
        if let Ok(frame) = get_next_obu(&buf) {
            prop_assert!(frame.offset <= buf.len());
            prop_assert!(frame.size <= buf.len() - frame.offset);
        }
    }

    /// Property 2 (sequence header half): parsing never panics on
    /// arbitrary, possibly-truncated input, and any rejection is reported
    /// as a `ParseError`, not a crash.
    #[test]
    fn sequence_header_truncation_fails_cleanly(buf in prop::collection::vec(any::<u8>(), 0..48)) {
        for len in 0..=buf.len() {
            let _: Result<_, ParseError> = parse_sequence_header(&buf[..len]);
        }
    }

    /// Property 2 (metadata half), same shape.
    #[test]
    fn metadata_truncation_fails_cleanly(buf in prop::collection::vec(any::<u8>(), 0..48)) {
        for len in 0..=buf.len() {
            let _: Result<_, ParseError> = parse_metadata(&buf[..len]);
        }
    }
}

#[test]
fn get_next_obu_single_byte_temporal_delimiter() {
    // type=2 (TemporalDelimiter), extension clear, has_size clear.
    let frame = get_next_obu(&[0x10]).unwrap();
    assert_eq!(frame.offset, 1);
    assert_eq!(frame.size, 0);
}

#[test]
fn sequence_header_reduced_still_picture_yields_documented_defaults() {
    // seq_profile=0, still_picture=1, reduced_still_picture_header=1,
    // seq_level_idx=0, remainder of the payload zeroed out as padding.
    let payload = [0b0001_1000u8, 0u8, 0u8, 0u8, 0u8, 0u8];
    let seq = parse_sequence_header(&payload).unwrap();
    assert_eq!(seq.color_config.bit_depth, 8);
    assert_eq!(seq.color_config.num_planes, 3);
    assert_eq!(seq.order_hint_bits, 0);
}
