//! OBU framing: header, optional extension byte, optional LEB128 size, and
//! the resulting payload extent.
//!
//! Frame Header, Tile Group and Tile List payloads are declared as stub
//! submodules below but are not implemented; nothing in this crate's public
//! API can reach them. [`sequence_header`] and [`metadata`] are the two
//! payload parsers this crate actually implements.

pub mod frame_header;
pub mod metadata;
pub mod sequence_header;
pub mod tile_group;
pub mod tile_list;

use crate::error::{ParseError, Result};
use crate::leb128::read_leb128;

/// see: https://aomediacodec.github.io/av1-spec/#obu-header-semantics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObuType {
    /// `obu_type == 0`, named separately from the 9..=14 reserved range.
    Reserved0,
    SequenceHeader,
    /// Note: the temporal delimiter has an empty payload.
    TemporalDelimiter,
    FrameHeader,
    TileGroup,
    Metadata,
    Frame,
    RedundantFrameHeader,
    TileList,
    Padding,
    /// `obu_type` in 9..=14.
    Reserved(u8),
}

impl ObuType {
    /// Total conversion from the 4-bit `obu_type` field. Reserved values
    /// decode to a `Reserved*` variant rather than failing -- validity
    /// against the known set is [`get_next_obu`]'s job, not this one's.
    fn from_bits(value: u8) -> Self {
        match value {
            0 => Self::Reserved0,
            1 => Self::SequenceHeader,
            2 => Self::TemporalDelimiter,
            3 => Self::FrameHeader,
            4 => Self::TileGroup,
            5 => Self::Metadata,
            6 => Self::Frame,
            7 => Self::RedundantFrameHeader,
            8 => Self::TileList,
            15 => Self::Padding,
            reserved => Self::Reserved(reserved),
        }
    }

    fn is_known(self) -> bool {
        !matches!(self, Self::Reserved0 | Self::Reserved(_))
    }
}

/// The framing step's output: an OBU's type, scalability identifiers, and
/// the location of its payload within the caller's buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObuFrame {
    pub obu_type: ObuType,
    /// 0..=7, zero when the extension byte is absent.
    pub temporal_id: u8,
    /// 0..=3, zero when the extension byte is absent.
    pub spatial_id: u8,
    /// Byte offset of the payload from the start of the input buffer.
    pub offset: usize,
    /// Payload length in bytes.
    pub size: usize,
}

/// Parses a single OBU header from the start of `buf` and returns the
/// resulting [`ObuFrame`]. Does not look past `offset + size`; the caller
/// slices `buf[offset..offset + size]` to get at the payload itself.
pub fn get_next_obu(buf: &[u8]) -> Result<ObuFrame> {
    if buf.is_empty() {
        return Err(ParseError::TruncatedInput { bit_offset: 0 });
    }

    let b0 = buf[0];
    let obu_type_bits = (b0 >> 3) & 0x0F;
    let extension_flag = (b0 >> 2) & 1 != 0;
    let has_size_flag = (b0 >> 1) & 1 != 0;

    let obu_type = ObuType::from_bits(obu_type_bits);
    if !obu_type.is_known() {
        return Err(ParseError::InvalidObuType(obu_type_bits));
    }

    let mut pos = 1usize;

    let (temporal_id, spatial_id) = if extension_flag {
        // Mirrors the reference framing logic, which re-checks `buf_size <
        // 1` here rather than `< 2` even though `pos` has already advanced
        // past byte 0. Preserved as specified rather than tightened.
        if buf.is_empty() {
            return Err(ParseError::TruncatedInput { bit_offset: 8 });
        }
        if buf.len() < pos + 1 {
            return Err(ParseError::TruncatedInput {
                bit_offset: (pos as u64) * 8,
            });
        }
        let ext = buf[pos];
        pos += 1;
        (ext >> 5, (ext >> 3) & 0x3)
    } else {
        (0, 0)
    };

    let (offset, size) = if has_size_flag {
        let (value, consumed) = read_leb128(&buf[pos..])?;
        if value >= (1u64 << 32) {
            return Err(ParseError::InvalidSize);
        }
        (pos + consumed, value as usize)
    } else {
        (pos, buf.len() - pos)
    };

    if size > buf.len().saturating_sub(offset) {
        return Err(ParseError::InvalidSize);
    }

    Ok(ObuFrame {
        obu_type,
        temporal_id,
        spatial_id,
        offset,
        size,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temporal_delimiter_no_ext_no_size() {
        // type=2 (TemporalDelimiter), extension clear, has_size clear:
        // 0b0_0010_0_0_0.
        let frame = get_next_obu(&[0x10]).unwrap();
        assert_eq!(frame.obu_type, ObuType::TemporalDelimiter);
        assert_eq!(frame.offset, 1);
        assert_eq!(frame.size, 0);
        assert_eq!(frame.temporal_id, 0);
        assert_eq!(frame.spatial_id, 0);
    }

    #[test]
    fn sequence_header_with_leb128_size() {
        let buf = [0x0A, 0x03, 0xAA, 0xBB, 0xCC];
        let frame = get_next_obu(&buf).unwrap();
        assert_eq!(frame.obu_type, ObuType::SequenceHeader);
        assert_eq!(frame.offset, 2);
        assert_eq!(frame.size, 3);
    }

    #[test]
    fn padding_with_extension_byte() {
        // type=15 (Padding), extension flag set, has_size clear: 0b0_1111_1_0_0.
        let buf = [0x7C, 0x20, 0x00];
        let frame = get_next_obu(&buf).unwrap();
        assert_eq!(frame.obu_type, ObuType::Padding);
        assert_eq!(frame.offset, 2);
        assert_eq!(frame.size, 1);
        assert_eq!(frame.temporal_id, 1);
        assert_eq!(frame.spatial_id, 0);
    }

    #[test]
    fn reserved_type_fails() {
        assert!(matches!(
            get_next_obu(&[0x00]),
            Err(ParseError::InvalidObuType(0))
        ));
    }

    #[test]
    fn empty_buffer_fails() {
        assert!(matches!(
            get_next_obu(&[]),
            Err(ParseError::TruncatedInput { .. })
        ));
    }

    #[test]
    fn size_larger_than_remaining_buffer_fails() {
        // type=1 (SequenceHeader), has_size set, LEB128=10, only 1 byte follows
        let buf = [0x0A, 0x0A, 0x00];
        assert!(matches!(get_next_obu(&buf), Err(ParseError::InvalidSize)));
    }

    #[test]
    fn no_size_flag_consumes_to_end_of_buffer() {
        // type=2 (TemporalDelimiter) has no size flag; low-overhead mode.
        let buf = [0x10, 0xAA, 0xBB];
        let frame = get_next_obu(&buf).unwrap();
        assert_eq!(frame.offset, 1);
        assert_eq!(frame.size, 2);
    }

    #[test]
    fn offset_and_size_stay_within_buffer_bounds() {
        for buf in [
            vec![0x12u8],
            vec![0x0A, 0x03, 0xAA, 0xBB, 0xCC],
            vec![0x7C, 0x20, 0x00],
        ] {
            if let Ok(frame) = get_next_obu(&buf) {
                assert!(frame.offset <= buf.len());
                assert!(frame.size <= buf.len() - frame.offset);
            }
        }
    }
}
