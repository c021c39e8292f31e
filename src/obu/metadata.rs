//! Metadata OBU payload, AV1 spec §5.9.2 (and its five sub-types).

use crate::bitreader::BitReader;
use crate::error::{ParseError, Result};
use crate::leb128::read_leb128;

const METADATA_TYPE_HDR_CLL: u64 = 1;
const METADATA_TYPE_HDR_MDCV: u64 = 2;
const METADATA_TYPE_SCALABILITY: u64 = 3;
const METADATA_TYPE_ITUT_T35: u64 = 4;
const METADATA_TYPE_TIMECODE: u64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HdrCll {
    pub max_cll: u16,
    pub max_fall: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HdrMdcv {
    pub primary_chromaticity_x: [u16; 3],
    pub primary_chromaticity_y: [u16; 3],
    pub white_point_x: u16,
    pub white_point_y: u16,
    pub luminance_max: u32,
    pub luminance_min: u32,
}

/// One entry of a temporal group's reference-picture-diff list, bounded to
/// 8 entries per `ScalabilityStructure::temporal_group`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TemporalGroupEntry {
    pub temporal_id: u8,
    pub temporal_switching_up_point_flag: bool,
    pub spatial_switching_up_point_flag: bool,
    pub temporal_group_ref_cnt: u8,
    /// Only the first `temporal_group_ref_cnt` entries are meaningful.
    pub ref_pic_diff: [u8; 8],
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ScalabilityStructure {
    pub spatial_layers_cnt_minus_1: u8,
    pub spatial_layer_dimensions_present_flag: bool,
    pub spatial_layer_description_present_flag: bool,
    pub temporal_group_description_present_flag: bool,
    /// Only the first `spatial_layers_cnt_minus_1` entries are meaningful
    /// (see the loop-bound note on [`parse_metadata`]).
    pub spatial_layer_max_width: [u16; 3],
    pub spatial_layer_max_height: [u16; 3],
    pub spatial_layer_ref_id: [u8; 3],
    pub temporal_group_size: u8,
    /// Only the first `temporal_group_size` entries are meaningful.
    pub temporal_group: [TemporalGroupEntry; 256],
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Scalability {
    pub scalability_mode_idc: u8,
    pub structure: Option<ScalabilityStructure>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Timecode {
    pub counting_type: u8,
    pub full_timestamp_flag: bool,
    pub discontinuity_flag: bool,
    pub cnt_dropped_flag: bool,
    pub n_frames: u16,
    pub seconds_value: Option<u8>,
    pub minutes_value: Option<u8>,
    pub hours_value: Option<u8>,
    pub time_offset_length: u8,
    pub time_offset_value: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItuT35<'a> {
    pub country_code: u8,
    pub country_code_extension_byte: Option<u8>,
    pub payload: &'a [u8],
}

#[derive(Debug, Clone)]
pub enum Metadata<'a> {
    HdrCll(HdrCll),
    HdrMdcv(HdrMdcv),
    Scalability(Scalability),
    ItuT35(ItuT35<'a>),
    Timecode(Timecode),
    /// `metadata_type` in 6..=31.
    Unregistered { metadata_type: u64, payload: &'a [u8] },
}

/// Parses a Metadata OBU payload (not including the OBU header).
pub fn parse_metadata(payload: &[u8]) -> Result<Metadata<'_>> {
    let (metadata_type, consumed) = read_leb128(payload)?;
    let rest = &payload[consumed..];

    match metadata_type {
        METADATA_TYPE_HDR_CLL => {
            let mut r = BitReader::new(rest);
            Ok(Metadata::HdrCll(HdrCll {
                max_cll: r.read_u32(16)? as u16,
                max_fall: r.read_u32(16)? as u16,
            }))
        }
        METADATA_TYPE_HDR_MDCV => {
            let mut r = BitReader::new(rest);
            let mut primary_chromaticity_x = [0u16; 3];
            let mut primary_chromaticity_y = [0u16; 3];
            for i in 0..3 {
                primary_chromaticity_x[i] = r.read_u32(16)? as u16;
                primary_chromaticity_y[i] = r.read_u32(16)? as u16;
            }
            Ok(Metadata::HdrMdcv(HdrMdcv {
                primary_chromaticity_x,
                primary_chromaticity_y,
                white_point_x: r.read_u32(16)? as u16,
                white_point_y: r.read_u32(16)? as u16,
                luminance_max: r.read_u32(32)?,
                luminance_min: r.read_u32(32)?,
            }))
        }
        METADATA_TYPE_SCALABILITY => {
            let mut r = BitReader::new(rest);
            let scalability_mode_idc = r.read_u32(8)? as u8;
            let structure = if scalability_mode_idc != 0 {
                Some(parse_scalability_structure(&mut r)?)
            } else {
                None
            };
            Ok(Metadata::Scalability(Scalability {
                scalability_mode_idc,
                structure,
            }))
        }
        METADATA_TYPE_ITUT_T35 => {
            if rest.is_empty() {
                return Err(ParseError::TruncatedInput { bit_offset: 0 });
            }
            let country_code = rest[0];
            let (country_code_extension_byte, body) = if country_code == 0xFF {
                if rest.len() < 2 {
                    return Err(ParseError::TruncatedInput { bit_offset: 8 });
                }
                (Some(rest[1]), &rest[2..])
            } else {
                (None, &rest[1..])
            };
            Ok(Metadata::ItuT35(ItuT35 {
                country_code,
                country_code_extension_byte,
                payload: body,
            }))
        }
        METADATA_TYPE_TIMECODE => {
            let mut r = BitReader::new(rest);
            let counting_type = r.read_u32(5)? as u8;
            let full_timestamp_flag = r.read_bit()?;
            let discontinuity_flag = r.read_bit()?;
            let cnt_dropped_flag = r.read_bit()?;
            let n_frames = r.read_u32(9)? as u16;

            let (seconds_value, minutes_value, hours_value) = if full_timestamp_flag {
                (
                    Some(r.read_u32(6)? as u8),
                    Some(r.read_u32(6)? as u8),
                    Some(r.read_u32(5)? as u8),
                )
            } else {
                let mut seconds_value = None;
                let mut minutes_value = None;
                let mut hours_value = None;
                if r.read_bit()? {
                    seconds_value = Some(r.read_u32(6)? as u8);
                    if r.read_bit()? {
                        minutes_value = Some(r.read_u32(6)? as u8);
                        if r.read_bit()? {
                            hours_value = Some(r.read_u32(5)? as u8);
                        }
                    }
                }
                (seconds_value, minutes_value, hours_value)
            };

            let time_offset_length = r.read_u32(5)? as u8;
            let time_offset_value = if time_offset_length > 0 {
                r.read_u32(time_offset_length as u32)?
            } else {
                0
            };

            Ok(Metadata::Timecode(Timecode {
                counting_type,
                full_timestamp_flag,
                discontinuity_flag,
                cnt_dropped_flag,
                n_frames,
                seconds_value,
                minutes_value,
                hours_value,
                time_offset_length,
                time_offset_value,
            }))
        }
        6..=31 => Ok(Metadata::Unregistered {
            metadata_type,
            payload: rest,
        }),
        other => Err(ParseError::InvalidMetadataType(other)),
    }
}

fn parse_scalability_structure(r: &mut BitReader<'_>) -> Result<ScalabilityStructure> {
    let mut s = ScalabilityStructure {
        spatial_layers_cnt_minus_1: r.read_u32(2)? as u8,
        spatial_layer_dimensions_present_flag: r.read_bit()?,
        spatial_layer_description_present_flag: r.read_bit()?,
        temporal_group_description_present_flag: r.read_bit()?,
        ..Default::default()
    };
    let _reserved = r.read_u32(3)?;

    if s.spatial_layer_dimensions_present_flag {
        // Preserved as specified: strict `<`, not `<=`, against
        // `spatial_layers_cnt_minus_1` (a `_minus_1` field that would
        // normally pair with `<=`).
        for i in 0..s.spatial_layers_cnt_minus_1 as usize {
            s.spatial_layer_max_width[i] = r.read_u32(16)? as u16;
            s.spatial_layer_max_height[i] = r.read_u32(16)? as u16;
        }
    }

    if s.spatial_layer_description_present_flag {
        for i in 0..s.spatial_layers_cnt_minus_1 as usize {
            s.spatial_layer_ref_id[i] = r.read_u32(8)? as u8;
        }
    }

    if s.temporal_group_description_present_flag {
        s.temporal_group_size = r.read_u32(8)? as u8;
        for i in 0..s.temporal_group_size as usize {
            let temporal_id = r.read_u32(3)? as u8;
            let temporal_switching_up_point_flag = r.read_bit()?;
            let spatial_switching_up_point_flag = r.read_bit()?;
            let temporal_group_ref_cnt = r.read_u32(3)? as u8;
            let mut ref_pic_diff = [0u8; 8];
            for d in ref_pic_diff.iter_mut().take(temporal_group_ref_cnt as usize) {
                *d = r.read_u32(8)? as u8;
            }
            s.temporal_group[i] = TemporalGroupEntry {
                temporal_id,
                temporal_switching_up_point_flag,
                spatial_switching_up_point_flag,
                temporal_group_ref_cnt,
                ref_pic_diff,
            };
        }
    }

    Ok(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hdr_cll() {
        let payload = [0x01, 0x01, 0x00, 0x01, 0x40];
        match parse_metadata(&payload).unwrap() {
            Metadata::HdrCll(hdr) => {
                assert_eq!(hdr.max_cll, 0x0100);
                assert_eq!(hdr.max_fall, 0x0140);
            }
            other => panic!("expected HdrCll, got {other:?}"),
        }
    }

    #[test]
    fn itu_t35_borrows_trailing_payload() {
        let n = 4;
        let mut payload = vec![0x04, 0xFF, 0x01];
        payload.extend(std::iter::repeat(0xAB).take(n));
        match parse_metadata(&payload).unwrap() {
            Metadata::ItuT35(itu) => {
                assert_eq!(itu.country_code, 0xFF);
                assert_eq!(itu.country_code_extension_byte, Some(0x01));
                assert_eq!(itu.payload.len(), n);
                assert_eq!(itu.payload[0], payload[3]);
            }
            other => panic!("expected ItuT35, got {other:?}"),
        }
    }

    #[test]
    fn itu_t35_without_extension_byte() {
        let payload = [0x04, 0x26, 0xAA, 0xBB];
        match parse_metadata(&payload).unwrap() {
            Metadata::ItuT35(itu) => {
                assert_eq!(itu.country_code, 0x26);
                assert_eq!(itu.country_code_extension_byte, None);
                assert_eq!(itu.payload, &[0xAA, 0xBB]);
            }
            other => panic!("expected ItuT35, got {other:?}"),
        }
    }

    #[test]
    fn unregistered_type_borrows_payload() {
        let payload = [0x06, 0x01, 0x02, 0x03];
        match parse_metadata(&payload).unwrap() {
            Metadata::Unregistered { metadata_type, payload } => {
                assert_eq!(metadata_type, 6);
                assert_eq!(payload, &[0x01, 0x02, 0x03]);
            }
            other => panic!("expected Unregistered, got {other:?}"),
        }
    }

    #[test]
    fn invalid_metadata_type_zero_fails() {
        assert!(matches!(
            parse_metadata(&[0x00]),
            Err(ParseError::InvalidMetadataType(0))
        ));
    }

    #[test]
    fn invalid_metadata_type_32_fails() {
        assert!(matches!(
            parse_metadata(&[0x20]),
            Err(ParseError::InvalidMetadataType(32))
        ));
    }
}
