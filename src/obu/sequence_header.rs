//! Sequence Header OBU payload, AV1 spec §5.5.1.

use crate::bitreader::BitReader;
use crate::error::Result;

/// `seq_force_screen_content_tools` / `seq_force_integer_mv` sentinel
/// meaning "choose per frame" rather than a fixed value.
pub const SELECT_SCREEN_CONTENT_TOOLS: u8 = 2;
pub const SELECT_INTEGER_MV: u8 = 2;

const CP_BT_709: u8 = 1;
const TC_SRGB: u8 = 13;
const MC_IDENTITY: u8 = 0;
const UNSPECIFIED: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimingInfo {
    pub num_units_in_display_tick: u32,
    pub time_scale: u32,
    pub equal_picture_interval: bool,
    pub num_ticks_per_picture_minus_1: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecoderModelInfo {
    pub buffer_delay_length_minus_1: u8,
    pub num_units_in_decoding_tick: u32,
    pub buffer_removal_time_length_minus_1: u8,
    pub frame_presentation_time_length_minus_1: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OperatingParameters {
    pub decoder_buffer_delay: u32,
    pub encoder_buffer_delay: u32,
    pub low_delay_mode_flag: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OperatingPoint {
    pub idc: u16,
    pub seq_level_idx: u8,
    pub seq_tier: u8,
    /// Present only when this operating point has its own decoder model.
    pub operating_parameters: Option<OperatingParameters>,
    /// Present only when `initial_display_delay_present_flag` is set for
    /// this operating point.
    pub initial_display_delay_minus_1: Option<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColorConfig {
    pub bit_depth: u8,
    pub mono_chrome: bool,
    pub num_planes: u8,
    pub color_primaries: u8,
    pub transfer_characteristics: u8,
    pub matrix_coefficients: u8,
    pub color_range: bool,
    pub subsampling_x: u8,
    pub subsampling_y: u8,
    pub chroma_sample_position: u8,
    pub separate_uv_delta_q: bool,
}

#[derive(Debug, Clone, Default)]
pub struct SequenceHeader {
    pub seq_profile: u8,
    pub still_picture: bool,
    pub reduced_still_picture_header: bool,
    pub timing_info: Option<TimingInfo>,
    pub decoder_model_info: Option<DecoderModelInfo>,
    pub initial_display_delay_present_flag: bool,
    /// Length is `operating_points_cnt_minus_1 + 1`, at most 32 (bounded by
    /// the 5-bit count field itself).
    pub operating_points: Vec<OperatingPoint>,
    pub frame_width_bits_minus_1: u8,
    pub frame_height_bits_minus_1: u8,
    pub max_frame_width_minus_1: u32,
    pub max_frame_height_minus_1: u32,
    pub frame_id_numbers_present_flag: bool,
    pub delta_frame_id_length_minus_2: u8,
    pub additional_frame_id_length_minus_1: u8,
    pub use_128x128_superblock: bool,
    pub enable_filter_intra: bool,
    pub enable_intra_edge_filter: bool,
    pub enable_interintra_compound: bool,
    pub enable_masked_compound: bool,
    pub enable_warped_motion: bool,
    pub enable_dual_filter: bool,
    pub enable_order_hint: bool,
    pub enable_jnt_comp: bool,
    pub enable_ref_frame_mvs: bool,
    pub seq_force_screen_content_tools: u8,
    pub seq_force_integer_mv: u8,
    pub order_hint_bits: u8,
    pub enable_superres: bool,
    pub enable_cdef: bool,
    pub enable_restoration: bool,
    pub color_config: ColorConfig,
    pub film_grain_params_present: bool,
}

/// Parses a Sequence Header OBU payload (not including the OBU header).
pub fn parse_sequence_header(payload: &[u8]) -> Result<SequenceHeader> {
    let mut r = BitReader::new(payload);
    let mut seq = SequenceHeader {
        seq_profile: r.read_u32(3)? as u8,
        still_picture: r.read_bit()?,
        reduced_still_picture_header: r.read_bit()?,
        ..Default::default()
    };

    if seq.reduced_still_picture_header {
        let seq_level_idx = r.read_u32(5)? as u8;
        seq.operating_points.push(OperatingPoint {
            idc: 0,
            seq_level_idx,
            seq_tier: 0,
            operating_parameters: None,
            initial_display_delay_minus_1: None,
        });
    } else {
        let timing_info_present_flag = r.read_bit()?;
        let mut decoder_model_info: Option<DecoderModelInfo> = None;

        if timing_info_present_flag {
            let num_units_in_display_tick = r.read_u32(32)?;
            let time_scale = r.read_u32(32)?;
            let equal_picture_interval = r.read_bit()?;
            let num_ticks_per_picture_minus_1 =
                if equal_picture_interval { r.read_uvlc()? } else { 0 };

            seq.timing_info = Some(TimingInfo {
                num_units_in_display_tick,
                time_scale,
                equal_picture_interval,
                num_ticks_per_picture_minus_1,
            });

            let decoder_model_info_present_flag = r.read_bit()?;
            if decoder_model_info_present_flag {
                let buffer_delay_length_minus_1 = r.read_u32(5)? as u8;
                let num_units_in_decoding_tick = r.read_u32(32)?;
                let buffer_removal_time_length_minus_1 = r.read_u32(5)? as u8;
                let frame_presentation_time_length_minus_1 = r.read_u32(5)? as u8;
                decoder_model_info = Some(DecoderModelInfo {
                    buffer_delay_length_minus_1,
                    num_units_in_decoding_tick,
                    buffer_removal_time_length_minus_1,
                    frame_presentation_time_length_minus_1,
                });
            }
        }
        seq.decoder_model_info = decoder_model_info;

        seq.initial_display_delay_present_flag = r.read_bit()?;
        let operating_points_cnt_minus_1 = r.read_u32(5)?;

        for _ in 0..=operating_points_cnt_minus_1 {
            let idc = r.read_u32(12)? as u16;
            let seq_level_idx = r.read_u32(5)? as u8;
            let seq_tier = if seq_level_idx > 7 { r.read_u32(1)? as u8 } else { 0 };

            let operating_parameters = if seq.decoder_model_info.is_some() {
                let decoder_model_present_for_this_op = r.read_bit()?;
                if decoder_model_present_for_this_op {
                    let n = seq
                        .decoder_model_info
                        .as_ref()
                        .unwrap()
                        .buffer_delay_length_minus_1 as u32
                        + 1;
                    let decoder_buffer_delay = r.read_u32(n)?;
                    let encoder_buffer_delay = r.read_u32(n)?;
                    let low_delay_mode_flag = r.read_bit()?;
                    Some(OperatingParameters {
                        decoder_buffer_delay,
                        encoder_buffer_delay,
                        low_delay_mode_flag,
                    })
                } else {
                    None
                }
            } else {
                None
            };

            let initial_display_delay_minus_1 = if seq.initial_display_delay_present_flag {
                let present_for_this_op = r.read_bit()?;
                if present_for_this_op {
                    Some(r.read_u32(4)? as u8)
                } else {
                    None
                }
            } else {
                None
            };

            seq.operating_points.push(OperatingPoint {
                idc,
                seq_level_idx,
                seq_tier,
                operating_parameters,
                initial_display_delay_minus_1,
            });
        }
    }

    seq.frame_width_bits_minus_1 = r.read_u32(4)? as u8;
    seq.frame_height_bits_minus_1 = r.read_u32(4)? as u8;
    seq.max_frame_width_minus_1 = r.read_u32(seq.frame_width_bits_minus_1 as u32 + 1)?;
    seq.max_frame_height_minus_1 = r.read_u32(seq.frame_height_bits_minus_1 as u32 + 1)?;

    seq.frame_id_numbers_present_flag =
        if seq.reduced_still_picture_header { false } else { r.read_bit()? };
    if seq.frame_id_numbers_present_flag {
        seq.delta_frame_id_length_minus_2 = r.read_u32(4)? as u8;
        seq.additional_frame_id_length_minus_1 = r.read_u32(3)? as u8;
    }

    seq.use_128x128_superblock = r.read_bit()?;
    seq.enable_filter_intra = r.read_bit()?;
    seq.enable_intra_edge_filter = r.read_bit()?;

    if seq.reduced_still_picture_header {
        seq.seq_force_screen_content_tools = SELECT_SCREEN_CONTENT_TOOLS;
        seq.seq_force_integer_mv = SELECT_INTEGER_MV;
        seq.order_hint_bits = 0;
    } else {
        seq.enable_interintra_compound = r.read_bit()?;
        seq.enable_masked_compound = r.read_bit()?;
        seq.enable_warped_motion = r.read_bit()?;
        seq.enable_dual_filter = r.read_bit()?;
        seq.enable_order_hint = r.read_bit()?;
        if seq.enable_order_hint {
            seq.enable_jnt_comp = r.read_bit()?;
            seq.enable_ref_frame_mvs = r.read_bit()?;
        }

        let seq_choose_screen_content_tools = r.read_bit()?;
        seq.seq_force_screen_content_tools = if seq_choose_screen_content_tools {
            SELECT_SCREEN_CONTENT_TOOLS
        } else {
            r.read_u32(1)? as u8
        };

        seq.seq_force_integer_mv = if seq.seq_force_screen_content_tools > 0 {
            let seq_choose_integer_mv = r.read_bit()?;
            if seq_choose_integer_mv {
                SELECT_INTEGER_MV
            } else {
                r.read_u32(1)? as u8
            }
        } else {
            SELECT_INTEGER_MV
        };

        if seq.enable_order_hint {
            let order_hint_bits_minus_1 = r.read_u32(3)? as u8;
            seq.order_hint_bits = order_hint_bits_minus_1 + 1;
        }
    }

    seq.enable_superres = r.read_bit()?;
    seq.enable_cdef = r.read_bit()?;
    seq.enable_restoration = r.read_bit()?;

    seq.color_config = parse_color_config(&mut r, seq.seq_profile)?;

    seq.film_grain_params_present = r.read_bit()?;

    Ok(seq)
}

fn parse_color_config(r: &mut BitReader<'_>, seq_profile: u8) -> Result<ColorConfig> {
    let mut cc = ColorConfig::default();

    let high_bitdepth = r.read_bit()?;
    cc.bit_depth = if seq_profile == 2 && high_bitdepth {
        if r.read_bit()? { 12 } else { 10 }
    } else if high_bitdepth {
        10
    } else {
        8
    };

    cc.mono_chrome = if seq_profile == 1 { false } else { r.read_bit()? };
    cc.num_planes = if cc.mono_chrome { 1 } else { 3 };

    let color_description_present_flag = r.read_bit()?;
    if color_description_present_flag {
        cc.color_primaries = r.read_u32(8)? as u8;
        cc.transfer_characteristics = r.read_u32(8)? as u8;
        cc.matrix_coefficients = r.read_u32(8)? as u8;
    } else {
        cc.color_primaries = UNSPECIFIED;
        cc.transfer_characteristics = UNSPECIFIED;
        cc.matrix_coefficients = UNSPECIFIED;
    }

    if cc.mono_chrome {
        cc.color_range = r.read_bit()?;
        cc.subsampling_x = 1;
        cc.subsampling_y = 1;
        cc.chroma_sample_position = 0;
        cc.separate_uv_delta_q = false;
        return Ok(cc);
    }

    if cc.color_primaries == CP_BT_709
        && cc.transfer_characteristics == TC_SRGB
        && cc.matrix_coefficients == MC_IDENTITY
    {
        cc.color_range = true;
        cc.subsampling_x = 0;
        cc.subsampling_y = 0;
    } else {
        cc.color_range = r.read_bit()?;
        match seq_profile {
            0 => {
                cc.subsampling_x = 1;
                cc.subsampling_y = 1;
            }
            1 => {
                cc.subsampling_x = 0;
                cc.subsampling_y = 0;
            }
            _ => {
                if cc.bit_depth == 12 {
                    cc.subsampling_x = r.read_u32(1)? as u8;
                    cc.subsampling_y = if cc.subsampling_x == 1 { r.read_u32(1)? as u8 } else { 0 };
                } else {
                    cc.subsampling_x = 1;
                    cc.subsampling_y = 0;
                }
            }
        }
        if cc.subsampling_x == 1 && cc.subsampling_y == 1 {
            cc.chroma_sample_position = r.read_u32(2)? as u8;
        }
    }

    cc.separate_uv_delta_q = r.read_bit()?;
    Ok(cc)
}
