//! A stateless, zero-copy decomposer from AV1 Open Bitstream Unit (OBU)
//! wire bytes to typed records.
//!
//! This crate converts the framing of an AV1 bitstream -- OBU headers, the
//! Sequence Header payload, and the Metadata payload -- into Rust values a
//! downstream decoder or inspection tool can read directly. It does not
//! decode image data, demux a container (IVF, ISOBMFF), or drive playback;
//! see [`obu::frame_header`], [`obu::tile_group`] and [`obu::tile_list`]
//! for the payload kinds this crate declares but does not parse.
//!
//! Entry points:
//!
//! - [`obu::get_next_obu`] locates the next OBU's header and payload extent
//!   in a buffer.
//! - [`obu::sequence_header::parse_sequence_header`] decodes a Sequence
//!   Header OBU's payload.
//! - [`obu::metadata::parse_metadata`] decodes a Metadata OBU's payload.
//!
//! Every call is independent: no state is carried between OBUs at this
//! layer, and nothing here allocates for payload data -- the `ItuT35` and
//! `Unregistered` metadata variants borrow directly from the input slice.

mod bitreader;
mod leb128;

pub mod error;
pub mod obu;

pub use error::ParseError;
pub use obu::get_next_obu;
pub use obu::metadata::{parse_metadata, Metadata};
pub use obu::sequence_header::{parse_sequence_header, SequenceHeader};
pub use obu::{ObuFrame, ObuType};
