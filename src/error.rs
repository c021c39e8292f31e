//! Parse error type shared by every entry point in this crate.

use thiserror::Error;

/// Everything that can go wrong while decomposing an OBU or one of its
/// payloads into typed fields.
///
/// Every variant is fatal to the call that produced it: there is no partial
/// state exposed to the caller beyond the message this type's `Display`
/// impl produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A bit reader or the LEB128 reader ran off the end of the buffer.
    #[error("ran out of bytes in buffer at bit offset {bit_offset}")]
    TruncatedInput {
        /// Bit position (from the start of the slice the reader was given)
        /// at which the read was attempted.
        bit_offset: u64,
    },

    /// The OBU header byte carries a reserved `obu_type` value.
    #[error("invalid OBU type: {0}")]
    InvalidObuType(u8),

    /// The LEB128-decoded size is larger than the bytes remaining in the
    /// input buffer.
    #[error("invalid OBU size: larger than remaining buffer")]
    InvalidSize,

    /// A uvlc's leading-zero run reached 32 bits without terminating.
    #[error("uvlc leading zeros exceeded 32")]
    InvalidVlc,

    /// The metadata OBU's LEB128 type tag is 0 or >= 32.
    #[error("invalid metadata type: {0}")]
    InvalidMetadataType(u64),
}

/// Convenience alias used throughout this crate.
pub type Result<T> = std::result::Result<T, ParseError>;
