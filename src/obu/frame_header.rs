//! Frame Header OBU payload.
//!
//! Declared for API completeness -- the AV1 spec's frame header walk
//! depends on reference-frame state this crate's stateless, per-call core
//! does not keep. Not reachable from [`super::get_next_obu`] or any public
//! entry point.

#[derive(Debug, Clone)]
pub struct FrameHeader {}

impl FrameHeader {
    pub fn decode(_payload: &[u8]) -> Self {
        unimplemented!("frame header parsing is out of scope for this crate")
    }
}
