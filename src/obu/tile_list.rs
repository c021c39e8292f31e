//! Tile List OBU payload.
//!
//! Declared for API completeness. The reference parser bounds this payload
//! at 65536 tile entries; reading and validating that list is out of scope
//! here. Not reachable from [`super::get_next_obu`] or any public entry
//! point.

#[derive(Debug, Clone)]
pub struct TileList {}

impl TileList {
    pub fn decode(_payload: &[u8]) -> Self {
        unimplemented!("tile list parsing is out of scope for this crate")
    }
}
