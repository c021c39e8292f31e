//! Tile Group OBU payload.
//!
//! Declared for API completeness; tile data parsing and reconstruction sit
//! above this crate. Not reachable from [`super::get_next_obu`] or any
//! public entry point.

#[derive(Debug, Clone)]
pub struct TileGroup {}

impl TileGroup {
    pub fn decode(_payload: &[u8]) -> Self {
        unimplemented!("tile group parsing is out of scope for this crate")
    }
}
