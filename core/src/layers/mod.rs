pub use self::base::{base_tile_source, XyzTileSource};
pub use self::offline::{LayerError, OfflineLayers, NO_LAYER};

pub mod base;
pub mod offline;
