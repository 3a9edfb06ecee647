mod grid_index;

pub use grid_index::{CellKey, Footprint, GridIndex, SegmentKey, MAX_FOOTPRINT_CELLS};
