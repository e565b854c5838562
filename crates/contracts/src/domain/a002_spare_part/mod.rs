pub mod aggregate;
pub mod search;

pub use aggregate::{PartLine, PartLines, SparePart};
pub use search::{
    highlight_segments, part_search_term, Segment, SparePartSearchRequest,
    SparePartSearchResponse, MIN_PART_SEARCH_CHARS,
};
