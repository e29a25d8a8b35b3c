//! Zone placement: pre-segmented tables onto a shared canvas.
//!
//! Wide tables span the page and go below everything placed so far. Narrow
//! tables are assigned to one of the side-by-side zones by their horizontal
//! position and stacked under that zone's cursor.

pub mod allocator;
pub mod zones;

pub use allocator::{place_page, PlacementResult, ZoneAllocator};
pub use zones::{Zone, ZoneId, ZoneRegistry};
