mod distance;
mod selector;

pub use distance::distance_km;
pub use selector::{RankedRecord, select_nearest};
