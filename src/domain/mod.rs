mod coordinate;
mod dataset;
pub mod events;
mod location_record;
mod position_fix;

pub use coordinate::{Coordinate, CoordinateError};
pub use dataset::Dataset;
pub use location_record::LocationRecord;
pub use position_fix::PositionFix;
