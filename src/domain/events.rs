use crate::dataset::DatasetError;
use crate::domain::{Dataset, PositionFix};
use crate::position::PositionError;

/// Completion of one of the two independent acquisitions of a session.
#[derive(Debug)]
pub enum SessionEvent {
    PositionAcquired(PositionFix),
    PositionFailed(PositionError),
    DatasetLoaded(Dataset),
    DatasetFailed(DatasetError),
}
