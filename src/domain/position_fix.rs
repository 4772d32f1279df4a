use crate::domain::Coordinate;
use chrono::{DateTime, Utc};

/// The answer of a location service to a single position request.
#[derive(Clone, Debug, PartialEq)]
pub struct PositionFix {
    pub coordinate: Coordinate,
    pub accuracy_m: Option<f64>,
    pub acquired_at: DateTime<Utc>,
}

impl PositionFix {
    pub fn now(coordinate: Coordinate, accuracy_m: Option<f64>) -> Self {
        PositionFix {
            coordinate,
            accuracy_m,
            acquired_at: Utc::now(),
        }
    }
}
