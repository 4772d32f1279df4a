use crate::domain::{Coordinate, Dataset, LocationRecord};
use crate::geo::distance_km;
use ordered_float::OrderedFloat;
use std::sync::Arc;

/// A dataset record annotated with its distance to the position it was ranked against.
///
/// Only [`select_nearest`] creates these.
#[derive(Clone, Debug, PartialEq)]
pub struct RankedRecord {
    record: Arc<LocationRecord>,
    distance_km: f64,
}

impl RankedRecord {
    pub fn record(&self) -> &LocationRecord {
        &self.record
    }

    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }
}

/// Returns the `k` records of `dataset` closest to `position`, nearest first.
///
/// Every record is measured; records at equal distance keep their dataset order.
pub fn select_nearest(position: &Coordinate, dataset: &Dataset, k: usize) -> Vec<RankedRecord> {
    let mut ranked = dataset
        .records()
        .iter()
        .map(|record| RankedRecord {
            distance_km: distance_km(position, record.coordinate()),
            record: record.clone(),
        })
        .collect::<Vec<_>>();

    // sort_by_key is stable, which is what keeps ties in dataset order
    ranked.sort_by_key(|ranked| OrderedFloat(ranked.distance_km));
    ranked.truncate(k);
    ranked
}
