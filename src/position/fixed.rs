use crate::domain::{Coordinate, PositionFix};
use crate::position::{LocationService, PositionError, PositionOptions};
use async_trait::async_trait;

/// Always reports the configured position, for hosts without positioning hardware.
#[derive(Debug)]
pub struct FixedLocationService {
    position: Coordinate,
}

impl FixedLocationService {
    pub fn new(position: Coordinate) -> Self {
        FixedLocationService { position }
    }
}

#[async_trait]
impl LocationService for FixedLocationService {
    async fn current_position(&self, _options: &PositionOptions) -> Result<PositionFix, PositionError> {
        Ok(PositionFix::now(self.position, None))
    }
}

/// Stands in when the host has no location service at all.
#[derive(Debug)]
pub struct NoLocationService;

#[async_trait]
impl LocationService for NoLocationService {
    async fn current_position(&self, _options: &PositionOptions) -> Result<PositionFix, PositionError> {
        Err(PositionError::Unsupported)
    }
}
