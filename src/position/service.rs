use crate::app_config::Location;
use crate::domain::PositionFix;
use crate::position::{FixedLocationService, HttpLocationService, NoLocationService, PositionError};
use async_trait::async_trait;
use std::fmt::Debug;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PositionOptions {
    pub high_accuracy: bool,
}

impl Default for PositionOptions {
    fn default() -> Self {
        PositionOptions { high_accuracy: true }
    }
}

/// A host facility that answers "where am I" once per call.
#[async_trait]
pub trait LocationService: Debug + Send + Sync {
    async fn current_position(&self, options: &PositionOptions) -> Result<PositionFix, PositionError>;
}

pub fn new_location_service(config: &Location) -> Result<Box<dyn LocationService>, reqwest::Error> {
    let service: Box<dyn LocationService> = match config {
        Location::Fixed { position } => Box::new(FixedLocationService::new(*position)),
        Location::Http { url, timeout, .. } => Box::new(HttpLocationService::new(url, *timeout)?),
        Location::Disabled => Box::new(NoLocationService),
    };
    Ok(service)
}
