mod acquirer;
mod error;
mod fixed;
mod http;
mod service;

pub use acquirer::acquire;
pub use error::PositionError;
pub use fixed::{FixedLocationService, NoLocationService};
pub use http::HttpLocationService;
pub use service::{LocationService, PositionOptions, new_location_service};
