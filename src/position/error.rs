use thiserror::Error;

/// Why a location service could not produce a position. Every variant ends the session.
#[derive(Error, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PositionError {
    #[error("User denied the request for geolocation.")]
    PermissionDenied,
    #[error("The location service could not be reached.")]
    ServiceUnavailable,
    #[error("Location information is unavailable.")]
    PositionUnavailable,
    #[error("The request to get user location timed out.")]
    Timeout,
    #[error("Geolocation is not supported on this host.")]
    Unsupported,
}

impl PositionError {
    /// Maps the error codes of the W3C Geolocation API.
    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            1 => Some(PositionError::PermissionDenied),
            2 => Some(PositionError::PositionUnavailable),
            3 => Some(PositionError::Timeout),
            _ => None,
        }
    }
}
