use crate::domain::{Coordinate, PositionFix};
use crate::position::{LocationService, PositionError, PositionOptions};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Asks a remote location service for the current position.
///
/// The service answers `GET {url}?enableHighAccuracy=true` with either a position body
/// (`latitude`, `longitude` and an optional `accuracy` in meters) or an error body carrying a
/// W3C Geolocation error `code`. Responses without an error body are classified by status.
#[derive(Debug)]
pub struct HttpLocationService {
    client: Client,
    url: String,
}

#[derive(Debug, Deserialize)]
struct PositionResponse {
    latitude: f64,
    longitude: f64,
    accuracy: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    code: u16,
    message: Option<String>,
}

impl HttpLocationService {
    /// `timeout` is the service's own limit; requests exceeding it fail with [`PositionError::Timeout`].
    pub fn new(url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(HttpLocationService { client, url: url.to_string() })
    }
}

#[async_trait]
impl LocationService for HttpLocationService {
    #[instrument(skip(self), fields(url = %self.url))]
    async fn current_position(&self, options: &PositionOptions) -> Result<PositionFix, PositionError> {
        let response = self
            .client
            .get(&self.url)
            .query(&[("enableHighAccuracy", options.high_accuracy)])
            .send()
            .await
            .map_err(classify_request_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(classify_request_error)?;

        if let Ok(error) = serde_json::from_slice::<ErrorResponse>(&body) {
            debug!(status = %status, code = error.code, "Location service reported: {}", error.message.as_deref().unwrap_or("no message"));
            if let Some(position_error) = PositionError::from_code(error.code) {
                return Err(position_error);
            }
        }

        if !status.is_success() {
            return Err(classify_status(status));
        }

        let position = serde_json::from_slice::<PositionResponse>(&body).map_err(|e| {
            warn!("⚠️ Unreadable position from location service: {}", e);
            PositionError::PositionUnavailable
        })?;

        let coordinate = Coordinate::new(position.latitude, position.longitude).map_err(|e| {
            warn!("⚠️ Location service returned {}", e);
            PositionError::PositionUnavailable
        })?;

        Ok(PositionFix::now(coordinate, position.accuracy))
    }
}

fn classify_request_error(error: reqwest::Error) -> PositionError {
    if error.is_timeout() {
        PositionError::Timeout
    } else {
        warn!("⚠️ Location service request failed: {}", error);
        PositionError::ServiceUnavailable
    }
}

fn classify_status(status: StatusCode) -> PositionError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => PositionError::PermissionDenied,
        StatusCode::NOT_FOUND | StatusCode::UNPROCESSABLE_ENTITY => PositionError::PositionUnavailable,
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => PositionError::Timeout,
        _ => PositionError::ServiceUnavailable,
    }
}
