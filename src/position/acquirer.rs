use crate::domain::events::SessionEvent;
use crate::position::{LocationService, PositionOptions};
use tokio::sync::mpsc::Sender;
use tracing::{info, instrument, warn};

/// Requests a single position from `service` and reports the outcome to the session.
///
/// There is no retry. A failure is reported once and is final for the session.
#[instrument(skip_all)]
pub async fn acquire(service: &dyn LocationService, options: PositionOptions, tx: Sender<SessionEvent>) {
    info!(high_accuracy = options.high_accuracy, "📍 Acquiring position...");
    let event = match service.current_position(&options).await {
        Ok(fix) => {
            info!(accuracy_m = ?fix.accuracy_m, acquired_at = %fix.acquired_at, "📍 Acquiring position... OK, {}", fix.coordinate);
            SessionEvent::PositionAcquired(fix)
        }
        Err(err) => {
            warn!("📍 Acquiring position... failed, {:?}", err);
            SessionEvent::PositionFailed(err)
        }
    };

    if let Err(err) = tx.send(event).await {
        warn!("⚠️ Could not report the position to the session: {}", err);
    }
}
