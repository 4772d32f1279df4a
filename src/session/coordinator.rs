use crate::domain::events::SessionEvent;
use crate::session::{PresenterView, SessionState};
use tokio::sync::mpsc::Receiver;
use tokio::sync::watch;
use tokio::sync::watch::{Receiver as WatchReceiver, Sender as WatchSender};
use tracing::{debug, info, instrument};

/// Owns the session state and applies completion events to it, one transition per event.
///
/// A fresh [`PresenterView`] is published after every transition.
#[derive(Debug)]
pub struct Coordinator {
    state: SessionState,
    rx: Receiver<SessionEvent>,
    view_tx: WatchSender<PresenterView>,
    view_rx: WatchReceiver<PresenterView>,
}

impl Coordinator {
    pub fn new(rx: Receiver<SessionEvent>, k: usize) -> Self {
        let state = SessionState::new(k);
        let (view_tx, view_rx) = watch::channel::<PresenterView>(state.view());

        Coordinator { state, rx, view_tx, view_rx }
    }

    pub fn views(&self) -> WatchReceiver<PresenterView> {
        self.view_rx.clone()
    }

    /// Processes events until every sender is dropped, then hands back the final state.
    #[instrument(skip(self))]
    pub async fn listen(mut self) -> SessionState {
        self.state.start();
        self.publish();

        while let Some(event) = self.rx.recv().await {
            debug!("🔵 Received event: {:?}", event);
            match event {
                SessionEvent::PositionAcquired(fix) => self.state.position_acquired(fix),
                SessionEvent::PositionFailed(error) => self.state.position_failed(error),
                SessionEvent::DatasetLoaded(dataset) => self.state.dataset_loaded(dataset),
                SessionEvent::DatasetFailed(error) => self.state.dataset_failed(error),
            }
            self.publish();
        }

        info!("🔵 Session ended in phase {:?}", self.state.phase());
        self.state
    }

    fn publish(&self) {
        self.view_tx.send(self.state.view()).unwrap_or_default();
    }
}
