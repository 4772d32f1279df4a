use crate::dataset::{DatasetError, DatasetErrorKind};
use crate::domain::{Dataset, PositionFix};
use crate::geo::{RankedRecord, select_nearest};
use crate::position::PositionError;
use crate::session::PresenterView;
use tracing::{debug, info, warn};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SessionPhase {
    Idle,
    /// Position and dataset are being acquired in parallel.
    Awaiting,
    Ready,
    Selecting,
    Selected,
    PositionError(PositionError),
    DatasetError(DatasetErrorKind),
}

impl SessionPhase {
    pub fn is_terminal_error(&self) -> bool {
        matches!(self, SessionPhase::PositionError(_) | SessionPhase::DatasetError(_))
    }
}

/// The outcome so far of one of the two acquisitions.
#[derive(Debug)]
pub enum Slot<T, E> {
    Pending,
    Ready(T),
    Failed(E),
}

impl<T, E> Slot<T, E> {
    pub fn value(&self) -> Option<&T> {
        match self {
            Slot::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Slot::Pending)
    }

    fn is_failed(&self) -> bool {
        matches!(self, Slot::Failed(_))
    }
}

/// The state of one session: both acquisitions, the phase and the current nearest records.
///
/// Each completion event maps onto exactly one transition method. The first failure wins the phase
/// and is final, but the other acquisition still records its outcome.
#[derive(Debug)]
pub struct SessionState {
    phase: SessionPhase,
    position: Slot<PositionFix, PositionError>,
    dataset: Slot<Dataset, DatasetError>,
    results: Vec<RankedRecord>,
    k: usize,
}

impl SessionState {
    pub fn new(k: usize) -> Self {
        SessionState {
            phase: SessionPhase::Idle,
            position: Slot::Pending,
            dataset: Slot::Pending,
            results: Vec::new(),
            k,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn position(&self) -> &Slot<PositionFix, PositionError> {
        &self.position
    }

    pub fn dataset(&self) -> &Slot<Dataset, DatasetError> {
        &self.dataset
    }

    pub fn results(&self) -> &[RankedRecord] {
        &self.results
    }

    pub fn start(&mut self) {
        if self.phase == SessionPhase::Idle {
            self.set_phase(SessionPhase::Awaiting);
        }
    }

    pub fn position_acquired(&mut self, fix: PositionFix) {
        if self.position.is_failed() {
            warn!("⚠️ Ignoring position {}, position acquisition already failed", fix.coordinate);
            return;
        }
        self.position = Slot::Ready(fix);
        self.advance();
    }

    pub fn position_failed(&mut self, error: PositionError) {
        if self.position.value().is_some() || self.position.is_failed() {
            warn!("⚠️ Ignoring late position failure {:?}", error);
            return;
        }
        self.position = Slot::Failed(error);
        self.fail(SessionPhase::PositionError(error));
    }

    pub fn dataset_loaded(&mut self, dataset: Dataset) {
        if self.dataset.is_failed() {
            warn!("⚠️ Ignoring dataset of {} record(s), dataset loading already failed", dataset.len());
            return;
        }
        self.dataset = Slot::Ready(dataset);
        self.advance();
    }

    pub fn dataset_failed(&mut self, error: DatasetError) {
        if self.dataset.value().is_some() || self.dataset.is_failed() {
            warn!("⚠️ Ignoring late dataset failure: {}", error);
            return;
        }
        let kind = error.kind();
        self.dataset = Slot::Failed(error);
        self.fail(SessionPhase::DatasetError(kind));
    }

    pub fn view(&self) -> PresenterView {
        let error = match self.phase {
            SessionPhase::PositionError(error) => Some(error.to_string()),
            SessionPhase::DatasetError(_) => match &self.dataset {
                Slot::Failed(error) => Some(error.user_message()),
                _ => None,
            },
            _ => None,
        };

        PresenterView {
            loading: self.position.is_pending() || self.dataset.is_pending(),
            error,
            user_position: self.position.value().map(|fix| fix.coordinate),
            records_loaded: self.dataset.value().map(Dataset::len),
            results: self.results.clone(),
        }
    }

    fn fail(&mut self, phase: SessionPhase) {
        if self.phase.is_terminal_error() {
            debug!("Session already ended in {:?}, keeping it", self.phase);
            return;
        }
        self.results.clear();
        self.set_phase(phase);
    }

    /// Runs the selection once both inputs are present, and again whenever one of them is replaced.
    fn advance(&mut self) {
        if self.phase.is_terminal_error() {
            return;
        }
        if self.phase == SessionPhase::Idle {
            self.start();
        }

        let (Some(fix), Some(dataset)) = (self.position.value(), self.dataset.value()) else {
            return;
        };
        let (position, dataset) = (fix.coordinate, dataset.clone());

        if self.phase == SessionPhase::Awaiting {
            self.set_phase(SessionPhase::Ready);
        }

        self.set_phase(SessionPhase::Selecting);
        self.results = select_nearest(&position, &dataset, self.k);
        info!("🎯 Selected {} of {} record(s) nearest to {}", self.results.len(), dataset.len(), position);
        self.set_phase(SessionPhase::Selected);
    }

    fn set_phase(&mut self, phase: SessionPhase) {
        debug!("Session phase {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
    }
}
