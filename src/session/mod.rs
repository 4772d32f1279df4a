mod coordinator;
mod state;
mod view;

pub use coordinator::Coordinator;
pub use state::{SessionPhase, SessionState, Slot};
pub use view::PresenterView;
