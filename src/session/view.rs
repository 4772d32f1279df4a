use crate::domain::Coordinate;
use crate::geo::RankedRecord;

/// Everything a presenter needs to render one frame of a session.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PresenterView {
    /// At least one acquisition is still in flight.
    pub loading: bool,
    pub error: Option<String>,
    pub user_position: Option<Coordinate>,
    /// Size of the dataset once loaded, so partial progress can be shown.
    pub records_loaded: Option<usize>,
    pub results: Vec<RankedRecord>,
}
