use crate::domain::Coordinate;

/// A single point of interest from the dataset: where it is and how to display it.
///
/// Attributes keep the order in which they were configured. Absent values hold the configured
/// "not available" sentinel rather than being left out.
#[derive(Clone, Debug, PartialEq)]
pub struct LocationRecord {
    coordinate: Coordinate,
    attributes: Vec<(String, String)>,
}

impl LocationRecord {
    pub fn new(coordinate: Coordinate, attributes: Vec<(String, String)>) -> Self {
        LocationRecord { coordinate, attributes }
    }

    pub fn coordinate(&self) -> &Coordinate {
        &self.coordinate
    }

    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.iter().find(|(key, _)| key == name).map(|(_, value)| value.as_str())
    }
}
