use crate::domain::LocationRecord;
use std::sync::Arc;

/// The records of one load cycle, in source row order.
///
/// There is no way to mutate a dataset after construction. A reload builds a new one.
#[derive(Clone, Debug, Default)]
pub struct Dataset {
    records: Arc<[Arc<LocationRecord>]>,
}

impl Dataset {
    pub fn new(records: Vec<LocationRecord>) -> Self {
        Dataset {
            records: records.into_iter().map(Arc::new).collect(),
        }
    }

    pub fn records(&self) -> &[Arc<LocationRecord>] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
