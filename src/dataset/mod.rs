mod error;
mod loader;
mod parser;
mod schema;

pub use error::{DatasetError, DatasetErrorKind};
pub use loader::{DatasetSource, load_dataset, load_into_session};
pub use parser::parse_dataset;
pub use schema::{AttributeColumn, ColumnAliases, DatasetSchema};
