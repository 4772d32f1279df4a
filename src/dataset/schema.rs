use csv::StringRecord;
use serde::Deserialize;

/// Header names that may hold the same semantic field, in order of preference.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct ColumnAliases(Vec<String>);

impl ColumnAliases {
    pub fn new<S: Into<String>>(aliases: impl IntoIterator<Item = S>) -> Self {
        ColumnAliases(aliases.into_iter().map(Into::into).collect())
    }

    /// Returns the indexes of all aliases present in `headers`, in alias order. Matching is exact.
    pub(super) fn resolve(&self, headers: &StringRecord) -> Vec<usize> {
        self.0
            .iter()
            .filter_map(|alias| headers.iter().position(|header| header == alias))
            .collect()
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct AttributeColumn {
    pub name: String,
    pub aliases: ColumnAliases,
}

impl AttributeColumn {
    pub fn new<S: Into<String>>(name: &str, aliases: impl IntoIterator<Item = S>) -> Self {
        AttributeColumn {
            name: name.to_string(),
            aliases: ColumnAliases::new(aliases),
        }
    }
}

/// Describes how the columns of a delimited text map onto a [`crate::domain::LocationRecord`].
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct DatasetSchema {
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
    #[serde(default = "default_not_available")]
    pub not_available: String,
    pub latitude: ColumnAliases,
    pub longitude: ColumnAliases,
    #[serde(default)]
    pub attributes: Vec<AttributeColumn>,
}

fn default_delimiter() -> char {
    ','
}

fn default_not_available() -> String {
    "N/A".to_string()
}
