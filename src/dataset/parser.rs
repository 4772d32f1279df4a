use crate::dataset::{DatasetError, DatasetSchema};
use crate::domain::{Coordinate, Dataset, LocationRecord};
use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, info, instrument, warn};

/// Parses delimited UTF-8 `data` with a header row into a [`Dataset`].
///
/// Rows without a usable latitude and longitude are dropped. Missing display attributes are
/// filled with the schema's sentinel. Any syntax or encoding error fails the whole parse.
#[instrument(skip_all)]
pub fn parse_dataset(data: impl AsRef<[u8]>, schema: &DatasetSchema) -> Result<Dataset, DatasetError> {
    if !schema.delimiter.is_ascii() {
        return Err(DatasetError::InvalidDelimiter(schema.delimiter));
    }

    let mut reader = ReaderBuilder::new()
        .delimiter(schema.delimiter as u8)
        .has_headers(true)
        .from_reader(data.as_ref());

    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        return Err(DatasetError::MissingHeader);
    }

    let columns = ResolvedColumns::new(&headers, schema);
    if columns.latitude.is_empty() || columns.longitude.is_empty() {
        warn!("⚠️ No latitude or longitude column found in header '{}', every row will be dropped", headers.iter().collect::<Vec<_>>().join(","));
    }

    let mut records = Vec::new();
    let mut dropped = 0;
    for (index, row) in reader.records().enumerate() {
        let row = row?;
        match columns.to_record(&row, &schema.not_available) {
            Some(record) => records.push(record),
            None => {
                // +2 for the header and one-based numbering
                debug!("Dropping row {} without valid coordinates", index + 2);
                dropped += 1;
            }
        }
    }

    info!("📄 Parsed dataset, {} record(s) kept, {} dropped", records.len(), dropped);
    Ok(Dataset::new(records))
}

struct ResolvedColumns<'a> {
    latitude: Vec<usize>,
    longitude: Vec<usize>,
    attributes: Vec<(&'a str, Vec<usize>)>,
}

impl<'a> ResolvedColumns<'a> {
    fn new(headers: &StringRecord, schema: &'a DatasetSchema) -> Self {
        ResolvedColumns {
            latitude: schema.latitude.resolve(headers),
            longitude: schema.longitude.resolve(headers),
            attributes: schema
                .attributes
                .iter()
                .map(|attribute| (attribute.name.as_str(), attribute.aliases.resolve(headers)))
                .collect(),
        }
    }

    fn to_record(&self, row: &StringRecord, not_available: &str) -> Option<LocationRecord> {
        let latitude = parse_degrees(first_present(row, &self.latitude)?)?;
        let longitude = parse_degrees(first_present(row, &self.longitude)?)?;
        let coordinate = Coordinate::new(latitude, longitude).ok()?;

        let attributes = self
            .attributes
            .iter()
            .map(|(name, indexes)| {
                let value = first_present(row, indexes).unwrap_or(not_available);
                (name.to_string(), value.to_string())
            })
            .collect();

        Some(LocationRecord::new(coordinate, attributes))
    }
}

/// Returns the first non-blank cell among `indexes`.
fn first_present<'r>(row: &'r StringRecord, indexes: &[usize]) -> Option<&'r str> {
    indexes.iter().filter_map(|&index| row.get(index)).find(|cell| !cell.trim().is_empty())
}

fn parse_degrees(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok().filter(|value| value.is_finite())
}
