use crate::dataset::{DatasetError, DatasetSchema, parse_dataset};
use crate::domain::Dataset;
use crate::domain::events::SessionEvent;
use reqwest::Client;
use serde::Deserialize;
use std::fmt::Display;
use std::path::PathBuf;
use tokio::sync::mpsc::Sender;
use tokio::{fs, task};
use tracing::{info, instrument, warn};

/// Where the delimited text of a dataset is read from.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(from = "String")]
pub enum DatasetSource {
    File(PathBuf),
    Url(String),
}

impl From<String> for DatasetSource {
    fn from(value: String) -> Self {
        if value.starts_with("http://") || value.starts_with("https://") {
            DatasetSource::Url(value)
        } else {
            DatasetSource::File(PathBuf::from(value))
        }
    }
}

impl From<&str> for DatasetSource {
    fn from(value: &str) -> Self {
        DatasetSource::from(value.to_string())
    }
}

impl Display for DatasetSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatasetSource::File(path) => write!(f, "{}", path.display()),
            DatasetSource::Url(url) => write!(f, "{}", url),
        }
    }
}

/// Reads the text behind `source` once and parses it with `schema`.
#[instrument(skip_all, fields(source = %source))]
pub async fn load_dataset(source: &DatasetSource, schema: &DatasetSchema, client: &Client) -> Result<Dataset, DatasetError> {
    info!("📁 Loading dataset...");
    let data = match read_bytes(source, client).await {
        Ok(data) => data,
        Err(err) => {
            warn!("📁 Loading dataset... failed, {}", err);
            return Err(err);
        }
    };

    let schema = schema.clone();
    let dataset = task::spawn_blocking(move || parse_dataset(&data, &schema)).await??;

    if dataset.is_empty() {
        warn!("📁 Loading dataset... OK, but no record has usable coordinates");
    } else {
        info!("📁 Loading dataset... OK, {} record(s)", dataset.len());
    }
    Ok(dataset)
}

/// Loads the dataset once and reports the outcome to the session. There is no retry.
pub async fn load_into_session(source: DatasetSource, schema: DatasetSchema, client: Client, tx: Sender<SessionEvent>) {
    let event = match load_dataset(&source, &schema, &client).await {
        Ok(dataset) => SessionEvent::DatasetLoaded(dataset),
        Err(err) => SessionEvent::DatasetFailed(err),
    };

    if let Err(err) = tx.send(event).await {
        warn!("⚠️ Could not report the dataset to the session: {}", err);
    }
}

/// Returns the raw bytes behind `source`. Decoding is left to the parser.
async fn read_bytes(source: &DatasetSource, client: &Client) -> Result<Vec<u8>, DatasetError> {
    match source {
        DatasetSource::File(path) => fs::read(path).await.map_err(|e| DatasetError::Io {
            source: e,
            path: path.clone(),
        }),
        DatasetSource::Url(url) => {
            let fetch_error = |e| DatasetError::Fetch { source: e, url: url.clone() };
            let response = client.get(url).send().await.and_then(|r| r.error_for_status()).map_err(fetch_error)?;
            Ok(response.bytes().await.map_err(fetch_error)?.to_vec())
        }
    }
}
