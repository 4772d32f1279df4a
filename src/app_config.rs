use crate::dataset::{DatasetSchema, DatasetSource};
use crate::domain::Coordinate;
use crate::position::PositionOptions;
use config::{Config, ConfigError};
use serde::Deserialize;
use std::env;
use std::time::Duration;

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    core: Core,
    dataset: Dataset,
    selector: Selector,
    location: Location,
}

impl AppConfig {
    /// Loads `config`, or the file named by `NEARBY_CONFIG`, with local and environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let base = env::var("NEARBY_CONFIG").unwrap_or_else(|_| "config".to_string());
        Self::load_from(&base)
    }

    pub fn load_from(name: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(config::File::with_name(name).required(true))
            .add_source(config::File::with_name("config_local").required(false))
            .add_source(config::Environment::with_prefix("NEARBY").prefix_separator("_").separator("__"))
            .build()?
            .try_deserialize()
    }

    pub fn core(&self) -> &Core {
        &self.core
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn selector(&self) -> &Selector {
        &self.selector
    }

    pub fn location(&self) -> &Location {
        &self.location
    }
}

#[derive(Debug, Deserialize)]
pub struct Core {
    event_buffer_size: usize,
}

impl Core {
    pub fn event_buffer_size(&self) -> usize {
        self.event_buffer_size
    }
}

#[derive(Debug, Deserialize)]
pub struct Dataset {
    source: DatasetSource,
    #[serde(flatten)]
    schema: DatasetSchema,
}

impl Dataset {
    pub fn source(&self) -> &DatasetSource {
        &self.source
    }

    pub fn schema(&self) -> &DatasetSchema {
        &self.schema
    }
}

#[derive(Debug, Deserialize)]
pub struct Selector {
    results: usize,
}

impl Selector {
    /// How many nearest records to show.
    pub fn results(&self) -> usize {
        self.results
    }
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(tag = "service", rename_all = "snake_case")]
pub enum Location {
    Fixed {
        position: Coordinate,
    },
    Http {
        url: String,
        #[serde(default = "default_high_accuracy")]
        high_accuracy: bool,
        #[serde(with = "humantime_serde", default = "default_timeout")]
        timeout: Duration,
    },
    #[serde(rename = "none")]
    Disabled,
}

impl Location {
    pub fn options(&self) -> PositionOptions {
        match self {
            Location::Http { high_accuracy, .. } => PositionOptions {
                high_accuracy: *high_accuracy,
            },
            _ => PositionOptions::default(),
        }
    }
}

fn default_high_accuracy() -> bool {
    true
}

fn default_timeout() -> Duration {
    Duration::from_secs(10)
}

#[cfg(test)]
pub struct AppConfigBuilder {
    config: AppConfig,
}

#[cfg(test)]
impl AppConfigBuilder {
    pub fn new() -> Self {
        use crate::dataset::{AttributeColumn, ColumnAliases};

        AppConfigBuilder {
            config: AppConfig {
                core: Core { event_buffer_size: 4 },
                dataset: Dataset {
                    source: DatasetSource::from(format!("{}/tests/resources/hospitals.csv", env!("CARGO_MANIFEST_DIR"))),
                    schema: DatasetSchema {
                        delimiter: ',',
                        not_available: "N/A".to_string(),
                        latitude: ColumnAliases::new(["LATITUDE"]),
                        longitude: ColumnAliases::new(["LONGITUDE"]),
                        attributes: vec![
                            AttributeColumn::new("name", ["HOSPITAL_NAME"]),
                            AttributeColumn::new("address", ["ADDRESS"]),
                            AttributeColumn::new("fax", ["FAX"]),
                        ],
                    },
                },
                selector: Selector { results: 1 },
                location: Location::Fixed {
                    position: Coordinate::new(12.97, 77.59).unwrap(),
                },
            },
        }
    }

    pub fn dataset_source(mut self, source: DatasetSource) -> Self {
        self.config.dataset.source = source;
        self
    }

    pub fn results(mut self, results: usize) -> Self {
        self.config.selector.results = results;
        self
    }

    pub fn location(mut self, location: Location) -> Self {
        self.config.location = location;
        self
    }

    pub fn build(self) -> AppConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{ColumnAliases, parse_dataset};
    use crate::geo::{RankedRecord, select_nearest};
    use config::FileFormat;
    use pretty_assertions::assert_eq;

    fn parse(toml: &str) -> Result<AppConfig, ConfigError> {
        Config::builder()
            .add_source(config::File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    #[test]
    fn parses_the_hospital_profile() -> Result<(), ConfigError> {
        let config = parse(include_str!("../config.toml"))?;

        assert_eq!(config.selector().results(), 1);
        assert_eq!(config.dataset().source(), &DatasetSource::from("data/hospitals.csv"));
        let schema = config.dataset().schema();
        assert_eq!(schema.not_available, "N/A");
        assert_eq!(schema.latitude, ColumnAliases::new(["LATITUDE", "Latitude"]));
        let names = schema.attributes.iter().map(|a| a.name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, vec!["name", "address", "postal_code", "phone", "fax"]);
        Ok(())
    }

    #[test]
    fn parses_the_blood_bank_profile() -> Result<(), ConfigError> {
        let config = parse(include_str!("../profiles/blood_banks.toml"))?;

        assert_eq!(config.selector().results(), 3);
        assert_eq!(config.dataset().source(), &DatasetSource::from("data/blood_banks.csv"));
        Ok(())
    }

    /// Parses `data` with the profile's schema and ranks it from the profile's fixed position.
    fn select_with_profile(config: &AppConfig, data: &str) -> (usize, Vec<RankedRecord>) {
        let Location::Fixed { position } = config.location() else {
            panic!("expected a fixed position in the profile, found {:?}", config.location());
        };
        let dataset = parse_dataset(data, config.dataset().schema()).unwrap();
        (dataset.len(), select_nearest(position, &dataset, config.selector().results()))
    }

    fn attribute<'a>(ranked: &'a RankedRecord, name: &str) -> &'a str {
        ranked.record().attribute(name).unwrap()
    }

    #[test]
    fn hospital_profile_selects_from_the_shipped_hospitals() -> Result<(), ConfigError> {
        let config = parse(include_str!("../config.toml"))?;

        let (records, nearest) = select_with_profile(&config, include_str!("../data/hospitals.csv"));

        // The row without a latitude is dropped
        assert_eq!(records, 6);
        assert_eq!(nearest.len(), 1);
        assert_eq!(attribute(&nearest[0], "name"), "Bowring and Lady Curzon Hospital");
        assert_eq!(attribute(&nearest[0], "address"), "Shivaji Nagar");
        assert_eq!(attribute(&nearest[0], "postal_code"), "560001");
        assert_eq!(attribute(&nearest[0], "phone"), "080-25591325");
        assert_eq!(attribute(&nearest[0], "fax"), "080-25591326");
        Ok(())
    }

    #[test]
    fn hospital_profile_resolves_every_column_of_the_shipped_hospitals() -> Result<(), ConfigError> {
        let config = parse(include_str!("../config.toml"))?;
        let dataset = parse_dataset(include_str!("../data/hospitals.csv"), config.dataset().schema()).unwrap();

        for record in dataset.records() {
            assert_ne!(record.attribute("name"), Some("N/A"));
            assert_ne!(record.attribute("address"), Some("N/A"));
            assert_ne!(record.attribute("postal_code"), Some("N/A"));
        }
        let with_phone = dataset.records().iter().filter(|r| r.attribute("phone") != Some("N/A")).count();
        assert_eq!(with_phone, 5);
        Ok(())
    }

    #[test]
    fn blood_bank_profile_selects_three_from_the_shipped_blood_banks() -> Result<(), ConfigError> {
        let config = parse(include_str!("../profiles/blood_banks.toml"))?;

        let (records, nearest) = select_with_profile(&config, include_str!("../data/blood_banks.csv"));

        // The row without coordinates is dropped
        assert_eq!(records, 5);
        assert_eq!(nearest.len(), 3);
        let names = nearest.iter().map(|r| attribute(r, "name")).collect::<Vec<_>>();
        assert_eq!(
            names,
            vec!["Indian Red Cross Blood Bank", "Bowring Hospital Blood Bank", "Victoria Hospital Blood Bank"]
        );
        let phones = nearest.iter().map(|r| attribute(r, "phone")).collect::<Vec<_>>();
        assert_eq!(phones, vec!["080-22268435", "080-25591362", "080-26703300"]);
        assert_eq!(attribute(&nearest[0], "address"), "Race Course Road");
        Ok(())
    }

    #[test]
    fn blood_bank_profile_substitutes_a_blank_contact_number() -> Result<(), ConfigError> {
        let config = parse(include_str!("../profiles/blood_banks.toml"))?;
        let dataset = parse_dataset(include_str!("../data/blood_banks.csv"), config.dataset().schema()).unwrap();

        let lions = dataset.records().iter().find(|r| r.attribute("name") == Some("Lions Blood Bank")).unwrap();
        assert_eq!(lions.attribute("phone"), Some("N/A"));
        assert_eq!(lions.attribute("address"), Some("Rajajinagar"));
        Ok(())
    }

    #[test]
    fn parses_an_http_location_service_with_defaults() -> Result<(), ConfigError> {
        let config = parse(
            r#"
            core = { event_buffer_size = 8 }
            selector = { results = 2 }
            dataset = { source = "https://example.com/banks.csv", latitude = ["LAT"], longitude = ["LNG"] }
            location = { service = "http", url = "http://localhost:8080/position", timeout = "3s" }
            "#,
        )?;

        assert_eq!(
            config.location(),
            &Location::Http {
                url: "http://localhost:8080/position".to_string(),
                high_accuracy: true,
                timeout: Duration::from_secs(3),
            }
        );
        assert_eq!(config.location().options(), PositionOptions { high_accuracy: true });
        assert_eq!(config.dataset().schema().delimiter, ',');
        assert!(config.dataset().schema().attributes.is_empty());
        Ok(())
    }

    #[test]
    fn parses_a_disabled_location_service() -> Result<(), ConfigError> {
        let config = parse(
            r#"
            core = { event_buffer_size = 8 }
            selector = { results = 1 }
            dataset = { source = "data.csv", latitude = ["LAT"], longitude = ["LNG"] }
            location = { service = "none" }
            "#,
        )?;

        assert_eq!(config.location(), &Location::Disabled);
        Ok(())
    }

    #[test]
    fn rejects_a_fixed_position_out_of_range() {
        let result = parse(
            r#"
            core = { event_buffer_size = 8 }
            selector = { results = 1 }
            dataset = { source = "data.csv", latitude = ["LAT"], longitude = ["LNG"] }
            location = { service = "fixed", position = { latitude = 100.0, longitude = 0.0 } }
            "#,
        );

        let err = result.unwrap_err();
        assert!(err.to_string().contains("invalid latitude"), "unexpected error: {}", err);
    }
}
