use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::record::{normalize_records, parse_records, CountryName, CountryRecord};

pub const PRIMARY_URL: &str =
    "https://raw.githubusercontent.com/mledoze/countries/master/countries.json";
pub const SECONDARY_URL: &str =
    "https://restcountries.com/v3.1/all?fields=name,cca2,cca3,region,subregion,capital";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("build http client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("unexpected status {status} from {url}")]
    Status { url: String, status: u16 },
    #[error("malformed payload from {url}: {source}")]
    Payload {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// A remote provider of country records.
pub trait CountrySource {
    fn label(&self) -> &str;
    fn fetch(&self) -> Result<Vec<CountryRecord>, FetchError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Schema {
    /// Bulk dataset; records already in cache shape.
    Dataset,
    /// Per-field REST API; mapped into cache shape.
    RestCountries,
}

pub struct HttpSource {
    label: &'static str,
    url: String,
    schema: Schema,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct RestCountry {
    name: CountryName,
    cca2: String,
    #[serde(default)]
    cca3: String,
    #[serde(default)]
    region: String,
    #[serde(default)]
    subregion: String,
    #[serde(default)]
    capital: Vec<String>,
}

impl From<RestCountry> for CountryRecord {
    fn from(country: RestCountry) -> Self {
        Self {
            cca2: country.cca2,
            name: country.name,
            cca3: country.cca3,
            region: country.region,
            subregion: country.subregion,
            capital: country.capital,
            currencies: Default::default(),
            timezones: Vec::new(),
        }
    }
}

pub fn build_client() -> Result<Client, FetchError> {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .user_agent(concat!("wirepilot/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(FetchError::Client)
}

impl HttpSource {
    pub fn primary(client: Client) -> Self {
        Self {
            label: "country dataset",
            url: PRIMARY_URL.to_string(),
            schema: Schema::Dataset,
            client,
        }
    }

    pub fn secondary(client: Client) -> Self {
        Self {
            label: "REST Countries API",
            url: SECONDARY_URL.to_string(),
            schema: Schema::RestCountries,
            client,
        }
    }

    fn get_text(&self) -> Result<String, FetchError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .map_err(|source| FetchError::Request {
                url: self.url.clone(),
                source,
            })?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }
        response.text().map_err(|source| FetchError::Request {
            url: self.url.clone(),
            source,
        })
    }

    fn decode(&self, body: &str) -> Result<Vec<CountryRecord>, FetchError> {
        let payload_error = |source: serde_json::Error| FetchError::Payload {
            url: self.url.clone(),
            source,
        };
        match self.schema {
            Schema::Dataset => parse_records(body).map_err(payload_error),
            Schema::RestCountries => decode_rest_countries(body).map_err(payload_error),
        }
    }
}

impl CountrySource for HttpSource {
    fn label(&self) -> &str {
        self.label
    }

    fn fetch(&self) -> Result<Vec<CountryRecord>, FetchError> {
        debug!("fetching countries from {}", self.url);
        let body = self.get_text()?;
        self.decode(&body)
    }
}

fn decode_rest_countries(body: &str) -> Result<Vec<CountryRecord>, serde_json::Error> {
    let value: serde_json::Value = serde_json::from_str(body)?;
    let countries: Vec<RestCountry> = serde_json::from_value(normalize_records(value))?;
    Ok(countries.into_iter().map(CountryRecord::from).collect())
}
