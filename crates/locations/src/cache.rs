use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use time::OffsetDateTime;
use tracing::{debug, info, warn};

use crate::fallback::fallback_country_name;
use crate::record::{build_table, parse_records, sorted_records, CountryTable};
use crate::remote::{build_client, CountrySource, FetchError, HttpSource};

/// Cache files older than this are refetched.
pub const CACHE_EXPIRY: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Where the in-memory table came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableOrigin {
    Cache,
    Primary,
    Secondary,
    Empty,
}

/// Country database with an on-disk cache and two remote tiers.
///
/// Owned by the composition root for the lifetime of the session.
pub struct LocationCache {
    cache_file: PathBuf,
    primary: Box<dyn CountrySource>,
    secondary: Box<dyn CountrySource>,
    table: Option<CountryTable>,
    origin: Option<TableOrigin>,
}

impl LocationCache {
    pub fn new(
        cache_file: PathBuf,
        primary: Box<dyn CountrySource>,
        secondary: Box<dyn CountrySource>,
    ) -> Self {
        Self {
            cache_file,
            primary,
            secondary,
            table: None,
            origin: None,
        }
    }

    pub fn with_http_sources(cache_file: PathBuf) -> Result<Self, FetchError> {
        let client = build_client()?;
        Ok(Self::new(
            cache_file,
            Box::new(HttpSource::primary(client.clone())),
            Box::new(HttpSource::secondary(client)),
        ))
    }

    pub fn cache_file(&self) -> &Path {
        &self.cache_file
    }

    pub fn origin(&self) -> Option<TableOrigin> {
        self.origin
    }

    /// Display name for an alpha-2 code. Never fails: falls back to the
    /// built-in table and then to the uppercased code.
    pub fn resolve_country_name(&mut self, code: &str) -> String {
        let key = code.trim().to_lowercase();
        let table = self.load_database();
        match table.get(&key) {
            Some(record) if !record.common_name().is_empty() => record.common_name().to_string(),
            _ => fallback_country_name(&key),
        }
    }

    /// Populates the in-memory table on first use and returns it.
    pub fn load_database(&mut self) -> &CountryTable {
        if self.table.is_none() {
            let (table, origin) = self.populate();
            self.table = Some(table);
            self.origin = Some(origin);
        }
        self.table.get_or_insert_with(CountryTable::new)
    }

    /// Drops the cache file and the in-memory table, then reloads.
    pub fn force_refresh(&mut self) -> &CountryTable {
        info!("forcing location database update");
        match fs::remove_file(&self.cache_file) {
            Ok(()) => debug!("removed cache {}", self.cache_file.display()),
            Err(err) if err.kind() == ErrorKind::NotFound => {}
            Err(err) => warn!("could not remove cache {}: {err}", self.cache_file.display()),
        }
        self.table = None;
        self.origin = None;
        self.load_database()
    }

    pub fn cache_written_at(&self) -> Option<OffsetDateTime> {
        let modified = fs::metadata(&self.cache_file).ok()?.modified().ok()?;
        Some(OffsetDateTime::from(modified))
    }

    fn populate(&mut self) -> (CountryTable, TableOrigin) {
        if let Some(table) = self.read_cache() {
            return (table, TableOrigin::Cache);
        }

        match self.primary.fetch() {
            Ok(records) => {
                let table = build_table(records);
                info!("loaded {} countries from {}", table.len(), self.primary.label());
                self.persist(&table);
                return (table, TableOrigin::Primary);
            }
            Err(err) => {
                warn!("{} unavailable: {err}", self.primary.label());
                info!("falling back to {}", self.secondary.label());
            }
        }

        match self.secondary.fetch() {
            Ok(records) => {
                let table = build_table(records);
                info!("loaded {} countries from {}", table.len(), self.secondary.label());
                self.persist(&table);
                (table, TableOrigin::Secondary)
            }
            Err(err) => {
                warn!("{} unavailable: {err}", self.secondary.label());
                info!("using built-in country names");
                (CountryTable::new(), TableOrigin::Empty)
            }
        }
    }

    /// Fresh, parseable, non-empty cache contents; anything else is a miss.
    fn read_cache(&self) -> Option<CountryTable> {
        let metadata = fs::metadata(&self.cache_file).ok()?;
        let modified = metadata.modified().ok()?;
        let age = SystemTime::now()
            .duration_since(modified)
            .unwrap_or(Duration::ZERO);
        if age > CACHE_EXPIRY {
            info!("country cache expired, fetching fresh data");
            return None;
        }

        let contents = match fs::read_to_string(&self.cache_file) {
            Ok(contents) => contents,
            Err(err) => {
                warn!("failed to read cache {}: {err}", self.cache_file.display());
                return None;
            }
        };
        let records = match parse_records(&contents) {
            Ok(records) => records,
            Err(err) => {
                warn!("failed to parse cache {}: {err}", self.cache_file.display());
                return None;
            }
        };
        let table = build_table(records);
        if table.is_empty() {
            return None;
        }
        info!("loaded {} countries from cache", table.len());
        Some(table)
    }

    fn persist(&self, table: &CountryTable) {
        if let Err(err) = write_cache(&self.cache_file, table) {
            warn!("failed to cache country data: {err}");
        } else {
            debug!("country data cached at {}", self.cache_file.display());
        }
    }
}

fn write_cache(path: &Path, table: &CountryTable) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string(&sorted_records(table))?;
    fs::write(path, json)
}
