//! Country and city display names for tunnel locations.
//!
//! Lookups go through a tiered chain: on-disk cache, primary remote dataset,
//! secondary remote API, built-in country table, and finally the raw code.
//! Nothing in this crate surfaces an error to a name lookup.

pub mod cache;
pub mod cities;
pub mod fallback;
pub mod record;
pub mod remote;

pub use cache::{LocationCache, TableOrigin, CACHE_EXPIRY};
pub use cities::city_name;
pub use fallback::fallback_country_name;
pub use record::{CountryName, CountryRecord, CountryTable, Currency};
pub use remote::{CountrySource, FetchError, HttpSource};
