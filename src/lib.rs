//! Enrich tabular check-in records with historic daily weather.
//!
//! Given a Polars `DataFrame` with a check-in date and a latitude/longitude
//! per row, [`enrich`] (or [`WeatherEnricher::enrich`]) looks up the day's
//! maximum and minimum temperature, precipitation sum and maximum wind speed
//! from the Open-Meteo archive and appends them as four new columns.
//!
//! Rows that round to the same location (four decimal places) on the same day
//! share one request, and requests run concurrently under a fixed worker cap.

mod enricher;
mod error;
mod row_keys;
mod types;
mod utils;
mod weather_data;

pub use enricher::{enrich, WeatherEnricher};
pub use error::EnrichError;
pub use row_keys::{derive_row_keys, ColumnNames};

pub use types::daily_variable::DailyVariable;
pub use types::lookup_key::LookupKey;
pub use types::observation::{DailyWeather, Observation};
pub use types::weather_cache::WeatherCache;

pub use utils::{parse_checkin_date, round_coordinate, COORDINATE_PRECISION};

pub use weather_data::archive_client::{ArchiveClient, DEFAULT_ARCHIVE_URL, DEFAULT_TIMEOUT};
pub use weather_data::cache_builder::{CacheBuilder, DEFAULT_WORKER_LIMIT};
pub use weather_data::error::ArchiveError;
pub use weather_data::lookup::WeatherLookup;
