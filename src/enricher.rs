//! The main entry point: joins historic daily weather onto a `DataFrame` of
//! check-in records.

use crate::error::EnrichError;
use crate::row_keys::{derive_row_keys, ColumnNames};
use crate::types::daily_variable::DailyVariable;
use crate::types::lookup_key::LookupKey;
use crate::types::weather_cache::WeatherCache;
use crate::weather_data::archive_client::{ArchiveClient, DEFAULT_ARCHIVE_URL, DEFAULT_TIMEOUT};
use crate::weather_data::cache_builder::{CacheBuilder, DEFAULT_WORKER_LIMIT};
use crate::weather_data::lookup::WeatherLookup;
use bon::bon;
use log::info;
use polars::prelude::{Column, DataFrame};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

/// Adds `temp_max`, `temp_min`, `precip_mm` and `wind_max` columns to frames
/// of check-in records.
///
/// Every call to [`WeatherEnricher::enrich`] derives a lookup key per row,
/// fetches each distinct key once through a [`CacheBuilder`], and appends the
/// results in row order. Rows whose weather could not be fetched get nulls.
///
/// Create one with [`WeatherEnricher::builder()`] to use the Open-Meteo
/// archive, or [`WeatherEnricher::with_lookup()`] to supply another
/// [`WeatherLookup`].
///
/// # Examples
///
/// ```no_run
/// use polars::prelude::*;
/// use weather_enrich::WeatherEnricher;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let checkins = df!(
///     "checkin_date" => ["2023-06-01"],
///     "business_lat" => [40.7128],
///     "business_long" => [-74.0060]
/// )?;
///
/// let enricher = WeatherEnricher::builder()
///     .worker_limit(8)
///     .show_progress(true)
///     .build()?;
/// let enriched = enricher.enrich(&checkins).await?;
/// println!("{}", enriched);
/// # Ok(())
/// # }
/// ```
pub struct WeatherEnricher<L: WeatherLookup = ArchiveClient> {
    columns: ColumnNames,
    cache_builder: CacheBuilder<L>,
}

#[bon]
impl WeatherEnricher<ArchiveClient> {
    /// Creates an enricher backed by the Open-Meteo archive.
    ///
    /// # Arguments
    ///
    /// * `.archive_url(String)`: Archive endpoint. Defaults to [`DEFAULT_ARCHIVE_URL`].
    /// * `.timeout(Duration)`: Per-request timeout. Defaults to 10 seconds.
    /// * `.worker_limit(usize)`: Maximum lookups in flight. Defaults to 32.
    /// * `.show_progress(bool)`: Draw a progress bar while fetching. Defaults to `false`.
    /// * `.columns(ColumnNames)`: Input column names. Defaults to [`ColumnNames::default`].
    ///
    /// # Errors
    ///
    /// Returns [`EnrichError::HttpClient`] if the HTTP client cannot be built.
    #[builder]
    pub fn new(
        archive_url: Option<String>,
        timeout: Option<Duration>,
        worker_limit: Option<usize>,
        show_progress: Option<bool>,
        columns: Option<ColumnNames>,
    ) -> Result<Self, EnrichError> {
        let client = ArchiveClient::with_base_url(
            archive_url.unwrap_or_else(|| DEFAULT_ARCHIVE_URL.to_string()),
            timeout.unwrap_or(DEFAULT_TIMEOUT),
        )?;
        Ok(Self::with_lookup(client)
            .maybe_worker_limit(worker_limit)
            .maybe_show_progress(show_progress)
            .maybe_columns(columns)
            .call())
    }
}

#[bon]
impl<L: WeatherLookup> WeatherEnricher<L> {
    /// Creates an enricher that fetches weather through `lookup`.
    ///
    /// Optional builder arguments are the same as for
    /// [`WeatherEnricher::builder()`] minus the HTTP settings; finish with `.call()`.
    #[builder(start_fn = with_lookup)]
    pub fn from_lookup(
        #[builder(start_fn)] lookup: L,
        worker_limit: Option<usize>,
        show_progress: Option<bool>,
        columns: Option<ColumnNames>,
    ) -> Self {
        let cache_builder =
            CacheBuilder::new(Arc::new(lookup), worker_limit.unwrap_or(DEFAULT_WORKER_LIMIT))
                .with_progress(show_progress.unwrap_or(false));
        Self {
            columns: columns.unwrap_or_default(),
            cache_builder,
        }
    }

    pub fn columns(&self) -> &ColumnNames {
        &self.columns
    }

    pub fn cache_builder(&self) -> &CacheBuilder<L> {
        &self.cache_builder
    }

    /// Returns a copy of `df` with the four weather columns appended.
    ///
    /// The input columns keep their order and values, and row count and
    /// order are unchanged. Weather is fetched once per distinct
    /// (rounded latitude, rounded longitude, date) key.
    ///
    /// # Errors
    ///
    /// * [`EnrichError::ColumnNotFound`] / [`EnrichError::ColumnType`] if an input column is
    ///   missing or has an unusable type.
    /// * [`EnrichError::MissingValue`], [`EnrichError::InvalidDate`] or
    ///   [`EnrichError::InvalidCoordinate`] if any row cannot be turned into a key.
    /// * [`EnrichError::InvalidWorkerLimit`] / [`EnrichError::TaskJoin`] if lookups cannot be run.
    /// * [`EnrichError::ColumnAppend`] if `df` already has a column named like a weather column.
    ///
    /// Failed or incomplete weather lookups are not errors; they show up as nulls.
    pub async fn enrich(&self, df: &DataFrame) -> Result<DataFrame, EnrichError> {
        let row_keys = derive_row_keys(df, &self.columns)?;
        let unique_keys: HashSet<LookupKey> = row_keys.iter().copied().collect();
        info!(
            "Enriching {} rows with weather for {} unique location/date keys",
            row_keys.len(),
            unique_keys.len()
        );

        let cache = self.cache_builder.build(unique_keys).await?;
        let weather_columns = weather_columns(&row_keys, &cache)?;

        df.hstack(&weather_columns).map_err(EnrichError::ColumnAppend)
    }
}

/// Expands cached observations into one column per [`DailyVariable`], in row order.
fn weather_columns(
    row_keys: &[LookupKey],
    cache: &WeatherCache,
) -> Result<Vec<Column>, EnrichError> {
    let observations = row_keys
        .iter()
        .map(|key| cache.get(key).ok_or(EnrichError::MissingCacheEntry(*key)))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(DailyVariable::ALL
        .iter()
        .map(|variable| {
            let values: Vec<Option<f64>> =
                observations.iter().map(|o| o.value(*variable)).collect();
            Column::new(variable.column_name().into(), values)
        })
        .collect())
}

/// Enriches `df` using the Open-Meteo archive with default settings.
///
/// Equivalent to `WeatherEnricher::builder().build()?.enrich(df).await`.
pub async fn enrich(df: &DataFrame) -> Result<DataFrame, EnrichError> {
    WeatherEnricher::builder().build()?.enrich(df).await
}
