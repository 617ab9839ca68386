//! Derives one [`LookupKey`] per row of an input `DataFrame`.

use crate::error::EnrichError;
use crate::types::lookup_key::LookupKey;
use crate::utils::parse_checkin_date;
use chrono::NaiveDate;
use polars::prelude::{Column, DataFrame, DataType};

/// Names of the input columns read during enrichment.
///
/// # Examples
///
/// ```
/// use weather_enrich::ColumnNames;
///
/// let defaults = ColumnNames::default();
/// assert_eq!(defaults.date, "checkin_date");
///
/// let custom = ColumnNames::new("visit_day", "lat", "lon");
/// assert_eq!(custom.longitude, "lon");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnNames {
    pub date: String,
    pub latitude: String,
    pub longitude: String,
}

impl ColumnNames {
    pub fn new(
        date: impl Into<String>,
        latitude: impl Into<String>,
        longitude: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            latitude: latitude.into(),
            longitude: longitude.into(),
        }
    }
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self::new("checkin_date", "business_lat", "business_long")
    }
}

fn required_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column, EnrichError> {
    df.column(name)
        .map_err(|e| EnrichError::ColumnNotFound(name.to_string(), e))
}

fn cast_column(
    column: &Column,
    name: &str,
    dtype: DataType,
    expected: &'static str,
) -> Result<Column, EnrichError> {
    column.cast(&dtype).map_err(|source| EnrichError::ColumnType {
        column: name.to_string(),
        expected,
        source,
    })
}

/// Reads a coordinate column as `f64`, accepting any numeric dtype.
fn coordinates(df: &DataFrame, name: &str) -> Result<Vec<f64>, EnrichError> {
    let column = cast_column(required_column(df, name)?, name, DataType::Float64, "float")?;
    let values = column.f64().map_err(|source| EnrichError::ColumnType {
        column: name.to_string(),
        expected: "float",
        source,
    })?;

    values
        .into_iter()
        .enumerate()
        .map(|(row, value)| match value {
            None => Err(EnrichError::MissingValue {
                column: name.to_string(),
                row,
            }),
            Some(v) if !v.is_finite() => Err(EnrichError::InvalidCoordinate {
                column: name.to_string(),
                row,
                value: v,
            }),
            Some(v) => Ok(v),
        })
        .collect()
}

/// Reads the check-in column as calendar dates.
///
/// String columns are parsed leniently; date and datetime columns are cast to
/// text first, which yields `YYYY-MM-DD` prefixed values.
fn checkin_dates(df: &DataFrame, name: &str) -> Result<Vec<NaiveDate>, EnrichError> {
    let column = required_column(df, name)?;
    let text = match column.dtype() {
        DataType::String => column.clone(),
        _ => cast_column(column, name, DataType::String, "date")?,
    };
    let values = text.str().map_err(|source| EnrichError::ColumnType {
        column: name.to_string(),
        expected: "date",
        source,
    })?;

    values
        .into_iter()
        .enumerate()
        .map(|(row, value)| {
            let raw = value.ok_or_else(|| EnrichError::MissingValue {
                column: name.to_string(),
                row,
            })?;
            parse_checkin_date(raw).ok_or_else(|| EnrichError::InvalidDate {
                column: name.to_string(),
                row,
                value: raw.to_string(),
            })
        })
        .collect()
}

/// Builds the lookup key for every row, in row order.
///
/// Any missing value, unparseable date or non-finite coordinate fails the
/// whole call with an error naming the offending row.
pub fn derive_row_keys(
    df: &DataFrame,
    columns: &ColumnNames,
) -> Result<Vec<LookupKey>, EnrichError> {
    let dates = checkin_dates(df, &columns.date)?;
    let latitudes = coordinates(df, &columns.latitude)?;
    let longitudes = coordinates(df, &columns.longitude)?;

    Ok(dates
        .into_iter()
        .zip(latitudes)
        .zip(longitudes)
        .map(|((date, lat), lon)| LookupKey::new(lat, lon, date))
        .collect())
}
