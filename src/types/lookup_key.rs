use crate::utils::round_coordinate;
use chrono::NaiveDate;
use ordered_float::OrderedFloat;
use std::fmt;

/// Identifies one remote weather lookup: a rounded location on a calendar day.
///
/// Coordinates are rounded to four decimal places on construction so that
/// rows a few metres apart share a single request. Equality, hashing and
/// ordering are structural over the rounded values.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use weather_enrich::LookupKey;
///
/// let date = NaiveDate::from_ymd_opt(2023, 6, 1).unwrap();
/// let a = LookupKey::new(40.712_81, -74.006_02, date);
/// let b = LookupKey::new(40.712_79, -74.005_98, date);
/// assert_eq!(a, b);
/// assert_eq!(a.date_string(), "2023-06-01");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LookupKey {
    latitude: OrderedFloat<f64>,
    longitude: OrderedFloat<f64>,
    date: NaiveDate,
}

impl LookupKey {
    pub fn new(latitude: f64, longitude: f64, date: NaiveDate) -> Self {
        Self {
            latitude: OrderedFloat(round_coordinate(latitude)),
            longitude: OrderedFloat(round_coordinate(longitude)),
            date,
        }
    }

    pub fn latitude(&self) -> f64 {
        self.latitude.into_inner()
    }

    pub fn longitude(&self) -> f64 {
        self.longitude.into_inner()
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// The date in the canonical `YYYY-MM-DD` form the archive expects.
    pub fn date_string(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

impl fmt::Display for LookupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {})",
            self.latitude(),
            self.longitude(),
            self.date_string()
        )
    }
}
