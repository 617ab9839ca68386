//! Defines the daily weather variables requested from the archive and the
//! output columns they are written to.

use std::fmt;

/// One of the four daily aggregates attached to every enriched row.
///
/// Each variable has two names: the identifier the Open-Meteo archive uses in
/// its `daily` query parameter and response body, and the column name it gets
/// in the enriched `DataFrame`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DailyVariable {
    /// Maximum air temperature at 2 m, in °C.
    TemperatureMax,
    /// Minimum air temperature at 2 m, in °C.
    TemperatureMin,
    /// Sum of daily precipitation, in mm.
    PrecipitationSum,
    /// Maximum wind speed at 10 m, in km/h.
    WindSpeedMax,
}

impl DailyVariable {
    /// All variables, in the order their columns are appended.
    pub const ALL: [DailyVariable; 4] = [
        DailyVariable::TemperatureMax,
        DailyVariable::TemperatureMin,
        DailyVariable::PrecipitationSum,
        DailyVariable::WindSpeedMax,
    ];

    /// The variable name understood by the archive API.
    pub fn api_name(&self) -> &'static str {
        match self {
            DailyVariable::TemperatureMax => "temperature_2m_max",
            DailyVariable::TemperatureMin => "temperature_2m_min",
            DailyVariable::PrecipitationSum => "precipitation_sum",
            DailyVariable::WindSpeedMax => "windspeed_10m_max",
        }
    }

    /// The name of the column added to enriched frames.
    pub fn column_name(&self) -> &'static str {
        match self {
            DailyVariable::TemperatureMax => "temp_max",
            DailyVariable::TemperatureMin => "temp_min",
            DailyVariable::PrecipitationSum => "precip_mm",
            DailyVariable::WindSpeedMax => "wind_max",
        }
    }

    /// Comma-separated list of all API names, as sent in the `daily` parameter.
    pub(crate) fn daily_query_value() -> String {
        Self::ALL
            .iter()
            .map(|v| v.api_name())
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Formats a `DailyVariable` using its API name.
///
/// # Examples
///
/// ```
/// use weather_enrich::DailyVariable;
///
/// assert_eq!(DailyVariable::WindSpeedMax.to_string(), "windspeed_10m_max");
/// ```
impl fmt::Display for DailyVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.api_name())
    }
}
