use crate::types::daily_variable::DailyVariable;
use serde::Deserialize;

/// Body of a successful archive response. Only the `daily` section is read.
#[derive(Debug, Deserialize)]
pub(crate) struct ArchiveResponse {
    pub daily: Option<DailySeries>,
}

/// The per-variable daily series. Open-Meteo reports gaps as `null`.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct DailySeries {
    #[serde(default)]
    temperature_2m_max: Vec<Option<f64>>,
    #[serde(default)]
    temperature_2m_min: Vec<Option<f64>>,
    #[serde(default)]
    precipitation_sum: Vec<Option<f64>>,
    #[serde(default)]
    windspeed_10m_max: Vec<Option<f64>>,
}

impl DailySeries {
    fn series(&self, variable: DailyVariable) -> &[Option<f64>] {
        match variable {
            DailyVariable::TemperatureMax => &self.temperature_2m_max,
            DailyVariable::TemperatureMin => &self.temperature_2m_min,
            DailyVariable::PrecipitationSum => &self.precipitation_sum,
            DailyVariable::WindSpeedMax => &self.windspeed_10m_max,
        }
    }

    /// The first day's value, if the series has one and it is not null.
    pub fn first_value(&self, variable: DailyVariable) -> Option<f64> {
        self.series(variable).first().copied().flatten()
    }
}
