use crate::types::daily_variable::DailyVariable;

/// A complete set of daily aggregates for one location and day.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct DailyWeather {
    pub temp_max: f64,  // temperature_2m_max (°C)
    pub temp_min: f64,  // temperature_2m_min (°C)
    pub precip_mm: f64, // precipitation_sum (mm)
    pub wind_max: f64,  // windspeed_10m_max (km/h)
}

impl DailyWeather {
    pub fn value(&self, variable: DailyVariable) -> f64 {
        match variable {
            DailyVariable::TemperatureMax => self.temp_max,
            DailyVariable::TemperatureMin => self.temp_min,
            DailyVariable::PrecipitationSum => self.precip_mm,
            DailyVariable::WindSpeedMax => self.wind_max,
        }
    }
}

/// The outcome of a single weather lookup.
///
/// Either all four aggregates are known or none are: a response that is
/// missing any of them is recorded as [`Observation::Absent`].
#[derive(Debug, PartialEq, Clone, Copy, Default)]
pub enum Observation {
    Present(DailyWeather),
    #[default]
    Absent,
}

impl Observation {
    pub fn is_present(&self) -> bool {
        matches!(self, Observation::Present(_))
    }

    pub fn weather(&self) -> Option<&DailyWeather> {
        match self {
            Observation::Present(weather) => Some(weather),
            Observation::Absent => None,
        }
    }

    pub fn value(&self, variable: DailyVariable) -> Option<f64> {
        self.weather().map(|w| w.value(variable))
    }

    pub fn temp_max(&self) -> Option<f64> {
        self.value(DailyVariable::TemperatureMax)
    }

    pub fn temp_min(&self) -> Option<f64> {
        self.value(DailyVariable::TemperatureMin)
    }

    pub fn precip_mm(&self) -> Option<f64> {
        self.value(DailyVariable::PrecipitationSum)
    }

    pub fn wind_max(&self) -> Option<f64> {
        self.value(DailyVariable::WindSpeedMax)
    }
}

impl From<DailyWeather> for Observation {
    fn from(weather: DailyWeather) -> Self {
        Observation::Present(weather)
    }
}
