use crate::error::EnrichError;
use crate::types::daily_variable::DailyVariable;
use crate::types::lookup_key::LookupKey;
use crate::types::observation::{DailyWeather, Observation};
use crate::utils::parse_checkin_date;
use crate::weather_data::error::ArchiveError;
use crate::weather_data::lookup::WeatherLookup;
use crate::weather_data::response::ArchiveResponse;
use log::{debug, warn};
use reqwest::Client;
use std::time::Duration;

pub const DEFAULT_ARCHIVE_URL: &str = "https://archive-api.open-meteo.com/v1/archive";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches single-day observations from the Open-Meteo historical archive.
///
/// Every request is bounded by the client timeout and attempted once.
#[derive(Debug, Clone)]
pub struct ArchiveClient {
    base_url: String,
    http: Client,
}

impl ArchiveClient {
    /// Client for the public archive with the default 10 second timeout.
    pub fn new() -> Result<Self, EnrichError> {
        Self::with_base_url(DEFAULT_ARCHIVE_URL, DEFAULT_TIMEOUT)
    }

    /// Client for an archive-compatible endpoint, e.g. a mirror or a test server.
    pub fn with_base_url(base_url: impl Into<String>, timeout: Duration) -> Result<Self, EnrichError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(EnrichError::HttpClient)?;
        Ok(Self {
            base_url: base_url.into(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Requests one day of weather for `key`.
    ///
    /// Succeeds only if all four daily variables have a value for the day.
    pub async fn fetch_daily(&self, key: &LookupKey) -> Result<DailyWeather, ArchiveError> {
        let date = key.date_string();
        let request = self
            .http
            .get(&self.base_url)
            .query(&[
                ("latitude", key.latitude().to_string()),
                ("longitude", key.longitude().to_string()),
                ("start_date", date.clone()),
                ("end_date", date),
                ("daily", DailyVariable::daily_query_value()),
                ("timezone", "UTC".to_string()),
            ])
            .build()
            .map_err(ArchiveError::RequestBuild)?;
        let url = request.url().to_string();
        debug!("Requesting daily weather from {}", url);

        let response = self
            .http
            .execute(request)
            .await
            .map_err(|e| ArchiveError::NetworkRequest(url.clone(), e))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                return Err(if let Some(status) = e.status() {
                    ArchiveError::HttpStatus {
                        url,
                        status,
                        source: e,
                    }
                } else {
                    ArchiveError::NetworkRequest(url, e)
                });
            }
        };

        let body: ArchiveResponse = response
            .json()
            .await
            .map_err(|e| ArchiveError::BodyDecode(url.clone(), e))?;
        let daily = body.daily.ok_or_else(|| ArchiveError::MissingDaily(url.clone()))?;

        let value = |variable: DailyVariable| {
            daily
                .first_value(variable)
                .ok_or_else(|| ArchiveError::IncompleteSeries {
                    url: url.clone(),
                    variable,
                })
        };

        Ok(DailyWeather {
            temp_max: value(DailyVariable::TemperatureMax)?,
            temp_min: value(DailyVariable::TemperatureMin)?,
            precip_mm: value(DailyVariable::PrecipitationSum)?,
            wind_max: value(DailyVariable::WindSpeedMax)?,
        })
    }

    /// Looks up weather for raw coordinates and a date string.
    ///
    /// The date is normalised before the request is built. An unparseable
    /// date yields [`Observation::Absent`] without contacting the archive.
    pub async fn lookup_raw(&self, latitude: f64, longitude: f64, date: &str) -> Observation {
        match parse_checkin_date(date) {
            Some(date) => self.lookup(&LookupKey::new(latitude, longitude, date)).await,
            None => {
                warn!("{}", ArchiveError::InvalidDate(date.to_string()));
                Observation::Absent
            }
        }
    }
}

impl WeatherLookup for ArchiveClient {
    async fn lookup(&self, key: &LookupKey) -> Observation {
        match self.fetch_daily(key).await {
            Ok(weather) => Observation::Present(weather),
            Err(e) => {
                warn!("No weather for {}: {}", key, e);
                Observation::Absent
            }
        }
    }
}
