use crate::error::EnrichError;
use crate::types::lookup_key::LookupKey;
use crate::types::observation::Observation;
use crate::types::weather_cache::WeatherCache;
use crate::weather_data::lookup::WeatherLookup;
use futures_util::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use std::collections::HashSet;
use std::sync::Arc;

/// Default number of lookups allowed in flight at once.
pub const DEFAULT_WORKER_LIMIT: usize = 32;

const PROGRESS_TEMPLATE: &str = "{msg} [{elapsed_precise}] {bar:40} {pos}/{len}";

/// Fills a [`WeatherCache`] by running one lookup per key concurrently.
///
/// Each key is looked up in its own Tokio task, with at most `worker_limit`
/// tasks in flight. Results are collected as they finish, so the cache is
/// only ever written by the task driving [`CacheBuilder::build`].
pub struct CacheBuilder<L> {
    lookup: Arc<L>,
    worker_limit: usize,
    show_progress: bool,
}

impl<L: WeatherLookup> CacheBuilder<L> {
    pub fn new(lookup: Arc<L>, worker_limit: usize) -> Self {
        Self {
            lookup,
            worker_limit,
            show_progress: false,
        }
    }

    /// Draw a terminal progress bar while lookups run.
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn worker_limit(&self) -> usize {
        self.worker_limit
    }

    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    /// Looks up every key and returns a cache with exactly one entry per key.
    ///
    /// Keys must already be unique; the builder does not deduplicate. A
    /// lookup task that panics is recorded as [`Observation::Absent`] for its
    /// key. The build only fails if tasks cannot be run at all: a worker limit
    /// of zero, or a task cancelled by the runtime shutting down.
    pub async fn build(&self, keys: HashSet<LookupKey>) -> Result<WeatherCache, EnrichError> {
        if self.worker_limit == 0 {
            return Err(EnrichError::InvalidWorkerLimit);
        }

        let total = keys.len();
        let progress = self.progress_bar(total as u64);

        let mut outcomes = stream::iter(keys)
            .map(|key| {
                let lookup = Arc::clone(&self.lookup);
                async move {
                    let handle = tokio::spawn(async move { lookup.lookup(&key).await });
                    (key, handle.await)
                }
            })
            .buffer_unordered(self.worker_limit);

        let mut cache = WeatherCache::with_capacity(total);
        while let Some((key, outcome)) = outcomes.next().await {
            let observation = match outcome {
                Ok(observation) => observation,
                Err(e) if e.is_panic() => {
                    warn!("Lookup task for {} panicked, recording as absent", key);
                    Observation::Absent
                }
                Err(e) => {
                    progress.abandon();
                    return Err(EnrichError::TaskJoin(e));
                }
            };
            cache.insert(key, observation);
            progress.inc(1);
        }
        progress.finish();

        info!(
            "Fetched weather for {} keys ({} present, {} absent) with {} workers",
            total,
            cache.present_count(),
            total - cache.present_count(),
            self.worker_limit
        );
        Ok(cache)
    }

    fn progress_bar(&self, total: u64) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }
        let style = ProgressStyle::with_template(PROGRESS_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        ProgressBar::new(total)
            .with_style(style)
            .with_message("Fetching weather")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::observation::DailyWeather;
    use chrono::NaiveDate;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    /// Deterministic lookup: temperature derived from the key, absent for
    /// negative latitudes, panics for latitude 13.
    #[derive(Default)]
    struct StubLookup {
        calls: Mutex<HashMap<LookupKey, usize>>,
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
        delay: Option<Duration>,
    }

    impl StubLookup {
        fn with_delay(delay: Duration) -> Self {
            Self {
                delay: Some(delay),
                ..Default::default()
            }
        }

        fn total_calls(&self) -> usize {
            self.calls.lock().unwrap().values().sum()
        }
    }

    impl WeatherLookup for StubLookup {
        async fn lookup(&self, key: &LookupKey) -> Observation {
            *self.calls.lock().unwrap().entry(*key).or_default() += 1;
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            if key.latitude() == 13.0 {
                panic!("unlucky latitude");
            }
            if key.latitude() < 0.0 {
                return Observation::Absent;
            }
            Observation::Present(DailyWeather {
                temp_max: key.latitude(),
                temp_min: key.longitude(),
                precip_mm: 0.0,
                wind_max: 1.0,
            })
        }
    }

    fn keys(latitudes: &[f64]) -> HashSet<LookupKey> {
        let date = NaiveDate::from_ymd_opt(2023, 6, 1).unwrap();
        latitudes
            .iter()
            .map(|lat| LookupKey::new(*lat, 5.0, date))
            .collect()
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_build_has_one_entry_per_key() -> Result<(), EnrichError> {
        let input = keys(&[1.0, 2.0, -3.0, 4.0, 5.5]);
        let stub = Arc::new(StubLookup::default());
        let builder = CacheBuilder::new(Arc::clone(&stub), DEFAULT_WORKER_LIMIT);

        let cache = builder.build(input.clone()).await?;

        assert_eq!(cache.len(), input.len());
        assert_eq!(cache.keys().copied().collect::<HashSet<_>>(), input);
        assert_eq!(cache.present_count(), 4);
        assert_eq!(stub.total_calls(), input.len());
        assert!(stub.calls.lock().unwrap().values().all(|n| *n == 1));
        Ok(())
    }

    #[tokio::test]
    async fn test_absent_results_are_kept() -> Result<(), EnrichError> {
        let input = keys(&[-1.0, -2.0]);
        let cache = CacheBuilder::new(Arc::new(StubLookup::default()), 2)
            .build(input.clone())
            .await?;

        for key in &input {
            assert_eq!(cache.get(key), Some(&Observation::Absent));
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_empty_key_set_builds_empty_cache() -> Result<(), EnrichError> {
        let stub = Arc::new(StubLookup::default());
        let cache = CacheBuilder::new(Arc::clone(&stub), 4)
            .build(HashSet::new())
            .await?;
        assert!(cache.is_empty());
        assert_eq!(stub.total_calls(), 0);
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_panicking_lookup_becomes_absent() -> Result<(), EnrichError> {
        let input = keys(&[12.0, 13.0, 14.0]);
        let cache = CacheBuilder::new(Arc::new(StubLookup::default()), 3)
            .build(input.clone())
            .await?;

        assert_eq!(cache.len(), 3);
        let unlucky = LookupKey::new(13.0, 5.0, NaiveDate::from_ymd_opt(2023, 6, 1).unwrap());
        assert_eq!(cache.get(&unlucky), Some(&Observation::Absent));
        assert_eq!(cache.present_count(), 2);
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_worker_limit_caps_concurrency() -> Result<(), EnrichError> {
        let latitudes: Vec<f64> = (0..40).map(|i| 20.0 + i as f64).collect();
        let stub = Arc::new(StubLookup::with_delay(Duration::from_millis(20)));

        let cache = CacheBuilder::new(Arc::clone(&stub), 3)
            .build(keys(&latitudes))
            .await?;

        assert_eq!(cache.len(), 40);
        let max = stub.max_in_flight.load(Ordering::SeqCst);
        assert!(max <= 3, "saw {} lookups in flight with a limit of 3", max);
        assert!(max >= 2, "lookups never overlapped");
        Ok(())
    }

    #[tokio::test]
    async fn test_zero_worker_limit_is_rejected() {
        let result = CacheBuilder::new(Arc::new(StubLookup::default()), 0)
            .build(keys(&[1.0]))
            .await;
        assert!(matches!(result, Err(EnrichError::InvalidWorkerLimit)));
    }

    #[tokio::test]
    async fn test_repeated_builds_are_equivalent() -> Result<(), EnrichError> {
        let input = keys(&[1.0, -2.0, 3.0, 4.0]);
        let builder = CacheBuilder::new(Arc::new(StubLookup::default()), 2).with_progress(false);

        let first = builder.build(input.clone()).await?;
        let second = builder.build(input).await?;

        assert_eq!(first, second);
        Ok(())
    }
}
