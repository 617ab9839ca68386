use crate::types::lookup_key::LookupKey;
use crate::types::observation::Observation;
use std::future::Future;

/// A source of daily weather for a single [`LookupKey`].
///
/// Implementations must not fail: any error on the way to an observation is
/// reported as [`Observation::Absent`]. [`ArchiveClient`](crate::ArchiveClient)
/// is the HTTP implementation. Other implementations can be plugged into
/// [`CacheBuilder`](crate::CacheBuilder) and
/// [`WeatherEnricher`](crate::WeatherEnricher).
pub trait WeatherLookup: Send + Sync + 'static {
    fn lookup(&self, key: &LookupKey) -> impl Future<Output = Observation> + Send;
}
