use crate::types::lookup_key::LookupKey;
use crate::types::observation::Observation;
use std::collections::hash_map;
use std::collections::HashMap;

/// Observations keyed by [`LookupKey`], produced by
/// [`CacheBuilder::build`](crate::CacheBuilder::build).
///
/// A cache returned from a successful build holds exactly one entry per
/// requested key. It is read-only for callers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeatherCache {
    entries: HashMap<LookupKey, Observation>,
}

impl WeatherCache {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity),
        }
    }

    pub(crate) fn insert(&mut self, key: LookupKey, observation: Observation) {
        self.entries.insert(key, observation);
    }

    pub fn get(&self, key: &LookupKey) -> Option<&Observation> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &LookupKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries that hold a complete observation.
    pub fn present_count(&self) -> usize {
        self.entries.values().filter(|o| o.is_present()).count()
    }

    pub fn keys(&self) -> hash_map::Keys<'_, LookupKey, Observation> {
        self.entries.keys()
    }

    pub fn iter(&self) -> hash_map::Iter<'_, LookupKey, Observation> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a WeatherCache {
    type Item = (&'a LookupKey, &'a Observation);
    type IntoIter = hash_map::Iter<'a, LookupKey, Observation>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
