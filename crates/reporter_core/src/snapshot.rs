use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};

use crate::stage::StageKey;

/// One `/progress` response from the job runner.
///
/// Sparse by design: an absent stage key means "no update this tick",
/// never zero.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProgressSnapshot {
    values: BTreeMap<StageKey, f64>,
}

impl ProgressSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completion value for one stage key.
    pub fn set(&mut self, key: StageKey, value: f64) {
        self.values.insert(key, value);
    }

    /// Completion value for `key`, if this snapshot carries one.
    pub fn get(&self, key: StageKey) -> Option<f64> {
        self.values.get(&key).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (StageKey, f64)> + '_ {
        self.values.iter().map(|(key, value)| (*key, *value))
    }
}

impl FromIterator<(StageKey, f64)> for ProgressSnapshot {
    fn from_iter<I: IntoIterator<Item = (StageKey, f64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl<'de> Deserialize<'de> for ProgressSnapshot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Fields that are not stage keys, or not numbers, are dropped
        // rather than rejected; the runner may report keys this client
        // does not know about.
        let raw = BTreeMap::<String, serde_json::Value>::deserialize(deserializer)?;
        Ok(raw
            .into_iter()
            .filter_map(|(name, value)| {
                let key = name.parse::<StageKey>().ok()?;
                Some((key, value.as_f64()?))
            })
            .collect())
    }
}
