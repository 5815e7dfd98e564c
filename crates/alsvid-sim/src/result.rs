//! Measurement counts and execution results.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Measurement-outcome frequency table.
///
/// Keys are bitstrings formatted per classical register: registers in reverse
/// declaration order (most significant register first), space-separated, each
/// register rendered most significant bit first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counts(FxHashMap<String, u64>);

impl Counts {
    /// Create an empty counts table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` observations of `bitstring`.
    pub fn insert(&mut self, bitstring: impl Into<String>, count: u64) {
        *self.0.entry(bitstring.into()).or_insert(0) += count;
    }

    /// Number of observations of `bitstring` (zero if never observed).
    pub fn get(&self, bitstring: &str) -> u64 {
        self.0.get(bitstring).copied().unwrap_or(0)
    }

    /// The most frequently observed outcome, if any.
    pub fn most_frequent(&self) -> Option<(&str, u64)> {
        self.0
            .iter()
            .max_by_key(|&(_, &count)| count)
            .map(|(key, &count)| (key.as_str(), count))
    }

    /// Iterate over `(bitstring, count)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.0.iter().map(|(key, &count)| (key.as_str(), count))
    }

    /// Number of distinct outcomes observed.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no outcome was observed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Total number of observations.
    pub fn total(&self) -> u64 {
        self.0.values().sum()
    }
}

impl FromIterator<(String, u64)> for Counts {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        let mut counts = Counts::new();
        for (key, count) in iter {
            counts.insert(key, count);
        }
        counts
    }
}

/// The outcome of running a circuit for a number of shots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Observed measurement counts.
    pub counts: Counts,
    /// Number of shots executed.
    pub shots: u32,
    /// Wall-clock execution time, if recorded.
    pub execution_time_ms: Option<u64>,
}

impl ExecutionResult {
    /// Create a result from counts and a shot total.
    pub fn new(counts: Counts, shots: u32) -> Self {
        Self {
            counts,
            shots,
            execution_time_ms: None,
        }
    }

    /// Attach a wall-clock execution time.
    #[must_use]
    pub fn with_execution_time(mut self, millis: u64) -> Self {
        self.execution_time_ms = Some(millis);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_accumulate() {
        let mut counts = Counts::new();
        counts.insert("00", 1);
        counts.insert("00", 1);
        counts.insert("11", 3);

        assert_eq!(counts.get("00"), 2);
        assert_eq!(counts.get("11"), 3);
        assert_eq!(counts.get("01"), 0);
        assert_eq!(counts.total(), 5);
    }

    #[test]
    fn test_most_frequent() {
        let counts: Counts = [("0 00".to_string(), 7), ("1 01".to_string(), 3)]
            .into_iter()
            .collect();
        assert_eq!(counts.most_frequent(), Some(("0 00", 7)));
    }
}
