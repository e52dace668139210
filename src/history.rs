//! Calculation history with a fixed capacity and a serde persistence format.
//!
//! Each successful `=` evaluation produces one immutable [`HistoryEntry`]. Entries
//! are kept most-recent-first and capped at [`HISTORY_CAPACITY`]; the oldest entry
//! is dropped on overflow. The crate owns the persistence format (a JSON array of
//! entries, newest first); actually reading and writing storage is left to the
//! surrounding glue.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum number of retained calculations.
pub const HISTORY_CAPACITY: usize = 50;

/// One completed calculation: the display-form expression, the formatted result,
/// and when it happened. Entries are never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub expression: String,
    pub result: String,
    pub timestamp: DateTime<Utc>,
}

/// An ordered, capacity-bounded sequence of calculations, most recent first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
}

impl History {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a calculation at the front, timestamped now.
    ///
    /// When the history already holds [`HISTORY_CAPACITY`] entries, the oldest
    /// one is dropped.
    pub fn push(&mut self, expression: String, result: String) {
        self.entries.push_front(HistoryEntry {
            expression,
            result,
            timestamp: Utc::now(),
        });
        if self.entries.len() > HISTORY_CAPACITY {
            self.entries.pop_back();
        }
    }

    /// Number of retained entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The entry at `index`, where 0 is the most recent calculation.
    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    /// Iterates entries most recent first.
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// Removes all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Serializes the history to its persistence format.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Restores a history from its persistence format.
    ///
    /// Corrupt input is an error; callers that tolerate corruption typically
    /// fall back to an empty history.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_most_recent_first() {
        let mut history = History::new();
        history.push("1 + 1".to_string(), "2".to_string());
        history.push("2 + 2".to_string(), "4".to_string());
        assert_eq!(history.get(0).unwrap().expression, "2 + 2");
        assert_eq!(history.get(1).unwrap().expression, "1 + 1");
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut history = History::new();
        for i in 0..51 {
            history.push(format!("{i} + 0"), format!("{i}"));
        }
        assert_eq!(history.len(), 50);
        // The very first entry ("0 + 0") is gone; the newest is at the front.
        assert_eq!(history.get(0).unwrap().expression, "50 + 0");
        assert_eq!(history.get(49).unwrap().expression, "1 + 0");
    }

    #[test]
    fn test_json_round_trip() {
        let mut history = History::new();
        history.push("3 × 4".to_string(), "12".to_string());
        let json = history.to_json().unwrap();
        let restored = History::from_json(&json).unwrap();
        assert_eq!(restored.len(), 1);
        assert_eq!(restored.get(0), history.get(0));
    }

    #[test]
    fn test_corrupt_json_is_an_error() {
        assert!(History::from_json("not json").is_err());
    }

    #[test]
    fn test_clear() {
        let mut history = History::new();
        history.push("1 + 1".to_string(), "2".to_string());
        history.clear();
        assert!(history.is_empty());
    }
}
