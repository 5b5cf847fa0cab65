//! Bounded history of completed calculations
//!
//! Records arrive most-recent-first and the list is truncated to the
//! last `HISTORY_CAPACITY` entries. The newest record feeds the tutor
//! prompt builder.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Maximum number of retained records.
pub const HISTORY_CAPACITY: usize = 10;

/// An immutable log entry for one completed arithmetic step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub expression: String,
    pub result: String,
    pub timestamp: DateTime<Utc>,
}

/// Most-recent-first bounded list of calculation records.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: VecDeque<CalculationResult>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record, dropping the oldest entry once past capacity.
    pub fn record(&mut self, record: CalculationResult) {
        self.entries.push_front(record);
        self.entries.truncate(HISTORY_CAPACITY);
    }

    /// The most recent record, if any.
    pub fn latest(&self) -> Option<&CalculationResult> {
        self.entries.front()
    }

    /// Records, most recent first.
    pub fn iter(&self) -> impl Iterator<Item = &CalculationResult> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(n: usize) -> CalculationResult {
        CalculationResult {
            expression: format!("{n} + 1"),
            result: (n + 1).to_string(),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn latest_is_most_recent() {
        let mut history = History::new();
        assert!(history.latest().is_none());

        history.record(record(1));
        history.record(record(2));
        assert_eq!(history.latest().unwrap().expression, "2 + 1");
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn iterates_most_recent_first() {
        let mut history = History::new();
        for n in 0..3 {
            history.record(record(n));
        }
        let expressions: Vec<_> = history.iter().map(|r| r.expression.as_str()).collect();
        assert_eq!(expressions, ["2 + 1", "1 + 1", "0 + 1"]);
    }

    #[test]
    fn eleventh_record_drops_the_oldest() {
        let mut history = History::new();
        for n in 0..HISTORY_CAPACITY + 1 {
            history.record(record(n));
        }
        assert_eq!(history.len(), HISTORY_CAPACITY);
        assert_eq!(history.latest().unwrap().expression, "10 + 1");
        // The first record ("0 + 1") is gone.
        assert!(history.iter().all(|r| r.expression != "0 + 1"));
        assert_eq!(history.iter().last().unwrap().expression, "1 + 1");
    }
}
