//! Completion progress over the fixed-key stores.

use serde::{Deserialize, Serialize};

use crate::checklist::ChecklistStore;
use crate::heuristics::RatingStore;
use crate::model::{HeuristicId, StepId};

/// A store whose entries carry a done/not-done flag over a fixed key set.
pub trait Progress {
    /// Entries with the flag set.
    fn done(&self) -> usize;

    /// Size of the fixed key set.
    fn total(&self) -> usize;

    /// Exact completion percentage in `[0, 100]`.
    fn percentage(&self) -> f64 {
        percentage(self.done(), self.total())
    }

    /// Percentage rounded for display.
    fn percent(&self) -> u8 {
        self.percentage().round() as u8
    }
}

impl Progress for RatingStore {
    fn done(&self) -> usize {
        self.checked_count()
    }

    fn total(&self) -> usize {
        HeuristicId::COUNT
    }
}

impl Progress for ChecklistStore {
    fn done(&self) -> usize {
        self.completed_count()
    }

    fn total(&self) -> usize {
        StepId::COUNT
    }
}

/// `done / total * 100`, clamped to `[0, 100]`. An empty denominator is 0%.
pub fn percentage(done: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    done.min(total) as f64 / total as f64 * 100.0
}

/// Progress figures for display, recomputed from the stores on each call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressSummary {
    pub heuristics_done: usize,
    pub heuristics_percent: u8,
    pub steps_done: usize,
    pub steps_percent: u8,
    pub tests_logged: usize,
    pub tests_succeeded: usize,
}
