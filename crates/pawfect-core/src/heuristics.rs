//! Heuristic rating store.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::EvaluationError;
use crate::model::{HeuristicId, HeuristicRating, Rating};

/// A single-field edit to a heuristic entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeuristicChange {
    Rating(Rating),
    Notes(String),
    Checked(bool),
}

/// Ratings for all ten heuristics.
///
/// Serialized as a map keyed by heuristic number. Deserialization rejects
/// maps that do not cover every heuristic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    into = "BTreeMap<HeuristicId, HeuristicRating>",
    try_from = "BTreeMap<HeuristicId, HeuristicRating>"
)]
pub struct RatingStore {
    entries: [HeuristicRating; HeuristicId::COUNT],
}

impl Default for RatingStore {
    fn default() -> Self {
        Self {
            entries: HeuristicId::ALL.map(HeuristicRating::seeded),
        }
    }
}

impl RatingStore {
    /// Apply one change to one heuristic, leaving the other fields alone.
    pub fn update(&mut self, id: HeuristicId, change: HeuristicChange) {
        let entry = &mut self.entries[id.index()];
        match change {
            HeuristicChange::Rating(rating) => entry.rating = rating,
            HeuristicChange::Notes(notes) => entry.notes = notes,
            HeuristicChange::Checked(checked) => entry.checked = checked,
        }
    }

    pub fn set_rating(&mut self, id: HeuristicId, rating: Rating) {
        self.update(id, HeuristicChange::Rating(rating));
    }

    pub fn set_notes(&mut self, id: HeuristicId, notes: impl Into<String>) {
        self.update(id, HeuristicChange::Notes(notes.into()));
    }

    pub fn set_checked(&mut self, id: HeuristicId, checked: bool) {
        self.update(id, HeuristicChange::Checked(checked));
    }

    pub fn get(&self, id: HeuristicId) -> &HeuristicRating {
        &self.entries[id.index()]
    }

    /// Entries in heuristic order.
    pub fn iter(&self) -> impl Iterator<Item = &HeuristicRating> {
        self.entries.iter()
    }

    pub fn checked_count(&self) -> usize {
        self.entries.iter().filter(|e| e.checked).count()
    }
}

impl From<RatingStore> for BTreeMap<HeuristicId, HeuristicRating> {
    fn from(store: RatingStore) -> Self {
        store.entries.into_iter().map(|e| (e.id, e)).collect()
    }
}

impl TryFrom<BTreeMap<HeuristicId, HeuristicRating>> for RatingStore {
    type Error = EvaluationError;

    fn try_from(mut map: BTreeMap<HeuristicId, HeuristicRating>) -> Result<Self, Self::Error> {
        let mut store = RatingStore::default();
        for id in HeuristicId::ALL {
            let entry = map
                .remove(&id)
                .ok_or(EvaluationError::MissingHeuristic(id.number()))?;
            if entry.id != id {
                return Err(EvaluationError::MismatchedKey {
                    key: id.to_string(),
                    id: entry.id.to_string(),
                });
            }
            store.entries[id.index()] = entry;
        }
        Ok(store)
    }
}
