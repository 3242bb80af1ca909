//! Precinct records and the owning precinct arena.
//!
//! Precincts are loaded by an external parser and are immutable afterwards.
//! [`PrecinctStore`] owns every record in one contiguous arena; graph nodes
//! refer to precincts by stable arena index and never own them.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{ManderError, Result};
use crate::geom::Polygon;

/// Vote categories tracked per precinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoteGroup {
    Democratic,
    Republican,
    Libertarian,
    Green,
    Independent,
    Other,
}

impl VoteGroup {
    /// Every category, in tally order.
    pub const ALL: [VoteGroup; 6] = [
        VoteGroup::Democratic,
        VoteGroup::Republican,
        VoteGroup::Libertarian,
        VoteGroup::Green,
        VoteGroup::Independent,
        VoteGroup::Other,
    ];

    pub const COUNT: usize = Self::ALL.len();

    /// Position of this category within a tally.
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Per-category vote counts for one precinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VoteTally {
    counts: [u64; VoteGroup::COUNT],
}

impl VoteTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I: IntoIterator<Item = (VoteGroup, u64)>>(pairs: I) -> Self {
        let mut tally = Self::default();
        for (group, count) in pairs {
            tally.counts[group.index()] += count;
        }
        tally
    }

    pub fn get(&self, group: VoteGroup) -> u64 {
        self.counts[group.index()]
    }

    pub fn set(&mut self, group: VoteGroup, count: u64) {
        self.counts[group.index()] = count;
    }

    /// Votes cast across all categories.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Fraction of this precinct's votes in `group`; 0.0 when no votes were cast.
    pub fn share(&self, group: VoteGroup) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            self.get(group) as f64 / total as f64
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (VoteGroup, u64)> + '_ {
        VoteGroup::ALL.iter().map(|&g| (g, self.get(g)))
    }
}

/// One voting precinct: the smallest indivisible geography.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Precinct {
    pub id: String,
    pub boundary: Polygon,
    pub population: u64,
    pub votes: VoteTally,
}

impl Precinct {
    pub fn new(
        id: impl Into<String>,
        boundary: Polygon,
        population: u64,
        votes: VoteTally,
    ) -> Self {
        Precinct {
            id: id.into(),
            boundary,
            population,
            votes,
        }
    }
}

/// Owning arena for precinct records.
///
/// Indices handed out by [`insert`](PrecinctStore::insert) are stable for the
/// store's lifetime; records are never removed.
#[derive(Debug, Clone, Default)]
pub struct PrecinctStore {
    precincts: Vec<Precinct>,
    by_id: HashMap<String, usize>,
}

impl PrecinctStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a precinct and returns its arena index.
    pub fn insert(&mut self, precinct: Precinct) -> Result<usize> {
        if self.by_id.contains_key(&precinct.id) {
            return Err(ManderError::DuplicatePrecinct(precinct.id));
        }
        let index = self.precincts.len();
        self.by_id.insert(precinct.id.clone(), index);
        self.precincts.push(precinct);
        Ok(index)
    }

    pub fn get(&self, index: usize) -> Option<&Precinct> {
        self.precincts.get(index)
    }

    /// Resolves a precinct id to its arena index.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.by_id.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.precincts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.precincts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &Precinct)> {
        self.precincts.iter().enumerate()
    }

    /// Total population across the arena.
    pub fn total_population(&self) -> u64 {
        self.precincts.iter().map(|p| p.population).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn precinct(id: &str, population: u64) -> Precinct {
        Precinct::new(id, Polygon::default(), population, VoteTally::new())
    }

    #[test]
    fn test_insert_and_lookup() {
        let mut store = PrecinctStore::new();
        let a = store.insert(precinct("a", 10)).unwrap();
        let b = store.insert(precinct("b", 20)).unwrap();

        assert_eq!(a, 0);
        assert_eq!(b, 1);
        assert_eq!(store.index_of("b"), Some(1));
        assert_eq!(store.get(a).unwrap().population, 10);
        assert_eq!(store.total_population(), 30);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut store = PrecinctStore::new();
        store.insert(precinct("a", 10)).unwrap();
        let err = store.insert(precinct("a", 20)).unwrap_err();
        assert!(matches!(err, ManderError::DuplicatePrecinct(_)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_vote_share() {
        let tally = VoteTally::from_pairs([
            (VoteGroup::Democratic, 60),
            (VoteGroup::Republican, 40),
        ]);
        assert_eq!(tally.total(), 100);
        assert_eq!(tally.share(VoteGroup::Democratic), 0.6);
        assert_eq!(tally.share(VoteGroup::Green), 0.0);
    }

    #[test]
    fn test_empty_tally_share_is_zero() {
        let tally = VoteTally::new();
        assert_eq!(tally.share(VoteGroup::Other), 0.0);
    }
}
