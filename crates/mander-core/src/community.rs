//! Communities: connected groupings of precinct nodes under optimization.
//!
//! A [`Community`] holds node ids into the canonical [`Graph`](crate::graph::Graph)
//! plus cached derived data; it never copies adjacency. A [`Communities`]
//! value is an exact partition of the graph's nodes: every node belongs to
//! exactly one community.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{ManderError, Result};
use crate::geom::Polygon;
use crate::graph::Graph;

/// Cached scalar quantification values for one community.
///
/// Valid only until the next exchange touching the community; the exchange
/// engine clears them and the caller recomputes before reading again.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quantification {
    pub population: f64,
    pub compactness: f64,
    pub partisanship: f64,
}

/// A connected subset of graph nodes. Its identity is its position in the
/// owning [`Communities`] sequence.
#[derive(Debug, Clone, Default)]
pub struct Community {
    members: BTreeSet<usize>,
    shape: Option<Vec<Polygon>>,
    stats: Option<Quantification>,
}

impl Community {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_members<I: IntoIterator<Item = usize>>(members: I) -> Self {
        Community {
            members: members.into_iter().collect(),
            shape: None,
            stats: None,
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, id: usize) -> bool {
        self.members.contains(&id)
    }

    /// Member node ids in ascending order.
    pub fn members(&self) -> impl Iterator<Item = usize> + '_ {
        self.members.iter().copied()
    }

    pub fn member_vec(&self) -> Vec<usize> {
        self.members.iter().copied().collect()
    }

    /// Adds a member. Clears cached shape and stats.
    pub fn insert(&mut self, id: usize) -> bool {
        self.invalidate();
        self.members.insert(id)
    }

    /// Removes a member. Clears cached shape and stats.
    pub fn remove(&mut self, id: usize) -> bool {
        self.invalidate();
        self.members.remove(&id)
    }

    /// Drops the cached union shape and quantification values.
    pub fn invalidate(&mut self) {
        self.shape = None;
        self.stats = None;
    }

    /// Cached union geometry over member precincts, if computed.
    pub fn shape(&self) -> Option<&[Polygon]> {
        self.shape.as_deref()
    }

    pub fn set_shape(&mut self, shape: Vec<Polygon>) {
        self.shape = Some(shape);
    }

    /// Cached scalar quantification, if computed.
    pub fn stats(&self) -> Option<Quantification> {
        self.stats
    }

    pub fn set_stats(&mut self, stats: Quantification) {
        self.stats = Some(stats);
    }

    /// True iff the induced subgraph over this community's members is
    /// connected in `graph`.
    pub fn is_connected(&self, graph: &Graph) -> Result<bool> {
        let members = self.member_vec();
        Ok(graph.induced_subgraph(&members)?.is_connected())
    }
}

/// An ordered sequence of communities forming an exact partition of a graph.
#[derive(Debug, Clone, Default)]
pub struct Communities {
    communities: Vec<Community>,
}

impl Communities {
    pub fn new(communities: Vec<Community>) -> Self {
        Communities { communities }
    }

    pub fn len(&self) -> usize {
        self.communities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.communities.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Community> {
        self.communities.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Community> {
        self.communities.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Community> {
        self.communities.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Community> {
        self.communities.iter_mut()
    }

    /// Mutable access to two distinct communities at once.
    pub fn pair_mut(&mut self, a: usize, b: usize) -> Result<(&mut Community, &mut Community)> {
        if a == b || a >= self.len() || b >= self.len() {
            return Err(ManderError::InvalidState(format!(
                "invalid community pair ({a}, {b}) of {}",
                self.len()
            )));
        }
        if a < b {
            let (left, right) = self.communities.split_at_mut(b);
            Ok((&mut left[a], &mut right[0]))
        } else {
            let (left, right) = self.communities.split_at_mut(a);
            Ok((&mut right[0], &mut left[b]))
        }
    }

    /// Index of the community containing `node`, by member-set scan.
    pub fn community_of(&self, node: usize) -> Option<usize> {
        self.communities.iter().position(|c| c.contains(node))
    }

    /// Verifies partition totality and disjointness against `graph`: every
    /// graph node in exactly one community, no member outside the graph.
    pub fn assert_partition(&self, graph: &Graph) -> Result<()> {
        let mut seen = BTreeSet::new();
        for (index, community) in self.communities.iter().enumerate() {
            for member in community.members() {
                if !graph.contains(member) {
                    return Err(ManderError::NodeNotFound(member));
                }
                if !seen.insert(member) {
                    return Err(ManderError::InvalidState(format!(
                        "node {member} assigned to more than one community (community {index})"
                    )));
                }
            }
        }
        if seen.len() != graph.len() {
            return Err(ManderError::InvalidState(format!(
                "partition covers {} of {} nodes",
                seen.len(),
                graph.len()
            )));
        }
        Ok(())
    }
}
