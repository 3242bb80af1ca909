//! Randomized-contraction initial partitioner.

use mander_core::{Communities, Community, Graph, ManderError, Result};
use rand::Rng;
use tracing::{debug, info};

use crate::context::SolveContext;

/// Builds an initial set of communities by repeated edge contraction.
///
/// Each step samples up to `sample_cap` random (node, random-neighbor)
/// pairs and contracts the pair with the smallest combined collapsed-history
/// size seen (first found wins ties). This biases contraction toward evenly
/// sized communities; it is NOT uniform Karger-Stein.
///
/// Contraction runs on a private copy of the graph; the canonical graph only
/// receives community tags once the target count is reached.
#[derive(Debug, Clone, Copy)]
pub struct ContractionPartitioner {
    target: usize,
    sample_cap: usize,
}

impl ContractionPartitioner {
    /// Default number of candidate pairs sampled per contraction step.
    pub const DEFAULT_SAMPLE_CAP: usize = 100;

    pub fn new(target: usize) -> Self {
        Self::with_sample_cap(target, Self::DEFAULT_SAMPLE_CAP)
    }

    pub fn with_sample_cap(target: usize, sample_cap: usize) -> Self {
        ContractionPartitioner { target, sample_cap }
    }

    pub fn target(&self) -> usize {
        self.target
    }

    /// Partitions `graph` into exactly `target` communities and tags every
    /// node with its community index.
    pub fn partition(&self, graph: &mut Graph, ctx: &mut SolveContext) -> Result<Communities> {
        if self.target == 0 || self.target > graph.len() {
            return Err(ManderError::Partition(format!(
                "target community count {} outside 1..={}",
                self.target,
                graph.len()
            )));
        }
        let component_count = graph.components().len();
        if component_count > self.target {
            return Err(ManderError::Partition(format!(
                "graph has {component_count} components; cannot contract to {} communities",
                self.target
            )));
        }

        info!(
            event = "partition_start",
            nodes = graph.len(),
            edges = graph.edges().len(),
            target = self.target,
        );

        let mut copy = graph.clone();
        let mut contractions = 0u64;
        while copy.len() > self.target {
            let (keep, remove) = self.choose_pair(&copy, ctx)?;
            copy.contract(keep, remove)?;
            contractions += 1;
            debug!(keep, remove, remaining = copy.len(), "contracted");
        }

        let mut communities = Vec::with_capacity(self.target);
        for (index, survivor) in copy.nodes().enumerate() {
            let members: Vec<usize> = survivor
                .collapsed()
                .iter()
                .copied()
                .chain([survivor.id()])
                .collect();
            for &member in &members {
                graph.set_community(member, Some(index))?;
            }
            communities.push(Community::from_members(members));
        }

        info!(
            event = "partition_end",
            communities = communities.len(),
            contractions,
        );
        Ok(Communities::new(communities))
    }

    /// Samples candidate pairs and returns the lightest one.
    fn choose_pair(&self, copy: &Graph, ctx: &mut SolveContext) -> Result<(usize, usize)> {
        let ids = copy.ids();
        let mut best: Option<(usize, usize, usize)> = None;
        for _ in 0..self.sample_cap {
            let u = ids[ctx.rng().random_range(0..ids.len())];
            let neighbors = copy.neighbors(u)?;
            if neighbors.is_empty() {
                continue;
            }
            let v = neighbors[ctx.rng().random_range(0..neighbors.len())];
            let weight = copy.collapsed_weight(u)? + copy.collapsed_weight(v)?;
            if best.map_or(true, |(_, _, w)| weight < w) {
                best = Some((u, v, weight));
            }
        }
        if let Some((keep, remove, _)) = best {
            return Ok((keep, remove));
        }
        // sampling only misses when contractible pairs are rare; fall back
        // to the first node that still has a neighbor
        match copy.nodes().find(|n| !n.neighbors().is_empty()) {
            Some(node) => Ok((node.id(), node.neighbors()[0])),
            None => Err(ManderError::Partition(format!(
                "{} isolated nodes remain above target {}; graph cannot contract further",
                copy.len(),
                self.target
            ))),
        }
    }
}
