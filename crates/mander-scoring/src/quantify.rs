//! Fills community caches: union shape plus scalar quantification values.

use mander_core::{
    Communities, GeometryKernel, Graph, ManderError, PrecinctStore, Quantification, Result,
};

use crate::compactness::{member_boundaries, Compactness, RadiusMode};
use crate::partisanship::PartisanshipStdev;

/// Computes the cached shape and [`Quantification`] for every community
/// whose caches are stale. Call after a batch of exchanges, before reading
/// stats or persisting the quantification table.
#[derive(Debug, Clone, Copy)]
pub struct Quantifier<'a, K: GeometryKernel + ?Sized> {
    kernel: &'a K,
    store: &'a PrecinctStore,
    mode: RadiusMode,
}

impl<'a, K: GeometryKernel + ?Sized> Quantifier<'a, K> {
    pub fn new(kernel: &'a K, store: &'a PrecinctStore) -> Self {
        Self::with_mode(kernel, store, RadiusMode::default())
    }

    pub fn with_mode(kernel: &'a K, store: &'a PrecinctStore, mode: RadiusMode) -> Self {
        Quantifier { kernel, store, mode }
    }

    pub fn quantify(&self, graph: &Graph, communities: &mut Communities) -> Result<()> {
        let compactness = Compactness::with_mode(self.kernel, self.store, self.mode);
        let partisanship = PartisanshipStdev::new(self.store);

        for index in 0..communities.len() {
            let community = communities.get(index).unwrap();
            if community.shape().is_some() && community.stats().is_some() {
                continue;
            }

            let shape = match community.shape() {
                Some(shape) => shape.to_vec(),
                None => {
                    let boundaries = member_boundaries(self.store, graph, community)?;
                    self.kernel.union(&boundaries)?
                }
            };

            let mut population = 0u64;
            for member in community.members() {
                let node = graph.node(member).ok_or(ManderError::NodeNotFound(member))?;
                if let Some(precinct) = self.store.get(node.precinct()) {
                    population += precinct.population;
                }
            }

            let stats = Quantification {
                population: population as f64,
                compactness: compactness.of_shape(graph, community, &shape)?,
                partisanship: partisanship.community_stdev(graph, community)?,
            };

            let community = communities.get_mut(index).unwrap();
            community.set_shape(shape);
            community.set_stats(stats);
        }
        Ok(())
    }
}
