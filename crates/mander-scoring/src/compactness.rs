//! Geometric compactness metric.

use std::f64::consts::PI;

use mander_core::geom::{set_centroid, total_area};
use mander_core::{
    Communities, Community, GeometryKernel, Graph, ManderError, Point, Polygon, PrecinctStore,
    Result,
};

use crate::fitness::Fitness;

/// How the bounding-circle radius is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RadiusMode {
    /// Radius = farthest member-precinct centroid from the community
    /// centroid. Cheap, slightly under-bounds the true circle.
    #[default]
    Approximate,
    /// Radius from the kernel's minimum enclosing circle over every member
    /// boundary vertex.
    Precise,
}

/// Ratio of a community's area to the area of its bounding circle.
///
/// Lies in (0, 1]; 1.0 means a perfect circle. The fitness value is the
/// mean over communities.
#[derive(Debug, Clone, Copy)]
pub struct Compactness<'a, K: GeometryKernel + ?Sized> {
    kernel: &'a K,
    store: &'a PrecinctStore,
    mode: RadiusMode,
}

impl<'a, K: GeometryKernel + ?Sized> Compactness<'a, K> {
    pub fn new(kernel: &'a K, store: &'a PrecinctStore) -> Self {
        Self::with_mode(kernel, store, RadiusMode::default())
    }

    pub fn with_mode(kernel: &'a K, store: &'a PrecinctStore, mode: RadiusMode) -> Self {
        Compactness { kernel, store, mode }
    }

    fn member_boundaries(&self, graph: &Graph, community: &Community) -> Result<Vec<Polygon>> {
        member_boundaries(self.store, graph, community)
    }

    /// Compactness given an already-dissolved community shape.
    pub fn of_shape(
        &self,
        graph: &Graph,
        community: &Community,
        shape: &[Polygon],
    ) -> Result<f64> {
        let area = total_area(self.kernel, shape)?;
        let radius = match self.mode {
            RadiusMode::Approximate => {
                let center = set_centroid(self.kernel, shape)?;
                let mut radius = 0.0f64;
                for boundary in self.member_boundaries(graph, community)? {
                    let centroid = self.kernel.centroid(&boundary)?;
                    radius = radius.max(centroid.distance(center));
                }
                radius
            }
            RadiusMode::Precise => {
                let points: Vec<Point> = self
                    .member_boundaries(graph, community)?
                    .iter()
                    .flat_map(|p| p.vertices().collect::<Vec<_>>())
                    .collect();
                self.kernel.min_enclosing_circle(&points)?.radius
            }
        };
        if radius <= 0.0 {
            // single centroid: the community is as tight as it can get
            return Ok(1.0);
        }
        Ok((area / (PI * radius * radius)).min(1.0))
    }

    /// Compactness of one community, using its cached shape when present.
    pub fn community_compactness(&self, graph: &Graph, community: &Community) -> Result<f64> {
        if let Some(shape) = community.shape() {
            return self.of_shape(graph, community, shape);
        }
        let boundaries = self.member_boundaries(graph, community)?;
        let shape = self.kernel.union(&boundaries)?;
        self.of_shape(graph, community, &shape)
    }
}

/// Boundary polygons of a community's member precincts.
pub(crate) fn member_boundaries(
    store: &PrecinctStore,
    graph: &Graph,
    community: &Community,
) -> Result<Vec<Polygon>> {
    let mut boundaries = Vec::with_capacity(community.len());
    for member in community.members() {
        let node = graph.node(member).ok_or(ManderError::NodeNotFound(member))?;
        let precinct = store.get(node.precinct()).ok_or_else(|| {
            ManderError::InvalidState(format!(
                "node {member} references missing precinct {}",
                node.precinct()
            ))
        })?;
        boundaries.push(precinct.boundary.clone());
    }
    Ok(boundaries)
}

impl<K: GeometryKernel + ?Sized> Fitness for Compactness<'_, K> {
    fn score(&self, graph: &Graph, communities: &Communities) -> Result<f64> {
        if communities.is_empty() {
            return Ok(0.0);
        }
        let mut sum = 0.0;
        for community in communities.iter() {
            sum += self.community_compactness(graph, community)?;
        }
        Ok(sum / communities.len() as f64)
    }
}
