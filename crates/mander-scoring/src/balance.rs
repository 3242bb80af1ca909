//! Population balance metric.

use mander_core::{Communities, Community, Graph, ManderError, PrecinctStore, Result};

use crate::fitness::Fitness;

/// Rewards communities whose population is close to the ideal share
/// (total population / community count).
///
/// Each community scores `min(pop, ideal) / max(pop, ideal)`, saturating to
/// 1.0 once its relative deviation from ideal is within `tolerance`. The
/// fitness value is the mean over communities, in (0, 1].
#[derive(Debug, Clone, Copy)]
pub struct PopulationBalance<'a> {
    store: &'a PrecinctStore,
    tolerance: f64,
}

impl<'a> PopulationBalance<'a> {
    /// Default saturation tolerance: 5% deviation from ideal.
    pub const DEFAULT_TOLERANCE: f64 = 0.05;

    pub fn new(store: &'a PrecinctStore) -> Self {
        Self::with_tolerance(store, Self::DEFAULT_TOLERANCE)
    }

    pub fn with_tolerance(store: &'a PrecinctStore, tolerance: f64) -> Self {
        PopulationBalance { store, tolerance }
    }

    /// Population of one community.
    pub fn population(&self, graph: &Graph, community: &Community) -> Result<u64> {
        let mut population = 0;
        for member in community.members() {
            let node = graph.node(member).ok_or(ManderError::NodeNotFound(member))?;
            if let Some(precinct) = self.store.get(node.precinct()) {
                population += precinct.population;
            }
        }
        Ok(population)
    }
}

impl Fitness for PopulationBalance<'_> {
    fn score(&self, graph: &Graph, communities: &Communities) -> Result<f64> {
        if communities.is_empty() {
            return Ok(0.0);
        }
        let mut populations = Vec::with_capacity(communities.len());
        let mut total: u64 = 0;
        for community in communities.iter() {
            let population = self.population(graph, community)?;
            total += population;
            populations.push(population);
        }
        if total == 0 {
            return Ok(0.0);
        }
        let ideal = total as f64 / communities.len() as f64;

        let mut sum = 0.0;
        for population in populations {
            let population = population as f64;
            let deviation = (population - ideal).abs() / ideal;
            sum += if deviation <= self.tolerance {
                1.0
            } else {
                population.min(ideal) / population.max(ideal)
            };
        }
        Ok(sum / communities.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mander_core::{Community, Polygon, Precinct, VoteTally};

    fn setup(populations: &[u64]) -> (PrecinctStore, Graph) {
        let mut store = PrecinctStore::new();
        let mut graph = Graph::new();
        let mut prev = None;
        for (i, &population) in populations.iter().enumerate() {
            let index = store
                .insert(Precinct::new(
                    format!("p{i}"),
                    Polygon::default(),
                    population,
                    VoteTally::new(),
                ))
                .unwrap();
            let node = graph.add_node(index);
            if let Some(prev) = prev {
                graph.add_edge(prev, node).unwrap();
            }
            prev = Some(node);
        }
        (store, graph)
    }

    #[test]
    fn test_perfect_balance_scores_one() {
        let (store, graph) = setup(&[100, 100]);
        let communities = Communities::new(vec![
            Community::from_members([0]),
            Community::from_members([1]),
        ]);
        let balance = PopulationBalance::new(&store);
        assert_eq!(balance.score(&graph, &communities).unwrap(), 1.0);
    }

    #[test]
    fn test_within_tolerance_saturates() {
        // ideal 100, deviations of 3% on either side
        let (store, graph) = setup(&[103, 97]);
        let communities = Communities::new(vec![
            Community::from_members([0]),
            Community::from_members([1]),
        ]);
        let balance = PopulationBalance::with_tolerance(&store, 0.05);
        assert_eq!(balance.score(&graph, &communities).unwrap(), 1.0);
    }

    #[test]
    fn test_imbalance_lowers_score() {
        let (store, graph) = setup(&[150, 50]);
        let communities = Communities::new(vec![
            Community::from_members([0]),
            Community::from_members([1]),
        ]);
        let balance = PopulationBalance::new(&store);
        let score = balance.score(&graph, &communities).unwrap();
        assert!(score < 1.0);
        // 100/150 and 50/100, averaged
        assert!((score - (100.0 / 150.0 + 0.5) / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_more_balanced_scores_higher() {
        let (store, graph) = setup(&[60, 50, 40, 50]);
        let balance = PopulationBalance::new(&store);

        let even = Communities::new(vec![
            Community::from_members([0, 2]),
            Community::from_members([1, 3]),
        ]);
        let skewed = Communities::new(vec![
            Community::from_members([0, 1]),
            Community::from_members([2, 3]),
        ]);

        let even_score = balance.score(&graph, &even).unwrap();
        let skewed_score = balance.score(&graph, &skewed).unwrap();
        assert!(even_score > skewed_score);
    }
}
