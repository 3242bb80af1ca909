//! Partisanship cohesion metric.

use mander_core::{Communities, Community, Graph, ManderError, PrecinctStore, Result, VoteGroup};

use crate::fitness::Fitness;

/// Measures how politically uniform each community is internally.
///
/// For one community: the standard deviation of member precincts' vote
/// shares, computed per vote category and averaged over the categories that
/// received any votes in the community. Lower is more cohesive.
///
/// As a [`Fitness`] the mean stdev over communities is negated, so
/// optimizers uniformly maximize.
#[derive(Debug, Clone, Copy)]
pub struct PartisanshipStdev<'a> {
    store: &'a PrecinctStore,
}

impl<'a> PartisanshipStdev<'a> {
    pub fn new(store: &'a PrecinctStore) -> Self {
        PartisanshipStdev { store }
    }

    /// Average vote-share standard deviation for one community.
    pub fn community_stdev(&self, graph: &Graph, community: &Community) -> Result<f64> {
        let mut shares: Vec<[f64; VoteGroup::COUNT]> = Vec::with_capacity(community.len());
        let mut totals = [0u64; VoteGroup::COUNT];

        for member in community.members() {
            let node = graph.node(member).ok_or(ManderError::NodeNotFound(member))?;
            let Some(precinct) = self.store.get(node.precinct()) else {
                continue;
            };
            let mut row = [0.0; VoteGroup::COUNT];
            for (group, count) in precinct.votes.iter() {
                row[group.index()] = precinct.votes.share(group);
                totals[group.index()] += count;
            }
            shares.push(row);
        }
        if shares.is_empty() {
            return Ok(0.0);
        }

        let mut sum = 0.0;
        let mut categories = 0usize;
        for group in VoteGroup::ALL {
            if totals[group.index()] == 0 {
                continue;
            }
            let column: Vec<f64> = shares.iter().map(|row| row[group.index()]).collect();
            sum += stdev(&column);
            categories += 1;
        }
        if categories == 0 {
            Ok(0.0)
        } else {
            Ok(sum / categories as f64)
        }
    }

    /// Mean of the per-community stdev values.
    pub fn mean_stdev(&self, graph: &Graph, communities: &Communities) -> Result<f64> {
        if communities.is_empty() {
            return Ok(0.0);
        }
        let mut sum = 0.0;
        for community in communities.iter() {
            sum += self.community_stdev(graph, community)?;
        }
        Ok(sum / communities.len() as f64)
    }
}

impl Fitness for PartisanshipStdev<'_> {
    fn score(&self, graph: &Graph, communities: &Communities) -> Result<f64> {
        Ok(-self.mean_stdev(graph, communities)?)
    }
}

/// Population standard deviation.
fn stdev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let variance = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mander_core::{Polygon, Precinct, VoteTally};

    fn setup(votes: &[(u64, u64)]) -> (PrecinctStore, Graph) {
        let mut store = PrecinctStore::new();
        let mut graph = Graph::new();
        let mut prev = None;
        for (i, &(dem, rep)) in votes.iter().enumerate() {
            let tally = VoteTally::from_pairs([
                (VoteGroup::Democratic, dem),
                (VoteGroup::Republican, rep),
            ]);
            let index = store
                .insert(Precinct::new(format!("p{i}"), Polygon::default(), 100, tally))
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
    fn test_uniform_precincts_have_zero_stdev() {
        let (store, graph) = setup(&[(60, 40), (60, 40), (60, 40)]);
        let metric = PartisanshipStdev::new(&store);
        let community = Community::from_members([0, 1, 2]);
        assert_eq!(metric.community_stdev(&graph, &community).unwrap(), 0.0);
    }

    #[test]
    fn test_single_member_has_zero_stdev() {
        let (store, graph) = setup(&[(60, 40)]);
        let metric = PartisanshipStdev::new(&store);
        let community = Community::from_members([0]);
        assert_eq!(metric.community_stdev(&graph, &community).unwrap(), 0.0);
    }

    #[test]
    fn test_mixed_precincts_have_positive_stdev() {
        let (store, graph) = setup(&[(90, 10), (10, 90)]);
        let metric = PartisanshipStdev::new(&store);
        let community = Community::from_members([0, 1]);
        // shares 0.9/0.1 per category: stdev 0.4 in both tracked categories
        let value = metric.community_stdev(&graph, &community).unwrap();
        assert!((value - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_fitness_prefers_cohesive_partition() {
        let (store, graph) = setup(&[(90, 10), (85, 15), (10, 90), (15, 85)]);
        let metric = PartisanshipStdev::new(&store);

        let cohesive = Communities::new(vec![
            Community::from_members([0, 1]),
            Community::from_members([2, 3]),
        ]);
        let mixed = Communities::new(vec![
            Community::from_members([0, 2]),
            Community::from_members([1, 3]),
        ]);

        let cohesive_score = metric.score(&graph, &cohesive).unwrap();
        let mixed_score = metric.score(&graph, &mixed).unwrap();
        assert!(cohesive_score > mixed_score);
    }
}
