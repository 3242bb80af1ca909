//! The exchange primitive: the only legal mutation of a partition.

use mander_core::{Communities, Graph};
use smallvec::SmallVec;
use thiserror::Error;
use tracing::trace;

/// Moving one node from its current community to an adjacent one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exchange {
    pub node: usize,
    pub from: usize,
    pub to: usize,
}

impl Exchange {
    pub fn new(node: usize, from: usize, to: usize) -> Self {
        Exchange { node, from, to }
    }

    /// The move that puts the node back.
    pub fn inverse(&self) -> Exchange {
        Exchange {
            node: self.node,
            from: self.to,
            to: self.from,
        }
    }
}

/// Why a proposed exchange was not applied. Expected and recoverable:
/// optimizers try another candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    /// The move does not match the current partition state (unknown node,
    /// stale community index, node not in its claimed source).
    #[error("exchange does not match partition state")]
    Invalid,
    /// The source community would be left empty.
    #[error("source community has a single member")]
    SourceTooSmall,
    /// The node has no edge into the destination community.
    #[error("node is not adjacent to the destination community")]
    NotAdjacent,
    /// Removing the node would disconnect the source community.
    #[error("move would disconnect the source community")]
    WouldDisconnect,
}

/// Applies and enumerates exchanges. All partition mutation funnels through
/// here; optimizers never touch graph tags or member sets directly.
pub struct ExchangeEngine;

impl ExchangeEngine {
    /// Checks every precondition without mutating anything.
    pub fn check(
        graph: &Graph,
        communities: &Communities,
        exchange: Exchange,
    ) -> Result<(), Rejection> {
        let Some(node) = graph.node(exchange.node) else {
            return Err(Rejection::Invalid);
        };
        if node.community() != Some(exchange.from) || exchange.from == exchange.to {
            return Err(Rejection::Invalid);
        }
        let Some(source) = communities.get(exchange.from) else {
            return Err(Rejection::Invalid);
        };
        if communities.get(exchange.to).is_none() {
            return Err(Rejection::Invalid);
        }
        if !source.contains(exchange.node) {
            return Err(Rejection::Invalid);
        }

        if source.len() <= 1 {
            return Err(Rejection::SourceTooSmall);
        }
        let touches_destination = node
            .neighbors()
            .iter()
            .any(|&n| graph.node(n).and_then(|n| n.community()) == Some(exchange.to));
        if !touches_destination {
            return Err(Rejection::NotAdjacent);
        }

        let remainder: Vec<usize> = source
            .members()
            .filter(|&m| m != exchange.node)
            .collect();
        // members are graph nodes, so the induction cannot fail
        let connected = graph
            .induced_subgraph(&remainder)
            .map(|sub| sub.is_connected())
            .unwrap_or(false);
        if !connected {
            return Err(Rejection::WouldDisconnect);
        }
        Ok(())
    }

    /// Applies the exchange if every precondition holds. Returns whether it
    /// was applied; a rejection is an expected outcome, never an error.
    pub fn try_exchange(
        graph: &mut Graph,
        communities: &mut Communities,
        exchange: Exchange,
    ) -> bool {
        match Self::check(graph, communities, exchange) {
            Ok(()) => {
                Self::apply_unchecked(graph, communities, exchange);
                true
            }
            Err(rejection) => {
                trace!(
                    node = exchange.node,
                    from = exchange.from,
                    to = exchange.to,
                    %rejection,
                    "exchange rejected"
                );
                false
            }
        }
    }

    /// Applies without re-checking. Used for committing a candidate that was
    /// just checked and for undoing: the inverse of a legal exchange is
    /// itself always legal.
    pub fn apply_unchecked(graph: &mut Graph, communities: &mut Communities, exchange: Exchange) {
        // the caller guarantees both indices and the node exist
        graph.set_community(exchange.node, Some(exchange.to)).unwrap();
        let (source, destination) = communities.pair_mut(exchange.from, exchange.to).unwrap();
        source.remove(exchange.node);
        destination.insert(exchange.node);
    }

    /// Reverts a previously applied exchange.
    pub fn undo(graph: &mut Graph, communities: &mut Communities, exchange: Exchange) {
        Self::apply_unchecked(graph, communities, exchange.inverse());
    }

    /// Every (boundary node, foreign neighbor community) pair in the current
    /// partition: the complete local neighborhood for local search. A node
    /// bordering several foreign communities yields one candidate per
    /// distinct community. Candidates satisfy adjacency by construction;
    /// the remaining preconditions are checked at apply time.
    pub fn legal_exchanges(graph: &Graph, communities: &Communities) -> Vec<Exchange> {
        let mut exchanges = Vec::new();
        for node in graph.nodes() {
            let Some(from) = node.community() else {
                continue;
            };
            if from >= communities.len() {
                continue;
            }
            let mut destinations: SmallVec<[usize; 4]> = SmallVec::new();
            for &neighbor in node.neighbors() {
                let Some(to) = graph.node(neighbor).and_then(|n| n.community()) else {
                    continue;
                };
                if to != from && to < communities.len() && !destinations.contains(&to) {
                    destinations.push(to);
                }
            }
            for to in destinations {
                exchanges.push(Exchange::new(node.id(), from, to));
            }
        }
        exchanges
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::SolveContext;
    use crate::partition::ContractionPartitioner;
    use mander_core::Community;
    use mander_test::two_triangles_with_bridge;

    /// Two triangles split at the bridge: {0,1,2} and {3,4,5}.
    fn split_triangles() -> (Graph, Communities) {
        let (_store, mut graph) = two_triangles_with_bridge();
        for node in 0..3 {
            graph.set_community(node, Some(0)).unwrap();
        }
        for node in 3..6 {
            graph.set_community(node, Some(1)).unwrap();
        }
        let communities = Communities::new(vec![
            Community::from_members([0, 1, 2]),
            Community::from_members([3, 4, 5]),
        ]);
        (graph, communities)
    }

    #[test]
    fn test_bridge_endpoint_moves_across() {
        let (mut graph, mut communities) = split_triangles();

        // node 3 borders community 0 through the bridge; {4, 5} stays
        // connected, so the move is legal
        let exchange = Exchange::new(3, 1, 0);
        assert!(ExchangeEngine::try_exchange(&mut graph, &mut communities, exchange));

        assert_eq!(graph.community_of(3).unwrap(), Some(0));
        assert!(communities.get(0).unwrap().contains(3));
        assert!(!communities.get(1).unwrap().contains(3));
        communities.assert_partition(&graph).unwrap();
        assert!(communities.get(1).unwrap().is_connected(&graph).unwrap());
    }

    #[test]
    fn test_disconnecting_move_rejected() {
        // 0 - 1 - 2 in community 0, node 3 (community 1) tied to both 1
        // and 2; moving 1 would split {0, 2}
        let mut graph = Graph::new();
        for i in 0..4 {
            graph.add_node(i);
        }
        graph.add_edge(0, 1).unwrap();
        graph.add_edge(1, 2).unwrap();
        graph.add_edge(1, 3).unwrap();
        graph.add_edge(2, 3).unwrap();
        for node in 0..3 {
            graph.set_community(node, Some(0)).unwrap();
        }
        graph.set_community(3, Some(1)).unwrap();
        let mut communities = Communities::new(vec![
            Community::from_members([0, 1, 2]),
            Community::from_members([3]),
        ]);

        assert_eq!(
            ExchangeEngine::check(&graph, &communities, Exchange::new(1, 0, 1)),
            Err(Rejection::WouldDisconnect)
        );
        assert!(!ExchangeEngine::try_exchange(
            &mut graph,
            &mut communities,
            Exchange::new(1, 0, 1)
        ));
        communities.assert_partition(&graph).unwrap();

        // moving the end of the path keeps {0, 1} connected
        assert!(ExchangeEngine::try_exchange(
            &mut graph,
            &mut communities,
            Exchange::new(2, 0, 1)
        ));
        communities.assert_partition(&graph).unwrap();
    }

    #[test]
    fn test_node_without_foreign_edge_not_adjacent() {
        let (graph, communities) = split_triangles();
        assert_eq!(
            ExchangeEngine::check(&graph, &communities, Exchange::new(0, 0, 1)),
            Err(Rejection::NotAdjacent)
        );
    }

    #[test]
    fn test_singleton_source_rejected() {
        let (mut graph, _) = split_triangles();
        for node in [4, 5] {
            graph.set_community(node, Some(0)).unwrap();
        }
        graph.set_community(3, Some(1)).unwrap();
        let communities = Communities::new(vec![
            Community::from_members([0, 1, 2, 4, 5]),
            Community::from_members([3]),
        ]);

        assert_eq!(
            ExchangeEngine::check(&graph, &communities, Exchange::new(3, 1, 0)),
            Err(Rejection::SourceTooSmall)
        );
    }

    #[test]
    fn test_stale_exchange_rejected() {
        let (graph, communities) = split_triangles();
        assert_eq!(
            ExchangeEngine::check(&graph, &communities, Exchange::new(99, 0, 1)),
            Err(Rejection::Invalid)
        );
        assert_eq!(
            ExchangeEngine::check(&graph, &communities, Exchange::new(3, 0, 1)),
            Err(Rejection::Invalid)
        );
        assert_eq!(
            ExchangeEngine::check(&graph, &communities, Exchange::new(3, 1, 1)),
            Err(Rejection::Invalid)
        );
    }

    #[test]
    fn test_legal_exchanges_enumerates_boundary() {
        let (graph, communities) = split_triangles();
        let exchanges = ExchangeEngine::legal_exchanges(&graph, &communities);

        // only the bridge 2-3 crosses the cut
        assert_eq!(
            exchanges,
            vec![Exchange::new(2, 0, 1), Exchange::new(3, 1, 0)]
        );
    }

    #[test]
    fn test_undo_restores_partition() {
        let (mut graph, mut communities) = split_triangles();
        let before: Vec<Vec<usize>> = communities.iter().map(|c| c.member_vec()).collect();

        let exchange = Exchange::new(3, 1, 0);
        assert!(ExchangeEngine::try_exchange(&mut graph, &mut communities, exchange));
        ExchangeEngine::undo(&mut graph, &mut communities, exchange);

        let after: Vec<Vec<usize>> = communities.iter().map(|c| c.member_vec()).collect();
        assert_eq!(before, after);
        assert_eq!(graph.community_of(3).unwrap(), Some(1));
    }

    #[test]
    fn test_partition_survives_random_exchange_storm() {
        let (_store, mut graph) = two_triangles_with_bridge();
        let mut ctx = SolveContext::with_seed(5);
        let mut communities = ContractionPartitioner::new(2)
            .partition(&mut graph, &mut ctx)
            .unwrap();

        use rand::Rng;
        for _ in 0..200 {
            let candidates = ExchangeEngine::legal_exchanges(&graph, &communities);
            if candidates.is_empty() {
                break;
            }
            let pick = candidates[ctx.rng().random_range(0..candidates.len())];
            ExchangeEngine::try_exchange(&mut graph, &mut communities, pick);
        }

        communities.assert_partition(&graph).unwrap();
        for community in communities.iter() {
            assert!(!community.is_empty());
            assert!(community.is_connected(&graph).unwrap());
        }
    }
}
