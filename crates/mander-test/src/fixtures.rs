//! Synthetic precinct maps and graphs.

use mander_core::{Graph, Point, Polygon, Precinct, PrecinctStore, Ring, VoteGroup, VoteTally};

/// Axis-aligned rectangle polygon, counterclockwise.
pub fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Polygon {
    Polygon::new(Ring::new(vec![
        Point::new(x0, y0),
        Point::new(x1, y0),
        Point::new(x1, y1),
        Point::new(x0, y1),
    ]))
}

/// A unit-square precinct anchored at `(x, y)` with a two-party tally.
pub fn square_precinct(id: &str, x: f64, y: f64, population: u64, dem: u64, rep: u64) -> Precinct {
    Precinct::new(
        id,
        rect(x, y, x + 1.0, y + 1.0),
        population,
        VoteTally::from_pairs([
            (VoteGroup::Democratic, dem),
            (VoteGroup::Republican, rep),
        ]),
    )
}

/// The six-node scenario: two triangles joined by one bridge edge.
///
/// ```text
///   0        4
///   |\      /|
///   | 2 -- 3 |
///   |/      \|
///   1        5
/// ```
///
/// Nodes 0..=2 form the left triangle (Democratic-leaning precincts),
/// 3..=5 the right (Republican-leaning); 2-3 is the only edge between them.
pub fn two_triangles_with_bridge() -> (PrecinctStore, Graph) {
    let mut store = PrecinctStore::new();
    let mut graph = Graph::new();

    let positions = [
        (0.0, 2.0),
        (0.0, 0.0),
        (1.0, 1.0),
        (3.0, 1.0),
        (4.0, 2.0),
        (4.0, 0.0),
    ];
    for (i, (x, y)) in positions.into_iter().enumerate() {
        let (dem, rep) = if i < 3 { (80, 20) } else { (20, 80) };
        let index = store
            .insert(square_precinct(&format!("p{i}"), x, y, 100, dem, rep))
            .unwrap();
        graph.add_node(index);
    }

    for (u, v) in [(0, 1), (1, 2), (2, 0), (3, 4), (4, 5), (5, 3), (2, 3)] {
        graph.add_edge(u, v).unwrap();
    }
    (store, graph)
}

/// A `width` x `height` grid of unit-square precincts with 4-neighbor
/// adjacency. The left half leans Democratic, the right half Republican.
pub fn precinct_grid(width: usize, height: usize) -> (PrecinctStore, Graph) {
    let mut store = PrecinctStore::new();
    let mut graph = Graph::new();

    for y in 0..height {
        for x in 0..width {
            let (dem, rep) = if x < width / 2 { (70, 30) } else { (30, 70) };
            let index = store
                .insert(square_precinct(
                    &format!("g{x}_{y}"),
                    x as f64,
                    y as f64,
                    100,
                    dem,
                    rep,
                ))
                .unwrap();
            graph.add_node(index);
        }
    }

    for y in 0..height {
        for x in 0..width {
            let node = y * width + x;
            if x + 1 < width {
                graph.add_edge(node, node + 1).unwrap();
            }
            if y + 1 < height {
                graph.add_edge(node, node + width).unwrap();
            }
        }
    }
    (store, graph)
}
