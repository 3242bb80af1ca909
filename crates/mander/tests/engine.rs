//! End-to-end engine tests across the full crate stack.

use mander::prelude::*;
use mander::{
    read_communities, Communities, ExchangeEngine, GradientDescent, Optimizer, PartisanshipStdev,
    PartitionConfig, PhaseConfig, SolveContext, VoteGroup,
};
use mander_test::{precinct_grid, rect, two_triangles_with_bridge, NaiveKernel};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn full_pipeline_partitions_optimizes_and_round_trips() {
    init_tracing();
    let kernel = NaiveKernel::new();
    let (store, mut graph) = precinct_grid(5, 4);

    let config = EngineConfig {
        random_seed: Some(13),
        partition: PartitionConfig {
            communities: 4,
            sample_cap: 100,
        },
        phases: vec![
            PhaseConfig::GradientDescent { step_limit: 100 },
            PhaseConfig::SimulatedAnnealing {
                starting_temperature: 30.0,
                ending_temperature: 1.0,
                cooling_factor: 0.99,
                epochs: 300,
            },
        ],
        ..EngineConfig::default()
    };

    let outcome = run_solver(&kernel, &store, &mut graph, config).unwrap();

    // partition invariants hold after every phase
    assert_eq!(outcome.communities.len(), 4);
    outcome.communities.assert_partition(&graph).unwrap();
    for community in outcome.communities.iter() {
        assert!(!community.is_empty());
        assert!(community.is_connected(&graph).unwrap());
        let stats = community.stats().expect("run_solver quantifies");
        assert!(stats.population > 0.0);
        assert!(stats.compactness > 0.0 && stats.compactness <= 1.0);
    }

    // persistence round-trip reproduces the assignment
    let text = write_communities(&store, &graph, &outcome.communities).unwrap();
    let (_store2, mut fresh_graph) = precinct_grid(5, 4);
    let (loaded, report) = read_communities(&text, &store, &mut fresh_graph).unwrap();
    assert_eq!(report.unmatched, 0);
    for (a, b) in loaded.iter().zip(outcome.communities.iter()) {
        assert_eq!(a.member_vec(), b.member_vec());
    }

    let table = write_quantification(&outcome.communities).unwrap();
    assert_eq!(table.lines().count(), 3);
    assert!(table.starts_with("population\t"));
}

#[test]
fn partisan_cohesion_pulls_the_bridge_split_apart() {
    // start from a lopsided split of the two triangles; gradient descent on
    // partisan cohesion should move the stray bridge endpoint home
    let (store, mut graph) = two_triangles_with_bridge();
    for node in 0..4 {
        graph.set_community(node, Some(0)).unwrap();
    }
    for node in 4..6 {
        graph.set_community(node, Some(1)).unwrap();
    }
    let mut communities = Communities::new(vec![
        Community::from_members([0, 1, 2, 3]),
        Community::from_members([4, 5]),
    ]);

    let fitness = PartisanshipStdev::new(&store);
    let mut ctx = SolveContext::with_seed(0);
    let stats = GradientDescent::new()
        .optimize(&mut graph, &mut communities, &fitness, &mut ctx)
        .unwrap();

    assert_eq!(stats.steps, 1);
    assert_eq!(communities.get(0).unwrap().member_vec(), vec![0, 1, 2]);
    assert_eq!(communities.get(1).unwrap().member_vec(), vec![3, 4, 5]);
    // both sides are now perfectly cohesive
    assert_eq!(stats.final_fitness, 0.0);
}

#[test]
fn exchange_rules_on_the_bridge_fixture() {
    let (_store, mut graph) = two_triangles_with_bridge();
    for node in 0..3 {
        graph.set_community(node, Some(0)).unwrap();
    }
    for node in 3..6 {
        graph.set_community(node, Some(1)).unwrap();
    }
    let mut communities = Communities::new(vec![
        Community::from_members([0, 1, 2]),
        Community::from_members([3, 4, 5]),
    ]);

    // the bridge endpoint can cross: its triangle stays connected
    assert!(ExchangeEngine::try_exchange(
        &mut graph,
        &mut communities,
        mander::Exchange::new(3, 1, 0)
    ));
    // now 4 and 5 hang together; moving 4 (adjacent to 3 across the cut)
    // keeps {5} connected
    assert!(ExchangeEngine::try_exchange(
        &mut graph,
        &mut communities,
        mander::Exchange::new(4, 1, 0)
    ));
    // 5 is the last member of its community: never empty a community
    assert!(!ExchangeEngine::try_exchange(
        &mut graph,
        &mut communities,
        mander::Exchange::new(5, 1, 0)
    ));
    communities.assert_partition(&graph).unwrap();
}

#[test]
fn mask_apportionment_against_a_district_polygon() {
    let kernel = NaiveKernel::new();
    let (store, graph) = precinct_grid(4, 1);

    // a "district" covering the left half of the strip
    let mask = vec![rect(0.0, 0.0, 2.0, 1.0)];
    let tally = mander::apportion(&kernel, &store, graph.nodes().map(|n| n.precinct()), &mask)
        .unwrap();

    assert!((tally.population - 200.0).abs() < 1e-9);
    // both left-half precincts lean Democratic 70/30
    assert!((tally.votes(VoteGroup::Democratic) - 140.0).abs() < 1e-9);
    assert!((tally.votes(VoteGroup::Republican) - 60.0).abs() < 1e-9);
}
