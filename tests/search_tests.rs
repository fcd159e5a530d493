// tests/search_tests.rs
//! Tests voor scoring, componentaanpassing, capaciteitsbewaking en lokaal zoeken.

mod common;

use approx::assert_relative_eq;
use busplan::adjust::adjust_component_count;
use busplan::capacity::{enforce_capacity, least_popular};
use busplan::improve::improve;
use busplan::params::{MergeStrategy, Params, Relocation, Weighting};
use busplan::progress::{Event, Silent};
use busplan::score::score;
use busplan::weighting::assign_edge_weights;
use busplan::{Bus, Graph, Partition, RowdyGroup};
use common::{random_case, six_friends};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Deelt de `n` leerlingen na schudden round-robin uit over `buses` bussen.
fn random_partition(n: usize, buses: usize, seed: u64) -> Partition {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut students: Vec<usize> = (0..n).collect();
    students.shuffle(&mut rng);
    let mut sets = vec![Vec::new(); buses];
    for (i, v) in students.into_iter().enumerate() {
        sets[i % buses].push(v);
    }
    Partition::from_sets(n, &sets)
}

/*────────── Score ──────────*/

#[test]
fn score_stays_within_unit_interval() {
    for seed in 0..50 {
        let case = random_case(seed);
        let partition = random_partition(case.graph.n(), case.num_buses, seed);
        let s = score(&case.graph, &partition, &case.groups);
        assert!((0.0..=1.0).contains(&s), "seed {}: score {}", seed, s);
    }
}

#[test]
fn edgeless_graph_scores_one() {
    let graph = Graph::with_vertices(3);
    let partition = Partition::from_sets(3, &[vec![0, 1, 2]]);
    let groups = vec![RowdyGroup::new([0, 1])];
    assert_eq!(score(&graph, &partition, &groups), 1.0);
}

#[test]
fn splitting_friends_costs_their_edges() {
    let graph = Graph::from_edge_list(4, &[(0, 1), (2, 3), (1, 2)]);
    let partition = Partition::from_sets(4, &[vec![0, 1], vec![2, 3]]);
    assert_relative_eq!(score(&graph, &partition, &[]), 2.0 / 3.0);
}

#[test]
fn score_ignores_edge_weights() {
    let mut graph = six_friends();
    let partition = Partition::from_sets(6, &[vec![0, 1, 3], vec![2, 4, 5]]);
    let groups = vec![RowdyGroup::new([0, 1, 2])];
    let before = score(&graph, &partition, &groups);
    assign_edge_weights(&mut graph, &groups, Weighting::Uniform, 2);
    assert_eq!(score(&graph, &partition, &groups), before);
}

/*────────── Component adjustment ──────────*/

#[test]
fn min_cut_split_separates_the_rowdy_trio() {
    let mut graph = six_friends();
    let groups = vec![RowdyGroup::new([0, 1, 2])];
    assign_edge_weights(&mut graph, &groups, Weighting::Uniform, 2);
    let components: Vec<Bus> = graph.connected_components().into_iter().map(Bus::from_bitset).collect();

    let partition =
        adjust_component_count(&graph, components, 2, 3, &groups, &Params::default(), &mut Silent).unwrap();
    assert_eq!(partition.len(), 2);
    assert!(partition.buses().iter().all(|b| !groups[0].is_within(b.bitset())));
}

#[test]
fn split_reaches_the_bus_count() {
    // Een pad van acht leerlingen, gesplitst in vier delen.
    let mut graph = Graph::from_edge_list(8, &(0..7).map(|i| (i, i + 1)).collect::<Vec<_>>());
    assign_edge_weights(&mut graph, &[], Weighting::Uniform, 4);
    let components: Vec<Bus> = graph.connected_components().into_iter().map(Bus::from_bitset).collect();
    let partition =
        adjust_component_count(&graph, components, 4, 8, &[], &Params::default(), &mut Silent).unwrap();
    assert_eq!(partition.len(), 4);
    assert_eq!(partition.sizes().iter().sum::<usize>(), 8);
    assert!(partition.buses().iter().all(|b| !b.is_empty()));
}

#[test]
fn merging_unites_every_component() {
    let graph = Graph::from_edge_list(6, &[(0, 1), (2, 3), (3, 4), (2, 4)]);
    for merge in [MergeStrategy::Simple, MergeStrategy::Greedy] {
        let mut params = Params::default();
        params.merge = merge;
        let components: Vec<Bus> = graph.connected_components().into_iter().map(Bus::from_bitset).collect();
        assert_eq!(components.len(), 3);
        let partition = adjust_component_count(&graph, components, 1, 6, &[], &params, &mut Silent).unwrap();
        assert_eq!(partition.len(), 1);
        assert_eq!(partition.bus(0).size(), 6);
    }
}

/*────────── Capacity ──────────*/

#[test]
fn capacity_enforcement_empties_overfull_buses() {
    for seed in 0..30 {
        let case = random_case(seed);
        let n = case.graph.n();
        for relocation in [Relocation::EdgeGain, Relocation::Score] {
            let mut params = Params::default();
            params.relocation = relocation;
            // Iedereen begint in de eerste bus.
            let mut sets = vec![Vec::new(); case.num_buses];
            sets[0] = (0..n).collect();
            let mut partition = Partition::from_sets(n, &sets);

            let moves = enforce_capacity(&case.graph, &mut partition, case.max_size, &case.groups, &params, &mut Silent)
                .unwrap();
            assert!(moves <= n);
            assert!(partition.buses().iter().all(|b| b.size() <= case.max_size));
            assert_eq!(partition.sizes().iter().sum::<usize>(), n);
        }
    }
}

#[test]
fn least_popular_prefers_minimum_internal_degree() {
    // K4 op {0, 1, 2, 3} zonder kant (0, 1): 0 en 1 hebben graad 2.
    let graph = Graph::from_edge_list(4, &[(0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]);
    let bus = Bus::from_nodes(4, 0..4);
    assert_eq!(least_popular(&graph, &bus), Some(0));
}

/*────────── Local search ──────────*/

#[test]
fn local_search_only_accepts_improvements() {
    for seed in 0..30 {
        let case = random_case(seed);
        let n = case.graph.n();
        let mut partition = random_partition(n, case.num_buses, seed + 1000);
        let start = score(&case.graph, &partition, &case.groups);

        let mut accepted = Vec::new();
        let mut sink = |e: &Event| {
            if let Event::Improved { score } = e {
                accepted.push(*score);
            }
        };
        let outcome = improve(&case.graph, &mut partition, case.max_size, &case.groups, &Params::default(), &mut sink)
            .unwrap();

        let mut last = start;
        for s in &accepted {
            assert!(*s > last, "seed {}: {} after {}", seed, s, last);
            last = *s;
        }
        assert_eq!(outcome.moves + outcome.swaps, accepted.len());
        assert_relative_eq!(outcome.score, score(&case.graph, &partition, &case.groups));
        assert!(partition.buses().iter().all(|b| !b.is_empty() && b.size() <= case.max_size));
    }
}

#[test]
fn swaps_break_up_a_full_rowdy_bus() {
    let graph = six_friends();
    let groups = vec![RowdyGroup::new([0, 1, 2])];
    let mut partition = Partition::from_sets(6, &[vec![0, 1, 2], vec![3, 4, 5]]);

    let mut params = Params::default();
    params.disable_swaps();
    let stuck = improve(&graph, &mut partition.clone(), 3, &groups, &params, &mut Silent).unwrap();
    assert_eq!(stuck.moves + stuck.swaps, 0);

    let outcome = improve(&graph, &mut partition, 3, &groups, &Params::default(), &mut Silent).unwrap();
    assert_eq!(outcome.swaps, 1);
    assert_relative_eq!(outcome.score, 0.4);
    assert_eq!(partition.sizes(), vec![3, 3]);
}
