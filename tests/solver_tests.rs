// tests/solver_tests.rs
//! End-to-end tests van de oplospipeline: geldigheid van partities op willekeurige
//! instanties, het uitgewerkte voorbeeld met zes leerlingen, randgevallen en fouten.

mod common;

use approx::assert_abs_diff_eq;
use busplan::error::{Phase, SolveError};
use busplan::params::{MergeStrategy, Params, Relocation, Weighting};
use busplan::progress::{Event, Silent};
use busplan::score::score;
use busplan::{solve, solve_with, Graph, Partition, RowdyGroup};
use common::{random_case, six_friends};

fn assert_valid(graph: &Graph, partition: &Partition, num_buses: usize, max_size: usize) {
    assert_eq!(partition.len(), num_buses);
    let mut seen = vec![false; graph.n()];
    for bus in partition.buses() {
        assert!(bus.size() > 0 && bus.size() <= max_size, "bus size {}", bus.size());
        for v in bus.nodes() {
            assert!(!seen[v], "student {} on two buses", v);
            seen[v] = true;
        }
    }
    assert!(seen.iter().all(|&s| s), "a student was left behind");
}

fn all_param_sets() -> Vec<Params> {
    let mut sets = Vec::new();
    for weighting in [Weighting::Uniform, Weighting::Ranked] {
        for merge in [MergeStrategy::Simple, MergeStrategy::Greedy] {
            for relocation in [Relocation::EdgeGain, Relocation::Score] {
                let mut p = Params::default();
                p.use_strategies(weighting, merge, relocation);
                sets.push(p);
            }
        }
    }
    let mut no_swaps = Params::default();
    no_swaps.disable_swaps();
    sets.push(no_swaps);
    sets
}

#[test]
fn random_instances_yield_valid_partitions() {
    for seed in 0..40 {
        let case = random_case(seed);
        for params in all_param_sets() {
            let partition = solve_with(
                &case.graph,
                case.num_buses,
                case.max_size,
                &case.groups,
                &params,
                &mut Silent,
            )
            .unwrap_or_else(|e| panic!("seed {} with {:?}: {}", seed, params, e));
            assert_valid(&case.graph, &partition, case.num_buses, case.max_size);
            let s = score(&case.graph, &partition, &case.groups);
            assert!((0.0..=1.0).contains(&s));
        }
    }
}

#[test]
fn six_friends_split_their_rowdy_trio() {
    let graph = six_friends();
    let groups = vec![RowdyGroup::new([0, 1, 2])];
    let partition = solve(&graph, 2, 3, &groups).unwrap();

    assert_valid(&graph, &partition, 2, 3);
    assert_eq!(partition.sizes(), vec![3, 3]);
    for bus in partition.buses() {
        assert!(!groups[0].is_within(bus.bitset()), "A, B and C share a bus");
    }
    // Twee volle driehoeken vrienden: 6 van de 15 kanten blijven.
    assert_abs_diff_eq!(score(&graph, &partition, &groups), 0.4, epsilon = 1e-12);
}

#[test]
fn single_isolated_student_gets_its_own_bus() {
    let graph = Graph::from_labelled_edges(&["solo"], &[]);
    let partition = solve(&graph, 1, 1, &[]).unwrap();
    assert_eq!(partition.labelled(&graph), vec![vec!["solo".to_string()]]);
    assert_eq!(score(&graph, &partition, &[]), 1.0);
}

#[test]
fn separate_cliques_collapse_into_one_bus() {
    // Componenten {0, 1}, {2, 3, 4} en {5}.
    let graph = Graph::from_edge_list(6, &[(0, 1), (2, 3), (3, 4), (2, 4)]);
    for merge in [MergeStrategy::Simple, MergeStrategy::Greedy] {
        let mut params = Params::default();
        params.merge = merge;
        let partition = solve_with(&graph, 1, 6, &[], &params, &mut Silent).unwrap();
        assert_eq!(partition.len(), 1);
        assert_eq!(partition.bus(0).nodes().collect::<Vec<_>>(), vec![0, 1, 2, 3, 4, 5]);
    }
}

#[test]
fn greedy_merge_overflow_is_repaired() {
    // Drie paren in twee bussen van drie: geen samenvoeging past, dus een leerling verhuist.
    let graph = Graph::from_edge_list(6, &[(0, 1), (2, 3), (4, 5)]);
    let partition = solve(&graph, 2, 3, &[]).unwrap();
    assert_valid(&graph, &partition, 2, 3);
}

#[test]
fn impossible_capacities_are_rejected() {
    let graph = Graph::with_vertices(5);
    assert_eq!(
        solve(&graph, 2, 2, &[]),
        Err(SolveError::Infeasible { students: 5, num_buses: 2, max_size: 2 })
    );
    assert_eq!(
        solve(&graph, 6, 1, &[]),
        Err(SolveError::Infeasible { students: 5, num_buses: 6, max_size: 1 })
    );
    assert_eq!(
        solve(&graph, 0, 5, &[]),
        Err(SolveError::InvalidParameters { num_buses: 0, max_size: 5 })
    );
}

#[test]
fn iteration_guards_fail_loudly() {
    let graph = six_friends();
    let groups = vec![RowdyGroup::new([0, 1, 2])];

    let mut params = Params::default();
    params.limit_iterations(0, 1_000, 1_000);
    assert_eq!(
        solve_with(&graph, 2, 3, &groups, &params, &mut Silent),
        Err(SolveError::DidNotConverge { phase: Phase::Adjust, limit: 0 })
    );

    let mut params = Params::default();
    params.limit_iterations(1_000, 1_000, 0);
    assert_eq!(
        solve_with(&graph, 2, 3, &groups, &params, &mut Silent),
        Err(SolveError::DidNotConverge { phase: Phase::Improve, limit: 0 })
    );
}

#[test]
fn progress_reports_start_and_finish() {
    let graph = six_friends();
    let mut events = Vec::new();
    let mut sink = |e: &Event| events.push(e.clone());
    solve_with(&graph, 2, 3, &[], &Params::default(), &mut sink).unwrap();

    assert_eq!(
        events.first(),
        Some(&Event::Started { students: 6, num_buses: 2, max_size: 3 })
    );
    assert!(matches!(events.last(), Some(Event::Finished { violated: 0, .. })));
    assert!(events.contains(&Event::Components { current: 2, target: 2 }));
}

#[test]
fn solving_leaves_input_weights_untouched() {
    let graph = six_friends();
    let groups = vec![RowdyGroup::new([0, 1, 2])];
    solve(&graph, 2, 3, &groups).unwrap();
    assert!(graph.edges().all(|(u, v)| graph.weight(u, v) == Some(0)));
}
