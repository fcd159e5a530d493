// tests/common/mod.rs
//! Geseede generatoren voor willekeurige maar haalbare businstanties.

#![allow(dead_code)]

use busplan::{Graph, RowdyGroup};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub struct RandomCase {
    pub graph: Graph,
    pub num_buses: usize,
    pub max_size: usize,
    pub groups: Vec<RowdyGroup>,
}

/// Een willekeurige graaf met `num_buses * max_size >= n >= num_buses`.
pub fn random_case(seed: u64) -> RandomCase {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let n = rng.gen_range(4..=24);
    let density = rng.gen_range(0.05..0.5);

    let mut edges = Vec::new();
    for u in 0..n {
        for v in (u + 1)..n {
            if rng.gen_bool(density) {
                edges.push((u, v));
            }
        }
    }
    let graph = Graph::from_edge_list(n, &edges);

    let num_buses = rng.gen_range(1..=(n / 2).max(1));
    let min_size = (n + num_buses - 1) / num_buses;
    let max_size = min_size + rng.gen_range(0..=2);

    let students: Vec<usize> = (0..n).collect();
    let groups = (0..rng.gen_range(0..=6))
        .map(|_| {
            let size = rng.gen_range(2..=4);
            RowdyGroup::new(students.choose_multiple(&mut rng, size).copied())
        })
        .collect();

    RandomCase { graph, num_buses, max_size, groups }
}

/// Zes volledig verbonden leerlingen A tot F, indices 0 tot 5.
pub fn six_friends() -> Graph {
    let names = ["A", "B", "C", "D", "E", "F"];
    let mut edges = Vec::new();
    for (i, a) in names.iter().enumerate() {
        for b in &names[i + 1..] {
            edges.push((*a, *b));
        }
    }
    Graph::from_labelled_edges(&names, &edges)
}
