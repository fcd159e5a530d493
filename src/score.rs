//! src/score.rs
//!
//! Kwaliteit van een partitie: het aandeel vriendschappen dat in dezelfde bus
//! blijft, waarbij leerlingen van een rowdy groep die samen in één bus zit het
//! krediet voor al hun kanten verliezen. Pure functie, geen caching.

use crate::{graph::Graph, partition::Partition, rowdy::RowdyGroup};
use bitvec::prelude::*;

/// Score van een graaf zonder kanten, waar geen vriendschap te breken valt.
pub const EDGELESS_SCORE: f64 = 1.0;

/// Scoort `partition` in `[0, 1]`; hoger is beter.
pub fn score(graph: &Graph, partition: &Partition, groups: &[RowdyGroup]) -> f64 {
    let total = graph.m();
    if total == 0 {
        return EDGELESS_SCORE;
    }

    let assignment = partition.assignment();
    let mut removed = bitvec![0; graph.n()];
    for group in groups.iter().filter(|g| g.is_violated(&assignment)) {
        for &v in group.members() {
            removed.set(v, true);
        }
    }

    let kept = graph
        .edges()
        .filter(|&(u, v)| {
            !removed[u] && !removed[v] && assignment[u].is_some() && assignment[u] == assignment[v]
        })
        .count();
    kept as f64 / total as f64
}
