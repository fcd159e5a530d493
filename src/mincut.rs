//! src/mincut.rs
//!
//! Stoer–Wagner globale minimale snede over de gewogen subgraaf geïnduceerd door
//! een verzameling leerlingen. Loopt in O(k³) voor k leerlingen, ruim voldoende
//! voor componenten van busgrootte.

use crate::graph::Graph;
use bitvec::prelude::*;

/// Een opsplitsing van een knopenverzameling in twee niet-lege helften.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MinCut {
    /// Totaal gewicht van de kanten die de snede kruisen.
    pub value: i64,
    pub side: BitVec,
    pub rest: BitVec,
}

/// Berekent een globale minimale snede van de door `set` geïnduceerde subgraaf.
///
/// Geeft `None` als de verzameling minder dan twee leerlingen bevat. Een niet
/// samenhangende verzameling geeft snede 0. Bij gelijke waarde wint de eerst gevonden snede.
pub fn stoer_wagner(graph: &Graph, set: &BitSlice) -> Option<MinCut> {
    let nodes: Vec<usize> = set.iter_ones().collect();
    let k = nodes.len();
    if k < 2 {
        return None;
    }

    // Dichte gewichtsmatrix over de lokale indices 0..k.
    let mut w = vec![vec![0i64; k]; k];
    for (i, &u) in nodes.iter().enumerate() {
        for (j, &v) in nodes.iter().enumerate().skip(i + 1) {
            if let Some(weight) = graph.weight(u, v) {
                w[i][j] = weight;
                w[j][i] = weight;
            }
        }
    }

    // merged[i] bevat de lokale knopen die in superknoop i zijn samengetrokken.
    let mut merged: Vec<Vec<usize>> = (0..k).map(|i| vec![i]).collect();
    let mut active = vec![true; k];
    let mut best_value = i64::MAX;
    let mut best_side: Vec<usize> = Vec::new();

    for phase in 0..k - 1 {
        let remaining = k - phase;
        let mut attached = vec![0i64; k];
        let mut in_a = vec![false; k];
        let mut prev = usize::MAX;
        let mut last = usize::MAX;
        let mut cut_of_phase = 0;

        for _ in 0..remaining {
            // Sterkst verbonden superknoop, laagste index bij gelijke stand.
            let mut sel = usize::MAX;
            for j in 0..k {
                if active[j] && !in_a[j] && (sel == usize::MAX || attached[j] > attached[sel]) {
                    sel = j;
                }
            }
            in_a[sel] = true;
            prev = last;
            last = sel;
            cut_of_phase = attached[sel];
            for j in 0..k {
                if active[j] && !in_a[j] {
                    attached[j] += w[sel][j];
                }
            }
        }

        if cut_of_phase < best_value {
            best_value = cut_of_phase;
            best_side = merged[last].clone();
        }

        // Trek `last` samen met `prev`.
        for j in 0..k {
            let extra = w[last][j];
            w[prev][j] += extra;
            w[j][prev] = w[prev][j];
        }
        w[prev][prev] = 0;
        let moved = std::mem::take(&mut merged[last]);
        merged[prev].extend(moved);
        active[last] = false;
    }

    let mut side = bitvec![0; graph.n()];
    for i in best_side {
        side.set(nodes[i], true);
    }
    let mut rest = set.to_bitvec();
    for v in side.iter_ones() {
        rest.set(v, false);
    }
    Some(MinCut { value: best_value, side, rest })
}
