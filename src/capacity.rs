//! src/capacity.rs
//!
//! Verkleint overvolle bussen. De minst populaire leerling van de grootste bus
//! gaat naar de beste bus met nog plaats, tot elke bus past.
//!
//! Elke verplaatsing verlaagt de totale overloop met één en duwt geen bus
//! over de limiet, dus de lus stopt na hoogstens `n` zetten bij haalbare invoer.

use crate::{
    error::{Phase, SolveError},
    graph::Graph,
    params::{Params, Relocation},
    partition::{Bus, Partition},
    progress::{Event, Progress},
    rowdy::{rowdy_size, RowdyGroup},
    score::score,
};

/// Verplaatst leerlingen tot geen bus meer dan `max_size` bevat. Geeft het
/// aantal verplaatste leerlingen terug.
pub fn enforce_capacity(
    graph: &Graph,
    partition: &mut Partition,
    max_size: usize,
    groups: &[RowdyGroup],
    params: &Params,
    progress: &mut dyn Progress,
) -> Result<usize, SolveError> {
    let mut moves = 0;
    loop {
        let Some(largest) = partition.largest() else { break };
        if partition.bus(largest).size() <= max_size {
            break;
        }
        if moves == params.max_relocations {
            return Err(SolveError::DidNotConverge { phase: Phase::Capacity, limit: moves });
        }

        let Some(student) = least_popular(graph, partition.bus(largest)) else { break };
        partition.bus_mut(largest).remove(student);

        let target = match params.relocation {
            Relocation::EdgeGain => by_edge_gain(graph, partition, student, largest, max_size, groups),
            Relocation::Score => by_score(graph, partition, student, largest, max_size, groups),
        };
        let Some(target) = target else {
            return Err(SolveError::NoEligibleBus { student });
        };
        partition.bus_mut(target).add(student);
        moves += 1;

        let now = partition.largest().map_or(0, |i| partition.bus(i).size());
        progress.report(&Event::Reduced { largest: now, max_size });
    }
    Ok(moves)
}

/// De leerling met de minste vrienden in de eigen bus. Een leerling met hoogstens
/// één vriend in de bus wordt meteen teruggegeven; anders wint de laagste
/// interne graad, laagste knoop bij gelijke stand.
pub fn least_popular(graph: &Graph, bus: &Bus) -> Option<usize> {
    let mut best: Option<(usize, usize)> = None;
    for v in bus.nodes() {
        let degree = graph.internal_degree(v, bus.bitset());
        if degree <= 1 {
            return Some(v);
        }
        if best.map_or(true, |(_, d)| degree < d) {
            best = Some((v, degree));
        }
    }
    best.map(|(v, _)| v)
}

/// Bussen behalve `source` die nog een leerling kunnen opnemen.
fn eligible(partition: &Partition, source: usize, max_size: usize) -> impl Iterator<Item = usize> + '_ {
    (0..partition.len()).filter(move |&i| i != source && partition.bus(i).size() < max_size)
}

/// Verkiest bussen waar de leerling geen rowdy groep compleet maakt, en daarvan
/// die met de meeste vrienden. Anders de bus waar de minste leerlingen in een
/// complete groep belanden. Laagste index bij gelijke stand.
fn by_edge_gain(
    graph: &Graph,
    partition: &Partition,
    student: usize,
    source: usize,
    max_size: usize,
    groups: &[RowdyGroup],
) -> Option<usize> {
    let mut best_by_edges: Option<(usize, usize)> = None;
    let mut best_by_rowdy: Option<(usize, usize)> = None;

    for i in eligible(partition, source, max_size) {
        let bus = partition.bus(i);
        let gained = graph.internal_degree(student, bus.bitset());
        let before = rowdy_size(bus.bitset(), groups);
        let mut with = bus.clone();
        with.add(student);
        let growth = rowdy_size(with.bitset(), groups).saturating_sub(before);

        if growth > 0 {
            if best_by_rowdy.map_or(true, |(_, g)| growth < g) {
                best_by_rowdy = Some((i, growth));
            }
        } else if best_by_edges.map_or(true, |(_, e)| gained > e) {
            best_by_edges = Some((i, gained));
        }
    }
    best_by_edges.or(best_by_rowdy).map(|(i, _)| i)
}

/// Kiest de bus die de beste globale score geeft zodra de leerling instapt.
fn by_score(
    graph: &Graph,
    partition: &mut Partition,
    student: usize,
    source: usize,
    max_size: usize,
    groups: &[RowdyGroup],
) -> Option<usize> {
    let candidates: Vec<usize> = eligible(partition, source, max_size).collect();
    let mut best: Option<(usize, f64)> = None;
    for i in candidates {
        partition.bus_mut(i).add(student);
        let s = score(graph, partition, groups);
        partition.bus_mut(i).remove(student);
        if best.map_or(true, |(_, b)| s > b) {
            best = Some((i, s));
        }
    }
    best.map(|(i, _)| i)
}
