//! src/improve.rs
//!
//! Hill climbing op de score. Elke ronde evalueert elke verplaatsing van één
//! leerling naar een bus met plaats en voert de beste strikt verbeterende uit.
//! Helpt geen enkele zet, dan worden ook ruilparen geprobeerd die een lid van een
//! complete rowdy groep uit de bus halen; ruilen behoudt de busgroottes en werkt
//! dus ook als elke bus vol zit.

use crate::{
    error::{Phase, SolveError},
    graph::Graph,
    params::Params,
    partition::Partition,
    progress::{Event, Progress},
    rowdy::RowdyGroup,
    score::score,
};
use bitvec::prelude::*;

/// Resultaat van een lokale zoekrun.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Outcome {
    pub moves: usize,
    pub swaps: usize,
    pub score: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Step {
    Move { student: usize, from: usize, to: usize },
    Swap { u: usize, a: usize, v: usize, b: usize },
}

impl Step {
    fn apply(self, partition: &mut Partition) {
        match self {
            Step::Move { student, from, to } => partition.move_node(student, from, to),
            Step::Swap { u, a, v, b } => partition.swap_nodes(u, a, v, b),
        }
    }

    fn undo(self, partition: &mut Partition) {
        match self {
            Step::Move { student, from, to } => partition.move_node(student, to, from),
            Step::Swap { u, a, v, b } => partition.swap_nodes(u, b, v, a),
        }
    }
}

/// Verbetert `partition` in place tot geen stap de score nog verhoogt.
pub fn improve(
    graph: &Graph,
    partition: &mut Partition,
    max_size: usize,
    groups: &[RowdyGroup],
    params: &Params,
    progress: &mut dyn Progress,
) -> Result<Outcome, SolveError> {
    let mut current = score(graph, partition, groups);
    let mut outcome = Outcome { moves: 0, swaps: 0, score: current };

    loop {
        let mut best = best_move(graph, partition, max_size, groups, current);
        if best.is_none() && params.swap_moves {
            best = best_swap(graph, partition, groups, current);
        }
        let Some((step, next)) = best else { break };

        if outcome.moves + outcome.swaps == params.max_improve_moves {
            return Err(SolveError::DidNotConverge {
                phase: Phase::Improve,
                limit: params.max_improve_moves,
            });
        }
        step.apply(partition);
        match step {
            Step::Move { .. } => outcome.moves += 1,
            Step::Swap { .. } => outcome.swaps += 1,
        }
        current = next;
        outcome.score = current;
        progress.report(&Event::Improved { score: current });
    }
    Ok(outcome)
}

/// Evalueert `step` op `partition` en bewaart hem in `best` als hij zowel de
/// huidige beste als `floor` verslaat.
fn consider(
    graph: &Graph,
    partition: &mut Partition,
    groups: &[RowdyGroup],
    step: Step,
    floor: f64,
    best: &mut Option<(Step, f64)>,
) {
    step.apply(partition);
    let s = score(graph, partition, groups);
    step.undo(partition);
    let bar = best.map_or(floor, |(_, b)| b);
    if s > bar {
        *best = Some((step, s));
    }
}

/// Beste strikt verbeterende enkele zet. Een zet maakt de bronbus nooit leeg.
fn best_move(
    graph: &Graph,
    partition: &mut Partition,
    max_size: usize,
    groups: &[RowdyGroup],
    current: f64,
) -> Option<(Step, f64)> {
    let mut best = None;
    for from in 0..partition.len() {
        if partition.bus(from).size() <= 1 {
            continue;
        }
        let students: Vec<usize> = partition.bus(from).nodes().collect();
        for student in students {
            for to in 0..partition.len() {
                if to == from || partition.bus(to).size() >= max_size {
                    continue;
                }
                consider(graph, partition, groups, Step::Move { student, from, to }, current, &mut best);
            }
        }
    }
    best
}

/// Beste strikt verbeterende ruil van een lid van een complete rowdy groep met
/// een leerling in een andere bus.
fn best_swap(
    graph: &Graph,
    partition: &mut Partition,
    groups: &[RowdyGroup],
    current: f64,
) -> Option<(Step, f64)> {
    let assignment = partition.assignment();
    let mut rowdy = bitvec![0; partition.n()];
    for group in groups.iter().filter(|g| g.is_violated(&assignment)) {
        for &v in group.members() {
            rowdy.set(v, true);
        }
    }

    let mut best = None;
    for u in rowdy.iter_ones() {
        let Some(a) = assignment[u] else { continue };
        for (v, slot) in assignment.iter().enumerate() {
            let Some(b) = *slot else { continue };
            if b == a {
                continue;
            }
            consider(graph, partition, groups, Step::Swap { u, a, v, b }, current, &mut best);
        }
    }
    best
}
