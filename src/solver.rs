//! src/solver.rs
//!
//! De oplospipeline: weeg de kanten, breng het aantal componenten op het aantal
//! bussen, dwing de buscapaciteit af en verbeter het resultaat met lokaal zoeken.
//! Elke oplosrun werkt op een eigen kopie van de graaf, zodat onafhankelijke
//! runs op verschillende threads kunnen lopen.

use crate::{
    adjust::adjust_component_count,
    capacity::enforce_capacity,
    error::SolveError,
    graph::Graph,
    improve::improve,
    params::Params,
    partition::{Bus, Partition},
    progress::{Event, Progress, Silent},
    rowdy::{violated_groups, RowdyGroup},
    weighting::assign_edge_weights,
};

/// Verdeelt de leerlingen van `graph` over `num_buses` bussen van hoogstens
/// `max_size` leerlingen, met de standaard [`Params`].
pub fn solve(
    graph: &Graph,
    num_buses: usize,
    max_size: usize,
    groups: &[RowdyGroup],
) -> Result<Partition, SolveError> {
    solve_with(graph, num_buses, max_size, groups, &Params::default(), &mut Silent)
}

/// Voert de volledige pipeline uit met expliciete parameters en voortgangsrapportage.
///
/// De teruggegeven partitie heeft precies `num_buses` disjuncte, niet-lege bussen
/// van hoogstens `max_size` leerlingen die elke leerling bevatten; al het andere
/// wordt gemeld als [`SolveError::InvalidPartition`].
pub fn solve_with(
    graph: &Graph,
    num_buses: usize,
    max_size: usize,
    groups: &[RowdyGroup],
    params: &Params,
    progress: &mut dyn Progress,
) -> Result<Partition, SolveError> {
    check_feasible(graph.n(), num_buses, max_size)?;
    progress.report(&Event::Started { students: graph.n(), num_buses, max_size });

    let mut g = graph.clone();
    let lowest = assign_edge_weights(&mut g, groups, params.weighting, num_buses);
    progress.report(&Event::Weighted { lowest });

    let components = g.connected_components().into_iter().map(Bus::from_bitset).collect();
    let mut partition =
        adjust_component_count(&g, components, num_buses, max_size, groups, params, progress)?;
    enforce_capacity(&g, &mut partition, max_size, groups, params, progress)?;
    let outcome = improve(&g, &mut partition, max_size, groups, params, progress)?;

    partition
        .validate(num_buses, max_size)
        .map_err(SolveError::InvalidPartition)?;

    let violated = violated_groups(&partition.assignment(), groups);
    progress.report(&Event::Finished { score: outcome.score, violated });
    Ok(partition)
}

/// Weigert busaantallen en -groottes waarvoor geen geldige partitie bestaat.
pub fn check_feasible(students: usize, num_buses: usize, max_size: usize) -> Result<(), SolveError> {
    if num_buses == 0 || max_size == 0 {
        return Err(SolveError::InvalidParameters { num_buses, max_size });
    }
    if students < num_buses || students > num_buses.saturating_mul(max_size) {
        return Err(SolveError::Infeasible { students, num_buses, max_size });
    }
    Ok(())
}

