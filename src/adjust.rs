//! src/adjust.rs
//!
//! Brengt het aantal componenten precies op het aantal bussen. Bij te weinig
//! componenten wordt gesplitst langs de goedkoopste minimale snede, bij te veel samengevoegd.

use crate::{
    error::{Phase, SolveError},
    graph::Graph,
    mincut::{stoer_wagner, MinCut},
    params::{MergeStrategy, Params},
    partition::{Bus, Partition},
    progress::{Event, Progress},
    rowdy::RowdyGroup,
    score::score,
};

/// Maakt van `components` precies `num_buses` bussen.
pub fn adjust_component_count(
    graph: &Graph,
    components: Vec<Bus>,
    num_buses: usize,
    max_size: usize,
    groups: &[RowdyGroup],
    params: &Params,
    progress: &mut dyn Progress,
) -> Result<Partition, SolveError> {
    let mut partition = Partition::new(graph.n(), components);
    progress.report(&Event::Components { current: partition.len(), target: num_buses });

    if partition.len() < num_buses {
        split_until(graph, &mut partition, num_buses, params, progress)?;
    } else if partition.len() > num_buses {
        merge_until(graph, &mut partition, num_buses, max_size, groups, params, progress)?;
    }
    Ok(partition)
}

/// Splitst de component met de kleinste minimale snede tot er
/// `num_buses` componenten zijn. Helften worden achteraan toegevoegd.
fn split_until(
    graph: &Graph,
    partition: &mut Partition,
    num_buses: usize,
    params: &Params,
    progress: &mut dyn Progress,
) -> Result<(), SolveError> {
    // Snedes worden per component gecachet; alleen nieuwe helften krijgen een nieuwe snede.
    let mut cuts: Vec<Option<MinCut>> = partition
        .buses()
        .iter()
        .map(|bus| stoer_wagner(graph, bus.bitset()))
        .collect();
    let mut rounds = 0;

    while partition.len() < num_buses {
        if rounds == params.max_adjust_rounds {
            return Err(SolveError::DidNotConverge { phase: Phase::Adjust, limit: rounds });
        }
        rounds += 1;

        // Componenten zonder snede (minder dan twee leerlingen) zijn niet te splitsen.
        let cheapest = cuts
            .iter()
            .enumerate()
            .filter_map(|(i, cut)| cut.as_ref().map(|c| (i, c.value)))
            .fold(None, |best: Option<(usize, i64)>, (i, value)| match best {
                Some((_, v)) if v <= value => best,
                _ => Some((i, value)),
            });
        let cut = match cheapest {
            Some((index, _)) => {
                partition.remove(index);
                cuts.remove(index)
            }
            None => None,
        };
        let Some(cut) = cut else {
            return Err(SolveError::Unsplittable { components: partition.len(), num_buses });
        };

        for half in [cut.side, cut.rest] {
            let bus = Bus::from_bitset(half);
            cuts.push(stoer_wagner(graph, bus.bitset()));
            partition.push(bus);
        }
        progress.report(&Event::Components { current: partition.len(), target: num_buses });
    }
    Ok(())
}

fn merge_until(
    graph: &Graph,
    partition: &mut Partition,
    num_buses: usize,
    max_size: usize,
    groups: &[RowdyGroup],
    params: &Params,
    progress: &mut dyn Progress,
) -> Result<(), SolveError> {
    let mut rounds = 0;
    while partition.len() > num_buses {
        if rounds == params.max_adjust_rounds {
            return Err(SolveError::DidNotConverge { phase: Phase::Adjust, limit: rounds });
        }
        rounds += 1;

        let Some(smallest) = partition.smallest() else { break };
        let partner = match params.merge {
            MergeStrategy::Simple => smallest_other(partition, smallest),
            MergeStrategy::Greedy => best_partner(graph, partition, smallest, max_size, groups)
                .or_else(|| smallest_other(partition, smallest)),
        };
        let Some(partner) = partner else { break };
        partition.merge(smallest, partner);
        progress.report(&Event::Components { current: partition.len(), target: num_buses });
    }
    Ok(())
}

/// Kleinste component behalve `skip`, laagste index bij gelijke stand.
fn smallest_other(partition: &Partition, skip: usize) -> Option<usize> {
    partition
        .buses()
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != skip)
        .min_by_key(|&(i, bus)| (bus.size(), i))
        .map(|(i, _)| i)
}

/// Partner van component `source` die binnen `max_size` blijft en na samenvoegen
/// de beste score geeft, laagste index bij gelijke stand.
fn best_partner(
    graph: &Graph,
    partition: &Partition,
    source: usize,
    max_size: usize,
    groups: &[RowdyGroup],
) -> Option<usize> {
    let size = partition.bus(source).size();
    let mut best: Option<(usize, f64)> = None;
    for (i, bus) in partition.buses().iter().enumerate() {
        if i == source || bus.size() + size > max_size {
            continue;
        }
        let mut candidate = partition.clone();
        candidate.merge(source, i);
        let s = score(graph, &candidate, groups);
        if best.map_or(true, |(_, b)| s > b) {
            best = Some((i, s));
        }
    }
    best.map(|(i, _)| i)
}
