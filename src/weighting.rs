//! src/weighting.rs
//!
//! Leidt kantgewichten af uit de rowdy groepen. Elke kant tussen twee leden
//! van dezelfde groep wordt bestraft, waarna alle gewichten verschuiven zodat de
//! lichtste kant precies 1 weegt. Bestrafte kanten worden lichter en worden
//! dus als eerste doorgesneden bij een splitsing via minimale snede.

use crate::{
    graph::Graph,
    params::Weighting,
    rowdy::{rowdiness_ranking, RowdyGroup},
};

/// Herberekent alle kantgewichten van `graph` en geeft het laagste gewicht
/// vóór de verschuiving terug (0 als geen kant bestraft werd).
///
/// Met [`Weighting::Ranked`] is de straf van een kant de grootste rowdiness van
/// zijn twee eindpunten, volgens de ranking begrensd door `num_buses`.
pub fn assign_edge_weights(
    graph: &mut Graph,
    groups: &[RowdyGroup],
    weighting: Weighting,
    num_buses: usize,
) -> i64 {
    graph.map_weights(|_| 0);

    let ranking = match weighting {
        Weighting::Uniform => None,
        Weighting::Ranked => Some(rowdiness_ranking(groups, num_buses)),
    };

    let mut lowest = 0i64;
    for group in groups {
        for (u, v) in group.pairs() {
            let penalty = match &ranking {
                None => 1,
                Some(r) => {
                    let ru = r.get(&u).copied().unwrap_or(0);
                    let rv = r.get(&v).copied().unwrap_or(0);
                    ru.max(rv) as i64
                }
            };
            if let Some(w) = graph.add_weight(u, v, -penalty) {
                lowest = lowest.min(w);
            }
        }
    }

    let shift = 1 - lowest;
    graph.map_weights(|w| w + shift);
    lowest
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unpenalised_edges_weigh_one_minus_lowest() {
        let mut g = Graph::from_edge_list(4, &[(0, 1), (1, 2), (2, 3)]);
        let groups = vec![RowdyGroup::new([0, 1, 2])];
        let lowest = assign_edge_weights(&mut g, &groups, Weighting::Uniform, 2);
        assert_eq!(lowest, -1);
        assert_eq!(g.weight(0, 1), Some(1));
        assert_eq!(g.weight(1, 2), Some(1));
        assert_eq!(g.weight(2, 3), Some(2));
    }
}
