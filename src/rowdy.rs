//! src/rowdy.rs
//!
//! Rowdy groepen: verzamelingen leerlingen die niet allemaal in dezelfde bus mogen.
//! Rangschikt leerlingen ook op het aantal groepen waartoe ze behoren ("rowdiness").

use crate::graph::Graph;
use bitvec::slice::BitSlice;
use itertools::Itertools;
use std::collections::HashMap;

/// Leerlingknoop → aantal rowdy groepen waartoe hij behoort.
pub type Rowdiness = HashMap<usize, usize>;

/// Leerlingen tellen pas als rowdy boven dit aantal lidmaatschappen.
const ROWDY_THRESHOLD: usize = 2;

/// Een onveranderlijke rowdy groep. Leden worden gesorteerd en zonder duplicaten opgeslagen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowdyGroup {
    members: Vec<usize>,
}

impl RowdyGroup {
    pub fn new<I: IntoIterator<Item = usize>>(members: I) -> Self {
        let members = members.into_iter().sorted_unstable().dedup().collect();
        Self { members }
    }

    /// Zoekt leerling-identifiers op in `graph`. Geeft de groep terug en de
    /// identifiers die niet in de graaf voorkomen.
    pub fn from_labels<'a, I>(graph: &Graph, labels: I) -> (Self, Vec<&'a str>)
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut known = Vec::new();
        let mut unknown = Vec::new();
        for label in labels {
            match graph.index_of(label) {
                Some(v) => known.push(v),
                None => unknown.push(label),
            }
        }
        (Self::new(known), unknown)
    }

    #[inline]
    pub fn members(&self) -> &[usize] {
        &self.members
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Elk ongeordend paar leden, `(i, j)` met i vóór j.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.members.iter().copied().tuple_combinations()
    }

    /// True als elk lid in `set` zit.
    pub fn is_within(&self, set: &BitSlice) -> bool {
        self.members.iter().all(|&v| set[v])
    }

    /// True als elk lid toegewezen is, en aan dezelfde bus.
    pub fn is_violated(&self, assignment: &[Option<usize>]) -> bool {
        match self.members.split_first() {
            Some((&first, rest)) => match assignment[first] {
                Some(bus) => rest.iter().all(|&v| assignment[v] == Some(bus)),
                None => false,
            },
            None => false,
        }
    }
}

/// Rangschikt leerlingen op aantal groepslidmaatschappen en houdt alleen wie in meer
/// dan twee groepen zit. Stopt zodra meer dan `stop_after` leerlingen behouden zijn,
/// dus de map kan `stop_after + 1` items bevatten.
pub fn rowdiness_ranking(groups: &[RowdyGroup], stop_after: usize) -> Rowdiness {
    // (leerling, aantal) in volgorde van eerste voorkomen.
    let mut counts: Vec<(usize, usize)> = Vec::new();
    let mut slot: HashMap<usize, usize> = HashMap::new();
    for group in groups {
        for &v in group.members() {
            let i = *slot.entry(v).or_insert_with(|| {
                counts.push((v, 0));
                counts.len() - 1
            });
            counts[i].1 += 1;
        }
    }
    // Stabiele sortering houdt eerste voorkomen als tie-break.
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    let mut ranked = Rowdiness::new();
    for (v, count) in counts {
        if count <= ROWDY_THRESHOLD || ranked.len() > stop_after {
            break;
        }
        ranked.insert(v, count);
    }
    ranked
}

/// Aantal verschillende leerlingen uit een groep die volledig
/// binnen `set` ligt.
pub fn rowdy_size(set: &BitSlice, groups: &[RowdyGroup]) -> usize {
    groups
        .iter()
        .filter(|g| g.is_within(set))
        .flat_map(|g| g.members().iter().copied())
        .unique()
        .count()
}

/// Aantal groepen waarvan alle leden in één bus zitten.
pub fn violated_groups(assignment: &[Option<usize>], groups: &[RowdyGroup]) -> usize {
    groups.iter().filter(|g| g.is_violated(assignment)).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitvec::prelude::*;

    #[test]
    fn members_are_deduplicated() {
        let g = RowdyGroup::new([3, 1, 3, 2]);
        assert_eq!(g.members(), &[1, 2, 3]);
        assert_eq!(g.pairs().count(), 3);
    }

    #[test]
    fn rowdy_size_counts_overlapping_members_once() {
        let groups = vec![RowdyGroup::new([0, 1]), RowdyGroup::new([1, 2]), RowdyGroup::new([3, 4])];
        let mut set = bitvec![0; 5];
        for v in [0, 1, 2] {
            set.set(v, true);
        }
        assert_eq!(rowdy_size(&set, &groups), 3);
    }
}
