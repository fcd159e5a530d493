//! src/partition.rs
//!
//! Een bus is een verzameling leerlingen, opgeslagen als bitset met gecachte
//! grootte; een partitie is de geordende lijst bussen die de oplosser oplevert.

use crate::graph::Graph;
use bitvec::prelude::*;

/// Een veranderlijke verzameling leerlingen in één bus.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bus {
    members: BitVec,
    size: usize,
}

impl Bus {
    /*────────── Constructors ──────────*/

    /// Creëert een lege bus voor een graaf met `n` leerlingen.
    pub fn new(n: usize) -> Self {
        Self {
            members: bitvec![0; n],
            size: 0,
        }
    }

    pub fn from_bitset(members: BitVec) -> Self {
        let size = members.count_ones();
        Self { members, size }
    }

    pub fn from_nodes<I: IntoIterator<Item = usize>>(n: usize, nodes: I) -> Self {
        let mut bus = Self::new(n);
        for v in nodes {
            bus.add(v);
        }
        bus
    }

    /*────────── Queries ──────────*/

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    #[inline]
    pub fn contains(&self, v: usize) -> bool {
        self.members[v]
    }

    #[inline]
    pub fn bitset(&self) -> &BitSlice {
        &self.members
    }

    /// Leerlingen in deze bus in oplopende knoopvolgorde.
    pub fn nodes(&self) -> impl Iterator<Item = usize> + '_ {
        self.members.iter_ones()
    }

    /*────────── Mutators ──────────*/

    /// Voegt leerling `v` toe. Negeert de operatie als `v` al in de bus zit.
    pub fn add(&mut self, v: usize) {
        if !self.members[v] {
            self.members.set(v, true);
            self.size += 1;
        }
    }

    /// Verwijdert leerling `v`. Negeert de operatie als `v` niet in de bus zit.
    pub fn remove(&mut self, v: usize) {
        if self.members[v] {
            self.members.set(v, false);
            self.size -= 1;
        }
    }

    /// Zet elke leerling van `other` in deze bus.
    pub fn absorb(&mut self, other: &Bus) {
        for v in other.nodes() {
            self.add(v);
        }
    }
}

/// Een geordende reeks bussen over de leerlingen van één graaf.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Partition {
    n: usize,
    buses: Vec<Bus>,
}

impl Partition {
    pub fn new(n: usize, buses: Vec<Bus>) -> Self {
        Self { n, buses }
    }

    /// Bouwt een partitie uit expliciete knooplijsten, één per bus.
    pub fn from_sets(n: usize, sets: &[Vec<usize>]) -> Self {
        let buses = sets.iter().map(|s| Bus::from_nodes(n, s.iter().copied())).collect();
        Self { n, buses }
    }

    /// Aantal leerlingen van de onderliggende graaf.
    #[inline]
    pub fn n(&self) -> usize {
        self.n
    }

    /// Aantal bussen.
    #[inline]
    pub fn len(&self) -> usize {
        self.buses.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buses.is_empty()
    }

    #[inline]
    pub fn bus(&self, i: usize) -> &Bus {
        &self.buses[i]
    }

    pub fn buses(&self) -> &[Bus] {
        &self.buses
    }

    pub fn into_buses(self) -> Vec<Bus> {
        self.buses
    }

    pub fn sizes(&self) -> Vec<usize> {
        self.buses.iter().map(Bus::size).collect()
    }

    /// Busindex van elke leerling, `None` voor leerlingen zonder bus.
    pub fn assignment(&self) -> Vec<Option<usize>> {
        let mut assignment = vec![None; self.n];
        for (i, bus) in self.buses.iter().enumerate() {
            for v in bus.nodes() {
                assignment[v] = Some(i);
            }
        }
        assignment
    }

    /// Index van de grootste bus, laagste index bij gelijke stand.
    pub fn largest(&self) -> Option<usize> {
        let mut best: Option<usize> = None;
        for (i, bus) in self.buses.iter().enumerate() {
            if best.map_or(true, |b| bus.size() > self.buses[b].size()) {
                best = Some(i);
            }
        }
        best
    }

    /// Index van de kleinste bus, laagste index bij gelijke stand.
    pub fn smallest(&self) -> Option<usize> {
        let mut best: Option<usize> = None;
        for (i, bus) in self.buses.iter().enumerate() {
            if best.map_or(true, |b| bus.size() < self.buses[b].size()) {
                best = Some(i);
            }
        }
        best
    }

    /// Leerling-identifiers per bus, in oplopende knoopvolgorde.
    pub fn labelled(&self, graph: &Graph) -> Vec<Vec<String>> {
        self.buses
            .iter()
            .map(|bus| bus.nodes().map(|v| graph.label(v).to_owned()).collect())
            .collect()
    }

    /*────────── Mutators ──────────*/

    pub fn push(&mut self, bus: Bus) {
        self.buses.push(bus);
    }

    pub fn remove(&mut self, i: usize) -> Bus {
        self.buses.remove(i)
    }

    #[inline]
    pub fn bus_mut(&mut self, i: usize) -> &mut Bus {
        &mut self.buses[i]
    }

    /// Verplaatst leerling `v` van bus `from` naar bus `to`.
    pub fn move_node(&mut self, v: usize, from: usize, to: usize) {
        self.buses[from].remove(v);
        self.buses[to].add(v);
    }

    /// Ruilt leerling `u` in bus `a` met leerling `v` in bus `b`.
    pub fn swap_nodes(&mut self, u: usize, a: usize, v: usize, b: usize) {
        self.move_node(u, a, b);
        self.move_node(v, b, a);
    }

    /// Voegt bus `from` bij bus `into` en verwijdert hem. Geeft de index terug
    /// die bus `into` daarna heeft.
    pub fn merge(&mut self, from: usize, into: usize) -> usize {
        let absorbed = self.buses.remove(from);
        let into = if into > from { into - 1 } else { into };
        self.buses[into].absorb(&absorbed);
        into
    }

    /*────────── Validation ──────────*/

    /// Controleert dat er precies `num_buses` disjuncte, niet-lege bussen van
    /// hoogstens `max_size` leerlingen zijn die samen elke leerling bevatten.
    pub fn validate(&self, num_buses: usize, max_size: usize) -> Result<(), String> {
        if self.buses.len() != num_buses {
            return Err(format!("expected {} buses, found {}", num_buses, self.buses.len()));
        }
        let mut seen = bitvec![0; self.n];
        for (i, bus) in self.buses.iter().enumerate() {
            if bus.is_empty() || bus.size() > max_size {
                return Err(format!("bus {} holds {} students (limit {})", i, bus.size(), max_size));
            }
            for v in bus.nodes() {
                if seen[v] {
                    return Err(format!("student {} is on more than one bus", v));
                }
                seen.set(v, true);
            }
        }
        if let Some(v) = seen.iter_zeros().next() {
            return Err(format!("student {} is not on any bus", v));
        }
        Ok(())
    }
}
