//! src/graph.rs
//!
//! Een ongerichte sociale graaf van leerlingen. De adjacency wordt opgeslagen als
//! één `BitVec`-rij per leerling, wat queries op geïnduceerde subgrafen (kanten
//! binnen een bus, interne graad) goedkoop houdt. Elke kant draagt een aanpasbaar
//! geheel gewicht dat de weging afleidt uit de rowdy groepen.

use bitvec::prelude::*;
use std::collections::{HashMap, VecDeque};

/// Een ongerichte graaf waarvan de knopen gelabelde leerlingen zijn.
#[derive(Clone, Debug, Default)]
pub struct Graph {
    /// Leerling-identifier van elke knoop, geïndexeerd per knoop.
    labels: Vec<String>,
    /// Omgekeerde lookup van identifier naar knoop.
    index: HashMap<String, usize>,
    /// Adjacency matrix; `adj[u][v]` is 1 als er een kant (u,v) bestaat, met v != u.
    adj: Vec<BitVec>,
    /// Kantgewichten met sleutel `(min(u, v), max(u, v))`.
    weights: HashMap<(usize, usize), i64>,
}

#[inline]
fn key(u: usize, v: usize) -> (usize, usize) {
    if u < v {
        (u, v)
    } else {
        (v, u)
    }
}

impl Graph {
    /*────────── Constructors ──────────*/

    /// Creëert een lege graaf zonder leerlingen.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creëert een graaf met `n` geïsoleerde leerlingen, gelabeld `"0"` tot `"n-1"`.
    pub fn with_vertices(n: usize) -> Self {
        let mut g = Self::new();
        for v in 0..n {
            g.add_node(&v.to_string());
        }
        g
    }

    /// Bouwt een graaf op basis van een expliciete lijst van kanten (0-gebaseerde indices).
    pub fn from_edge_list(n: usize, edges: &[(usize, usize)]) -> Self {
        let mut g = Self::with_vertices(n);
        for &(u, v) in edges {
            // Sla paren buiten bereik en self-loops over in plaats van te panikeren.
            if u < n && v < n && u != v {
                g.add_edge(u, v);
            }
        }
        g
    }

    /// Bouwt een graaf uit leerling-identifiers en kanten tussen identifiers.
    /// Identifiers die alleen in `edges` voorkomen worden ook toegevoegd.
    pub fn from_labelled_edges(labels: &[&str], edges: &[(&str, &str)]) -> Self {
        let mut g = Self::new();
        for label in labels {
            g.add_node(label);
        }
        for (a, b) in edges {
            let u = g.add_node(a);
            let v = g.add_node(b);
            if u != v {
                g.add_edge(u, v);
            }
        }
        g
    }

    /*────────── Getters ──────────*/

    /// Geeft het aantal leerlingen terug.
    #[inline]
    pub fn n(&self) -> usize {
        self.adj.len()
    }

    /// Geeft het aantal kanten terug (elke kant één keer geteld).
    pub fn m(&self) -> usize {
        self.weights.len()
    }

    #[inline]
    pub fn label(&self, v: usize) -> &str {
        &self.labels[v]
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Zoekt de knoop van een leerling-identifier op.
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.index.get(label).copied()
    }

    #[inline]
    pub fn has_edge(&self, u: usize, v: usize) -> bool {
        self.adj[u][v]
    }

    /// Geeft de graad van knoop `v` in de hele graaf terug.
    #[inline]
    pub fn degree(&self, v: usize) -> usize {
        self.adj[v].count_ones()
    }

    /// Geeft de adjacency-rij van knoop `v` terug.
    #[inline]
    pub fn neigh_row(&self, v: usize) -> &BitSlice {
        &self.adj[v]
    }

    /// Geeft het gewicht van kant (u, v) terug, of `None` als de kant niet bestaat.
    pub fn weight(&self, u: usize, v: usize) -> Option<i64> {
        self.weights.get(&key(u, v)).copied()
    }

    /// Itereert over alle kanten als `(u, v)` met `u < v`, in oplopende volgorde.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.adj.iter().enumerate().flat_map(|(u, row)| {
            row.iter_ones().filter(move |&v| v > u).map(move |v| (u, v))
        })
    }

    /// Kleinste kantgewicht in de graaf, `None` voor een graaf zonder kanten.
    pub fn min_weight(&self) -> Option<i64> {
        self.weights.values().copied().min()
    }

    /*────────── Induced subgraphs ──────────*/

    /// Aantal buren van `v` binnen de knopenverzameling `mask`.
    pub fn internal_degree(&self, v: usize, mask: &BitSlice) -> usize {
        self.adj[v].iter_ones().filter(|&u| mask[u]).count()
    }

    /// Aantal kanten van de door `mask` geïnduceerde subgraaf.
    pub fn edges_within(&self, mask: &BitSlice) -> usize {
        mask.iter_ones()
            .map(|u| self.internal_degree(u, mask))
            .sum::<usize>()
            / 2
    }

    /// Samenhangende componenten als knopenverzamelingen, geordend op hun kleinste knoop.
    pub fn connected_components(&self) -> Vec<BitVec> {
        let n = self.n();
        let mut seen = bitvec![0; n];
        let mut components = Vec::new();
        let mut queue = VecDeque::new();

        for start in 0..n {
            if seen[start] {
                continue;
            }
            let mut component = bitvec![0; n];
            seen.set(start, true);
            queue.push_back(start);
            while let Some(u) = queue.pop_front() {
                component.set(u, true);
                for v in self.adj[u].iter_ones() {
                    if !seen[v] {
                        seen.set(v, true);
                        queue.push_back(v);
                    }
                }
            }
            components.push(component);
        }
        components
    }

    /*────────── Mutators ──────────*/

    /// Voegt een leerling toe en geeft de knoop terug. Geeft de bestaande knoop
    /// terug als de identifier al bekend is.
    pub fn add_node(&mut self, label: &str) -> usize {
        if let Some(&v) = self.index.get(label) {
            return v;
        }
        let v = self.adj.len();
        for row in self.adj.iter_mut() {
            row.push(false);
        }
        self.adj.push(bitvec![0; v + 1]);
        self.labels.push(label.to_owned());
        self.index.insert(label.to_owned(), v);
        v
    }

    /// Voegt een ongerichte kant tussen `u` en `v` toe met gewicht 0.
    #[inline]
    pub fn add_edge(&mut self, u: usize, v: usize) {
        assert!(u < self.n() && v < self.n() && u != v, "node out of range or self-loop");
        self.adj[u].set(v, true);
        self.adj[v].set(u, true);
        self.weights.entry(key(u, v)).or_insert(0);
    }

    /// Overschrijft het gewicht van een bestaande kant.
    pub fn set_weight(&mut self, u: usize, v: usize, weight: i64) {
        if let Some(w) = self.weights.get_mut(&key(u, v)) {
            *w = weight;
        }
    }

    /// Telt `delta` op bij het gewicht van een bestaande kant en geeft het nieuwe gewicht terug.
    pub fn add_weight(&mut self, u: usize, v: usize, delta: i64) -> Option<i64> {
        self.weights.get_mut(&key(u, v)).map(|w| {
            *w += delta;
            *w
        })
    }

    /// Past `f` toe op het gewicht van elke kant.
    pub fn map_weights(&mut self, mut f: impl FnMut(i64) -> i64) {
        for w in self.weights.values_mut() {
            *w = f(*w);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_node_is_idempotent() {
        let mut g = Graph::new();
        let a = g.add_node("a");
        let b = g.add_node("b");
        assert_eq!(g.add_node("a"), a);
        g.add_edge(a, b);
        assert_eq!(g.n(), 2);
        assert!(g.has_edge(b, a));
        assert_eq!(g.neigh_row(a).len(), 2);
    }
}
