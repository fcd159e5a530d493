//! src/output.rs
//!
//! Schrijft een oplossing: één bus per regel, als lijst van geciteerde identifiers.

use crate::{graph::Graph, partition::Partition};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Formatteert één bus als `['a', 'b', 'c']`.
pub fn format_bus<S: AsRef<str>>(labels: &[S]) -> String {
    let quoted: Vec<String> = labels.iter().map(|l| format!("'{}'", l.as_ref())).collect();
    format!("[{}]", quoted.join(", "))
}

/// Schrijft elke bus van `partition` naar `out`, één per regel.
pub fn write_partition<W: Write>(out: &mut W, graph: &Graph, partition: &Partition) -> io::Result<()> {
    for bus in partition.labelled(graph) {
        writeln!(out, "{}", format_bus(&bus))?;
    }
    Ok(())
}

/// Schrijft het oplossingsbestand op `path` en overschrijft een bestaand bestand.
pub fn write_solution(path: &Path, graph: &Graph, partition: &Partition) -> io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    write_partition(&mut out, graph, partition)?;
    out.flush()
}
