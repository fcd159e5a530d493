//! src/error.rs
//!
//! Fouttypes van de oplosser, de case-lezer en de batch-driver.

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Lus van de pipeline die haar iteratiegrens overschreed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Adjust,
    Capacity,
    Improve,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::Adjust => "component adjustment",
            Phase::Capacity => "capacity enforcement",
            Phase::Improve => "local improvement",
        })
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum SolveError {
    #[error("bus count and bus size must be positive (got {num_buses} buses of {max_size})")]
    InvalidParameters { num_buses: usize, max_size: usize },
    #[error("{students} students cannot fill {num_buses} buses of at most {max_size}")]
    Infeasible {
        students: usize,
        num_buses: usize,
        max_size: usize,
    },
    #[error("no component can be split further ({components} of {num_buses} buses)")]
    Unsplittable { components: usize, num_buses: usize },
    #[error("no bus can take student {student}")]
    NoEligibleBus { student: usize },
    #[error("{phase} did not converge within {limit} iterations")]
    DidNotConverge { phase: Phase, limit: usize },
    #[error("invalid partition: {0}")]
    InvalidPartition(String),
}

#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed GML: {0}")]
    Gml(String),
    #[error("malformed parameters file (line {line}): {reason}")]
    Parameters { line: usize, reason: String },
}

#[derive(Debug, Error)]
pub enum CaseError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Solve(#[from] SolveError),
    #[error("failed to write {path}")]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("failed to prepare {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not start the worker pool: {0}")]
    Pool(String),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParamError {
    #[error("unknown {kind} '{value}'")]
    Unknown { kind: &'static str, value: String },
}
