// src/lib.rs

// Publieke modules voor gebruik binnen de Rust-crate
pub mod adjust;
pub mod batch;
pub mod capacity;
pub mod error;
pub mod graph;
pub mod improve;
pub mod input;
pub mod mincut;
pub mod output;
pub mod params;
pub mod partition;
pub mod progress;
pub mod rowdy;
pub mod score;
pub mod solver;
pub mod weighting;

// Her-exporteer de belangrijkste types voor Rust-gebruikers
pub use error::SolveError;
pub use graph::Graph;
pub use params::Params;
pub use partition::{Bus, Partition};
pub use rowdy::RowdyGroup;
pub use solver::{solve, solve_with};

#[cfg(feature = "python")]
mod python {
    use crate::{batch::solve_folder, params::Params};
    use pyo3::prelude::*;
    use std::path::Path;

    /// Python-binding: lost één case-map op en geeft de bussen terug als lijsten
    /// van leerling-identifiers.
    #[pyfunction]
    #[pyo3(signature = (folder, weighting = "uniform", merge = "greedy", relocation = "score", swap_moves = true))]
    fn solve_case_py(
        folder: String,
        weighting: &str,
        merge: &str,
        relocation: &str,
        swap_moves: bool,
    ) -> PyResult<Vec<Vec<String>>> {
        let invalid = |e: crate::error::ParamError| PyErr::new::<pyo3::exceptions::PyValueError, _>(e.to_string());
        let mut params = Params::default();
        params.use_strategies(
            weighting.parse().map_err(invalid)?,
            merge.parse().map_err(invalid)?,
            relocation.parse().map_err(invalid)?,
        );
        if !swap_moves {
            params.disable_swaps();
        }

        let (graph, partition, _) = solve_folder(Path::new(&folder), &params, &folder)
            .map_err(|e| PyErr::new::<pyo3::exceptions::PyRuntimeError, _>(e.to_string()))?;
        Ok(partition.labelled(&graph))
    }

    /// Definieert de Python-module `_native`.
    #[pymodule]
    fn _native(_py: Python<'_>, m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(solve_case_py, m)?)?;
        Ok(())
    }
}
