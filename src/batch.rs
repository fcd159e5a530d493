//! src/batch.rs
//!
//! Lost elke case onder `<inputs>/<category>/` op en schrijft de oplossingen naar
//! `<outputs>/<category>/<case>.out`. Cases zijn onafhankelijk; met de
//! `parallel` feature worden ze over een vaste pool van workers verdeeld.

use crate::{
    error::{BatchError, CaseError},
    graph::Graph,
    input::parse_input,
    output::write_solution,
    params::Params,
    partition::Partition,
    progress::LogProgress,
    score::score,
    solver::solve_with,
};
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Invoermap, uitvoermap, categorieën en het aantal workers voor een batch-run.
#[derive(Clone, Debug)]
pub struct BatchConfig {
    pub inputs: PathBuf,
    pub outputs: PathBuf,
    pub categories: Vec<String>,
    /// Over te slaan cases, genoteerd als `category/case`.
    pub skip: Vec<String>,
    pub workers: usize,
    pub params: Params,
}

impl Default for BatchConfig {
    fn default() -> Self {
        BatchConfig {
            inputs: PathBuf::from("./all_inputs"),
            outputs: PathBuf::from("./outputs"),
            categories: vec!["small".into(), "medium".into(), "large".into()],
            skip: Vec::new(),
            workers: 5,
            params: Params::default(),
        }
    }
}

/// Eén case-map samen met het bestand waar de oplossing heen gaat.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Case {
    pub category: String,
    pub name: String,
    pub folder: PathBuf,
    pub output: PathBuf,
}

impl Case {
    pub fn id(&self) -> String {
        format!("{}/{}", self.category, self.name)
    }
}

#[derive(Debug)]
pub struct CaseOutcome {
    pub case: Case,
    /// Score van de geschreven oplossing, of waarom de case faalde.
    pub result: Result<f64, CaseError>,
}

#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<CaseOutcome>,
}

impl BatchReport {
    pub fn solved(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    pub fn failed(&self) -> impl Iterator<Item = &CaseOutcome> {
        self.outcomes.iter().filter(|o| o.result.is_err())
    }

    /// Gemiddelde score over de opgeloste cases.
    pub fn mean_score(&self) -> Option<f64> {
        let scores: Vec<f64> = self.outcomes.iter().filter_map(|o| o.result.as_ref().ok().copied()).collect();
        if scores.is_empty() {
            None
        } else {
            Some(scores.iter().sum::<f64>() / scores.len() as f64)
        }
    }
}

/// Somt de cases van elke ingestelde categorie op in naamvolgorde en maakt de
/// uitvoermappen per categorie aan.
pub fn collect_cases(config: &BatchConfig) -> Result<Vec<Case>, BatchError> {
    let mut cases = Vec::new();
    for category in &config.categories {
        let input_dir = config.inputs.join(category);
        let output_dir = config.outputs.join(category);
        fs::create_dir_all(&output_dir)
            .map_err(|source| BatchError::Io { path: output_dir.clone(), source })?;

        let entries = fs::read_dir(&input_dir)
            .map_err(|source| BatchError::Io { path: input_dir.clone(), source })?;
        let mut names: Vec<String> = entries
            .filter_map(Result::ok)
            .filter(|e| e.path().is_dir())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();

        for name in names {
            let case = Case {
                category: category.clone(),
                folder: input_dir.join(&name),
                output: output_dir.join(format!("{}.out", name)),
                name,
            };
            if config.skip.contains(&case.id()) {
                info!("skipping {}", case.id());
                continue;
            }
            cases.push(case);
        }
    }
    Ok(cases)
}

/// Leest en lost één case-map op.
pub fn solve_folder(folder: &Path, params: &Params, name: &str) -> Result<(Graph, Partition, f64), CaseError> {
    let instance = parse_input(folder)?;
    let mut progress = LogProgress::new(name);
    let partition = solve_with(
        &instance.graph,
        instance.num_buses,
        instance.max_size,
        &instance.groups,
        params,
        &mut progress,
    )?;
    let s = score(&instance.graph, &partition, &instance.groups);
    Ok((instance.graph, partition, s))
}

/// Lost `case` op en schrijft het oplossingsbestand.
pub fn run_case(case: &Case, params: &Params) -> Result<f64, CaseError> {
    let (graph, partition, s) = solve_folder(&case.folder, params, &case.id())?;
    write_solution(&case.output, &graph, &partition)
        .map_err(|source| CaseError::Output { path: case.output.clone(), source })?;
    Ok(s)
}

fn finish(case: Case, result: Result<f64, CaseError>) -> CaseOutcome {
    if let Err(e) = &result {
        warn!("{} failed: {}", case.id(), e);
    }
    CaseOutcome { case, result }
}

/// Lost elke case van de ingestelde categorieën op.
pub fn run_batch(config: &BatchConfig) -> Result<BatchReport, BatchError> {
    let cases = collect_cases(config)?;
    info!("solving {} cases with {} workers", cases.len(), config.workers.max(1));

    #[cfg(feature = "parallel")]
    {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.workers.max(1))
            .build()
            .map_err(|e| BatchError::Pool(e.to_string()))?;
        let outcomes: Vec<CaseOutcome> = pool.install(|| {
            cases
                .into_par_iter()
                .map(|case| {
                    let result = run_case(&case, &config.params);
                    finish(case, result)
                })
                .collect()
        });
        return Ok(BatchReport { outcomes });
    }

    #[cfg(not(feature = "parallel"))]
    {
        let outcomes: Vec<CaseOutcome> = cases
            .into_iter()
            .map(|case| {
                let result = run_case(&case, &config.params);
                finish(case, result)
            })
            .collect();
        Ok(BatchReport { outcomes })
    }
}
