//! src/params.rs
//!
//! Bundelt alle afstembare parameters voor de busoplosser: de strategie per
//! pipelinestap en de iteratiegrenzen van de lussen.

use crate::error::ParamError;
use std::fmt;
use std::str::FromStr;

/// Hoe gedeeld groepslidmaatschap wordt omgezet in kantstraffen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Weighting {
    /// Elk bestraft paar verliest 1.
    Uniform,
    /// Een paar verliest de grootste rowdiness van zijn twee leerlingen.
    Ranked,
}

/// Hoe overtollige componenten worden samengevoegd.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MergeStrategy {
    /// Voeg de twee kleinste componenten samen.
    Simple,
    /// Voeg de kleinste component bij de partner die de score maximaliseert.
    Greedy,
}

/// Hoe een leerling uit een overvolle bus een nieuwe bus kiest.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Relocation {
    /// Meeste vrienden erbij zonder een rowdy groep compleet te maken.
    EdgeGain,
    /// Beste globale score na de zet.
    Score,
}

/// Alle afstembare besturingselementen van de oplospipeline.
#[derive(Clone, Debug)]
pub struct Params {
    pub weighting: Weighting,
    pub merge: MergeStrategy,
    pub relocation: Relocation,
    /// Probeer ook ruilparen zodra geen enkele zet de score verbetert.
    pub swap_moves: bool,
    /// Maximaal aantal split- of samenvoegrondes.
    pub max_adjust_rounds: usize,
    /// Maximaal aantal leerlingen dat uit overvolle bussen wordt verplaatst.
    pub max_relocations: usize,
    /// Maximaal aantal geaccepteerde lokale zoekstappen.
    pub max_improve_moves: usize,
}

impl Default for Params {
    fn default() -> Self {
        Params {
            weighting: Weighting::Uniform,
            merge: MergeStrategy::Greedy,
            relocation: Relocation::Score,
            swap_moves: true,
            max_adjust_rounds: 100_000,
            max_relocations: 1_000_000,
            max_improve_moves: 100_000,
        }
    }
}

impl Params {
    /// Kiest de strategie van elke pipelinestap.
    pub fn use_strategies(
        &mut self,
        weighting: Weighting,
        merge: MergeStrategy,
        relocation: Relocation,
    ) -> &mut Self {
        self.weighting = weighting;
        self.merge = merge;
        self.relocation = relocation;
        self
    }

    /// Stelt de iteratiegrenzen van de drie lussen in.
    pub fn limit_iterations(
        &mut self,
        adjust_rounds: usize,
        relocations: usize,
        improve_moves: usize,
    ) -> &mut Self {
        self.max_adjust_rounds = adjust_rounds;
        self.max_relocations = relocations;
        self.max_improve_moves = improve_moves;
        self
    }

    pub fn disable_swaps(&mut self) -> &mut Self {
        self.swap_moves = false;
        self
    }
}

/*────────── Parsing ──────────*/

impl FromStr for Weighting {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "uniform" => Ok(Weighting::Uniform),
            "ranked" => Ok(Weighting::Ranked),
            _ => Err(ParamError::Unknown { kind: "weighting", value: s.to_owned() }),
        }
    }
}

impl FromStr for MergeStrategy {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "simple" => Ok(MergeStrategy::Simple),
            "greedy" => Ok(MergeStrategy::Greedy),
            _ => Err(ParamError::Unknown { kind: "merge strategy", value: s.to_owned() }),
        }
    }
}

impl FromStr for Relocation {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "edges" | "edge-gain" => Ok(Relocation::EdgeGain),
            "score" => Ok(Relocation::Score),
            _ => Err(ParamError::Unknown { kind: "relocation", value: s.to_owned() }),
        }
    }
}

impl fmt::Display for Weighting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Weighting::Uniform => "uniform",
            Weighting::Ranked => "ranked",
        })
    }
}

impl fmt::Display for MergeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MergeStrategy::Simple => "simple",
            MergeStrategy::Greedy => "greedy",
        })
    }
}

impl fmt::Display for Relocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Relocation::EdgeGain => "edges",
            Relocation::Score => "score",
        })
    }
}
