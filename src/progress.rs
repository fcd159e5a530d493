//! src/progress.rs
//!
//! Voortgangsrapportage voor één oplosrun. De oplosser stuurt [`Event`]s naar een
//! [`Progress`]-sink in plaats van te printen; de aanroeper bepaalt wat getoond wordt.

use log::{debug, info};

/// Iets noemenswaardigs in de oplospipeline.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    Started {
        students: usize,
        num_buses: usize,
        max_size: usize,
    },
    /// Kantgewichten toegekend; `lowest` is het minimum vóór de verschuiving.
    Weighted { lowest: i64 },
    /// Aantal componenten na een split- of samenvoegronde.
    Components { current: usize, target: usize },
    /// Grootte van de grootste bus na een verplaatsing.
    Reduced { largest: usize, max_size: usize },
    /// Een lokale zoekstap werd geaccepteerd.
    Improved { score: f64 },
    Finished { score: f64, violated: usize },
}

/// Ontvangt de voortgangsevents van een oplosrun.
pub trait Progress {
    fn report(&mut self, event: &Event);
}

impl<F: FnMut(&Event)> Progress for F {
    fn report(&mut self, event: &Event) {
        self(event)
    }
}

/// Negeert elk event.
#[derive(Clone, Copy, Debug, Default)]
pub struct Silent;

impl Progress for Silent {
    fn report(&mut self, _event: &Event) {}
}

/// Stuurt events door naar de `log`-facade, gelabeld met de casenaam.
#[derive(Clone, Debug)]
pub struct LogProgress {
    case: String,
}

impl LogProgress {
    pub fn new(case: impl Into<String>) -> Self {
        Self { case: case.into() }
    }
}

impl Progress for LogProgress {
    fn report(&mut self, event: &Event) {
        let case = &self.case;
        match *event {
            Event::Started { students, num_buses, max_size } => {
                info!("{case}: solving {students} students on {num_buses} buses of {max_size}")
            }
            Event::Weighted { lowest } => debug!("{case}: edge weights assigned, lowest {lowest} before shift"),
            Event::Components { current, target } => {
                debug!("{case}: adjusting components {current}/{target}")
            }
            Event::Reduced { largest, max_size } => {
                debug!("{case}: reducing bus sizes {largest}/{max_size}")
            }
            Event::Improved { score } => debug!("{case}: improved score to {score:.4}"),
            Event::Finished { score, violated } => {
                info!("{case}: done, score {score:.4}, {violated} rowdy groups together")
            }
        }
    }
}
