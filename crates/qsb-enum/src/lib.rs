#![deny(missing_docs)]
#![doc = "Candidate enumeration strategies feeding the orbit reducer.\n\nEvery strategy is a [`CandidateSource`]: an initial state, a pure `next_state(prev, counter)` step and an upper bound on the number of states. Exhaustion is reported as `None`, never as an error."]

/// Exhaustive and population-conserving combinatorial sources.
pub mod combinatorial;
/// Restartable iteration and chunked reading over any source.
pub mod iter;
/// Caller supplied sequences and hook tables.
pub mod user;

pub use combinatorial::{binomial, next_combination, Exhaustive, FixedPopulation, SpeciesPopulations};
pub use iter::{Candidates, Chunks};
pub use user::{EnumerationHooks, StateList, UserSupplied};

use qsb_core::{CandidateSpec, QsbError, State};

/// Sequential supplier of candidate states.
pub trait CandidateSource: Send + Sync {
    /// Number of lattice sites the states are drawn from.
    fn num_sites(&self) -> usize;

    /// First candidate, or `None` when the source is empty.
    fn initial_state(&self) -> Option<State>;

    /// Candidate following `prev`; `counter` is the index of the requested state.
    fn next_state(&self, prev: State, counter: u64) -> Option<State>;

    /// Upper bound on the number of candidates, used for preallocation.
    fn size_estimate(&self) -> u64;
}

/// Builds the source described by a configuration entry.
pub fn source_from_spec(
    num_sites: usize,
    spec: &CandidateSpec,
) -> Result<Box<dyn CandidateSource>, QsbError> {
    Ok(match spec {
        CandidateSpec::Exhaustive => Box::new(Exhaustive::new(num_sites)?),
        CandidateSpec::FixedPopulation { population } => {
            Box::new(FixedPopulation::new(num_sites, *population)?)
        }
        CandidateSpec::SpeciesPopulations {
            sites_per_species,
            populations,
        } => {
            let source = SpeciesPopulations::new(*sites_per_species, populations.clone())?;
            if source.num_sites() != num_sites {
                let info = qsb_core::ErrorInfo::new(
                    "species-layout-mismatch",
                    "species blocks do not cover the lattice",
                )
                .with_context("num_sites", num_sites.to_string())
                .with_context("species_sites", source.num_sites().to_string());
                return Err(QsbError::Enumeration(info));
            }
            Box::new(source)
        }
        CandidateSpec::StateList { states } => Box::new(StateList::new(num_sites, states.clone())?),
    })
}
