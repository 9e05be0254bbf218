use qsb_core::{check_num_sites, fits, state_mask, ErrorInfo, QsbError, State, MAX_SITES};

use crate::CandidateSource;

/// Every state of an `N`-site lattice in ascending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exhaustive {
    num_sites: usize,
}

impl Exhaustive {
    /// Creates the exhaustive source for `num_sites` sites.
    pub fn new(num_sites: usize) -> Result<Self, QsbError> {
        check_num_sites(num_sites)?;
        Ok(Self { num_sites })
    }
}

impl CandidateSource for Exhaustive {
    fn num_sites(&self) -> usize {
        self.num_sites
    }

    fn initial_state(&self) -> Option<State> {
        Some(0)
    }

    fn next_state(&self, prev: State, _counter: u64) -> Option<State> {
        prev.checked_add(1).filter(|&next| fits(next, self.num_sites))
    }

    fn size_estimate(&self) -> u64 {
        if self.num_sites >= MAX_SITES {
            u64::MAX
        } else {
            1 << self.num_sites
        }
    }
}

/// Next larger state with the same population inside `num_sites` bits.
pub fn next_combination(state: State, num_sites: usize) -> Option<State> {
    if state == 0 {
        return None;
    }
    let spread = state | (state - 1);
    let carried = spread.checked_add(1)?;
    let next = carried | (((!spread & carried) - 1) >> (state.trailing_zeros() + 1));
    fits(next, num_sites).then_some(next)
}

/// Binomial coefficient `C(n, k)`, saturating at `u64::MAX`.
pub fn binomial(n: usize, k: usize) -> u64 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut acc: u128 = 1;
    for i in 0..k {
        acc = acc * (n - i) as u128 / (i + 1) as u128;
    }
    u64::try_from(acc).unwrap_or(u64::MAX)
}

fn lowest_combination(population: u32) -> State {
    state_mask(population as usize)
}

fn check_population(num_sites: usize, population: u32) -> Result<(), QsbError> {
    if population as usize > num_sites {
        let info = ErrorInfo::new("population-out-of-range", "population exceeds site count")
            .with_context("num_sites", num_sites.to_string())
            .with_context("population", population.to_string());
        return Err(QsbError::Enumeration(info));
    }
    Ok(())
}

/// States with exactly `population` occupied sites, ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedPopulation {
    num_sites: usize,
    population: u32,
}

impl FixedPopulation {
    /// Creates the source, rejecting populations larger than the lattice.
    pub fn new(num_sites: usize, population: u32) -> Result<Self, QsbError> {
        check_num_sites(num_sites)?;
        check_population(num_sites, population)?;
        Ok(Self {
            num_sites,
            population,
        })
    }

    /// Number of occupied sites in every candidate.
    pub fn population(&self) -> u32 {
        self.population
    }
}

impl CandidateSource for FixedPopulation {
    fn num_sites(&self) -> usize {
        self.num_sites
    }

    fn initial_state(&self) -> Option<State> {
        Some(lowest_combination(self.population))
    }

    fn next_state(&self, prev: State, _counter: u64) -> Option<State> {
        next_combination(prev, self.num_sites)
    }

    fn size_estimate(&self) -> u64 {
        binomial(self.num_sites, self.population as usize)
    }
}

/// Several species in consecutive site blocks, each with a fixed population.
///
/// Species `s` occupies sites `s * L .. (s + 1) * L`. The lowest block varies
/// fastest, so the sequence ascends within each configuration of the higher blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeciesPopulations {
    sites_per_species: usize,
    populations: Vec<u32>,
}

impl SpeciesPopulations {
    /// Creates the source; the blocks together must fit a state word.
    pub fn new(sites_per_species: usize, populations: Vec<u32>) -> Result<Self, QsbError> {
        let num_sites = sites_per_species
            .checked_mul(populations.len())
            .unwrap_or(usize::MAX);
        check_num_sites(num_sites).map_err(|err| {
            QsbError::Enumeration(
                err.info()
                    .clone()
                    .with_context("species", populations.len().to_string()),
            )
        })?;
        for &population in &populations {
            check_population(sites_per_species, population)?;
        }
        Ok(Self {
            sites_per_species,
            populations,
        })
    }

    /// Population of every species block.
    pub fn populations(&self) -> &[u32] {
        &self.populations
    }

    fn block(&self, state: State, species: usize) -> State {
        (state >> (species * self.sites_per_species)) & state_mask(self.sites_per_species)
    }
}

impl CandidateSource for SpeciesPopulations {
    fn num_sites(&self) -> usize {
        self.sites_per_species * self.populations.len()
    }

    fn initial_state(&self) -> Option<State> {
        Some(
            self.populations
                .iter()
                .enumerate()
                .fold(0, |acc, (species, &population)| {
                    acc | lowest_combination(population) << (species * self.sites_per_species)
                }),
        )
    }

    fn next_state(&self, prev: State, _counter: u64) -> Option<State> {
        let width = self.sites_per_species;
        let mut state = prev;
        for (species, &population) in self.populations.iter().enumerate() {
            let offset = species * width;
            let cleared = state & !(state_mask(width) << offset);
            match next_combination(self.block(state, species), width) {
                Some(block) => return Some(cleared | block << offset),
                None => state = cleared | lowest_combination(population) << offset,
            }
        }
        None
    }

    fn size_estimate(&self) -> u64 {
        self.populations.iter().fold(1u64, |acc, &population| {
            acc.saturating_mul(binomial(self.sites_per_species, population as usize))
        })
    }
}
