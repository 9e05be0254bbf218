//! Declarative configuration documents and option structs.
//!
//! Every stateful parameter consumed by generators, candidate sources and the
//! basis assembler is spelled out here as plain data, so a complete basis can
//! be described in one JSON document and rebuilt deterministically.

use serde::{Deserialize, Serialize};

use crate::{ErrorInfo, QsbError, SignRule, State};

/// Options controlling basis assembly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasisOpts {
    /// Number of candidates reduced per parallel chunk.
    pub chunk_size: usize,
    /// Worker threads; zero uses the global pool.
    pub threads: usize,
}

impl Default for BasisOpts {
    fn default() -> Self {
        Self {
            chunk_size: 1 << 14,
            threads: 0,
        }
    }
}

/// Declaration of one symmetry generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorSpec {
    /// Label used in diagnostics.
    pub name: String,
    /// Site map; entry `-(j+1)` sends the site to `j` and inverts it.
    pub map: Vec<i64>,
    /// Sign picked up by the permutation.
    #[serde(default)]
    pub sign: SignRule,
    /// Optional declared period, checked against the computed one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<u32>,
}

/// Declaration of the candidate source feeding the reducer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CandidateSpec {
    /// Every state of the lattice.
    Exhaustive,
    /// Every state with a fixed number of occupied sites.
    FixedPopulation {
        /// Number of occupied sites.
        population: u32,
    },
    /// Consecutive blocks of sites with per-block populations.
    SpeciesPopulations {
        /// Sites in each species block.
        sites_per_species: usize,
        /// Population of each block, lowest block first.
        populations: Vec<u32>,
    },
    /// Caller supplied states, already filtered.
    StateList {
        /// Candidate states in consumption order.
        states: Vec<State>,
    },
}

/// Complete declarative description of a reduced basis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasisSpec {
    /// Number of lattice sites.
    pub num_sites: usize,
    /// Commuting symmetry generators.
    #[serde(default)]
    pub generators: Vec<GeneratorSpec>,
    /// One quantum number per generator.
    #[serde(default)]
    pub sector: Vec<u32>,
    /// Candidate source.
    pub candidates: CandidateSpec,
    /// Assembly options.
    #[serde(default)]
    pub opts: BasisOpts,
}

impl BasisSpec {
    /// Parses a basis description from JSON text.
    pub fn from_json(json: &str) -> Result<Self, QsbError> {
        serde_json::from_str(json)
            .map_err(|err| QsbError::Config(ErrorInfo::new("config-parse", err.to_string())))
    }

    /// Serialises the description into indented JSON.
    pub fn to_json(&self) -> Result<String, QsbError> {
        serde_json::to_string_pretty(self)
            .map_err(|err| QsbError::Config(ErrorInfo::new("config-serialize", err.to_string())))
    }
}
