use std::collections::HashMap;

use qsb_core::{render_state, State};
use qsb_symm::Reducer;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Counters collected while assembling a basis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BuildStats {
    /// Candidates consumed from the source.
    pub candidates: u64,
    /// Candidates whose orbit survived projection.
    pub accepted: u64,
    /// Candidates projected out of the sector.
    pub rejected: u64,
    /// Accepted candidates whose representative was already present.
    pub duplicates: u64,
    /// Representatives that never appeared among the candidates.
    #[serde(default)]
    pub foreign: u64,
}

/// Immutable table of representatives for one (group, sector, source) triple.
///
/// Representatives are stored in descending order; index 0 is the largest.
#[derive(Debug, Clone)]
pub struct BasisTable {
    reducer: Reducer,
    states: Vec<State>,
    norms: Vec<f64>,
    index: HashMap<State, usize>,
    stats: BuildStats,
}

impl BasisTable {
    pub(crate) fn from_sorted(
        reducer: Reducer,
        entries: Vec<(State, f64)>,
        stats: BuildStats,
    ) -> Self {
        let mut states = Vec::with_capacity(entries.len());
        let mut norms = Vec::with_capacity(entries.len());
        let mut index = HashMap::with_capacity(entries.len());
        for (position, (state, norm)) in entries.into_iter().enumerate() {
            index.insert(state, position);
            states.push(state);
            norms.push(norm);
        }
        Self {
            reducer,
            states,
            norms,
            index,
            stats,
        }
    }

    /// Number of basis states `Ns`.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Whether the sector contains no states.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Number of lattice sites.
    pub fn num_sites(&self) -> usize {
        self.reducer.group().num_sites()
    }

    /// Quantum numbers of the sector.
    pub fn sector(&self) -> &[u32] {
        self.reducer.sector().quantum_numbers()
    }

    /// Representatives in index order.
    pub fn states(&self) -> &[State] {
        &self.states
    }

    /// Projected norms (stabiliser weights) in index order.
    pub fn norms(&self) -> &[f64] {
        &self.norms
    }

    /// Normalization constant `sqrt(norm)` of basis vector `index`.
    pub fn normalization(&self, index: usize) -> Option<f64> {
        self.norms.get(index).map(|norm| norm.sqrt())
    }

    /// Index of a representative, if it belongs to the basis.
    pub fn index_of(&self, state: State) -> Option<usize> {
        self.index.get(&state).copied()
    }

    /// Reducer the table was built with.
    pub fn reducer(&self) -> &Reducer {
        &self.reducer
    }

    /// Counters collected during assembly.
    pub fn stats(&self) -> BuildStats {
        self.stats
    }

    /// Occupation string of basis state `index`, site 0 first.
    pub fn render(&self, index: usize) -> Option<String> {
        self.states
            .get(index)
            .map(|&state| render_state(state, self.num_sites()))
    }

    /// Occupation string of an arbitrary state on this lattice.
    pub fn render_state(&self, state: State) -> String {
        render_state(state, self.num_sites())
    }

    /// SHA-256 digest over lattice size, sector, representatives and norms.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update((self.num_sites() as u64).to_le_bytes());
        for &q in self.sector() {
            hasher.update(q.to_le_bytes());
        }
        hasher.update((self.states.len() as u64).to_le_bytes());
        for (state, norm) in self.states.iter().zip(&self.norms) {
            hasher.update(state.to_le_bytes());
            hasher.update(norm.to_bits().to_le_bytes());
        }
        hex::encode(hasher.finalize())
    }
}
