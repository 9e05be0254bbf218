#![deny(missing_docs)]
#![doc = "Core types and conventions for symmetry-reduced lattice bases.\n\nA microstate of an `N`-site two-level lattice is a [`State`]; site `i` lives in bit `i`, so site 0 is the least significant bit. Bit value 1 reads as occupied (spin up)."]

pub mod config;
pub mod errors;
pub mod render;

pub use config::{BasisOpts, BasisSpec, CandidateSpec, GeneratorSpec};
pub use errors::{ErrorInfo, QsbError};
pub use render::render_state;

use serde::{Deserialize, Serialize};

/// Bit-encoded lattice microstate.
pub type State = u64;

/// Largest lattice supported by the [`State`] word.
pub const MAX_SITES: usize = State::BITS as usize;

/// Rule producing the sign picked up when a site permutation is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignRule {
    /// Spins and hardcore bosons: permutations never change the sign.
    #[default]
    Plain,
    /// Spinless fermions ordered by ascending site index.
    Fermionic,
}

/// Validates a lattice size against the [`State`] word.
pub fn check_num_sites(num_sites: usize) -> Result<(), QsbError> {
    if num_sites == 0 || num_sites > MAX_SITES {
        let info = ErrorInfo::new("num-sites-out-of-range", "lattice size must fit a state word")
            .with_context("num_sites", num_sites.to_string())
            .with_context("max_sites", MAX_SITES.to_string());
        return Err(QsbError::Symmetry(info));
    }
    Ok(())
}

/// Returns the mask with the low `num_sites` bits set.
pub fn state_mask(num_sites: usize) -> State {
    if num_sites >= MAX_SITES {
        State::MAX
    } else {
        (1 << num_sites) - 1
    }
}

/// Returns whether `state` fits inside an `num_sites`-bit lattice.
pub fn fits(state: State, num_sites: usize) -> bool {
    state & !state_mask(num_sites) == 0
}

/// Reads the occupation of `site`.
#[inline]
pub fn occupation(state: State, site: usize) -> u8 {
    ((state >> site) & 1) as u8
}

/// Counts occupied sites strictly below `site`.
#[inline]
pub fn occupied_below(state: State, site: usize) -> u32 {
    (state & state_mask(site)).count_ones()
}
