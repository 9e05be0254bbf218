#![deny(missing_docs)]
#![doc = "Symmetry generators compiled to bit programs, abelian groups, quantum number sectors and orbit reduction."]

/// Generators with declared site maps and computed periods.
pub mod generator;
/// Commuting generator groups and odometer enumeration.
pub mod group;
/// Site map parsing and mask-and-shift compilation.
pub mod permutation;
/// Representative selection and sector projection.
pub mod reduce;
/// Quantum number sectors and characters.
pub mod sector;

pub use generator::Generator;
pub use group::{SymmetryGroup, MAX_GROUP_ORDER};
pub use permutation::{CompiledMap, SiteMap};
pub use reduce::{Reducer, Reduction, Representative, ZERO_NORM_TOL};
pub use sector::Sector;

/// Site permutation translating a ring of `length` sites by `step`.
pub fn translation(length: usize, step: usize) -> Vec<i64> {
    (0..length)
        .map(|site| ((site + step) % length) as i64)
        .collect()
}

/// Site permutation reflecting a chain of `length` sites.
pub fn reflection(length: usize) -> Vec<i64> {
    (0..length).map(|site| (length - 1 - site) as i64).collect()
}

/// Site map inverting every site in place.
pub fn inversion(length: usize) -> Vec<i64> {
    (0..length).map(|site| -(site as i64) - 1).collect()
}
