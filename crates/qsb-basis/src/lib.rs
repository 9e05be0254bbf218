#![deny(missing_docs)]
#![doc = "Basis assembly and operator matrices for symmetry-reduced lattice Hilbert spaces.\n\nCandidates flow through the orbit reducer into a [`BasisTable`]; the table and an operator term list produce sparse [`Triplet`]s."]

/// Streaming, chunk-parallel basis assembly.
pub mod build;
/// Dense conversion helpers for small systems.
pub mod dense;
/// Sparse operator matrix assembly.
pub mod matrix;
/// Snapshot-and-swap sharing of finished tables.
pub mod shared;
/// Construction from declarative configuration documents.
pub mod spec;
/// Immutable basis tables.
pub mod table;

pub use build::{build_basis, reduce_chunk};
pub use dense::{hermiticity_defect, to_dense};
pub use matrix::{build_matrix, coalesce, MatrixOpts, Triplet};
pub use shared::SharedBasis;
pub use spec::{build_from_json, build_from_spec};
pub use table::{BasisTable, BuildStats};
