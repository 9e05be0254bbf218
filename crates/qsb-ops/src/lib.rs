#![deny(missing_docs)]
#![doc = "Operator action engine: single-site labels resolved through a closed lookup table, operator strings and the callback-compatible `apply_op` surface."]

/// Callback-compatible single-label application and typed errors.
pub mod action;
/// Closed operator label set and statistics.
pub mod label;
/// Multi-site operator strings.
pub mod term;

pub use action::{apply_op, apply_op_raw, OpAction, OpError};
pub use label::{OpLabel, Statistics};
pub use term::{CompiledTerm, OpTerm};
