use std::collections::BTreeMap;

use num_complex::Complex64;
use qsb_core::{QsbError, State};
use qsb_ops::{CompiledTerm, OpTerm, Statistics};
use qsb_symm::Reduction;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::build::with_pool;
use crate::table::BasisTable;

/// Options controlling matrix assembly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixOpts {
    /// Surface unsupported labels and bad sites instead of skipping the term.
    pub strict: bool,
    /// Statistics used for operator strings.
    #[serde(default)]
    pub statistics: Statistics,
    /// Worker threads; zero uses the global pool.
    #[serde(default)]
    pub threads: usize,
}

impl Default for MatrixOpts {
    fn default() -> Self {
        Self {
            strict: false,
            statistics: Statistics::Boson,
            threads: 0,
        }
    }
}

/// One sparse matrix element `M[bra, ket] += value`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Triplet {
    /// Row index (image representative).
    pub bra: usize,
    /// Column index (acted-upon representative).
    pub ket: usize,
    /// Contribution to the element.
    pub value: Complex64,
}

fn compile_terms(
    terms: &[OpTerm],
    num_sites: usize,
    strict: bool,
) -> Result<Vec<CompiledTerm>, QsbError> {
    let mut compiled = Vec::with_capacity(terms.len());
    for (position, term) in terms.iter().enumerate() {
        match term.compile(num_sites) {
            Ok(term) => compiled.push(term),
            Err(err) if strict => {
                return Err(match QsbError::from(err) {
                    QsbError::Operator(info) => QsbError::Operator(
                        info.with_context("term", position.to_string())
                            .with_context("opstr", term.opstr.clone()),
                    ),
                    other => other,
                });
            }
            Err(err) => {
                warn!(term = position, opstr = %term.opstr, error = %err, "skipping operator term");
            }
        }
    }
    Ok(compiled)
}

/// Assembles the operator `sum_t terms[t]` in the reduced basis.
///
/// Each contribution is `coefficient * op_amplitude * phase * sqrt(norm_bra / norm_ket)`.
/// Images that vanish or fall outside the sector contribute nothing.
/// Triplets are emitted ket by ket in term order and may repeat a `(bra, ket)`
/// pair; see [`coalesce`].
pub fn build_matrix(
    basis: &BasisTable,
    terms: &[OpTerm],
    opts: &MatrixOpts,
) -> Result<Vec<Triplet>, QsbError> {
    let compiled = compile_terms(terms, basis.num_sites(), opts.strict)?;
    let statistics = opts.statistics;
    let per_ket: Vec<Vec<Triplet>> = with_pool(opts.threads, || {
        basis
            .states()
            .par_iter()
            .enumerate()
            .map(|(ket, &state)| ket_column(basis, &compiled, statistics, ket, state))
            .collect()
    })?;
    let triplets: Vec<Triplet> = per_ket.into_iter().flatten().collect();
    debug!(
        size = basis.len(),
        terms = compiled.len(),
        skipped = terms.len() - compiled.len(),
        triplets = triplets.len(),
        "operator matrix assembled"
    );
    Ok(triplets)
}

fn ket_column(
    basis: &BasisTable,
    terms: &[CompiledTerm],
    statistics: Statistics,
    ket: usize,
    state: State,
) -> Vec<Triplet> {
    let ket_norm = basis.norms()[ket];
    let mut column = Vec::new();
    for term in terms {
        let Some((image, amplitude)) = term.act(state, statistics) else {
            continue;
        };
        let Reduction::Accepted(rep) = basis.reducer().reduce(image) else {
            continue;
        };
        let Some(bra) = basis.index_of(rep.state) else {
            continue;
        };
        let scale = (basis.norms()[bra] / ket_norm).sqrt();
        column.push(Triplet {
            bra,
            ket,
            value: term.coefficient() * amplitude * rep.phase * scale,
        });
    }
    column
}

/// Sums repeated `(bra, ket)` pairs and drops cancelled entries, sorted by position.
pub fn coalesce(triplets: &[Triplet]) -> Vec<Triplet> {
    let mut summed: BTreeMap<(usize, usize), Complex64> = BTreeMap::new();
    for triplet in triplets {
        *summed
            .entry((triplet.bra, triplet.ket))
            .or_insert_with(|| Complex64::new(0.0, 0.0)) += triplet.value;
    }
    summed
        .into_iter()
        .filter(|(_, value)| value.norm() > 1e-13)
        .map(|((bra, ket), value)| Triplet { bra, ket, value })
        .collect()
}
