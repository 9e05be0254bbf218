use std::collections::{HashMap, HashSet};

use qsb_core::{fits, BasisOpts, ErrorInfo, QsbError, State};
use qsb_enum::{Candidates, CandidateSource};
use qsb_symm::{Reducer, Reduction};
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::table::{BasisTable, BuildStats};

/// Runs `work` on a dedicated pool of `threads` workers, or the global pool for zero.
pub(crate) fn with_pool<T, F>(threads: usize, work: F) -> Result<T, QsbError>
where
    T: Send,
    F: FnOnce() -> T + Send,
{
    if threads == 0 {
        return Ok(work());
    }
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .map_err(|err| {
            QsbError::Basis(
                ErrorInfo::new("thread-pool", err.to_string())
                    .with_context("threads", threads.to_string()),
            )
        })?;
    Ok(pool.install(work))
}

/// Reduces one chunk of candidates in parallel, preserving slot order.
///
/// Every slot starts as [`Reduction::Pending`] and is overwritten by its result.
pub fn reduce_chunk(reducer: &Reducer, chunk: &[State]) -> Vec<Reduction> {
    let mut slots = vec![Reduction::Pending; chunk.len()];
    slots
        .par_iter_mut()
        .zip(chunk.par_iter())
        .for_each(|(slot, &state)| *slot = reducer.reduce(state));
    slots
}

/// Assembles the reduced basis for `reducer`'s sector from a candidate source.
///
/// Candidates are streamed in chunks of `opts.chunk_size`; only accepted
/// representatives are retained. The first occurrence of each representative
/// wins and indices follow descending representative order.
///
/// The candidate set should be closed under the group. Representatives that
/// never appear among the candidates are counted in [`BuildStats::foreign`]
/// and reported with a warning; they usually mean the group moves states out
/// of the enumerated population (for example a species swap over unequal
/// species populations).
pub fn build_basis(
    source: &dyn CandidateSource,
    reducer: Reducer,
    opts: &BasisOpts,
) -> Result<BasisTable, QsbError> {
    let num_sites = reducer.group().num_sites();
    if source.num_sites() != num_sites {
        let info = ErrorInfo::new(
            "lattice-mismatch",
            "candidate source and symmetry group disagree on the lattice size",
        )
        .with_context("source_sites", source.num_sites().to_string())
        .with_context("group_sites", num_sites.to_string());
        return Err(QsbError::Basis(info));
    }

    let capacity = usize::try_from(source.size_estimate())
        .unwrap_or(usize::MAX)
        .min(opts.chunk_size.max(1).saturating_mul(4));
    let mut found: HashMap<State, f64> = HashMap::with_capacity(capacity);
    let mut stats = BuildStats::default();
    let mut native: HashSet<State> = HashSet::new();

    with_pool(opts.threads, || -> Result<(), QsbError> {
        for chunk in Candidates::new(source).chunks(opts.chunk_size) {
            if let Some(offset) = chunk.iter().position(|&state| !fits(state, num_sites)) {
                let state = chunk[offset];
                let info = ErrorInfo::new(
                    "candidate-out-of-range",
                    "candidate state sets bits beyond the lattice",
                )
                .with_context("state", format!("{state:#x}"))
                .with_context("num_sites", num_sites.to_string())
                .with_context("position", (stats.candidates + offset as u64).to_string());
                return Err(QsbError::Enumeration(info));
            }
            stats.candidates += chunk.len() as u64;
            for (reduction, &state) in reduce_chunk(&reducer, &chunk).into_iter().zip(&chunk) {
                match reduction {
                    Reduction::Accepted(rep) => {
                        stats.accepted += 1;
                        if rep.state == state {
                            native.insert(state);
                        }
                        if found.contains_key(&rep.state) {
                            stats.duplicates += 1;
                        } else {
                            found.insert(rep.state, rep.norm);
                        }
                    }
                    Reduction::Rejected { .. } => stats.rejected += 1,
                    Reduction::Pending => {}
                }
            }
        }
        Ok(())
    })??;

    stats.foreign = found.keys().filter(|state| !native.contains(state)).count() as u64;
    if stats.foreign > 0 {
        warn!(
            num_sites,
            foreign = stats.foreign,
            size = found.len(),
            candidates = stats.candidates,
            "representatives outside the candidate set; the group does not preserve it"
        );
    }

    let mut entries: Vec<(State, f64)> = found.into_iter().collect();
    entries.sort_unstable_by(|a, b| b.0.cmp(&a.0));
    debug!(
        num_sites,
        sector = ?reducer.sector().quantum_numbers(),
        group_order = reducer.group().order(),
        candidates = stats.candidates,
        accepted = stats.accepted,
        rejected = stats.rejected,
        duplicates = stats.duplicates,
        foreign = stats.foreign,
        size = entries.len(),
        "basis assembled"
    );
    Ok(BasisTable::from_sorted(reducer, entries, stats))
}
