use num_complex::Complex64;
use qsb_core::{ErrorInfo, QsbError, State};
use thiserror::Error;

use crate::label::{OpLabel, Statistics};

/// Failure of a single operator application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OpError {
    /// The character does not name a known label.
    #[error("unsupported operator label '{label}' at site {site}")]
    UnsupportedLabel {
        /// Offending character.
        label: char,
        /// Site it was applied to.
        site: usize,
    },
    /// The site lies outside the lattice.
    #[error("site {site} outside a lattice of {num_sites} sites")]
    SiteOutOfRange {
        /// Offending site.
        site: usize,
        /// Lattice size.
        num_sites: usize,
    },
    /// Operator string and site list lengths differ.
    #[error("operator string of length {labels} paired with {sites} sites")]
    Arity {
        /// Characters in the operator string.
        labels: usize,
        /// Entries in the site list.
        sites: usize,
    },
}

impl OpError {
    /// Integer status used at the callback boundary; zero means success.
    pub fn status(&self) -> i32 {
        match self {
            OpError::UnsupportedLabel { .. } => 1,
            OpError::SiteOutOfRange { .. } => 2,
            OpError::Arity { .. } => 3,
        }
    }
}

impl From<OpError> for QsbError {
    fn from(err: OpError) -> Self {
        let info = match err {
            OpError::UnsupportedLabel { label, site } => {
                ErrorInfo::new("unsupported-label", err.to_string())
                    .with_context("label", label.to_string())
                    .with_context("site", site.to_string())
            }
            OpError::SiteOutOfRange { site, num_sites } => {
                ErrorInfo::new("site-out-of-range", err.to_string())
                    .with_context("site", site.to_string())
                    .with_context("num_sites", num_sites.to_string())
            }
            OpError::Arity { labels, sites } => ErrorInfo::new("opstr-arity", err.to_string())
                .with_context("labels", labels.to_string())
                .with_context("sites", sites.to_string()),
        };
        QsbError::Operator(info)
    }
}

/// Image of a state under one operator together with its amplitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpAction {
    /// State after the operator acted.
    pub state: State,
    /// Matrix element multiplier; zero when the image vanishes.
    pub amplitude: Complex64,
}

/// Applies the operator named by `label` to `site`.
pub fn apply_op(
    state: State,
    label: char,
    site: usize,
    num_sites: usize,
    statistics: Statistics,
) -> Result<OpAction, OpError> {
    let op = OpLabel::from_char(label).ok_or(OpError::UnsupportedLabel { label, site })?;
    if site >= num_sites {
        return Err(OpError::SiteOutOfRange { site, num_sites });
    }
    let (state, amplitude) = op.act(state, site, statistics);
    Ok(OpAction { state, amplitude })
}

/// Callback form of [`apply_op`]: `(new_state, amplitude, status)`.
///
/// On failure the state is returned unchanged with amplitude zero.
pub fn apply_op_raw(
    state: State,
    label: char,
    site: usize,
    num_sites: usize,
    statistics: Statistics,
) -> (State, Complex64, i32) {
    match apply_op(state, label, site, num_sites, statistics) {
        Ok(action) => (action.state, action.amplitude, 0),
        Err(err) => (state, Complex64::new(0.0, 0.0), err.status()),
    }
}
