use num_complex::Complex64;
use qsb_core::State;
use serde::{Deserialize, Serialize};

use crate::action::OpError;
use crate::label::{OpLabel, Statistics};

/// Operator string with its sites and coefficient, e.g. `("+-", [i, j], -J)`.
///
/// The rightmost label acts first. A one-character string is a single-site term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpTerm {
    /// Operator characters.
    pub opstr: String,
    /// One site per character.
    pub sites: Vec<usize>,
    /// Prefactor of the term.
    pub coefficient: Complex64,
}

impl OpTerm {
    /// Creates a term with a real coefficient.
    pub fn new(opstr: impl Into<String>, sites: Vec<usize>, coefficient: f64) -> Self {
        Self {
            opstr: opstr.into(),
            sites,
            coefficient: Complex64::new(coefficient, 0.0),
        }
    }

    /// Creates a single-site term.
    pub fn single(label: char, site: usize, coefficient: f64) -> Self {
        Self::new(label.to_string(), vec![site], coefficient)
    }

    /// Expands one operator string over a coupling list `(coefficient, sites)`.
    pub fn expand(opstr: &str, couplings: &[(f64, Vec<usize>)]) -> Vec<Self> {
        couplings
            .iter()
            .map(|(coefficient, sites)| Self::new(opstr, sites.clone(), *coefficient))
            .collect()
    }

    /// Resolves labels and checks sites, reporting the first offending entry.
    pub fn compile(&self, num_sites: usize) -> Result<CompiledTerm, OpError> {
        let labels = self.opstr.chars().count();
        if labels != self.sites.len() {
            return Err(OpError::Arity {
                labels,
                sites: self.sites.len(),
            });
        }
        let mut factors = Vec::with_capacity(labels);
        for (symbol, &site) in self.opstr.chars().zip(&self.sites) {
            let label = OpLabel::from_char(symbol).ok_or(OpError::UnsupportedLabel {
                label: symbol,
                site,
            })?;
            if site >= num_sites {
                return Err(OpError::SiteOutOfRange { site, num_sites });
            }
            factors.push((label, site));
        }
        Ok(CompiledTerm {
            factors,
            coefficient: self.coefficient,
        })
    }
}

/// Term with resolved labels, ready to act on states.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledTerm {
    factors: Vec<(OpLabel, usize)>,
    coefficient: Complex64,
}

impl CompiledTerm {
    /// Label and site pairs in string order.
    pub fn factors(&self) -> &[(OpLabel, usize)] {
        &self.factors
    }

    /// Prefactor of the term.
    pub fn coefficient(&self) -> Complex64 {
        self.coefficient
    }

    /// Applies the factors right to left; `None` when the image vanishes.
    ///
    /// The returned amplitude excludes the coefficient.
    pub fn act(&self, state: State, statistics: Statistics) -> Option<(State, Complex64)> {
        let mut image = state;
        let mut amplitude = Complex64::new(1.0, 0.0);
        for &(label, site) in self.factors.iter().rev() {
            let (next, factor) = label.act(image, site, statistics);
            if factor == Complex64::new(0.0, 0.0) {
                return None;
            }
            image = next;
            amplitude *= factor;
        }
        Some((image, amplitude))
    }
}
