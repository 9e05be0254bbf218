use std::f64::consts::TAU;

use num_complex::Complex64;
use qsb_core::{ErrorInfo, QsbError};

use crate::group::SymmetryGroup;

/// Quantum numbers selecting one irreducible character of a [`SymmetryGroup`].
///
/// States in sector `q` satisfy `U(g_j) psi = exp(-2 pi i q_j / p_j) psi`.
#[derive(Debug, Clone, PartialEq)]
pub struct Sector {
    quantum_numbers: Vec<u32>,
    conjugate_tables: Vec<Vec<Complex64>>,
}

impl Sector {
    /// Validates the quantum numbers against the generator periods.
    ///
    /// Out-of-range quantum numbers are rejected rather than wrapped.
    pub fn new(group: &SymmetryGroup, quantum_numbers: &[u32]) -> Result<Self, QsbError> {
        let periods = group.periods();
        if quantum_numbers.len() != periods.len() {
            let info = ErrorInfo::new("sector-arity", "one quantum number per generator required")
                .with_context("generators", periods.len().to_string())
                .with_context("quantum_numbers", quantum_numbers.len().to_string());
            return Err(QsbError::Sector(info));
        }
        let mut conjugate_tables = Vec::with_capacity(periods.len());
        for (index, (&q, &period)) in quantum_numbers.iter().zip(&periods).enumerate() {
            if q >= period {
                let info = ErrorInfo::new("sector-out-of-range", "quantum number exceeds period")
                    .with_context("generator", group.generators()[index].name())
                    .with_context("quantum_number", q.to_string())
                    .with_context("period", period.to_string());
                return Err(QsbError::Sector(info));
            }
            let table = (0..period)
                .map(|power| {
                    let angle = TAU * f64::from(q) * f64::from(power) / f64::from(period);
                    snap(Complex64::from_polar(1.0, angle))
                })
                .collect();
            conjugate_tables.push(table);
        }
        Ok(Self {
            quantum_numbers: quantum_numbers.to_vec(),
            conjugate_tables,
        })
    }

    /// Every sector of the group, in odometer order of the quantum numbers.
    pub fn all(group: &SymmetryGroup) -> Result<Vec<Self>, QsbError> {
        // Quantum numbers range over the same tuples as element exponents.
        group
            .elements()
            .iter()
            .map(|quantum_numbers| Self::new(group, quantum_numbers))
            .collect()
    }

    /// Quantum number per generator.
    pub fn quantum_numbers(&self) -> &[u32] {
        &self.quantum_numbers
    }

    /// Eigenvalue `chi_q(g)` of the element with the given exponents.
    pub fn character(&self, exponents: &[u32]) -> Complex64 {
        self.conjugate_character(exponents).conj()
    }

    /// Complex conjugate `chi_q(g)^*`, the weight used by the projector.
    #[inline]
    pub fn conjugate_character(&self, exponents: &[u32]) -> Complex64 {
        self.conjugate_tables
            .iter()
            .zip(exponents)
            .fold(Complex64::new(1.0, 0.0), |acc, (table, &power)| {
                acc * table[power as usize]
            })
    }
}

/// Rounds components that are within rounding noise of 0 or +-1.
fn snap(value: Complex64) -> Complex64 {
    let clean = |x: f64| {
        if x.abs() < 1e-14 {
            0.0
        } else if (x.abs() - 1.0).abs() < 1e-14 {
            x.signum()
        } else {
            x
        }
    };
    Complex64::new(clean(value.re), clean(value.im))
}
