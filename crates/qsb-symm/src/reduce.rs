use std::sync::Arc;

use num_complex::Complex64;
use qsb_core::{QsbError, State};

use crate::group::SymmetryGroup;
use crate::sector::Sector;

/// Projected amplitudes below this magnitude count as zero.
pub const ZERO_NORM_TOL: f64 = 1e-9;

/// Canonical member of an orbit together with its sector data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Representative {
    /// Largest state of the orbit.
    pub state: State,
    /// Magnitude of the projected amplitude; equals the stabiliser order.
    pub norm: f64,
    /// Unit phase `chi(g)^* sigma_g(s)` relating the reduced state to `state`.
    pub phase: Complex64,
    /// Number of distinct states in the orbit.
    pub orbit_size: usize,
}

impl Representative {
    /// Normalization constant `sqrt(norm)` of the projected basis vector.
    pub fn normalization(&self) -> f64 {
        self.norm.sqrt()
    }
}

/// Outcome of reducing one candidate state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Reduction {
    /// Slot not yet processed.
    #[default]
    Pending,
    /// The orbit survives projection onto the sector.
    Accepted(Representative),
    /// The orbit has zero weight in the sector.
    Rejected {
        /// Representative of the discarded orbit.
        representative: State,
    },
}

impl Reduction {
    /// Returns the accepted representative, if any.
    pub fn accepted(&self) -> Option<&Representative> {
        match self {
            Reduction::Accepted(rep) => Some(rep),
            _ => None,
        }
    }

    /// Whether the candidate was projected out of the sector.
    pub fn is_rejected(&self) -> bool {
        matches!(self, Reduction::Rejected { .. })
    }
}

/// Pure orbit reducer for one (group, sector) pair.
#[derive(Debug, Clone)]
pub struct Reducer {
    group: Arc<SymmetryGroup>,
    sector: Sector,
}

impl Reducer {
    /// Validates the sector against the group and builds a reducer.
    pub fn new(group: Arc<SymmetryGroup>, quantum_numbers: &[u32]) -> Result<Self, QsbError> {
        let sector = Sector::new(&group, quantum_numbers)?;
        Ok(Self { group, sector })
    }

    /// Builds a reducer from an already validated sector.
    pub fn with_sector(group: Arc<SymmetryGroup>, sector: Sector) -> Self {
        Self { group, sector }
    }

    /// Underlying symmetry group.
    pub fn group(&self) -> &SymmetryGroup {
        &self.group
    }

    /// Shared handle to the symmetry group.
    pub fn shared_group(&self) -> Arc<SymmetryGroup> {
        Arc::clone(&self.group)
    }

    /// Selected sector.
    pub fn sector(&self) -> &Sector {
        &self.sector
    }

    /// Reduces `state` to its representative and projected amplitude.
    ///
    /// The representative is the largest orbit member; the amplitude sums
    /// `chi(g)^* sigma_g(state)` over every element mapping `state` onto it.
    pub fn reduce(&self, state: State) -> Reduction {
        let mut best = state;
        let mut amplitude = Complex64::new(0.0, 0.0);
        let mut stabiliser = 0usize;
        self.group.walk(state, |exponents, image, sign| {
            if image == state {
                stabiliser += 1;
            }
            if image < best {
                return;
            }
            let weight = self.sector.conjugate_character(exponents) * f64::from(sign);
            if image > best {
                best = image;
                amplitude = weight;
            } else {
                amplitude += weight;
            }
        });
        let norm = amplitude.norm();
        if norm < ZERO_NORM_TOL {
            return Reduction::Rejected {
                representative: best,
            };
        }
        // The magnitude is the stabiliser order up to rounding.
        let exact = norm.round();
        Reduction::Accepted(Representative {
            state: best,
            norm: if (norm - exact).abs() < 1e-6 { exact } else { norm },
            phase: amplitude / norm,
            orbit_size: self.group.order() / stabiliser,
        })
    }

    /// Largest orbit member, independent of the sector.
    pub fn representative(&self, state: State) -> State {
        let mut best = state;
        self.group.walk(state, |_, image, _| best = best.max(image));
        best
    }

    /// Distinct orbit members in descending order.
    pub fn orbit(&self, state: State) -> Vec<State> {
        let mut members = Vec::with_capacity(self.group.order());
        self.group.walk(state, |_, image, _| members.push(image));
        members.sort_unstable_by(|a, b| b.cmp(a));
        members.dedup();
        members
    }
}
