//! Human readable state rendering for diagnostics.

use itertools::Itertools;

use crate::{occupation, State};

/// Renders a state as a ket of per-site occupations, site 0 first.
///
/// `render_state(0b0110, 4)` yields `"|0 1 1 0>"`.
pub fn render_state(state: State, num_sites: usize) -> String {
    let body = (0..num_sites)
        .map(|site| occupation(state, site))
        .join(" ");
    format!("|{body}>")
}
