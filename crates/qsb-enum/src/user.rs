use qsb_core::{check_num_sites, State};

use crate::CandidateSource;

/// Ordered caller supplied states, already filtered by any superselection rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateList {
    num_sites: usize,
    states: Vec<State>,
}

impl StateList {
    /// Wraps a state sequence; range checks happen during basis assembly.
    pub fn new(num_sites: usize, states: Vec<State>) -> Result<Self, qsb_core::QsbError> {
        check_num_sites(num_sites)?;
        Ok(Self { num_sites, states })
    }

    /// Wrapped states in consumption order.
    pub fn states(&self) -> &[State] {
        &self.states
    }
}

impl CandidateSource for StateList {
    fn num_sites(&self) -> usize {
        self.num_sites
    }

    fn initial_state(&self) -> Option<State> {
        self.states.first().copied()
    }

    fn next_state(&self, _prev: State, counter: u64) -> Option<State> {
        usize::try_from(counter)
            .ok()
            .and_then(|index| self.states.get(index).copied())
    }

    fn size_estimate(&self) -> u64 {
        self.states.len() as u64
    }
}

/// Function table describing an external sequential enumeration.
///
/// Every hook is a pure function of its inputs and the argument struct `A`.
pub struct EnumerationHooks<A> {
    /// `next_state(prev, counter, num_sites, args)`; `None` signals exhaustion.
    pub next_state: fn(State, u64, usize, &A) -> Option<State>,
    /// `initial_state(num_sites, args)`.
    pub initial_state: fn(usize, &A) -> Option<State>,
    /// `size_estimate(num_sites, args)`, an upper bound on the sequence length.
    pub size_estimate: fn(usize, &A) -> u64,
}

impl<A> Clone for EnumerationHooks<A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A> Copy for EnumerationHooks<A> {}

/// External enumeration driven by [`EnumerationHooks`].
pub struct UserSupplied<A> {
    num_sites: usize,
    args: A,
    hooks: EnumerationHooks<A>,
}

impl<A> UserSupplied<A> {
    /// Binds a hook table to its argument struct.
    pub fn new(
        num_sites: usize,
        args: A,
        hooks: EnumerationHooks<A>,
    ) -> Result<Self, qsb_core::QsbError> {
        check_num_sites(num_sites)?;
        Ok(Self {
            num_sites,
            args,
            hooks,
        })
    }

    /// Arguments forwarded to every hook.
    pub fn args(&self) -> &A {
        &self.args
    }
}

impl<A: Send + Sync> CandidateSource for UserSupplied<A> {
    fn num_sites(&self) -> usize {
        self.num_sites
    }

    fn initial_state(&self) -> Option<State> {
        (self.hooks.initial_state)(self.num_sites, &self.args)
    }

    fn next_state(&self, prev: State, counter: u64) -> Option<State> {
        (self.hooks.next_state)(prev, counter, self.num_sites, &self.args)
    }

    fn size_estimate(&self) -> u64 {
        (self.hooks.size_estimate)(self.num_sites, &self.args)
    }
}
