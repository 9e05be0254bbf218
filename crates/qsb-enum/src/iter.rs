use qsb_core::State;
use tracing::debug;

use crate::CandidateSource;

/// Restartable iterator over the states of a [`CandidateSource`].
///
/// Iteration stops at the first `None` from the source or once
/// `size_estimate()` states were produced, whichever comes first.
pub struct Candidates<'a> {
    source: &'a dyn CandidateSource,
    prev: Option<State>,
    counter: u64,
    limit: u64,
    done: bool,
}

impl<'a> Candidates<'a> {
    /// Starts iterating from the source's initial state.
    pub fn new(source: &'a dyn CandidateSource) -> Self {
        Self {
            source,
            prev: None,
            counter: 0,
            limit: source.size_estimate(),
            done: false,
        }
    }

    /// Rewinds to the initial state.
    pub fn restart(&mut self) {
        self.prev = None;
        self.counter = 0;
        self.done = false;
    }

    /// Number of states produced so far.
    pub fn produced(&self) -> u64 {
        self.counter
    }

    /// Groups the remaining states into vectors of at most `chunk_size`.
    pub fn chunks(self, chunk_size: usize) -> Chunks<'a> {
        Chunks {
            inner: self,
            chunk_size: chunk_size.max(1),
        }
    }
}

impl Iterator for Candidates<'_> {
    type Item = State;

    fn next(&mut self) -> Option<State> {
        if self.done {
            return None;
        }
        if self.counter >= self.limit {
            debug!(produced = self.counter, "candidate source reached its size estimate");
            self.done = true;
            return None;
        }
        let next = match self.prev {
            None => self.source.initial_state(),
            Some(prev) => self.source.next_state(prev, self.counter),
        };
        match next {
            Some(state) => {
                self.prev = Some(state);
                self.counter += 1;
                Some(state)
            }
            None => {
                self.done = true;
                None
            }
        }
    }
}

/// Chunked reader produced by [`Candidates::chunks`].
pub struct Chunks<'a> {
    inner: Candidates<'a>,
    chunk_size: usize,
}

impl Iterator for Chunks<'_> {
    type Item = Vec<State>;

    fn next(&mut self) -> Option<Vec<State>> {
        let chunk: Vec<State> = self.inner.by_ref().take(self.chunk_size).collect();
        (!chunk.is_empty()).then_some(chunk)
    }
}
