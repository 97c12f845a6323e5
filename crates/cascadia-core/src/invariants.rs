//! Invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use crate::{Automaton, StateId};

impl Automaton {
    pub(crate) fn ensure_state(&self, state: StateId) {
        if state.index() >= self.num_states() {
            panic!(
                "Automaton: state {state} was never allocated \
                 ({} states; allocate with new_state or named_state)",
                self.num_states()
            );
        }
    }

    pub(crate) fn ensure_start(&self) -> StateId {
        self.start()
            .unwrap_or_else(|| panic!("Automaton: serialized before a start state was set"))
    }
}
