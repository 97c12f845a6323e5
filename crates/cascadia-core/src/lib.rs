#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for cascadia weighted transducers.
//!
//! - `SymbolTable`: bijective label ↔ id mapping, epsilon pinned at id 0
//! - `Automaton`: states, weighted arcs and finals over three symbol tables
//!   (input labels, output labels, state names)
//! - `Semiring`: the weight algebra an automaton is compiled for
//!
//! Everything here is built once per compiler invocation, serialized to the
//! text interchange format, and handed to the external toolkit.

mod automaton;
mod error;
mod invariants;
mod semiring;
mod symbols;

#[cfg(test)]
mod semiring_tests;

pub use automaton::{Arc, Automaton, StateId};
pub use error::{Error, Result};
pub use semiring::{Semiring, log10_to_cost};
pub use symbols::{Label, SymbolTable};
