//! Grammar compiler: ARPA n-gram models to left-to-right backoff acceptors.
//!
//! - `arpa`: reader for the ARPA text format
//! - `compile`: per-entry arc generation and backoff-node completion
//! - `vocab`: shared word table built from the lexicon and checked against the model

mod arpa;
mod compile;
mod config;
mod vocab;

#[cfg(test)]
mod arpa_tests;
#[cfg(test)]
mod compile_tests;
#[cfg(test)]
mod vocab_tests;

pub use arpa::{ArpaModel, NgramEntry};
pub use compile::{EntryKind, GrammarArc, GrammarCompiler, IMPOSSIBLE_LOGPROB};
pub use config::ArpaConfig;
pub use vocab::{WordTable, build_word_table};
