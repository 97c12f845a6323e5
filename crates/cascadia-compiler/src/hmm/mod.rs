//! HMM compiler: acoustic unit topologies to the HMM transducer (H).
//!
//! Each physical unit becomes a left-to-right chain of three emitting
//! states with self-loops. The chain reads emission ids and writes the unit
//! name on its first arc, then leaves through an HMM-level disambiguation
//! symbol so units sharing a state sequence stay distinguishable.

mod compile;
mod config;
mod model;


pub use compile::{HmmCompiler, HmmOutput};
pub use config::HmmConfig;
pub use model::{HmmModel, HmmUnit};
