//! Context compiler: phone inventory to context-dependency transducer.
//!
//! States remember the last two phones seen, `(left, center)`. Arcs read a
//! context-dependent unit and write the phone that completed the window,
//! so the output side is deterministic.

mod compile;
mod config;
mod tied;


pub use compile::{ContextCompiler, ContextOutput};
pub use config::{AuxInput, ContextConfig, ContextMode};
pub use tied::{TiedTable, UnitKey, logical_name};
pub(crate) use tied::read_mdef;
