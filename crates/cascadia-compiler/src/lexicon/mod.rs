//! Lexicon compiler: pronunciation dictionaries to phone/word transducers.

mod compile;
mod config;
mod position;


pub use compile::{LexiconCompiler, LexiconOutput, Pronunciation, parse_lexicon};
pub use config::LexiconConfig;
pub use position::Position;
