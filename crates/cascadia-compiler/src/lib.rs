//! Cascadia compilers: knowledge sources to weighted transducers.
//!
//! Each compiler turns one domain input into an [`Automaton`] plus its
//! symbol tables:
//! - `grammar` - ARPA n-gram model to backoff acceptor (G)
//! - `lexicon` - pronunciation dictionary to phone/word transducer (L)
//! - `context` - phone inventory and tied table to context transducer (C)
//! - `hmm` - acoustic unit topologies to HMM transducer (H)
//! - `regex` - regular-expression grammar to acceptor via Thompson construction
//! - `silence` - optional inter-word silence transducer (T)
//!
//! `cascade` sits on top: it parses a build expression such as
//! `min(det(C*det(L*G)))` and drives the external toolkit over the
//! compiled components.
//!
//! [`Automaton`]: cascadia_core::Automaton

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod cascade;
pub mod context;
pub mod diagnostics;
pub mod grammar;
pub mod hmm;
pub mod lexicon;
pub mod regex;
pub mod silence;

#[cfg(test)]
pub(crate) mod test_utils;

pub use cascade::{BuildConfig, BuildOutcome, Scheduler, SyntaxError};
pub use context::{ContextCompiler, ContextConfig, TiedTable};
pub use diagnostics::DiagnosticPrinter;
pub use grammar::{ArpaConfig, ArpaModel, GrammarCompiler};
pub use hmm::{HmmCompiler, HmmConfig, HmmModel};
pub use lexicon::{LexiconCompiler, LexiconConfig, LexiconOutput};
pub use regex::{RegexCompiler, RegexConfig, RegexError};
pub use silence::{SilenceCompiler, SilenceConfig};

/// Errors raised by the compilers and the cascade scheduler.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("malformed ARPA model at line {line}: {message}")]
    MalformedArpa { line: usize, message: String },

    #[error("malformed lexicon at line {line}: {message}")]
    MalformedLexicon { line: usize, message: String },

    #[error("malformed tied table at line {line}: {message}")]
    MalformedTiedTable { line: usize, message: String },

    #[error("malformed HMM definition at line {line}: {message}")]
    MalformedHmm { line: usize, message: String },

    #[error("malformed grammar: {message}")]
    MalformedGrammar { message: String },

    #[error(transparent)]
    Regex(#[from] RegexError),

    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    #[error("unknown component `{0}`")]
    UnknownComponent(char),

    #[error("operator `{operator}` is missing an operand")]
    MissingOperand { operator: String },

    #[error("expression leaves {count} operands unconsumed")]
    DanglingOperands { count: usize },

    #[error(
        "cannot compose `{left}` with `{right}`: {output} output does not match {input} input \
         and no mapper is declared"
    )]
    AlphabetMismatch {
        left: String,
        right: String,
        output: cascade::Alphabet,
        input: cascade::Alphabet,
    },

    #[error("malformed relabel pairs at line {line}: {message}")]
    MalformedRelabelPairs { line: usize, message: String },

    #[error("invalid artifact name `{0}`")]
    InvalidArtifactName(String),

    #[error("`{program}` failed: {status}")]
    ToolkitFailed { program: String, status: String },

    #[error("failed to start `{program}`: {source}")]
    ToolkitSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Symbols(#[from] cascadia_core::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type for compiler operations.
pub type Result<T> = std::result::Result<T, Error>;
