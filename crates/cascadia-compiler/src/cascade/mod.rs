//! Cascade scheduler: build expressions over compiled components.
//!
//! An expression such as `min(det(C*det(L*G)))` is tokenized, converted
//! to postfix by shunting-yard and evaluated over an operand stack. Every
//! operator becomes one or more toolkit pipelines whose output artifact
//! replaces its operands on the stack.

mod component;
mod config;
mod error;
mod eval;
mod lexer;
mod parser;
mod relabel;
mod token;
mod toolkit;

#[cfg(test)]
mod eval_tests;
#[cfg(test)]
mod parser_tests;
#[cfg(test)]
mod relabel_tests;

pub use component::{Alphabet, Component, ComponentSet, Mapper, SortType, Source};
pub use config::BuildConfig;
pub use error::{SyntaxError, SyntaxErrorKind};
pub use eval::{Artifact, BuildOutcome, Scheduler};
pub use lexer::{SyntaxKind, Token, lex};
pub use parser::to_postfix;
pub use relabel::{complete_relabeling, format_pairs, parse_pairs};
pub use token::{CascadeToken, OptionSet, Operator, TokenKind};
pub use toolkit::{Command, Pipeline, ProcessToolkit, Program, RecordingToolkit, Step, Toolkit};
