//! Regex compiler: weighted regular expressions over words to acceptors.
//!
//! Compilation runs in two stages. The infix expression is tokenized and
//! rewritten to postfix with explicit concatenation; every syntax error is
//! reported there, before any state exists. The postfix form is then
//! assembled by Thompson's construction and materialized as an
//! [`Automaton`](cascadia_core::Automaton).

mod compile;
mod config;
mod error;
mod grammar_file;
mod lexer;
mod postfix;
mod thompson;

#[cfg(test)]
mod grammar_file_tests;

pub use compile::RegexCompiler;
pub use config::RegexConfig;
pub use error::{RegexError, RegexErrorKind};
pub use grammar_file::expand_grammar;
pub use lexer::{Token, TokenKind, lex};
pub use postfix::{Item, Operand, Postfix};
