//! Errors raised while reading core structures back from text.

/// Errors from parsing serialized tables.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("symbol table line {line}: {message}")]
    SymbolTable { line: usize, message: String },
}

pub type Result<T> = std::result::Result<T, Error>;
