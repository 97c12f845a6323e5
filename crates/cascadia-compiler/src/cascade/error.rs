use std::fmt;
use std::ops::Range;

use crate::diagnostics::DiagnosticPrinter;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SyntaxErrorKind {
    UnbalancedParen,
    UnbalancedBracket,
    BadToken,
    UnknownOption,
    MisplacedBracket,
    MissingApplication,
    SemiringConflict,
    EmptyExpression,
}

impl fmt::Display for SyntaxErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            SyntaxErrorKind::UnbalancedParen => "unbalanced parenthesis",
            SyntaxErrorKind::UnbalancedBracket => "unbalanced option bracket",
            SyntaxErrorKind::BadToken => "unexpected token",
            SyntaxErrorKind::UnknownOption => "unknown operator option",
            SyntaxErrorKind::MisplacedBracket => "options must follow an operator",
            SyntaxErrorKind::MissingApplication => "operator must be applied as `op(...)`",
            SyntaxErrorKind::SemiringConflict => "both log and tropical semirings requested",
            SyntaxErrorKind::EmptyExpression => "empty build expression",
        };
        f.write_str(message)
    }
}

/// Error in a build expression, located by byte span.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at {}..{}", span.start, span.end)]
pub struct SyntaxError {
    pub kind: SyntaxErrorKind,
    pub span: Range<usize>,
}

impl SyntaxError {
    pub fn new(kind: SyntaxErrorKind, span: Range<usize>) -> Self {
        Self { kind, span }
    }

    pub fn render(&self, source: &str) -> String {
        DiagnosticPrinter::new(source).render(&self.kind.to_string(), self.span.clone())
    }
}
