use std::fmt;
use std::ops::Range;

use crate::diagnostics::DiagnosticPrinter;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegexErrorKind {
    UnbalancedParen,
    UnbalancedBracket,
    EmptyAlternative,
    EmptyGroup,
    MissingOperand,
    EmptyExpression,
    InvalidWeight,
    UnexpectedInput,
}

impl fmt::Display for RegexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            RegexErrorKind::UnbalancedParen => "unbalanced parenthesis",
            RegexErrorKind::UnbalancedBracket => "unbalanced weight bracket",
            RegexErrorKind::EmptyAlternative => "empty alternative",
            RegexErrorKind::EmptyGroup => "empty group",
            RegexErrorKind::MissingOperand => "quantifier has nothing to repeat",
            RegexErrorKind::EmptyExpression => "empty expression",
            RegexErrorKind::InvalidWeight => "weight is not a number",
            RegexErrorKind::UnexpectedInput => "unexpected input",
        };
        f.write_str(message)
    }
}

/// Syntax error in a regular expression, located by byte span.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at {}..{}", span.start, span.end)]
pub struct RegexError {
    pub kind: RegexErrorKind,
    pub span: Range<usize>,
}

impl RegexError {
    pub fn new(kind: RegexErrorKind, span: Range<usize>) -> Self {
        Self { kind, span }
    }

    /// Render against the expression the error came from.
    pub fn render(&self, source: &str) -> String {
        DiagnosticPrinter::new(source).render(&self.kind.to_string(), self.span.clone())
    }
}
