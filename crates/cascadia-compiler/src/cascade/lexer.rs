//! Tokenizer for build expressions.

use std::ops::Range;

use logos::Logos;

#[derive(Logos, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SyntaxKind {
    #[token("(")]
    ParenOpen,

    #[token(")")]
    ParenClose,

    #[token("[")]
    BracketOpen,

    #[token("]")]
    BracketClose,

    #[token(",")]
    Comma,

    /// Composition.
    #[token("*")]
    Star,

    /// Lookahead composition.
    #[token(".")]
    Dot,

    /// Operator names with short options (`det_lw`), components, and
    /// bracketed option names.
    #[regex(r"[A-Za-z][A-Za-z_]*")]
    Ident,

    #[regex(r"\s+")]
    Whitespace,

    /// Coalesced run of unrecognized characters.
    Garbage,
}

impl SyntaxKind {
    pub fn is_trivia(self) -> bool {
        self == SyntaxKind::Whitespace
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: SyntaxKind,
    pub span: Range<usize>,
}

pub fn lex(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut lexer = SyntaxKind::lexer(source);
    let mut error_start: Option<usize> = None;

    loop {
        match lexer.next() {
            Some(Ok(kind)) => {
                if let Some(start) = error_start.take() {
                    tokens.push(Token {
                        kind: SyntaxKind::Garbage,
                        span: start..lexer.span().start,
                    });
                }
                tokens.push(Token {
                    kind,
                    span: lexer.span(),
                });
            }
            Some(Err(())) => {
                error_start.get_or_insert(lexer.span().start);
            }
            None => {
                if let Some(start) = error_start.take() {
                    tokens.push(Token {
                        kind: SyntaxKind::Garbage,
                        span: start..source.len(),
                    });
                }
                break;
            }
        }
    }

    tokens
}
