//! Build expression to postfix.
//!
//! Runs in three passes: a balance check over the raw tokens, then
//! classification (folding `[...]` option lists into the operator before
//! them), then shunting-yard. Prefix operators must be followed by `(`.

use std::ops::Range;

use tracing::{trace, warn};

use super::error::{SyntaxError, SyntaxErrorKind};
use super::lexer::{SyntaxKind, Token, lex};
use super::token::{CascadeToken, OptionSet, Operator, TokenKind};

pub fn to_postfix(source: &str) -> Result<Vec<CascadeToken>, SyntaxError> {
    let tokens: Vec<Token> = lex(source).into_iter().filter(|t| !t.kind.is_trivia()).collect();
    check_balance(&tokens)?;

    let infix = classify(source, &tokens)?;
    check_applications(&infix)?;
    let postfix = shunting_yard(infix);
    if postfix.is_empty() {
        return Err(SyntaxError::new(SyntaxErrorKind::EmptyExpression, 0..source.len()));
    }
    trace!(
        postfix = %postfix.iter().map(CascadeToken::name).collect::<Vec<_>>().join(" "),
        "parsed build expression"
    );
    Ok(postfix)
}

fn check_balance(tokens: &[Token]) -> Result<(), SyntaxError> {
    let mut parens: Vec<Range<usize>> = Vec::new();
    let mut bracket: Option<Range<usize>> = None;

    for token in tokens {
        let span = token.span.clone();
        match token.kind {
            SyntaxKind::ParenOpen => parens.push(span),
            SyntaxKind::ParenClose => {
                if parens.pop().is_none() {
                    return Err(SyntaxError::new(SyntaxErrorKind::UnbalancedParen, span));
                }
            }
            SyntaxKind::BracketOpen => {
                if bracket.replace(span.clone()).is_some() {
                    return Err(SyntaxError::new(SyntaxErrorKind::UnbalancedBracket, span));
                }
            }
            SyntaxKind::BracketClose => {
                if bracket.take().is_none() {
                    return Err(SyntaxError::new(SyntaxErrorKind::UnbalancedBracket, span));
                }
            }
            _ => {}
        }
    }

    if let Some(span) = bracket {
        return Err(SyntaxError::new(SyntaxErrorKind::UnbalancedBracket, span));
    }
    if let Some(span) = parens.pop() {
        return Err(SyntaxError::new(SyntaxErrorKind::UnbalancedParen, span));
    }
    Ok(())
}

fn classify(source: &str, tokens: &[Token]) -> Result<Vec<CascadeToken>, SyntaxError> {
    let mut out: Vec<CascadeToken> = Vec::new();
    let mut iter = tokens.iter();

    while let Some(token) = iter.next() {
        let span = token.span.clone();
        let kind = match token.kind {
            SyntaxKind::ParenOpen => TokenKind::ParenOpen,
            SyntaxKind::ParenClose => TokenKind::ParenClose,
            SyntaxKind::Star => TokenKind::Operator(Operator::Compose),
            SyntaxKind::Dot => TokenKind::Operator(Operator::Lookahead),
            SyntaxKind::Ident => {
                let token = ident(&source[span.clone()], span)?;
                out.push(token);
                continue;
            }
            SyntaxKind::BracketOpen => {
                let Some(CascadeToken {
                    kind: TokenKind::Operator(op),
                    options: current,
                    span: op_span,
                }) = out.last_mut()
                else {
                    return Err(SyntaxError::new(SyntaxErrorKind::MisplacedBracket, span));
                };
                let (options, end) = bracket_options(source, &mut iter)?;
                if op.takes_options() {
                    current.merge(options).map_err(|_| {
                        SyntaxError::new(SyntaxErrorKind::SemiringConflict, op_span.start..end)
                    })?;
                } else {
                    warn!(operator = op.name(), "ignoring bracket options");
                }
                continue;
            }
            SyntaxKind::BracketClose
            | SyntaxKind::Comma
            | SyntaxKind::Whitespace
            | SyntaxKind::Garbage => {
                return Err(SyntaxError::new(SyntaxErrorKind::BadToken, span));
            }
        };
        out.push(CascadeToken::new(kind, span));
    }

    Ok(out)
}

/// Every `det`, `min`, `push` or `rmeps` opens its operand with `(`.
fn check_applications(infix: &[CascadeToken]) -> Result<(), SyntaxError> {
    for (index, token) in infix.iter().enumerate() {
        let TokenKind::Operator(op) = token.kind else {
            continue;
        };
        let applied = matches!(
            infix.get(index + 1).map(|next| &next.kind),
            Some(TokenKind::ParenOpen)
        );
        if op.is_prefix() && !applied {
            return Err(SyntaxError::new(SyntaxErrorKind::MissingApplication, token.span.clone()));
        }
    }
    Ok(())
}

/// Classify an identifier outside brackets: an operator with optional
/// `_letters`, or a single uppercase component letter.
fn ident(text: &str, span: Range<usize>) -> Result<CascadeToken, SyntaxError> {
    let (name, letters) = match text.split_once('_') {
        Some((name, letters)) => (name, Some(letters)),
        None => (text, None),
    };

    if let Some(op) = Operator::from_name(name) {
        let mut token = CascadeToken::new(TokenKind::Operator(op), span.clone());
        let letters = letters.unwrap_or_default();
        if !op.takes_options() {
            if !letters.is_empty() {
                warn!(operator = op.name(), options = letters, "ignoring operator options");
            }
            return Ok(token);
        }
        for letter in letters.chars() {
            match token.options.apply(letter) {
                Ok(true) => {}
                Ok(false) => return Err(SyntaxError::new(SyntaxErrorKind::UnknownOption, span)),
                Err(_) => return Err(SyntaxError::new(SyntaxErrorKind::SemiringConflict, span)),
            }
        }
        return Ok(token);
    }

    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_uppercase() => Ok(CascadeToken::new(TokenKind::Component(c), span)),
        _ => Err(SyntaxError::new(SyntaxErrorKind::BadToken, span)),
    }
}

/// Consume tokens up to the closing `]` and collect the named options.
/// Returns the options and the end offset of the `]`.
fn bracket_options<'t>(
    source: &str,
    iter: &mut impl Iterator<Item = &'t Token>,
) -> Result<(OptionSet, usize), SyntaxError> {
    let mut options = OptionSet::default();
    let mut end = source.len();

    for token in iter.by_ref() {
        let span = token.span.clone();
        end = span.end;
        match token.kind {
            SyntaxKind::BracketClose => return Ok((options, end)),
            SyntaxKind::Comma => {}
            SyntaxKind::Ident => {
                let letter = OptionSet::letter_for(&source[span.clone()])
                    .ok_or_else(|| SyntaxError::new(SyntaxErrorKind::UnknownOption, span.clone()))?;
                options
                    .apply(letter)
                    .map_err(|_| SyntaxError::new(SyntaxErrorKind::SemiringConflict, span))?;
            }
            _ => return Err(SyntaxError::new(SyntaxErrorKind::BadToken, span)),
        }
    }

    Ok((options, end))
}

fn shunting_yard(infix: Vec<CascadeToken>) -> Vec<CascadeToken> {
    let mut output = Vec::with_capacity(infix.len());
    let mut stack: Vec<CascadeToken> = Vec::new();

    for token in infix {
        match token.kind {
            TokenKind::Component(_) => output.push(token),
            TokenKind::Operator(op) => {
                while let Some(top) = stack.last() {
                    match top.precedence() {
                        Some(prec) if prec >= op.precedence() => {
                            output.extend(stack.pop());
                        }
                        _ => break,
                    }
                }
                stack.push(token);
            }
            TokenKind::ParenOpen => stack.push(token),
            TokenKind::ParenClose => {
                while let Some(top) = stack.pop() {
                    if top.kind == TokenKind::ParenOpen {
                        break;
                    }
                    output.push(top);
                }
            }
        }
    }

    while let Some(top) = stack.pop() {
        if top.kind != TokenKind::ParenOpen {
            output.push(top);
        }
    }
    output
}
