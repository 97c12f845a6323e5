//! Infix to postfix by shunting-yard with explicit concatenation.

use std::fmt;
use std::ops::Range;

use super::error::{RegexError, RegexErrorKind};
use super::lexer::{Token, TokenKind, lex, weight_value};

/// A word (or epsilon when `word` is `None`) with its cost.
#[derive(Clone, Debug, PartialEq)]
pub struct Operand {
    pub word: Option<String>,
    pub weight: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Item {
    Operand(Operand),
    Concat,
    Alt,
    Star,
    Plus,
    Optional,
}

/// Postfix form of an expression, ready for construction.
#[derive(Clone, Debug, PartialEq)]
pub struct Postfix {
    pub items: Vec<Item>,
}

impl fmt::Display for Postfix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            match item {
                Item::Operand(Operand { word, weight }) => {
                    f.write_str(word.as_deref().unwrap_or("<eps>"))?;
                    if *weight != 0.0 {
                        write!(f, "[{weight}]")?;
                    }
                }
                Item::Concat => f.write_str(".")?,
                Item::Alt => f.write_str("|")?,
                Item::Star => f.write_str("*")?,
                Item::Plus => f.write_str("+")?,
                Item::Optional => f.write_str("?")?,
            }
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Op {
    Alt,
    Concat,
    Open,
}

impl Op {
    fn precedence(self) -> u8 {
        match self {
            Op::Open => 0,
            Op::Alt => 1,
            Op::Concat => 2,
        }
    }

    fn item(self) -> Option<Item> {
        match self {
            Op::Alt => Some(Item::Alt),
            Op::Concat => Some(Item::Concat),
            Op::Open => None,
        }
    }
}

/// What the previous significant token left behind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Prev {
    Start,
    Operand,
    Open,
    Alt,
}

impl Postfix {
    pub fn parse(source: &str) -> Result<Self, RegexError> {
        let tokens: Vec<Token> = lex(source).into_iter().filter(|t| !t.kind.is_trivia()).collect();
        check_balance(&tokens)?;
        Converter::new(source).run(&tokens)
    }
}

/// Parens and weight brackets must pair up before anything else is looked at.
fn check_balance(tokens: &[Token]) -> Result<(), RegexError> {
    let mut open: Vec<Range<usize>> = Vec::new();
    let mut bracket: Option<Range<usize>> = None;

    for token in tokens {
        match token.kind {
            TokenKind::Garbage => {
                return Err(RegexError::new(RegexErrorKind::UnexpectedInput, token.span.clone()));
            }
            TokenKind::BracketOpen if bracket.is_none() => bracket = Some(token.span.clone()),
            TokenKind::BracketClose => match bracket.take() {
                Some(start) => {
                    return Err(RegexError::new(RegexErrorKind::InvalidWeight, start.start..token.span.end));
                }
                None => {
                    return Err(RegexError::new(RegexErrorKind::UnbalancedBracket, token.span.clone()));
                }
            },
            _ if bracket.is_some() && token.kind != TokenKind::Word => break,
            TokenKind::ParenOpen => open.push(token.span.clone()),
            TokenKind::ParenClose => {
                if open.pop().is_none() {
                    return Err(RegexError::new(RegexErrorKind::UnbalancedParen, token.span.clone()));
                }
            }
            _ => {}
        }
    }

    if let Some(span) = bracket {
        return Err(RegexError::new(RegexErrorKind::UnbalancedBracket, span));
    }
    if let Some(span) = open.pop() {
        return Err(RegexError::new(RegexErrorKind::UnbalancedParen, span));
    }
    Ok(())
}

struct Converter<'s> {
    source: &'s str,
    output: Vec<Item>,
    ops: Vec<(Op, Range<usize>)>,
    prev: Prev,
    /// The previous token was a word that can still take a weight.
    after_word: bool,
}

impl<'s> Converter<'s> {
    fn new(source: &'s str) -> Self {
        Self {
            source,
            output: Vec::new(),
            ops: Vec::new(),
            prev: Prev::Start,
            after_word: false,
        }
    }

    fn run(mut self, tokens: &[Token]) -> Result<Postfix, RegexError> {
        for token in tokens {
            let span = token.span.clone();
            let after_word = std::mem::replace(&mut self.after_word, token.kind == TokenKind::Word);
            match token.kind {
                TokenKind::Word => {
                    let word = self.source[span.clone()].to_string();
                    self.operand(Some(word), 0.0, span);
                }
                TokenKind::Weight => {
                    let text = &self.source[span.clone()];
                    let weight = weight_value(text)
                        .ok_or_else(|| RegexError::new(RegexErrorKind::InvalidWeight, span.clone()))?;
                    self.weight(weight, after_word, span);
                }
                TokenKind::ParenOpen => {
                    if self.prev == Prev::Operand {
                        self.push_op(Op::Concat, span.clone());
                    }
                    self.ops.push((Op::Open, span));
                    self.prev = Prev::Open;
                }
                TokenKind::ParenClose => self.close(span)?,
                TokenKind::Pipe => {
                    if self.prev != Prev::Operand {
                        return Err(RegexError::new(RegexErrorKind::EmptyAlternative, span));
                    }
                    self.push_op(Op::Alt, span);
                    self.prev = Prev::Alt;
                }
                TokenKind::Star | TokenKind::Plus | TokenKind::Question => {
                    if self.prev != Prev::Operand {
                        return Err(RegexError::new(RegexErrorKind::MissingOperand, span));
                    }
                    self.output.push(match token.kind {
                        TokenKind::Star => Item::Star,
                        TokenKind::Plus => Item::Plus,
                        _ => Item::Optional,
                    });
                }
                TokenKind::BracketOpen
                | TokenKind::BracketClose
                | TokenKind::Whitespace
                | TokenKind::Garbage => {
                    return Err(RegexError::new(RegexErrorKind::UnexpectedInput, span));
                }
            }
        }

        match self.prev {
            Prev::Start => Err(RegexError::new(RegexErrorKind::EmptyExpression, 0..self.source.len())),
            Prev::Alt => {
                let end = self.source.trim_end().len();
                Err(RegexError::new(RegexErrorKind::EmptyAlternative, end.saturating_sub(1)..end))
            }
            Prev::Operand | Prev::Open => {
                while let Some((op, span)) = self.ops.pop() {
                    match op.item() {
                        Some(item) => self.output.push(item),
                        None => return Err(RegexError::new(RegexErrorKind::UnbalancedParen, span)),
                    }
                }
                Ok(Postfix { items: self.output })
            }
        }
    }

    fn operand(&mut self, word: Option<String>, weight: f64, span: Range<usize>) {
        if self.prev == Prev::Operand {
            self.push_op(Op::Concat, span);
        }
        self.output.push(Item::Operand(Operand { word, weight }));
        self.prev = Prev::Operand;
    }

    /// A weight right after a word costs that word; anywhere else it is a
    /// weighted epsilon.
    fn weight(&mut self, weight: f64, after_word: bool, span: Range<usize>) {
        if after_word && let Some(Item::Operand(last)) = self.output.last_mut() {
            last.weight = weight;
            return;
        }
        self.operand(None, weight, span);
    }

    fn close(&mut self, span: Range<usize>) -> Result<(), RegexError> {
        match self.prev {
            Prev::Open => {
                let start = self.ops.last().map_or(span.start, |(_, open)| open.start);
                return Err(RegexError::new(RegexErrorKind::EmptyGroup, start..span.end));
            }
            Prev::Alt => return Err(RegexError::new(RegexErrorKind::EmptyAlternative, span)),
            Prev::Start => return Err(RegexError::new(RegexErrorKind::UnbalancedParen, span)),
            Prev::Operand => {}
        }

        loop {
            match self.ops.pop() {
                Some((Op::Open, _)) => break,
                Some((op, _)) => self.output.extend(op.item()),
                None => return Err(RegexError::new(RegexErrorKind::UnbalancedParen, span)),
            }
        }
        self.prev = Prev::Operand;
        Ok(())
    }

    fn push_op(&mut self, op: Op, span: Range<usize>) {
        while let Some(&(top, _)) = self.ops.last() {
            if top == Op::Open || top.precedence() < op.precedence() {
                break;
            }
            self.ops.pop();
            self.output.extend(top.item());
        }
        self.ops.push((op, span));
    }
}
