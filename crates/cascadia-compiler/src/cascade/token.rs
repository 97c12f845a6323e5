use std::ops::Range;

use cascadia_core::Semiring;
use serde::Serialize;

/// Cascade operators. Composition binds looser than the optimizations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Compose,
    Lookahead,
    Determinize,
    Minimize,
    Push,
    RmEpsilon,
}

impl Operator {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "det" => Some(Operator::Determinize),
            "min" => Some(Operator::Minimize),
            "push" => Some(Operator::Push),
            "rmeps" => Some(Operator::RmEpsilon),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Operator::Compose => "*",
            Operator::Lookahead => ".",
            Operator::Determinize => "det",
            Operator::Minimize => "min",
            Operator::Push => "push",
            Operator::RmEpsilon => "rmeps",
        }
    }

    pub fn precedence(self) -> u8 {
        match self {
            Operator::Compose | Operator::Lookahead => 5,
            _ => 10,
        }
    }

    pub fn is_binary(self) -> bool {
        matches!(self, Operator::Compose | Operator::Lookahead)
    }

    /// Prefix operators are applied as `op(expr)`.
    pub fn is_prefix(self) -> bool {
        !self.is_binary()
    }

    /// Only det, min and push honour options.
    pub fn takes_options(self) -> bool {
        matches!(self, Operator::Determinize | Operator::Minimize | Operator::Push)
    }
}

/// Options an optimization operator runs with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct OptionSet {
    pub semiring: Option<Semiring>,
    pub encode_weights: bool,
    pub encode_labels: bool,
}

/// Two different semirings were requested.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SemiringConflict;

impl OptionSet {
    /// Apply a short option letter: `l`, `t`, `w` or `s`. Unknown letters
    /// return `Ok(false)`.
    pub fn apply(&mut self, letter: char) -> Result<bool, SemiringConflict> {
        match letter {
            'w' => self.encode_weights = true,
            's' => self.encode_labels = true,
            _ => match Semiring::from_letter(letter) {
                Some(semiring) => self.set_semiring(semiring)?,
                None => return Ok(false),
            },
        }
        Ok(true)
    }

    /// Map a long option name to its letter.
    pub fn letter_for(name: &str) -> Option<char> {
        match name {
            "log" | "l" => Some('l'),
            "tropical" | "standard" | "trop" | "t" => Some('t'),
            "weights" | "ew" | "w" => Some('w'),
            "labels" | "el" | "symbols" | "s" => Some('s'),
            _ => None,
        }
    }

    pub fn merge(&mut self, other: OptionSet) -> Result<(), SemiringConflict> {
        if let Some(semiring) = other.semiring {
            self.set_semiring(semiring)?;
        }
        self.encode_weights |= other.encode_weights;
        self.encode_labels |= other.encode_labels;
        Ok(())
    }

    fn set_semiring(&mut self, semiring: Semiring) -> Result<(), SemiringConflict> {
        match self.semiring {
            Some(current) if current != semiring => Err(SemiringConflict),
            _ => {
                self.semiring = Some(semiring);
                Ok(())
            }
        }
    }

    pub fn encodes(&self) -> bool {
        self.encode_weights || self.encode_labels
    }

    pub fn is_empty(&self) -> bool {
        *self == OptionSet::default()
    }

    /// Canonical name suffix: `_` followed by the semiring letter, `w`,
    /// then `s`; empty without options.
    pub fn suffix(&self) -> String {
        if self.is_empty() {
            return String::new();
        }
        let mut out = String::from("_");
        if let Some(semiring) = self.semiring {
            out.push(semiring.letter());
        }
        if self.encode_weights {
            out.push('w');
        }
        if self.encode_labels {
            out.push('s');
        }
        out
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    Operator(Operator),
    Component(char),
    ParenOpen,
    ParenClose,
}

/// Classified token of a build expression.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CascadeToken {
    pub kind: TokenKind,
    pub options: OptionSet,
    pub span: Range<usize>,
}

impl CascadeToken {
    pub fn new(kind: TokenKind, span: Range<usize>) -> Self {
        Self {
            kind,
            options: OptionSet::default(),
            span,
        }
    }

    /// Operator name with its option suffix, or the component letter.
    pub fn name(&self) -> String {
        match self.kind {
            TokenKind::Operator(op) => format!("{}{}", op.name(), self.options.suffix()),
            TokenKind::Component(c) => c.to_string(),
            TokenKind::ParenOpen => "(".to_string(),
            TokenKind::ParenClose => ")".to_string(),
        }
    }

    pub fn precedence(&self) -> Option<u8> {
        match self.kind {
            TokenKind::Operator(op) => Some(op.precedence()),
            _ => None,
        }
    }
}
