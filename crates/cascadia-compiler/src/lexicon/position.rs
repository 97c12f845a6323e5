//! Word-position tags for positional monophones.

/// Position of a phone within its word.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Position {
    Begin,
    Interior,
    End,
    /// Single-phone word.
    Single,
}

impl Position {
    /// Rotation order used when a tied table lacks the requested position.
    pub const ALL: [Position; 4] = [
        Position::Begin,
        Position::Interior,
        Position::End,
        Position::Single,
    ];

    pub fn tag(self) -> char {
        match self {
            Position::Begin => 'b',
            Position::Interior => 'i',
            Position::End => 'e',
            Position::Single => 's',
        }
    }

    pub fn from_tag(tag: char) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.tag() == tag)
    }

    /// Position of phone `index` in a word of `len` phones.
    pub fn of(index: usize, len: usize) -> Self {
        match (index, len) {
            (_, 1) => Position::Single,
            (0, _) => Position::Begin,
            (i, n) if i + 1 == n => Position::End,
            _ => Position::Interior,
        }
    }

    /// The other three positions, continuing the rotation after `self`.
    pub fn others(self) -> [Position; 3] {
        let at = Self::ALL.iter().position(|&p| p == self).unwrap_or_default();
        [1, 2, 3].map(|step| Self::ALL[(at + step) % 4])
    }

    /// `phone_tag`, e.g. `AA_b`.
    pub fn apply(self, phone: &str) -> String {
        format!("{phone}_{}", self.tag())
    }

    /// Split a positional phone into base and position. Untagged phones
    /// come back whole.
    pub fn split(phone: &str) -> (&str, Option<Position>) {
        if let Some((base, tag)) = phone.rsplit_once('_') {
            let mut chars = tag.chars();
            if let (Some(c), None) = (chars.next(), chars.next())
                && let Some(position) = Position::from_tag(c)
                && !base.is_empty()
            {
                return (base, Some(position));
            }
        }
        (phone, None)
    }
}
