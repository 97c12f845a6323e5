//! Logical-to-physical unit tables.
//!
//! Two formats are understood. An HTK tiedlist maps logical names
//! (`l-c+r`, `l-c`, `c+r`, `c`) to physical models and falls back from
//! the full triphone to the bare center. A Sphinx-III model definition
//! keys rows by `(left, center, right, position)` and falls back through
//! the other word positions before trying the context-independent unit.

use indexmap::IndexMap;
use tracing::warn;

use crate::lexicon::Position;
use crate::{Error, Result};

const MDEF_VERSION: &str = "0.3";

/// Row key of a structured table. `None` contexts and position stand for
/// the `-` wildcard of a context-independent row.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct UnitKey {
    pub left: Option<String>,
    pub center: String,
    pub right: Option<String>,
    pub position: Option<Position>,
}

impl UnitKey {
    /// Context-independent unit `(-, center, -, -)`.
    pub fn monophone(center: impl Into<String>) -> Self {
        Self {
            left: None,
            center: center.into(),
            right: None,
            position: None,
        }
    }

    pub fn triphone(
        left: impl Into<String>,
        center: impl Into<String>,
        right: impl Into<String>,
        position: Option<Position>,
    ) -> Self {
        Self {
            left: Some(left.into()),
            center: center.into(),
            right: Some(right.into()),
            position,
        }
    }

    fn lookup(left: Option<&str>, center: &str, right: Option<&str>, position: Option<Position>) -> Self {
        Self {
            left: left.map(str::to_string),
            center: center.to_string(),
            right: right.map(str::to_string),
            position,
        }
    }

    /// Sphinx physical name: `l-c_p+r` for triphones, the center otherwise.
    pub(crate) fn physical_name(&self) -> String {
        match (&self.left, &self.right) {
            (Some(left), Some(right)) => match self.position {
                Some(position) => format!("{left}-{}_{}+{right}", self.center, position.tag()),
                None => format!("{left}-{}+{right}", self.center),
            },
            _ => self.center.clone(),
        }
    }
}

/// HTK logical name. Missing contexts are left out: `l-c+r`, `l-c`,
/// `c+r` or `c`.
pub fn logical_name(left: Option<&str>, center: &str, right: Option<&str>) -> String {
    match (left, right) {
        (Some(l), Some(r)) => format!("{l}-{center}+{r}"),
        (Some(l), None) => format!("{l}-{center}"),
        (None, Some(r)) => format!("{center}+{r}"),
        (None, None) => center.to_string(),
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TiedTable {
    /// HTK tiedlist: logical name to physical model.
    Flat(IndexMap<String, String>),
    /// Sphinx-style rows keyed by context and position.
    Structured(IndexMap<UnitKey, String>),
}

impl TiedTable {
    pub fn flat() -> Self {
        TiedTable::Flat(IndexMap::new())
    }

    pub fn structured() -> Self {
        TiedTable::Structured(IndexMap::new())
    }

    pub fn len(&self) -> usize {
        match self {
            TiedTable::Flat(map) => map.len(),
            TiedTable::Structured(map) => map.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Register a unit. Flat tables drop the position and key by logical name.
    pub fn insert(&mut self, key: UnitKey, physical: impl Into<String>) {
        match self {
            TiedTable::Flat(map) => {
                let name = logical_name(key.left.as_deref(), &key.center, key.right.as_deref());
                map.insert(name, physical.into());
            }
            TiedTable::Structured(map) => {
                map.insert(key, physical.into());
            }
        }
    }

    /// Parse an HTK tiedlist: one `unit` or `logical physical` per line.
    pub fn parse_flat(text: &str) -> Result<Self> {
        let mut map = IndexMap::new();

        for (index, line) in text.lines().enumerate() {
            let fields: Vec<&str> = line.split_whitespace().collect();
            match fields.as_slice() {
                [] => {}
                [unit] => {
                    map.insert(unit.to_string(), unit.to_string());
                }
                [logical, physical] => {
                    map.insert(logical.to_string(), physical.to_string());
                }
                _ => {
                    return Err(Error::MalformedTiedTable {
                        line: index + 1,
                        message: format!("expected `logical [physical]`, found {} fields", fields.len()),
                    });
                }
            }
        }

        Ok(TiedTable::Flat(map))
    }

    /// Parse a Sphinx-III model definition (version 0.3).
    pub fn parse_mdef(text: &str) -> Result<Self> {
        let mdef = read_mdef(text)?;

        let mut map = IndexMap::new();
        for row in mdef.rows {
            let physical = row.key.physical_name();
            map.insert(row.key, physical);
        }

        let expected = ["n_base", "n_tri"]
            .iter()
            .filter_map(|key| mdef.declared.get(*key))
            .sum::<usize>();
        if mdef.declared.contains_key("n_base") && expected != map.len() {
            warn!(declared = expected, found = map.len(), "model definition unit count mismatch");
        }

        Ok(TiedTable::Structured(map))
    }

    /// Physical unit realizing `(left, center, right, position)`, or `None`
    /// when nothing in the table fits.
    pub fn realize(
        &self,
        left: Option<&str>,
        center: &str,
        right: Option<&str>,
        position: Option<Position>,
    ) -> Option<&str> {
        match self {
            TiedTable::Flat(map) => {
                let mut candidates = vec![logical_name(left, center, right)];
                if left.is_some() && right.is_some() {
                    candidates.push(logical_name(left, center, None));
                    candidates.push(logical_name(None, center, right));
                }
                if left.is_some() || right.is_some() {
                    candidates.push(center.to_string());
                }
                candidates.iter().find_map(|name| map.get(name)).map(String::as_str)
            }
            TiedTable::Structured(map) => {
                let order: Vec<Position> = match position {
                    Some(p) => std::iter::once(p).chain(p.others()).collect(),
                    None => Position::ALL.to_vec(),
                };
                order
                    .into_iter()
                    .map(|p| UnitKey::lookup(left, center, right, Some(p)))
                    .chain([
                        UnitKey::lookup(left, center, right, None),
                        UnitKey::monophone(center),
                    ])
                    .find_map(|key| map.get(&key))
                    .map(String::as_str)
            }
        }
    }
}

/// Model definition split into its header counts and unit rows.
pub(crate) struct Mdef {
    pub declared: IndexMap<String, usize>,
    pub rows: Vec<MdefRow>,
}

/// One unit row: `base lft rt p attrib tmat st1 .. stN N`.
pub(crate) struct MdefRow {
    pub line: usize,
    pub key: UnitKey,
    /// Fields after the position column.
    pub rest: Vec<String>,
}

pub(crate) fn read_mdef(text: &str) -> Result<Mdef> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    let version = lines.by_ref().find(|(_, line)| !line.starts_with('#'));
    match version {
        Some((_, MDEF_VERSION)) => {}
        Some((line, found)) => {
            return Err(malformed(
                line,
                format!("model definition version `{found}`, expected {MDEF_VERSION}"),
            ));
        }
        None => return Err(malformed(0, "empty model definition")),
    }

    let mut declared = IndexMap::new();
    for (line, content) in lines.by_ref() {
        if content.starts_with('#') {
            break;
        }
        let (value, key) = content
            .split_once(char::is_whitespace)
            .ok_or_else(|| malformed(line, "expected `count key`"))?;
        let value = value
            .parse()
            .map_err(|_| malformed(line, format!("invalid count `{value}`")))?;
        declared.insert(key.trim().to_string(), value);
    }

    let mut rows = Vec::new();
    for (line, content) in lines {
        if content.starts_with('#') {
            continue;
        }
        let fields: Vec<&str> = content.split_whitespace().collect();
        let [base, left, right, position, rest @ ..] = fields.as_slice() else {
            return Err(malformed(
                line,
                format!("expected `base lft rt p ...`, found {} fields", fields.len()),
            ));
        };

        let key = if *left == "-" {
            UnitKey::monophone(*base)
        } else {
            let position = match *position {
                "-" => None,
                tag => Some(
                    parse_position(tag).ok_or_else(|| malformed(line, format!("invalid position `{tag}`")))?,
                ),
            };
            UnitKey::triphone(*left, *base, *right, position)
        };
        rows.push(MdefRow {
            line,
            key,
            rest: rest.iter().map(|f| f.to_string()).collect(),
        });
    }

    Ok(Mdef { declared, rows })
}

fn parse_position(tag: &str) -> Option<Position> {
    let mut chars = tag.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Position::from_tag(c),
        _ => None,
    }
}

fn malformed(line: usize, message: impl Into<String>) -> Error {
    Error::MalformedTiedTable {
        line,
        message: message.into(),
    }
}
