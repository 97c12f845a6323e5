//! Unit topologies read from a Sphinx-III model definition or an HTK
//! hmm list.

use crate::context::read_mdef;
use crate::{Error, Result};

/// One physical unit and its three emitting states.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HmmUnit {
    pub name: String,
    pub states: [String; 3],
}

impl HmmUnit {
    pub fn new(name: impl Into<String>, states: [&str; 3]) -> Self {
        Self {
            name: name.into(),
            states: states.map(str::to_string),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HmmModel {
    units: Vec<HmmUnit>,
    /// Emission labels in table order.
    emissions: Vec<String>,
}

impl HmmModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a unit; its states join the emission inventory in first-seen order.
    pub fn push(&mut self, unit: HmmUnit) {
        for state in &unit.states {
            if !self.emissions.contains(state) {
                self.emissions.push(state.clone());
            }
        }
        self.units.push(unit);
    }

    pub fn units(&self) -> &[HmmUnit] {
        &self.units
    }

    pub fn emissions(&self) -> &[String] {
        &self.emissions
    }

    /// Parse a Sphinx-III model definition.
    ///
    /// Tied state ids are shifted by one so that id 0 stays free for
    /// epsilon, and the emission inventory is sorted numerically.
    pub fn parse_mdef(text: &str) -> Result<Self> {
        let mdef = read_mdef(text).map_err(|err| match err {
            Error::MalformedTiedTable { line, message } => Error::MalformedHmm { line, message },
            other => other,
        })?;

        let mut units = Vec::with_capacity(mdef.rows.len());
        let mut ids = Vec::new();
        for row in &mdef.rows {
            // attrib tmat st1 .. stN N
            let states = match row.rest.as_slice() {
                [_, _, states @ .., last] if last == "N" => states,
                [_, _, states @ ..] => states,
                _ => &[],
            };
            let [s1, s2, s3] = states else {
                return Err(Error::MalformedHmm {
                    line: row.line,
                    message: format!("expected 3 emitting states, found {}", states.len()),
                });
            };

            let mut shifted = [0u32; 3];
            for (slot, state) in shifted.iter_mut().zip([s1, s2, s3]) {
                let id: u32 = state.parse().map_err(|_| Error::MalformedHmm {
                    line: row.line,
                    message: format!("`{state}` is not a state id"),
                })?;
                *slot = id + 1;
            }
            ids.extend(shifted);
            units.push(HmmUnit {
                name: row.key.physical_name(),
                states: shifted.map(|id| id.to_string()),
            });
        }

        ids.sort_unstable();
        ids.dedup();
        Ok(Self {
            units,
            emissions: ids.iter().map(u32::to_string).collect(),
        })
    }

    /// Parse an HTK hmm list: `unit model s1 s2 s3` per line.
    pub fn parse_list(text: &str) -> Result<Self> {
        let mut model = Self::new();
        for (index, line) in text.lines().enumerate() {
            let fields: Vec<&str> = line.split_whitespace().collect();
            match fields.as_slice() {
                [] => {}
                [name, _, s1, s2, s3] => model.push(HmmUnit::new(*name, [*s1, *s2, *s3])),
                _ => {
                    return Err(Error::MalformedHmm {
                        line: index + 1,
                        message: format!("expected `unit model s1 s2 s3`, found {} fields", fields.len()),
                    });
                }
            }
        }
        Ok(model)
    }
}
