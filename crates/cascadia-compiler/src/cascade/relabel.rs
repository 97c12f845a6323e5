//! Completion of lookahead relabel pairs.
//!
//! `fstconvert --save_relabel_opairs` only pairs labels that occur on arcs of
//! the converted automaton. Labels present in the symbol table but absent
//! from the automaton get no new id, and relabeling the right operand with
//! such a partial map silently corrupts the composition.

use std::collections::BTreeSet;
use std::fmt::Write as _;

use tracing::warn;

use crate::{Error, Result};

/// Extend `pairs` into a bijection over `1..=max`, where `max` is the
/// largest id mentioned. Original labels without a pair are matched in
/// ascending order with the new ids nobody claimed.
pub fn complete_relabeling(pairs: &[(u32, u32)]) -> Vec<(u32, u32)> {
    let max = pairs.iter().map(|&(old, new)| old.max(new)).max().unwrap_or(0);
    let olds: BTreeSet<u32> = pairs.iter().map(|&(old, _)| old).collect();
    let news: BTreeSet<u32> = pairs.iter().map(|&(_, new)| new).collect();

    let missing: Vec<u32> = (1..=max).filter(|id| !olds.contains(id)).collect();
    let unused: Vec<u32> = (1..=max).filter(|id| !news.contains(id)).collect();
    if missing.len() != unused.len() {
        warn!(
            missing = missing.len(),
            unused = unused.len(),
            "relabel pairs still leave labels unmapped"
        );
    }

    let mut out = pairs.to_vec();
    out.extend(missing.into_iter().zip(unused));
    out
}

/// Parse `old new` pairs, one per line.
pub fn parse_pairs(text: &str) -> Result<Vec<(u32, u32)>> {
    let mut pairs = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let line_no = index + 1;
        let fields: Vec<&str> = line.split_whitespace().collect();
        match fields.as_slice() {
            [] => continue,
            [old, new] => {
                let parse = |field: &str| {
                    field.parse::<u32>().map_err(|_| Error::MalformedRelabelPairs {
                        line: line_no,
                        message: format!("`{field}` is not a label id"),
                    })
                };
                pairs.push((parse(old)?, parse(new)?));
            }
            _ => {
                return Err(Error::MalformedRelabelPairs {
                    line: line_no,
                    message: format!("expected 2 fields, found {}", fields.len()),
                });
            }
        }
    }
    Ok(pairs)
}

pub fn format_pairs(pairs: &[(u32, u32)]) -> String {
    let mut out = String::new();
    for (old, new) in pairs {
        writeln!(out, "{old}\t{new}").expect("String write never fails");
    }
    out
}
