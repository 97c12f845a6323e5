//! Reader for ARPA-format back-off n-gram models.
//!
//! ```text
//! \data\
//! ngram 1=3
//! ngram 2=2
//!
//! \1-grams:
//! -1.0  </s>
//! -99   <s>    -0.30
//! -0.5  hello  -0.25
//!
//! \2-grams:
//! -0.2  <s> hello
//! -0.1  hello </s>
//!
//! \end\
//! ```
//!
//! Sections must appear in ascending order; an out-of-order section would
//! otherwise silently miscompile, so it is rejected.

use tracing::warn;

use crate::{Error, Result};

/// One n-gram: base-10 log probability, the words, and an optional
/// base-10 backoff weight.
#[derive(Clone, Debug, PartialEq)]
pub struct NgramEntry {
    pub logprob: f64,
    pub words: Vec<String>,
    pub backoff: Option<f64>,
}

impl NgramEntry {
    pub fn order(&self) -> usize {
        self.words.len()
    }

    /// The predicted word.
    pub fn word(&self) -> &str {
        self.words.last().map(String::as_str).unwrap_or_default()
    }

    /// Everything before the predicted word.
    pub fn history(&self) -> &[String] {
        &self.words[..self.words.len().saturating_sub(1)]
    }
}

/// Parsed model: declared counts and entries, grouped by order.
#[derive(Clone, Debug, Default)]
pub struct ArpaModel {
    declared: Vec<usize>,
    orders: Vec<Vec<NgramEntry>>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Section {
    Preamble,
    Data,
    Ngrams(usize),
    End,
}

impl ArpaModel {
    pub fn parse(text: &str) -> Result<Self> {
        let mut model = ArpaModel::default();
        let mut section = Section::Preamble;
        let mut line_no = 0;

        for (index, raw) in text.lines().enumerate() {
            line_no = index + 1;
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }

            match section {
                Section::End => break,
                Section::Preamble => {
                    if line == "\\data\\" {
                        section = Section::Data;
                    } else if line.starts_with('\\') {
                        return Err(malformed(line_no, format!("`{line}` before \\data\\ header")));
                    }
                }
                Section::Data | Section::Ngrams(_) => {
                    if line == "\\end\\" {
                        section = Section::End;
                    } else if line.starts_with('\\') {
                        let order = model.open_section(line, section, line_no)?;
                        section = Section::Ngrams(order);
                    } else if let Section::Ngrams(order) = section {
                        let entry = parse_entry(line, order, line_no)?;
                        model.orders[order - 1].push(entry);
                    } else {
                        model.declare(line, line_no)?;
                    }
                }
            }
        }

        match section {
            Section::Preamble => Err(malformed(line_no, "missing \\data\\ header")),
            Section::End => {
                model.check_counts();
                Ok(model)
            }
            _ => Err(malformed(line_no, "missing \\end\\ marker")),
        }
    }

    /// Highest order declared in the header.
    pub fn max_order(&self) -> usize {
        self.declared.len()
    }

    /// Entries of order `k` (1-based).
    pub fn order(&self, k: usize) -> &[NgramEntry] {
        k.checked_sub(1)
            .and_then(|i| self.orders.get(i))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Entry count the header declared for order `k`.
    pub fn declared_count(&self, k: usize) -> Option<usize> {
        k.checked_sub(1).and_then(|i| self.declared.get(i)).copied()
    }

    /// Unigram words in file order.
    pub fn unigrams(&self) -> impl Iterator<Item = &str> {
        self.order(1).iter().map(NgramEntry::word)
    }

    fn declare(&mut self, line: &str, line_no: usize) -> Result<()> {
        let declaration = line
            .strip_prefix("ngram")
            .and_then(|rest| rest.trim().split_once('='))
            .ok_or_else(|| malformed(line_no, format!("expected `ngram k=count`, found `{line}`")))?;

        let (order, count) = declaration;
        let order: usize = order
            .trim()
            .parse()
            .map_err(|_| malformed(line_no, format!("invalid n-gram order `{}`", order.trim())))?;
        let count: usize = count
            .trim()
            .parse()
            .map_err(|_| malformed(line_no, format!("invalid n-gram count `{}`", count.trim())))?;

        if order != self.declared.len() + 1 {
            return Err(malformed(
                line_no,
                format!(
                    "order {order} declared out of sequence, expected {}",
                    self.declared.len() + 1
                ),
            ));
        }

        self.declared.push(count);
        self.orders.push(Vec::new());
        Ok(())
    }

    fn open_section(&self, line: &str, current: Section, line_no: usize) -> Result<usize> {
        let order = line
            .strip_prefix('\\')
            .and_then(|rest| rest.strip_suffix("-grams:"))
            .and_then(|n| n.parse::<usize>().ok())
            .ok_or_else(|| malformed(line_no, format!("unrecognized section `{line}`")))?;

        if order == 0 || order > self.declared.len() {
            return Err(malformed(line_no, format!("section for undeclared order {order}")));
        }

        let expected = match current {
            Section::Ngrams(previous) => previous + 1,
            _ => 1,
        };
        if order != expected {
            return Err(malformed(
                line_no,
                format!("{order}-gram section out of order, expected {expected}-grams"),
            ));
        }

        Ok(order)
    }

    fn check_counts(&self) {
        for (i, (declared, entries)) in self.declared.iter().zip(&self.orders).enumerate() {
            if *declared != entries.len() {
                warn!(
                    order = i + 1,
                    declared,
                    found = entries.len(),
                    "n-gram count differs from header"
                );
            }
        }
    }
}

fn parse_entry(line: &str, order: usize, line_no: usize) -> Result<NgramEntry> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != order + 1 && fields.len() != order + 2 {
        return Err(malformed(
            line_no,
            format!(
                "{order}-gram entry has {} fields, expected {} or {}",
                fields.len(),
                order + 1,
                order + 2
            ),
        ));
    }

    let logprob = parse_number(fields[0], line_no)?;
    let words = fields[1..=order].iter().map(|w| w.to_string()).collect();
    let backoff = fields
        .get(order + 1)
        .map(|b| parse_number(b, line_no))
        .transpose()?;

    Ok(NgramEntry {
        logprob,
        words,
        backoff,
    })
}

fn parse_number(field: &str, line_no: usize) -> Result<f64> {
    field
        .parse()
        .map_err(|_| malformed(line_no, format!("invalid number `{field}`")))
}

fn malformed(line: usize, message: impl Into<String>) -> Error {
    Error::MalformedArpa {
        line,
        message: message.into(),
    }
}
