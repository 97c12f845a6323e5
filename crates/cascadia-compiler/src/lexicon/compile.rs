//! Pronunciation dictionary to phone/word transducer.
//!
//! Every pronunciation becomes a linear chain out of the shared start
//! state. The word is emitted on the first arc; the remaining arcs emit
//! epsilon. Repeated phone strings end on a disambiguation arc so the
//! transducer stays determinizable once closed into a loop.

use std::collections::HashMap;

use cascadia_core::{Automaton, SymbolTable};
use indexmap::IndexSet;
use tracing::debug;

use super::config::LexiconConfig;
use super::position::Position;
use crate::{Error, Result};

/// One dictionary entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pronunciation {
    pub word: String,
    pub phones: Vec<String>,
}

impl Pronunciation {
    pub fn new(word: impl Into<String>, phones: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            word: word.into(),
            phones: phones.into_iter().map(Into::into).collect(),
        }
    }
}

/// Parse `WORD PH1 PH2 ...` lines. Alternative markers such as `WORD(2)`
/// are stripped from the word.
pub fn parse_lexicon(text: &str) -> Result<Vec<Pronunciation>> {
    let mut entries = Vec::new();

    for (index, line) in text.lines().enumerate() {
        let mut fields = line.split_whitespace();
        let Some(word) = fields.next() else {
            continue;
        };
        let phones: Vec<String> = fields.map(str::to_string).collect();
        if phones.is_empty() {
            return Err(Error::MalformedLexicon {
                line: index + 1,
                message: format!("word `{word}` has no phones"),
            });
        }
        entries.push(Pronunciation {
            word: strip_alternative(word),
            phones,
        });
    }

    Ok(entries)
}

/// Remove every `(digits)` group from a word.
fn strip_alternative(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut rest = word;

    while let Some(open) = rest.find('(') {
        let tail = &rest[open + 1..];
        match tail.find(')') {
            Some(close) if close > 0 && tail[..close].bytes().all(|b| b.is_ascii_digit()) => {
                out.push_str(&rest[..open]);
                rest = &tail[close + 1..];
            }
            _ => {
                out.push_str(&rest[..=open]);
                rest = tail;
            }
        }
    }
    out.push_str(rest);

    if out.is_empty() { word.to_string() } else { out }
}

/// Compiled lexicon with the inventories the context compiler consumes.
#[derive(Debug)]
pub struct LexiconOutput {
    pub automaton: Automaton,
    /// Phone labels used on arcs, in first-seen order.
    pub phones: Vec<String>,
    /// Disambiguation symbols (and the failure symbol), in first-seen order.
    pub aux: Vec<String>,
}

pub struct LexiconCompiler {
    config: LexiconConfig,
}

impl LexiconCompiler {
    pub fn new(config: LexiconConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LexiconConfig {
        &self.config
    }

    pub fn compile_text(&self, text: &str) -> Result<LexiconOutput> {
        self.compile(&parse_lexicon(text)?)
    }

    pub fn compile(&self, entries: &[Pronunciation]) -> Result<LexiconOutput> {
        let mut words = SymbolTable::new(&self.config.epsilon);
        for entry in entries {
            words.intern(&entry.word);
        }
        if let Some(failure) = &self.config.failure {
            words.intern(failure);
        }
        self.compile_with_words(entries, words)
    }

    /// Compile over an existing word table so output ids agree with the
    /// grammar acceptor.
    pub fn compile_with_words(&self, entries: &[Pronunciation], words: SymbolTable) -> Result<LexiconOutput> {
        let config = &self.config;
        let eps = config.epsilon.as_str();

        let mut fst = Automaton::with_tables(config.semiring, SymbolTable::new(eps), words);
        let start = fst.new_state();
        fst.set_start(start);

        let mut phones: IndexSet<String> = IndexSet::new();
        let mut aux: IndexSet<String> = IndexSet::new();
        let mut seen: HashMap<Vec<String>, usize> = HashMap::new();

        if let Some(failure) = &config.failure {
            aux.insert(failure.clone());
            fst.input_symbols_mut().intern(failure);
            let last = fst.new_state();
            fst.add_arc(start, failure, failure, 0.0, last);
            fst.set_final(last, 0.0);
        }

        for entry in entries {
            if entry.phones.is_empty() {
                return Err(Error::MalformedLexicon {
                    line: 0,
                    message: format!("word `{}` has no phones", entry.word),
                });
            }

            let labels = self.realize(&entry.phones);
            if config.positional {
                for base in &entry.phones {
                    self.register_positional(&mut fst, base);
                }
            }

            let mut state = start;
            for (index, phone) in labels.iter().enumerate() {
                phones.insert(phone.clone());
                let next = fst.new_state();
                let out = if index == 0 { entry.word.as_str() } else { eps };
                fst.add_arc(state, phone, out, 0.0, next);
                state = next;
            }

            let count = seen.entry(entry.phones.clone()).or_insert(0);
            if *count > 0 {
                let symbol = format!("{}{}", config.aux_prefix, count);
                let next = fst.new_state();
                fst.add_arc(state, &symbol, eps, 0.0, next);
                aux.insert(symbol);
                state = next;
            }
            *count += 1;

            fst.set_final(state, 0.0);
        }

        debug!(
            entries = entries.len(),
            phones = phones.len(),
            aux = aux.len(),
            states = fst.num_states(),
            "compiled lexicon"
        );

        Ok(LexiconOutput {
            automaton: fst,
            phones: phones.into_iter().collect(),
            aux: aux.into_iter().collect(),
        })
    }

    fn realize(&self, phones: &[String]) -> Vec<String> {
        if !self.config.positional {
            return phones.to_vec();
        }
        let len = phones.len();
        phones
            .iter()
            .enumerate()
            .map(|(index, phone)| Position::of(index, len).apply(phone))
            .collect()
    }

    fn register_positional(&self, fst: &mut Automaton, base: &str) {
        let table = fst.input_symbols_mut();
        table.intern(base);
        for position in Position::ALL {
            table.intern_owned(position.apply(base));
        }
    }
}
