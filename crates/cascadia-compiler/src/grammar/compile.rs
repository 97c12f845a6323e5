//! N-gram model to backoff acceptor.
//!
//! States are named by the history they remember: `<start>`, the unigram
//! backoff state (named after the backoff label), comma-joined word
//! histories such as `<s>,the`, and the absorbing final `</s>`.

use std::collections::HashSet;

use cascadia_core::{Automaton, SymbolTable, log10_to_cost};
use indexmap::IndexSet;
use tracing::debug;

use super::arpa::{ArpaModel, NgramEntry};
use super::config::ArpaConfig;
use crate::{Error, Result};

/// Log probabilities at or below this value mark impossible events.
pub const IMPOSSIBLE_LOGPROB: f64 = -99.0;

/// Arc-generation strategy for one n-gram entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryKind {
    /// Unigram `<s>`: contributes only its backoff arc.
    SentenceBegin,
    /// Any entry predicting `</s>`: lands on the absorbing final state.
    SentenceEnd,
    /// Ordinary unigram below the top order.
    Unigram,
    /// Entry of order `1 < k < N`.
    Interior,
    /// Entry of the top order `N`; never carries a backoff arc.
    Highest,
}

/// Arc produced by a strategy, with endpoints given as state names.
#[derive(Clone, Debug, PartialEq)]
pub struct GrammarArc {
    pub src: String,
    pub dst: String,
    pub label: String,
    pub cost: f64,
    pub backoff: bool,
}

impl EntryKind {
    pub fn classify(entry: &NgramEntry, max_order: usize, config: &ArpaConfig) -> Self {
        let order = entry.order();
        if order == max_order && max_order == 1 {
            return EntryKind::Highest;
        }
        if entry.word() == config.sentence_end {
            return EntryKind::SentenceEnd;
        }
        match order {
            1 if entry.word() == config.sentence_begin => EntryKind::SentenceBegin,
            1 => EntryKind::Unigram,
            k if k < max_order => EntryKind::Interior,
            _ => EntryKind::Highest,
        }
    }

    pub fn generate(self, entry: &NgramEntry, max_order: usize, config: &ArpaConfig) -> Vec<GrammarArc> {
        if self != EntryKind::SentenceBegin && entry.logprob <= IMPOSSIBLE_LOGPROB {
            return Vec::new();
        }

        let words = &entry.words;
        let cost = log10_to_cost(entry.logprob);
        let word = entry.word().to_string();

        match self {
            EntryKind::SentenceBegin => {
                vec![backoff_arc(word, config.backoff().to_string(), entry.backoff, config)]
            }
            EntryKind::SentenceEnd => vec![GrammarArc {
                src: history_name(entry.history(), config),
                dst: config.sentence_end.clone(),
                label: word,
                cost,
                backoff: false,
            }],
            EntryKind::Unigram => vec![
                backoff_arc(word.clone(), config.backoff().to_string(), entry.backoff, config),
                GrammarArc {
                    src: config.backoff().to_string(),
                    dst: word.clone(),
                    label: word,
                    cost,
                    backoff: false,
                },
            ],
            EntryKind::Interior => vec![
                backoff_arc(
                    words.join(","),
                    history_name(&words[1..], config),
                    entry.backoff,
                    config,
                ),
                GrammarArc {
                    src: history_name(entry.history(), config),
                    dst: words.join(","),
                    label: word,
                    cost,
                    backoff: false,
                },
            ],
            EntryKind::Highest if max_order == 1 => vec![GrammarArc {
                src: config.sentence_begin.clone(),
                dst: config.sentence_begin.clone(),
                label: word,
                cost,
                backoff: false,
            }],
            EntryKind::Highest => vec![GrammarArc {
                src: history_name(entry.history(), config),
                dst: history_name(&words[1..], config),
                label: word,
                cost,
                backoff: false,
            }],
        }
    }
}

/// Backoff arc; an absent weight defaults to zero cost.
fn backoff_arc(src: String, dst: String, weight: Option<f64>, config: &ArpaConfig) -> GrammarArc {
    GrammarArc {
        src,
        dst,
        label: config.backoff().to_string(),
        cost: log10_to_cost(weight.unwrap_or(0.0)),
        backoff: true,
    }
}

fn history_name(words: &[String], config: &ArpaConfig) -> String {
    if words.is_empty() {
        config.backoff().to_string()
    } else {
        words.join(",")
    }
}

/// Compiles an [`ArpaModel`] into a weighted acceptor.
pub struct GrammarCompiler {
    config: ArpaConfig,
}

impl GrammarCompiler {
    pub fn new(config: ArpaConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ArpaConfig {
        &self.config
    }

    /// Order actually built: the model's order, capped by `max_order`.
    pub fn effective_order(&self, model: &ArpaModel) -> usize {
        match self.config.max_order.filter(|&m| m > 0) {
            Some(cap) => cap.min(model.max_order()),
            None => model.max_order(),
        }
    }

    /// Parse ARPA text and compile it.
    pub fn compile_text(&self, text: &str) -> Result<Automaton> {
        self.compile(&ArpaModel::parse(text)?)
    }

    pub fn compile(&self, model: &ArpaModel) -> Result<Automaton> {
        self.compile_with_symbols(model, SymbolTable::new(&self.config.epsilon))
    }

    /// Compile over an existing word table so label ids agree with the
    /// lexicon's output side.
    pub fn compile_with_symbols(&self, model: &ArpaModel, words: SymbolTable) -> Result<Automaton> {
        let config = &self.config;
        let max_order = self.effective_order(model);
        if max_order == 0 {
            return Err(Error::MalformedArpa {
                line: 0,
                message: "model declares no n-gram orders".to_string(),
            });
        }

        let mut fst = Automaton::acceptor_with_symbols(config.semiring, words);
        let start = fst.named_state(&config.start);
        fst.set_start(start);
        let begin = fst.named_state(&config.sentence_begin);
        fst.add_arc(start, &config.sentence_begin, &config.sentence_begin, 0.0, begin);

        let mut histories: IndexSet<String> = IndexSet::new();
        if max_order > 1 {
            histories.insert(config.sentence_begin.clone());
        }
        let mut backed_off: HashSet<String> = HashSet::new();

        for k in 1..=max_order {
            for entry in model.order(k) {
                let kind = EntryKind::classify(entry, max_order, config);
                for arc in kind.generate(entry, max_order, config) {
                    self.add(&mut fst, &arc);
                    if arc.backoff {
                        backed_off.insert(arc.src.clone());
                    }
                    for name in [&arc.src, &arc.dst] {
                        if self.is_history(name) {
                            histories.insert(name.clone());
                        }
                    }
                }
            }
        }

        if max_order == 1 {
            fst.set_final(begin, 0.0);
        } else {
            let filled = self.complete_backoff_nodes(&mut fst, histories, &backed_off);
            let end = fst.named_state(&config.sentence_end);
            fst.set_final(end, 0.0);
            debug!(filled, "added default backoff arcs");
        }
        if config.normalize {
            let rescaled = fst.normalize();
            debug!(rescaled, "normalized state weights");
        }

        debug!(
            order = max_order,
            states = fst.num_states(),
            arcs = fst.num_arcs(),
            "compiled n-gram acceptor"
        );
        Ok(fst)
    }

    fn add(&self, fst: &mut Automaton, arc: &GrammarArc) {
        let src = fst.named_state(&arc.src);
        let dst = fst.named_state(&arc.dst);
        fst.add_arc(src, &arc.label, &arc.label, arc.cost, dst);
    }

    fn is_history(&self, name: &str) -> bool {
        let config = &self.config;
        name != config.start && name != config.sentence_end && name != config.backoff()
    }

    /// Give every history state without a backoff arc a zero-cost one to
    /// its suffix, adding suffix states as they appear.
    fn complete_backoff_nodes(
        &self,
        fst: &mut Automaton,
        mut histories: IndexSet<String>,
        backed_off: &HashSet<String>,
    ) -> usize {
        let mut filled = 0;
        let mut index = 0;

        while let Some(name) = histories.get_index(index).cloned() {
            index += 1;
            if backed_off.contains(&name) {
                continue;
            }

            let suffix = match name.split_once(',') {
                Some((_, rest)) => rest.to_string(),
                None => self.config.backoff().to_string(),
            };
            let arc = GrammarArc {
                src: name,
                dst: suffix.clone(),
                label: self.config.backoff().to_string(),
                cost: 0.0,
                backoff: true,
            };
            self.add(fst, &arc);
            filled += 1;

            if self.is_history(&suffix) {
                histories.insert(suffix);
            }
        }

        filled
    }
}
