use std::collections::HashSet;

use cascadia_core::{Automaton, StateId, SymbolTable};
use tracing::debug;

use super::config::{AuxInput, ContextConfig, ContextMode};
use super::tied::{TiedTable, logical_name};
use crate::lexicon::Position;

/// Compiled context transducer. `mapper` is present when logical unit
/// names were emitted on the input side.
#[derive(Debug)]
pub struct ContextOutput {
    pub automaton: Automaton,
    pub mapper: Option<Automaton>,
}

pub struct ContextCompiler {
    config: ContextConfig,
}

impl ContextCompiler {
    pub fn new(config: ContextConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ContextConfig {
        &self.config
    }

    pub fn compile(&self, phones: &[String], aux: &[String], table: Option<&TiedTable>) -> ContextOutput {
        let mut symbols = SymbolTable::new(&self.config.epsilon);
        for phone in phones.iter().chain(aux) {
            symbols.intern(phone);
        }
        self.compile_with_symbols(phones, aux, table, symbols)
    }

    /// Compile with a given phone-side table, normally the lexicon's input
    /// table, so composition sees matching label ids.
    pub fn compile_with_symbols(
        &self,
        phones: &[String],
        aux: &[String],
        table: Option<&TiedTable>,
        symbols: SymbolTable,
    ) -> ContextOutput {
        let config = &self.config;
        let units = SymbolTable::new(&config.epsilon);
        let fst = if config.inverted {
            Automaton::with_tables(config.semiring, units, symbols)
        } else {
            Automaton::with_tables(config.semiring, symbols, units)
        };
        let mapper = config.logical_input.then(|| {
            let mut mapper = Automaton::transducer(config.semiring, &config.epsilon);
            let state = mapper.new_state();
            mapper.set_start(state);
            mapper.set_final(state, 0.0);
            mapper
        });

        let mut builder = Builder {
            config,
            table,
            aux,
            fst,
            mapper,
            silence_arcs: HashSet::new(),
            mapped: HashSet::new(),
        };
        let start = builder.fst.named_state(&config.start);
        builder.fst.set_start(start);

        match config.mode {
            ContextMode::Deterministic => builder.deterministic(phones),
            ContextMode::NonDeterministic => builder.nondeterministic(phones),
        }
        if let Some(mapper) = builder.mapper.as_mut() {
            let state = StateId::from_index(0);
            for symbol in aux {
                mapper.add_arc(state, &config.epsilon, symbol, 0.0, state);
            }
        }

        debug!(
            mode = ?config.mode,
            phones = phones.len(),
            states = builder.fst.num_states(),
            arcs = builder.fst.num_arcs(),
            "compiled context transducer"
        );

        ContextOutput {
            automaton: builder.fst,
            mapper: builder.mapper,
        }
    }
}

struct Builder<'a> {
    config: &'a ContextConfig,
    table: Option<&'a TiedTable>,
    aux: &'a [String],
    fst: Automaton,
    mapper: Option<Automaton>,
    silence_arcs: HashSet<(StateId, StateId)>,
    mapped: HashSet<(String, String)>,
}

impl Builder<'_> {
    fn deterministic(&mut self, phones: &[String]) {
        let start = self.fst.named_state(&self.config.start);
        let eps = self.config.epsilon.clone();

        for p in phones.iter().map(String::as_str) {
            let initial = self.pair(None, Some(p));
            self.arc(start, eps.clone(), p, initial, None);
            self.aux_loops(initial);

            let last = self.pair(Some(p), None);
            let unit = self.unit(None, p, None);
            self.arc(initial, unit, &eps, last, Some(p));
            self.fst.set_final(last, 0.0);
            self.aux_loops(last);

            for m in phones.iter().map(String::as_str) {
                let inner = self.pair(Some(p), Some(m));
                let unit = self.unit(None, p, Some(m));
                self.arc(initial, unit, m, inner, Some(p));

                let tail = self.pair(Some(m), None);
                let unit = self.unit(Some(p), m, None);
                self.arc(inner, unit, &eps, tail, Some(m));
                self.aux_loops(inner);

                for r in phones.iter().map(String::as_str) {
                    let next = self.pair(Some(m), Some(r));
                    let unit = self.unit(Some(p), m, Some(r));
                    self.arc(inner, unit, r, next, Some(m));
                }
            }
        }
    }

    fn nondeterministic(&mut self, phones: &[String]) {
        let start = self.fst.named_state(&self.config.start);
        let contexts: Vec<Option<&str>> = std::iter::once(None)
            .chain(phones.iter().map(|p| Some(p.as_str())))
            .collect();

        for c in phones.iter().map(String::as_str) {
            for &l in &contexts {
                let src = match l {
                    Some(l) => self.pair(Some(l), Some(c)),
                    None => start,
                };
                for &r in &contexts {
                    let dst = self.pair(Some(c), r);
                    let unit = self.unit(l, c, r);
                    self.arc(src, unit, c, dst, Some(c));
                }
            }
            let last = self.pair(Some(c), None);
            self.fst.set_final(last, 0.0);
        }

        let pairs: Vec<StateId> = self.fst.states().filter(|&s| s != start).collect();
        for state in pairs {
            self.aux_loops(state);
        }
    }

    fn pair(&mut self, left: Option<&str>, right: Option<&str>) -> StateId {
        let eps = self.config.epsilon.as_str();
        let name = format!("{},{}", left.unwrap_or(eps), right.unwrap_or(eps));
        self.fst.named_state(&name)
    }

    fn is_silence(&self, phone: &str) -> bool {
        self.split(phone).0 == self.config.silence
    }

    fn split<'p>(&self, phone: &'p str) -> (&'p str, Option<Position>) {
        if self.config.positional {
            Position::split(phone)
        } else {
            (phone, None)
        }
    }

    /// Input label for the window `(left, center, right)`. Contexts lose
    /// their position tags; the center keeps its own for lookup.
    fn unit(&mut self, left: Option<&str>, center: &str, right: Option<&str>) -> String {
        let (logical, physical) = if self.is_silence(center) {
            (self.config.silence.clone(), self.config.silence.clone())
        } else {
            let left = left.map(|l| self.split(l).0);
            let right = right.map(|r| self.split(r).0);
            let (base, position) = self.split(center);

            let logical = logical_name(left, base, right);
            let physical = match self.table {
                Some(table) => table
                    .realize(left, base, right, position)
                    .unwrap_or(self.config.epsilon.as_str())
                    .to_string(),
                None => logical.clone(),
            };
            (logical, physical)
        };

        let Some(mapper) = self.mapper.as_mut() else {
            return physical;
        };
        if self.mapped.insert((physical.clone(), logical.clone())) {
            let state = StateId::from_index(0);
            mapper.add_arc(state, &physical, &logical, 0.0, state);
        }
        logical
    }

    /// Add a unit:phone arc, swapping sides when not inverted. Silence
    /// centers are added once per state pair.
    fn arc(&mut self, src: StateId, unit: String, phone: &str, dst: StateId, center: Option<&str>) {
        if center.is_some_and(|c| self.is_silence(c)) && !self.silence_arcs.insert((src, dst)) {
            return;
        }
        if self.config.inverted {
            self.fst.add_arc(src, &unit, phone, 0.0, dst);
        } else {
            self.fst.add_arc(src, phone, &unit, 0.0, dst);
        }
    }

    fn aux_loops(&mut self, state: StateId) {
        for symbol in self.aux {
            let input = match self.config.aux_input {
                AuxInput::Passthrough => symbol.as_str(),
                AuxInput::Epsilon => self.config.epsilon.as_str(),
            };
            if self.config.inverted {
                self.fst.add_arc(state, input, symbol, 0.0, state);
            } else {
                self.fst.add_arc(state, symbol, input, 0.0, state);
            }
        }
    }
}
