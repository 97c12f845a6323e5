use std::collections::HashMap;

use cascadia_core::{Automaton, SymbolTable};
use tracing::debug;

use super::{HmmConfig, HmmModel};
use crate::context::AuxInput;

/// Result of compiling H.
#[derive(Debug)]
pub struct HmmOutput {
    pub automaton: Automaton,
    /// One-state transducer from bare emission ids to the input side of H,
    /// inserting the auxiliary and disambiguation symbols as epsilons.
    pub mapper: Automaton,
    /// HMM-level disambiguation symbols, first-seen order.
    pub disambiguation: Vec<String>,
}

pub struct HmmCompiler {
    config: HmmConfig,
}

impl HmmCompiler {
    pub fn new(config: HmmConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &HmmConfig {
        &self.config
    }

    pub fn compile(&self, model: &HmmModel, aux: &[String]) -> HmmOutput {
        self.build(model, aux, None)
    }

    /// Compile over the unit table of the transducer H feeds, normally the
    /// input table of C. Units missing from it are skipped and output ids
    /// agree with it.
    pub fn compile_with_units(&self, model: &HmmModel, aux: &[String], units: SymbolTable) -> HmmOutput {
        self.build(model, aux, Some(units))
    }

    fn build(&self, model: &HmmModel, aux: &[String], units: Option<SymbolTable>) -> HmmOutput {
        let config = &self.config;
        let eps = config.epsilon.as_str();

        let mut emissions = SymbolTable::new(eps);
        for emission in model.emissions() {
            emissions.intern(emission);
        }
        let restricted = units.is_some();
        let outputs = units.unwrap_or_else(|| SymbolTable::new(eps));
        let mut fst = Automaton::with_tables(config.semiring, emissions.clone(), outputs);

        let root = fst.new_state();
        fst.set_start(root);
        for symbol in aux {
            let input = match config.aux_input {
                AuxInput::Passthrough => symbol.as_str(),
                AuxInput::Epsilon => eps,
            };
            fst.add_arc(root, input, symbol, 0.0, root);
        }

        let mut sequences: HashMap<&[String; 3], usize> = HashMap::new();
        let mut disambiguation: Vec<String> = Vec::new();
        let mut skipped = 0usize;
        for unit in model.units() {
            if restricted && fst.output_symbols().find(&unit.name).is_none() {
                skipped += 1;
                continue;
            }

            let [s1, s2, s3] = &unit.states;
            let first = fst.new_state();
            let second = fst.new_state();
            let third = fst.new_state();
            let exit = fst.new_state();
            fst.add_arc(root, s1, &unit.name, 0.0, first);
            fst.add_arc(first, s1, eps, 0.0, first);
            fst.add_arc(first, s2, eps, 0.0, second);
            fst.add_arc(second, s2, eps, 0.0, second);
            fst.add_arc(second, s3, eps, 0.0, third);
            fst.add_arc(third, s3, eps, 0.0, third);

            let count = sequences.entry(&unit.states).or_default();
            let symbol = format!("{}{count}", config.disambiguation_prefix);
            *count += 1;
            fst.add_arc(third, &symbol, eps, 0.0, exit);
            fst.add_arc(exit, eps, eps, 0.0, root);
            if !disambiguation.contains(&symbol) {
                disambiguation.push(symbol);
            }
        }
        fst.set_final(root, 0.0);

        let mut mapper = Automaton::with_tables(config.semiring, emissions, fst.input_symbols().clone());
        let state = mapper.new_state();
        mapper.set_start(state);
        for emission in model.emissions() {
            mapper.add_arc(state, emission, emission, 0.0, state);
        }
        for symbol in aux.iter().chain(&disambiguation) {
            mapper.add_arc(state, eps, symbol, 0.0, state);
        }
        mapper.set_final(state, 0.0);

        debug!(
            units = model.units().len() - skipped,
            skipped,
            emissions = model.emissions().len(),
            disambiguation = disambiguation.len(),
            "compiled hmm transducer"
        );

        HmmOutput {
            automaton: fst,
            mapper,
            disambiguation,
        }
    }
}
