//! Silence-class transducer (component `T`).
//!
//! Lets an optional silence token follow every word. After each word the
//! machine either emits the silence token, with probability `p`, or
//! returns to the word loop.

use cascadia_core::{Automaton, Semiring, SymbolTable};
use tracing::{debug, warn};

#[derive(Clone, Debug)]
pub struct SilenceConfig {
    pub(crate) silence: String,
    pub(crate) epsilon: String,
    pub(crate) probability: f64,
    pub(crate) failure: Option<String>,
    pub(crate) semiring: Semiring,
}

impl Default for SilenceConfig {
    fn default() -> Self {
        Self {
            silence: "<sil>".to_string(),
            epsilon: "<eps>".to_string(),
            probability: 0.117,
            failure: None,
            semiring: Semiring::Log,
        }
    }
}

impl SilenceConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn silence(mut self, value: impl Into<String>) -> Self {
        self.silence = value.into();
        self
    }

    pub fn epsilon(mut self, value: impl Into<String>) -> Self {
        self.epsilon = value.into();
        self
    }

    /// Probability of a silence after a word.
    pub fn probability(mut self, value: f64) -> Self {
        self.probability = value;
        self
    }

    pub fn failure(mut self, value: impl Into<String>) -> Self {
        self.failure = Some(value.into());
        self
    }

    pub fn semiring(mut self, value: Semiring) -> Self {
        self.semiring = value;
        self
    }
}

pub struct SilenceCompiler {
    config: SilenceConfig,
}

impl SilenceCompiler {
    pub fn new(config: SilenceConfig) -> Self {
        Self { config }
    }

    /// Build over the word table; input ids match `words`, the output table
    /// additionally carries the silence token.
    pub fn compile(&self, words: &SymbolTable) -> Automaton {
        let config = &self.config;
        let p = config.probability;
        if !(p > 0.0 && p < 1.0) {
            warn!(probability = p, "silence probability outside (0, 1)");
        }
        let silence_cost = -p.ln();
        let skip_cost = -(1.0 - p).ln();

        let mut outputs = words.clone();
        outputs.intern(&config.silence);
        let mut fst = Automaton::with_tables(config.semiring, words.clone(), outputs);
        let root = fst.new_state();
        fst.set_start(root);

        let eps = words.epsilon().to_string();
        for (label, word) in words.iter() {
            if label.is_epsilon() || word == config.silence || config.failure.as_deref() == Some(word) {
                continue;
            }
            let state = fst.new_state();
            fst.add_arc(root, word, word, 0.0, state);
            fst.add_arc(state, &eps, &config.silence, silence_cost, state);
            fst.add_arc(state, &eps, &eps, skip_cost, root);
        }

        if let Some(failure) = &config.failure {
            fst.add_arc(root, failure, failure, 0.0, root);
        }
        fst.set_final(root, 0.0);

        debug!(words = fst.num_states() - 1, probability = p, "compiled silence class");
        fst
    }
}
