//! Configuration for lexicon compilation.

use cascadia_core::Semiring;

#[derive(Clone, Debug)]
pub struct LexiconConfig {
    pub(crate) epsilon: String,
    /// Tag phones with their word position (`_b`, `_i`, `_e`, `_s`).
    pub(crate) positional: bool,
    /// Prefix of disambiguation symbols; `#` yields `#1`, `#2`, ...
    pub(crate) aux_prefix: String,
    pub(crate) failure: Option<String>,
    pub(crate) semiring: Semiring,
}

impl Default for LexiconConfig {
    fn default() -> Self {
        Self {
            epsilon: "<eps>".to_string(),
            positional: false,
            aux_prefix: "#".to_string(),
            failure: None,
            semiring: Semiring::Log,
        }
    }
}

impl LexiconConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn epsilon(mut self, value: impl Into<String>) -> Self {
        self.epsilon = value.into();
        self
    }

    pub fn positional(mut self, value: bool) -> Self {
        self.positional = value;
        self
    }

    pub fn aux_prefix(mut self, value: impl Into<String>) -> Self {
        self.aux_prefix = value.into();
        self
    }

    /// Add a `failure:failure` path so failure transitions survive composition.
    pub fn failure(mut self, value: impl Into<String>) -> Self {
        self.failure = Some(value.into());
        self
    }

    pub fn semiring(mut self, value: Semiring) -> Self {
        self.semiring = value;
        self
    }
}
