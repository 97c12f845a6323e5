use cascadia_core::Semiring;

use crate::context::AuxInput;

#[derive(Clone, Debug)]
pub struct HmmConfig {
    pub(crate) epsilon: String,
    /// Input label of the auxiliary self-loops on the start state.
    pub(crate) aux_input: AuxInput,
    /// Prefix of the HMM-level disambiguation symbols.
    pub(crate) disambiguation_prefix: String,
    pub(crate) semiring: Semiring,
}

impl Default for HmmConfig {
    fn default() -> Self {
        Self {
            epsilon: "<eps>".to_string(),
            aux_input: AuxInput::Epsilon,
            disambiguation_prefix: "#2000".to_string(),
            semiring: Semiring::Log,
        }
    }
}

impl HmmConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn epsilon(mut self, value: impl Into<String>) -> Self {
        self.epsilon = value.into();
        self
    }

    pub fn aux_input(mut self, value: AuxInput) -> Self {
        self.aux_input = value;
        self
    }

    pub fn disambiguation_prefix(mut self, value: impl Into<String>) -> Self {
        self.disambiguation_prefix = value.into();
        self
    }

    pub fn semiring(mut self, value: Semiring) -> Self {
        self.semiring = value;
        self
    }
}
