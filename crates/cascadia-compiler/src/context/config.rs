use cascadia_core::Semiring;

/// Arc layout of the context transducer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ContextMode {
    /// Output-deterministic layout; arcs emit the right context.
    #[default]
    Deterministic,
    /// Arcs emit the center phone; start-adjacent arcs leave the start state.
    NonDeterministic,
}

/// Input label of the auxiliary self-loops.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuxInput {
    /// `aux:aux`
    #[default]
    Passthrough,
    /// `<eps>:aux`
    Epsilon,
}

#[derive(Clone, Debug)]
pub struct ContextConfig {
    pub(crate) epsilon: String,
    pub(crate) silence: String,
    pub(crate) start: String,
    pub(crate) mode: ContextMode,
    /// Units on input, phones on output.
    pub(crate) inverted: bool,
    pub(crate) aux_input: AuxInput,
    /// Emit logical unit names on input plus a physical-to-logical mapper.
    pub(crate) logical_input: bool,
    /// Phones carry `_b`/`_i`/`_e`/`_s` position tags.
    pub(crate) positional: bool,
    pub(crate) semiring: Semiring,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            epsilon: "<eps>".to_string(),
            silence: "sil".to_string(),
            start: "<start>".to_string(),
            mode: ContextMode::Deterministic,
            inverted: true,
            aux_input: AuxInput::Passthrough,
            logical_input: false,
            positional: false,
            semiring: Semiring::Log,
        }
    }
}

impl ContextConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn epsilon(mut self, value: impl Into<String>) -> Self {
        self.epsilon = value.into();
        self
    }

    pub fn silence(mut self, value: impl Into<String>) -> Self {
        self.silence = value.into();
        self
    }

    pub fn start(mut self, value: impl Into<String>) -> Self {
        self.start = value.into();
        self
    }

    pub fn mode(mut self, value: ContextMode) -> Self {
        self.mode = value;
        self
    }

    pub fn inverted(mut self, value: bool) -> Self {
        self.inverted = value;
        self
    }

    pub fn aux_input(mut self, value: AuxInput) -> Self {
        self.aux_input = value;
        self
    }

    pub fn logical_input(mut self, value: bool) -> Self {
        self.logical_input = value;
        self
    }

    pub fn positional(mut self, value: bool) -> Self {
        self.positional = value;
        self
    }

    pub fn semiring(mut self, value: Semiring) -> Self {
        self.semiring = value;
        self
    }
}
