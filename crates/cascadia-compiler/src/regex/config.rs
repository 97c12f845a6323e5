use cascadia_core::Semiring;

#[derive(Clone, Debug)]
pub struct RegexConfig {
    pub(crate) epsilon: String,
    pub(crate) semiring: Semiring,
}

impl Default for RegexConfig {
    fn default() -> Self {
        Self {
            epsilon: "<eps>".to_string(),
            semiring: Semiring::Log,
        }
    }
}

impl RegexConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn epsilon(mut self, value: impl Into<String>) -> Self {
        self.epsilon = value.into();
        self
    }

    pub fn semiring(mut self, value: Semiring) -> Self {
        self.semiring = value;
        self
    }
}
