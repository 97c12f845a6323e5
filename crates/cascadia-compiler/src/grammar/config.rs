//! Configuration for n-gram acceptor compilation.

use cascadia_core::Semiring;

#[derive(Clone, Debug)]
pub struct ArpaConfig {
    pub(crate) epsilon: String,
    pub(crate) sentence_begin: String,
    pub(crate) sentence_end: String,
    /// Name of the state holding the `<s>` arc.
    pub(crate) start: String,
    /// Label for backoff arcs; epsilon when unset.
    pub(crate) backoff_label: Option<String>,
    /// Build only up to this order; the model's own order when unset.
    pub(crate) max_order: Option<usize>,
    /// Rescale every state's arcs to sum to probability one.
    pub(crate) normalize: bool,
    pub(crate) semiring: Semiring,
}

impl Default for ArpaConfig {
    fn default() -> Self {
        Self {
            epsilon: "<eps>".to_string(),
            sentence_begin: "<s>".to_string(),
            sentence_end: "</s>".to_string(),
            start: "<start>".to_string(),
            backoff_label: None,
            max_order: None,
            normalize: false,
            semiring: Semiring::Log,
        }
    }
}

impl ArpaConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn epsilon(mut self, value: impl Into<String>) -> Self {
        self.epsilon = value.into();
        self
    }

    pub fn sentence_begin(mut self, value: impl Into<String>) -> Self {
        self.sentence_begin = value.into();
        self
    }

    pub fn sentence_end(mut self, value: impl Into<String>) -> Self {
        self.sentence_end = value.into();
        self
    }

    pub fn start(mut self, value: impl Into<String>) -> Self {
        self.start = value.into();
        self
    }

    /// Use an explicit failure label (commonly `<f>`) on backoff arcs.
    pub fn backoff_label(mut self, value: impl Into<String>) -> Self {
        self.backoff_label = Some(value.into());
        self
    }

    pub fn max_order(mut self, value: usize) -> Self {
        self.max_order = Some(value);
        self
    }

    pub fn normalize(mut self, value: bool) -> Self {
        self.normalize = value;
        self
    }

    pub fn semiring(mut self, value: Semiring) -> Self {
        self.semiring = value;
        self
    }

    /// Label (and state name) used for backoff.
    pub(crate) fn backoff(&self) -> &str {
        self.backoff_label.as_deref().unwrap_or(&self.epsilon)
    }
}
