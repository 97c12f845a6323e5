use std::path::PathBuf;

use cascadia_core::Semiring;
use serde::{Deserialize, Serialize};

/// Settings of one cascade build.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Path prefix of every artifact: `<prefix>.<name>.fst`.
    pub(crate) prefix: String,
    pub(crate) semiring: Semiring,
    /// Compile text-sourced components before evaluating.
    pub(crate) compile_components: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            prefix: "cascade".to_string(),
            semiring: Semiring::Log,
            compile_components: true,
        }
    }
}

impl BuildConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prefix(mut self, value: impl Into<String>) -> Self {
        self.prefix = value.into();
        self
    }

    pub fn semiring(mut self, value: Semiring) -> Self {
        self.semiring = value;
        self
    }

    pub fn compile_components(mut self, value: bool) -> Self {
        self.compile_components = value;
        self
    }

    pub fn build_semiring(&self) -> Semiring {
        self.semiring
    }

    pub(crate) fn path(&self, file: &str) -> PathBuf {
        PathBuf::from(format!("{}.{file}", self.prefix))
    }
}
