pub mod arpa;
pub mod build;
pub mod context;
pub mod files;
pub mod hmm;
pub mod lexicon;
pub mod regex;
pub mod silence;

#[cfg(test)]
mod files_tests;
