//! Word symbol table shared by the lexicon and grammar transducers.

use cascadia_core::SymbolTable;
use tracing::warn;

use super::arpa::ArpaModel;
use super::config::ArpaConfig;

/// Word table plus the model words the lexicon could not pronounce.
#[derive(Clone, Debug)]
pub struct WordTable {
    pub symbols: SymbolTable,
    pub missing: Vec<String>,
}

/// Build the word table in lexicon order, then append model unigrams the
/// lexicon lacks.
///
/// Layout: epsilon, lexicon words (first-seen order), the failure symbol if
/// any, then model-only words. Sentence markers are appended silently; any
/// other model-only word is reported.
pub fn build_word_table<'a>(
    lexicon_words: impl IntoIterator<Item = &'a str>,
    model: &ArpaModel,
    config: &ArpaConfig,
    failure: Option<&str>,
) -> WordTable {
    let mut symbols = SymbolTable::new(&config.epsilon);
    for word in lexicon_words {
        symbols.intern(word);
    }
    if let Some(failure) = failure {
        symbols.intern(failure);
    }

    let mut missing = Vec::new();
    for word in model.unigrams() {
        if symbols.contains(word) {
            continue;
        }
        symbols.intern(word);
        if word == config.sentence_begin || word == config.sentence_end {
            continue;
        }
        warn!(word, "model word has no pronunciation; added to word table");
        missing.push(word.to_string());
    }

    WordTable { symbols, missing }
}
