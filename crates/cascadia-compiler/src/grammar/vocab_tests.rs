use indoc::indoc;

use super::{ArpaConfig, ArpaModel, build_word_table};

const MODEL: &str = indoc! {r"
    \data\
    ngram 1=5
    \1-grams:
    -1.0 </s>
    -99 <s>
    -0.5 cat
    -0.6 dog
    -0.7 yak
    \end\
"};

#[test]
fn lexicon_words_come_first() {
    let model = ArpaModel::parse(MODEL).unwrap();

    let table = build_word_table(
        ["dog", "cat", "dog"],
        &model,
        &ArpaConfig::new(),
        None,
    );

    let words: Vec<_> = table.symbols.iter().map(|(_, w)| w).collect();
    assert_eq!(words, vec!["<eps>", "dog", "cat", "</s>", "<s>", "yak"]);
}

#[test]
fn only_real_words_are_reported_missing() {
    let model = ArpaModel::parse(MODEL).unwrap();

    let table = build_word_table(["cat", "dog"], &model, &ArpaConfig::new(), None);

    assert_eq!(table.missing, vec!["yak".to_string()]);
}

#[test]
fn failure_symbol_follows_lexicon_words() {
    let model = ArpaModel::parse(MODEL).unwrap();

    let table = build_word_table(
        ["cat", "dog", "yak"],
        &model,
        &ArpaConfig::new(),
        Some("<phi>"),
    );

    assert_eq!(table.symbols.find("<phi>").map(|l| l.as_u32()), Some(4));
    assert!(table.missing.is_empty());
    assert_eq!(table.symbols.len(), 7);
}
