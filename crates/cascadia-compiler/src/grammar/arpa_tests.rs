use indoc::indoc;

use super::ArpaModel;
use crate::Error;

const BIGRAM: &str = indoc! {r"
    This preamble is ignored.

    \data\
    ngram 1=3
    ngram 2=2

    \1-grams:
    -1.0	</s>
    -99	<s>	-0.30
    -0.5	hello	-0.25

    \2-grams:
    -0.2	<s> hello
    -0.1	hello </s>

    \end\
"};

fn line_of(err: Error) -> (usize, String) {
    match err {
        Error::MalformedArpa { line, message } => (line, message),
        other => panic!("expected MalformedArpa, got {other:?}"),
    }
}

#[test]
fn parses_orders_and_entries() {
    let model = ArpaModel::parse(BIGRAM).unwrap();

    assert_eq!(model.max_order(), 2);
    assert_eq!(model.declared_count(1), Some(3));
    assert_eq!(model.order(1).len(), 3);
    assert_eq!(model.order(2).len(), 2);
    assert!(model.order(3).is_empty());
    assert!(model.order(0).is_empty());

    let hello = &model.order(1)[2];
    assert_eq!(hello.logprob, -0.5);
    assert_eq!(hello.word(), "hello");
    assert_eq!(hello.backoff, Some(-0.25));
    assert!(hello.history().is_empty());

    let bigram = &model.order(2)[1];
    assert_eq!(bigram.words, vec!["hello", "</s>"]);
    assert_eq!(bigram.history(), ["hello".to_string()]);
    assert_eq!(bigram.backoff, None);
}

#[test]
fn unigram_words_in_file_order() {
    let model = ArpaModel::parse(BIGRAM).unwrap();
    let words: Vec<_> = model.unigrams().collect();
    assert_eq!(words, vec!["</s>", "<s>", "hello"]);
}

#[test]
fn section_before_header_is_rejected() {
    let text = indoc! {r"
        \1-grams:
        -1.0 a
        \end\
    "};

    let (line, message) = line_of(ArpaModel::parse(text).unwrap_err());
    assert_eq!(line, 1);
    assert!(message.contains("before \\data\\"));
}

#[test]
fn missing_header_is_rejected() {
    let (_, message) = line_of(ArpaModel::parse("just text\n").unwrap_err());
    assert_eq!(message, "missing \\data\\ header");
}

#[test]
fn missing_end_is_rejected() {
    let text = indoc! {r"
        \data\
        ngram 1=1
        \1-grams:
        -1.0 a
    "};

    let (line, message) = line_of(ArpaModel::parse(text).unwrap_err());
    assert_eq!(line, 4);
    assert_eq!(message, "missing \\end\\ marker");
}

#[test]
fn wrong_field_count_reports_line() {
    let text = indoc! {r"
        \data\
        ngram 1=1
        ngram 2=1
        \1-grams:
        -1.0 a
        \2-grams:
        -0.5 a b c d
        \end\
    "};

    let (line, message) = line_of(ArpaModel::parse(text).unwrap_err());
    assert_eq!(line, 7);
    assert_eq!(message, "2-gram entry has 5 fields, expected 3 or 4");
}

#[test]
fn invalid_number_reports_line() {
    let text = indoc! {r"
        \data\
        ngram 1=1
        \1-grams:
        minus a
        \end\
    "};

    let (line, message) = line_of(ArpaModel::parse(text).unwrap_err());
    assert_eq!(line, 4);
    assert_eq!(message, "invalid number `minus`");
}

#[test]
fn undeclared_section_is_rejected() {
    let text = indoc! {r"
        \data\
        ngram 1=1
        \1-grams:
        -1.0 a
        \2-grams:
        \end\
    "};

    let (line, message) = line_of(ArpaModel::parse(text).unwrap_err());
    assert_eq!(line, 5);
    assert_eq!(message, "section for undeclared order 2");
}

#[test]
fn out_of_order_section_is_rejected() {
    let text = indoc! {r"
        \data\
        ngram 1=1
        ngram 2=1
        \2-grams:
        -0.5 a b
        \1-grams:
        -1.0 a
        \end\
    "};

    let (line, message) = line_of(ArpaModel::parse(text).unwrap_err());
    assert_eq!(line, 4);
    assert_eq!(message, "2-gram section out of order, expected 1-grams");
}

#[test]
fn declarations_must_be_sequential() {
    let text = indoc! {r"
        \data\
        ngram 2=1
        \end\
    "};

    let (line, message) = line_of(ArpaModel::parse(text).unwrap_err());
    assert_eq!(line, 2);
    assert_eq!(message, "order 2 declared out of sequence, expected 1");
}

#[test]
fn bad_declaration_is_rejected() {
    let text = "\\data\\\nngram one\n\\end\\\n";
    let (line, _) = line_of(ArpaModel::parse(text).unwrap_err());
    assert_eq!(line, 2);
}

#[test]
fn count_mismatch_is_tolerated() {
    let text = indoc! {r"
        \data\
        ngram 1=5
        \1-grams:
        -1.0 a
        \end\
    "};

    let model = ArpaModel::parse(text).unwrap();
    assert_eq!(model.declared_count(1), Some(5));
    assert_eq!(model.order(1).len(), 1);
}

#[test]
fn text_after_end_is_ignored() {
    let text = "\\data\\\nngram 1=1\n\\1-grams:\n-1 a\n\\end\\\ngarbage here\n";
    assert!(ArpaModel::parse(text).is_ok());
}
