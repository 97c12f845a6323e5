use cascadia_core::{Automaton, Semiring};
use indoc::indoc;

use super::{ArpaConfig, ArpaModel, EntryKind, GrammarCompiler};

const TRIGRAM: &str = indoc! {r"
    \data\
    ngram 1=5
    ngram 2=4
    ngram 3=2

    \1-grams:
    -1.0 </s>
    -99 <s> -0.5
    -0.7 a -0.3
    -0.8 b -0.2
    -0.9 c

    \2-grams:
    -0.3 <s> a -0.1
    -0.4 a b -0.15
    -0.5 b </s>
    -0.2 a c

    \3-grams:
    -0.1 <s> a b
    -0.2 a b </s>

    \end\
"};

fn compile(text: &str, config: ArpaConfig) -> Automaton {
    GrammarCompiler::new(config).compile_text(text).unwrap()
}

/// (label, destination name, cost) of every arc leaving the named state.
fn arcs_from(fst: &Automaton, state: &str) -> Vec<(String, String, f64)> {
    let Some(id) = fst.find_state(state) else {
        return Vec::new();
    };
    fst.arcs(id)
        .iter()
        .map(|arc| {
            let (label, _) = fst.arc_symbols(arc);
            let dst = fst.state_name(arc.nextstate).unwrap_or("?");
            (label.to_string(), dst.to_string(), arc.weight)
        })
        .collect()
}

fn backoff_arcs(fst: &Automaton, state: &str) -> Vec<(String, String, f64)> {
    arcs_from(fst, state)
        .into_iter()
        .filter(|(label, _, _)| label == "<eps>")
        .collect()
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

const LN10: f64 = std::f64::consts::LN_10;

#[test]
fn start_arc_enters_sentence_begin() {
    let fst = compile(TRIGRAM, ArpaConfig::new());

    let start = fst.start().unwrap();
    assert_eq!(fst.state_name(start), Some("<start>"));
    assert_eq!(
        arcs_from(&fst, "<start>"),
        vec![("<s>".to_string(), "<s>".to_string(), 0.0)]
    );
}

#[test]
fn below_top_order_each_history_has_one_backoff_and_one_forward_arc() {
    let fst = compile(TRIGRAM, ArpaConfig::new());
    let model = ArpaModel::parse(TRIGRAM).unwrap();

    for k in 1..3 {
        for entry in model.order(k) {
            let word = entry.word();
            if word == "<s>" || word == "</s>" {
                continue;
            }
            let name = entry.words.join(",");

            assert_eq!(backoff_arcs(&fst, &name).len(), 1, "backoff arcs of {name}");

            let history = if k == 1 {
                "<eps>".to_string()
            } else {
                entry.history().join(",")
            };
            let forward: Vec<_> = arcs_from(&fst, &history)
                .into_iter()
                .filter(|(label, dst, _)| label == word && dst == &name)
                .collect();
            assert_eq!(forward.len(), 1, "forward arcs into {name}");
        }
    }
}

#[test]
fn top_order_has_forward_arc_only() {
    let fst = compile(TRIGRAM, ArpaConfig::new());

    assert!(fst.find_state("<s>,a,b").is_none());
    let from = arcs_from(&fst, "<s>,a");
    assert!(from.iter().any(|(l, d, _)| l == "b" && d == "a,b"));
    assert_eq!(backoff_arcs(&fst, "<s>,a").len(), 1);
}

#[test]
fn weights_are_negated_natural_logs() {
    let fst = compile(TRIGRAM, ArpaConfig::new());

    let a = arcs_from(&fst, "<eps>")
        .into_iter()
        .find(|(l, _, _)| l == "a")
        .unwrap();
    assert!(approx(a.2, 0.7 * LN10));

    let (_, dst, cost) = &backoff_arcs(&fst, "a,b")[0];
    assert_eq!(dst, "b");
    assert!(approx(*cost, 0.15 * LN10));
}

#[test]
fn missing_backoff_weight_defaults_to_zero() {
    let fst = compile(TRIGRAM, ArpaConfig::new());

    assert_eq!(
        backoff_arcs(&fst, "a,c"),
        vec![("<eps>".to_string(), "c".to_string(), 0.0)]
    );
    let (_, dst, cost) = &backoff_arcs(&fst, "c")[0];
    assert_eq!(dst, "<eps>");
    assert_eq!(*cost, 0.0);
}

#[test]
fn sentence_begin_contributes_only_backoff() {
    let fst = compile(TRIGRAM, ArpaConfig::new());

    let from_begin = arcs_from(&fst, "<s>");
    let backoff: Vec<_> = from_begin.iter().filter(|(l, _, _)| l == "<eps>").collect();
    assert_eq!(backoff.len(), 1);
    assert_eq!(backoff[0].1, "<eps>");
    assert!(approx(backoff[0].2, 0.5 * LN10));

    let into_begin = arcs_from(&fst, "<eps>")
        .into_iter()
        .filter(|(l, _, _)| l == "<s>")
        .count();
    assert_eq!(into_begin, 0);
}

#[test]
fn sentence_end_is_the_only_final() {
    let fst = compile(TRIGRAM, ArpaConfig::new());

    let end = fst.find_state("</s>").unwrap();
    let finals: Vec<_> = fst.finals().collect();
    assert_eq!(finals, vec![(end, 0.0)]);
    assert!(fst.arcs(end).is_empty());

    for history in ["<eps>", "b", "a,b"] {
        assert!(
            arcs_from(&fst, history)
                .iter()
                .any(|(l, d, _)| l == "</s>" && d == "</s>"),
            "{history} should reach </s>"
        );
    }
}

#[test]
fn missing_backoff_nodes_are_completed() {
    let text = indoc! {r"
        \data\
        ngram 1=3
        ngram 2=1
        ngram 3=1

        \1-grams:
        -1.0 a -0.1
        -1.0 b -0.1
        -1.0 c -0.1

        \2-grams:
        -0.5 b c -0.2

        \3-grams:
        -0.1 a b c

        \end\
    "};

    let fst = compile(text, ArpaConfig::new());

    assert_eq!(
        backoff_arcs(&fst, "a,b"),
        vec![("<eps>".to_string(), "b".to_string(), 0.0)]
    );
    assert_eq!(backoff_arcs(&fst, "b,c").len(), 1);
    assert!(approx(backoff_arcs(&fst, "b,c")[0].2, 0.2 * LN10));
    assert_eq!(backoff_arcs(&fst, "<s>").len(), 1);
}

#[test]
fn impossible_entries_are_dropped() {
    let text = indoc! {r"
        \data\
        ngram 1=3
        \1-grams:
        -1.0 </s>
        -99 <s>
        -99 z
        \end\
    "};
    let bigram = text.replace("ngram 1=3", "ngram 1=3\nngram 2=0");

    let fst = compile(&bigram, ArpaConfig::new());

    assert!(fst.input_symbols().find("z").is_none());
    assert!(fst.find_state("z").is_none());
    assert_eq!(backoff_arcs(&fst, "<s>").len(), 1);
}

#[test]
fn unigram_model_loops_on_sentence_begin() {
    let text = indoc! {r"
        \data\
        ngram 1=4
        \1-grams:
        -1.0 </s>
        -99 <s>
        -0.5 x
        -0.6 y
        \end\
    "};

    let fst = compile(text, ArpaConfig::new());
    let begin = fst.find_state("<s>").unwrap();

    let loops: Vec<_> = arcs_from(&fst, "<s>")
        .into_iter()
        .map(|(l, d, _)| (l, d))
        .collect();
    assert_eq!(
        loops,
        vec![
            ("</s>".to_string(), "<s>".to_string()),
            ("x".to_string(), "<s>".to_string()),
            ("y".to_string(), "<s>".to_string()),
        ]
    );
    assert_eq!(fst.finals().collect::<Vec<_>>(), vec![(begin, 0.0)]);
}

#[test]
fn max_order_truncates_the_model() {
    let fst = compile(TRIGRAM, ArpaConfig::new().max_order(2));

    assert!(fst.find_state("<s>,a").is_none());
    assert!(
        arcs_from(&fst, "<s>")
            .iter()
            .any(|(l, d, _)| l == "a" && d == "a")
    );
    assert!(backoff_arcs(&fst, "a").len() == 1);
}

#[test]
fn explicit_backoff_label() {
    let fst = compile(TRIGRAM, ArpaConfig::new().backoff_label("<f>"));

    assert!(fst.input_symbols().find("<f>").is_some());
    let from_ab = arcs_from(&fst, "a,b");
    assert!(from_ab.iter().any(|(l, d, _)| l == "<f>" && d == "b"));
    assert!(
        arcs_from(&fst, "<f>")
            .iter()
            .any(|(l, d, _)| l == "a" && d == "a")
    );
}

#[test]
fn semiring_is_carried() {
    let fst = compile(TRIGRAM, ArpaConfig::new().semiring(Semiring::Tropical));
    assert_eq!(fst.semiring(), Semiring::Tropical);
    assert!(fst.is_acceptor());
}

#[test]
fn classification() {
    let model = ArpaModel::parse(TRIGRAM).unwrap();
    let config = ArpaConfig::new();
    let kinds = |k: usize| -> Vec<EntryKind> {
        model
            .order(k)
            .iter()
            .map(|e| EntryKind::classify(e, 3, &config))
            .collect()
    };

    assert_eq!(
        kinds(1),
        vec![
            EntryKind::SentenceEnd,
            EntryKind::SentenceBegin,
            EntryKind::Unigram,
            EntryKind::Unigram,
            EntryKind::Unigram,
        ]
    );
    assert_eq!(
        kinds(2),
        vec![
            EntryKind::Interior,
            EntryKind::Interior,
            EntryKind::SentenceEnd,
            EntryKind::Interior,
        ]
    );
    assert_eq!(kinds(3), vec![EntryKind::Highest, EntryKind::SentenceEnd]);
}

#[test]
fn empty_model_is_rejected() {
    let result = GrammarCompiler::new(ArpaConfig::new()).compile_text("\\data\\\n\\end\\\n");
    assert!(matches!(result, Err(crate::Error::MalformedArpa { .. })));
}

#[test]
fn serialized_bigram() {
    let text = indoc! {r"
        \data\
        ngram 1=3
        ngram 2=1

        \1-grams:
        0 </s>
        -99 <s>
        0 hi

        \2-grams:
        0 <s> hi

        \end\
    "};

    let fst = compile(text, ArpaConfig::new());

    insta::assert_snapshot!(fst.serialize(), @r"
    0	1	<s>
    1	2	<eps>
    1	4	hi
    2	3	</s>
    2	4	hi
    4	2	<eps>
    3
    ");
}

#[test]
fn shared_word_table_keeps_lexicon_ids() {
    let model = ArpaModel::parse(TRIGRAM).unwrap();
    let table = super::build_word_table(["c", "b", "a"], &model, &ArpaConfig::new(), None);

    let fst = GrammarCompiler::new(ArpaConfig::new())
        .compile_with_symbols(&model, table.symbols.clone())
        .unwrap();

    for word in ["a", "b", "c", "<s>", "</s>"] {
        assert_eq!(fst.input_symbols().find(word), table.symbols.find(word), "{word}");
    }
    assert_eq!(fst.input_symbols().len(), table.symbols.len());
}

#[test]
fn serialized_acceptor_columns_are_label_then_weight() {
    let fst = compile(TRIGRAM, ArpaConfig::new());
    let text = fst.serialize();

    for line in text.lines() {
        let fields: Vec<&str> = line.split('\t').collect();
        match fields.len() {
            1 | 3 => {}
            2 | 4 => {
                let weight = fields[fields.len() - 1];
                assert!(weight.parse::<f64>().is_ok(), "expected a weight, got `{weight}` in `{line}`");
            }
            n => panic!("unexpected {n} columns in `{line}`"),
        }
    }
    assert!(text.starts_with("0\t1\t<s>\n"));
}

#[test]
fn normalized_states_sum_to_one() {
    let fst = compile(TRIGRAM, ArpaConfig::new().normalize(true));

    for state in fst.states() {
        let arcs = fst.arcs(state);
        if arcs.is_empty() {
            continue;
        }
        let mass: f64 = arcs.iter().map(|arc| (-arc.weight).exp()).sum();
        assert!((mass - 1.0).abs() < 1e-9, "state {state} sums to {mass}");
    }
    assert_eq!(fst.num_arcs(), compile(TRIGRAM, ArpaConfig::new()).num_arcs());
}
