use indoc::indoc;

use super::{complete_relabeling, format_pairs, parse_pairs};
use crate::Error;

#[test]
fn missing_labels_pair_with_unused_ids() {
    let pairs = [(1, 3), (3, 1), (5, 2)];
    let completed = complete_relabeling(&pairs);
    assert_eq!(completed, [(1, 3), (3, 1), (5, 2), (2, 4), (4, 5)]);
}

#[test]
fn completed_map_is_a_bijection() {
    let completed = complete_relabeling(&[(4, 1), (7, 2), (2, 6)]);
    let mut olds: Vec<u32> = completed.iter().map(|&(old, _)| old).collect();
    let mut news: Vec<u32> = completed.iter().map(|&(_, new)| new).collect();
    olds.sort();
    news.sort();
    assert_eq!(olds, (1..=7).collect::<Vec<_>>());
    assert_eq!(news, (1..=7).collect::<Vec<_>>());
}

#[test]
fn complete_input_is_unchanged() {
    assert_eq!(complete_relabeling(&[(1, 2), (2, 1)]), [(1, 2), (2, 1)]);
    assert!(complete_relabeling(&[]).is_empty());
}

#[test]
fn parse_and_format() {
    let text = indoc! {"
        1\t3

        2 4
    "};
    let pairs = parse_pairs(text).unwrap();
    assert_eq!(pairs, [(1, 3), (2, 4)]);
    assert_eq!(format_pairs(&pairs), "1\t3\n2\t4\n");
}

#[test]
fn malformed_pairs() {
    let err = parse_pairs("1 2\n1 x\n").unwrap_err();
    assert!(matches!(err, Error::MalformedRelabelPairs { line: 2, .. }), "{err}");
    insta::assert_snapshot!(err, @"malformed relabel pairs at line 2: `x` is not a label id");

    let err = parse_pairs("1 2 3\n").unwrap_err();
    insta::assert_snapshot!(err, @"malformed relabel pairs at line 1: expected 2 fields, found 3");
}
