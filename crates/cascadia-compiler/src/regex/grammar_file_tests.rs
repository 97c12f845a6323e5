use indoc::indoc;

use super::expand_grammar;

fn error(text: &str) -> String {
    expand_grammar(text).unwrap_err().to_string()
}

#[test]
fn references_expand_in_parens() {
    let text = indoc! {"
        # greeting grammar
        $GREETING ::= hello | hi
        $NAME ::= alice | bob
        $GRAMMAR ::= $GREETING $NAME?
    "};

    assert_eq!(expand_grammar(text).unwrap(), "(hello | hi) (alice | bob)?");
}

#[test]
fn nested_references() {
    let text = indoc! {"
        $A ::= $B x
        $B ::= y
        $GRAMMAR ::= $A
    "};

    assert_eq!(expand_grammar(text).unwrap(), "((y) x)");
}

#[test]
fn whitespace_is_collapsed() {
    assert_eq!(expand_grammar("$GRAMMAR   ::=   a \t  b\n").unwrap(), "a b");
}

#[test]
fn plain_expression_is_unchanged() {
    assert_eq!(expand_grammar("a (b | c)*").unwrap(), "a (b | c)*");
}

#[test]
fn top_level_is_required() {
    insta::assert_snapshot!(error("$A ::= a\n"), @"malformed grammar: top-level `$GRAMMAR` is not defined");
}

#[test]
fn undefined_reference() {
    insta::assert_snapshot!(error("$GRAMMAR ::= $MISSING\n"), @"malformed grammar: `$MISSING` is not defined");
}

#[test]
fn cyclic_reference() {
    let text = indoc! {"
        $GRAMMAR ::= a $X
        $X ::= b $GRAMMAR
    "};

    insta::assert_snapshot!(error(text), @"malformed grammar: `$GRAMMAR` refers to itself");
}

#[test]
fn malformed_identifier() {
    insta::assert_snapshot!(error("GRAMMAR ::= a\n"), @"malformed grammar: `GRAMMAR` is not a valid identifier, expected `$name`");
}
