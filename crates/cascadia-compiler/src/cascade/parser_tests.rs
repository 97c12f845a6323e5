use std::ops::Range;

use cascadia_core::Semiring;

use super::{Operator, SyntaxErrorKind, TokenKind, to_postfix};

fn postfix(expr: &str) -> String {
    let tokens = to_postfix(expr).unwrap();
    let names: Vec<String> = tokens.iter().map(|t| t.name()).collect();
    names.join(" ")
}

fn error(expr: &str) -> (SyntaxErrorKind, Range<usize>) {
    let err = to_postfix(expr).unwrap_err();
    (err.kind, err.span)
}

#[test]
fn nested_build_order() {
    assert_eq!(postfix("(C*det(L*G))"), "C L G * det *");
    assert_eq!(postfix("min(det(C*det(L*G)))"), "C L G * det * det min");
}

#[test]
fn composition_is_left_associative() {
    assert_eq!(postfix("C*L*G"), "C L * G *");
    assert_eq!(postfix("H.C*L"), "H C . L *");
    assert_eq!(postfix("C*(L*G)"), "C L G * *");
}

#[test]
fn unary_operators_bind_tighter_than_composition() {
    assert_eq!(postfix("det(L)*G"), "L det G *");
    assert_eq!(postfix("rmeps(push(G))"), "G push rmeps");
}

#[test]
fn short_options() {
    assert_eq!(postfix("det_lw(L)"), "L det_lw");
    assert_eq!(postfix("min_sw(L)"), "L min_ws");
}

#[test]
fn bracket_options_merge_into_operator() {
    assert_eq!(postfix("det[tropical, weights](L)"), "L det_tw");
    assert_eq!(postfix("det_w[labels](L)"), "L det_ws");
    assert_eq!(postfix("push[log,log](G)"), "G push_l");
}

#[test]
fn options_carry_semiring() {
    let tokens = to_postfix("det[standard](L)").unwrap();
    assert_eq!(tokens[1].kind, TokenKind::Operator(Operator::Determinize));
    assert_eq!(tokens[1].options.semiring, Some(Semiring::Tropical));
    assert!(!tokens[1].options.encodes());
}

#[test]
fn options_ignored_where_not_taken() {
    assert_eq!(postfix("rmeps_w(L)"), "L rmeps");
    assert_eq!(postfix("L*[log]G"), "L G *");
}

#[test]
fn semiring_conflicts() {
    assert_eq!(error("det_l[tropical](L)"), (SyntaxErrorKind::SemiringConflict, 0..15));
    assert_eq!(error("det_lt(L)"), (SyntaxErrorKind::SemiringConflict, 0..6));
    assert_eq!(error("det[log, trop](L)"), (SyntaxErrorKind::SemiringConflict, 9..13));
}

#[test]
fn unknown_options() {
    assert_eq!(error("det_x(L)"), (SyntaxErrorKind::UnknownOption, 0..5));
    assert_eq!(error("det[fancy](L)"), (SyntaxErrorKind::UnknownOption, 4..9));
}

#[test]
fn misplaced_brackets() {
    assert_eq!(error("[log]L"), (SyntaxErrorKind::MisplacedBracket, 0..1));
    assert_eq!(error("C[log]"), (SyntaxErrorKind::MisplacedBracket, 1..2));
}

#[test]
fn prefix_operators_need_parentheses() {
    assert_eq!(error("det L*G"), (SyntaxErrorKind::MissingApplication, 0..3));
    assert_eq!(error("min det(L)"), (SyntaxErrorKind::MissingApplication, 0..3));
    assert_eq!(error("C*rmeps"), (SyntaxErrorKind::MissingApplication, 2..7));
    assert_eq!(error("push[log] G"), (SyntaxErrorKind::MissingApplication, 0..4));
    assert_eq!(postfix("det_w[labels] (L)"), "L det_ws");
}

#[test]
fn unbalanced() {
    assert_eq!(error("(C*L"), (SyntaxErrorKind::UnbalancedParen, 0..1));
    assert_eq!(error("C*L)"), (SyntaxErrorKind::UnbalancedParen, 3..4));
    assert_eq!(error("det[log(L)"), (SyntaxErrorKind::UnbalancedBracket, 3..4));
    assert_eq!(error("det[[log]](L)"), (SyntaxErrorKind::UnbalancedBracket, 4..5));
    assert_eq!(error("det]log(L)"), (SyntaxErrorKind::UnbalancedBracket, 3..4));
}

#[test]
fn balance_is_checked_before_tokens() {
    assert_eq!(error("C ? (L").0, SyntaxErrorKind::UnbalancedParen);
}

#[test]
fn bad_tokens() {
    assert_eq!(error("C*x"), (SyntaxErrorKind::BadToken, 2..3));
    assert_eq!(error("C*LG"), (SyntaxErrorKind::BadToken, 2..4));
    assert_eq!(error("C, L"), (SyntaxErrorKind::BadToken, 1..2));
    assert_eq!(error("C * 3"), (SyntaxErrorKind::BadToken, 4..5));
    assert_eq!(error("C_t"), (SyntaxErrorKind::BadToken, 0..3));
}

#[test]
fn empty_expressions() {
    assert_eq!(error("").0, SyntaxErrorKind::EmptyExpression);
    assert_eq!(error("  ").0, SyntaxErrorKind::EmptyExpression);
    assert_eq!(error("()"), (SyntaxErrorKind::EmptyExpression, 0..2));
}

#[test]
fn render_points_at_span() {
    let source = "det_l[tropical](L)";
    let rendered = to_postfix(source).unwrap_err().render(source);
    assert!(rendered.contains("both log and tropical"), "{rendered}");
    assert!(rendered.contains(source), "{rendered}");
}
