use cascadia_core::Semiring;

use super::{
    Alphabet, BuildConfig, Component, ComponentSet, RecordingToolkit, Scheduler, Source, SyntaxErrorKind,
};
use crate::Error;

fn scheduler(logical_context: bool) -> Scheduler {
    let components = ComponentSet::standard("x", logical_context);
    Scheduler::new(components, BuildConfig::new().prefix("x").compile_components(false))
}

fn dry_run(expr: &str) -> String {
    let mut toolkit = RecordingToolkit::new();
    scheduler(false).build(expr, &mut toolkit).unwrap();
    toolkit.script()
}

#[test]
fn nested_build_runs_innermost_first() {
    insta::assert_snapshot!(dry_run("(C*det(L*G))"), @r"
    fstcompose x.l.fst x.g.fst > x.lg.fst
    fstdeterminize x.lg.fst > x.detlg.fst
    fstcompose x.c.fst x.detlg.fst > x.cdetlg.fst
    ");
}

#[test]
fn outcome_names_final_artifact() {
    let mut toolkit = RecordingToolkit::new();
    let outcome = scheduler(false).build("min(det(C*det(L*G)))", &mut toolkit).unwrap();
    assert_eq!(outcome.artifact.name, "mindetcdetlg");
    assert_eq!(outcome.artifact.input, Alphabet::Physical);
    assert_eq!(outcome.artifact.output, Alphabet::Words);
    assert_eq!(outcome.path.to_str(), Some("x.mindetcdetlg.fst"));
    assert_eq!(outcome.steps, toolkit.steps());
}

#[test]
fn components_are_compiled_first() {
    let components = ComponentSet::standard("x", false);
    let scheduler = Scheduler::new(components, BuildConfig::new().prefix("x"));
    let mut toolkit = RecordingToolkit::new();
    scheduler.build("H*C*L", &mut toolkit).unwrap();
    insta::assert_snapshot!(toolkit.script(), @r"
    fstcompile --arc_type=log --isymbols=x.h.isyms --osymbols=x.h.osyms x.h.fst.txt | fstarcsort --sort_type=olabel - > x.h.fst
    fstcompile --arc_type=log --isymbols=x.c.isyms --osymbols=x.l.isyms x.c.fst.txt | fstarcsort --sort_type=olabel - > x.c.fst
    fstcompile --arc_type=log --isymbols=x.l.isyms --osymbols=x.words.syms x.l.fst.txt | fstclosure - | fstarcsort --sort_type=olabel - > x.l.fst
    fstcompose x.h.fst x.c.fst > x.hc.fst
    fstcompose x.hc.fst x.l.fst > x.hcl.fst
    ");
}

#[test]
fn acceptor_component_compile() {
    let components = ComponentSet::standard("x", false);
    let scheduler = Scheduler::new(
        components,
        BuildConfig::new().prefix("x").semiring(Semiring::Tropical),
    );
    let mut toolkit = RecordingToolkit::new();
    scheduler.build("G", &mut toolkit).unwrap();
    insta::assert_snapshot!(
        toolkit.script(),
        @"fstcompile --arc_type=standard --acceptor=true --isymbols=x.words.syms x.g.fst.txt | fstarcsort --sort_type=ilabel - > x.g.fst"
    );
}

#[test]
fn lookahead_composition() {
    insta::assert_snapshot!(dry_run("L.G"), @r"
    fstconvert --fst_type=olabel_lookahead --save_relabel_opairs=x.lg.rlbl.txt x.l.fst > x.l.lkhd.fst
    relabel x.lg.rlbl.txt > x.lg.rlbl.fix.txt
    fstrelabel --relabel_ipairs=x.lg.rlbl.fix.txt x.g.fst | fstarcsort - > x.g.rlbl.fst
    fstcompose x.l.lkhd.fst x.g.rlbl.fst > x.lg.lkhd.fst
    ");
}

#[test]
fn lexicon_is_determinized_in_tropical() {
    insta::assert_snapshot!(dry_run("det(L)"), @"fstprint x.l.fst | fstcompile --arc_type=standard - | fstdeterminize - | fstprint - | fstcompile --arc_type=log - > x.detl.fst");
}

#[test]
fn explicit_semiring_matching_build_is_plain() {
    insta::assert_snapshot!(dry_run("det_l(L*G)"), @r"
    fstcompose x.l.fst x.g.fst > x.lg.fst
    fstdeterminize x.lg.fst > x.det_llg.fst
    ");
}

#[test]
fn encoded_optimization() {
    insta::assert_snapshot!(dry_run("min[weights,labels](G)"), @"fstencode --encode_labels=true --encode_weights=true x.g.fst x.min_wsg.codex | fstminimize - | fstencode --decode=true - x.min_wsg.codex > x.min_wsg.fst");
}

#[test]
fn push_and_rmeps() {
    insta::assert_snapshot!(dry_run("rmeps(push(G))"), @r"
    fstpush --push_weights=true x.g.fst > x.pug.fst
    fstrmepsilon x.pug.fst > x.rmpug.fst
    ");
}

#[test]
fn tropical_round_trip_with_encoding() {
    insta::assert_snapshot!(dry_run("det_tw(G)"), @"fstprint x.g.fst | fstcompile --arc_type=standard - | fstencode --encode_weights=true - x.det_twg.codex | fstdeterminize - | fstencode --decode=true - x.det_twg.codex | fstprint - | fstcompile --arc_type=log - > x.det_twg.fst");
}

#[test]
fn mapper_bridges_alphabets() {
    let mut toolkit = RecordingToolkit::new();
    let outcome = scheduler(true).build("H*C", &mut toolkit).unwrap();
    insta::assert_snapshot!(toolkit.script(), @r"
    fstcompile --arc_type=log --isymbols=x.d.isyms --osymbols=x.c.isyms x.d.fst.txt | fstarcsort --sort_type=olabel - | fstcompose - x.c.fst > x.dc.fst
    fstcompose x.h.fst x.dc.fst > x.hdc.fst
    ");
    assert_eq!(outcome.artifact.input, Alphabet::Hmm);
    assert_eq!(outcome.artifact.output, Alphabet::Phones);
}

#[test]
fn alphabet_mismatch_without_mapper() {
    let mut toolkit = RecordingToolkit::new();
    let err = scheduler(false).build("G*L", &mut toolkit).unwrap_err();
    insta::assert_snapshot!(
        err,
        @"cannot compose `g` with `l`: words output does not match phones input and no mapper is declared"
    );
    assert!(toolkit.steps().is_empty());
}

#[test]
fn semiring_conflict_runs_nothing() {
    let mut toolkit = RecordingToolkit::new();
    let err = scheduler(false).build("det_l[tropical](L)", &mut toolkit).unwrap_err();
    assert!(
        matches!(&err, Error::Syntax(e) if e.kind == SyntaxErrorKind::SemiringConflict),
        "{err}"
    );
    assert!(toolkit.steps().is_empty());
}

#[test]
fn unknown_component_runs_nothing() {
    let components = ComponentSet::standard("x", false);
    let scheduler = Scheduler::new(components, BuildConfig::new().prefix("x"));
    let mut toolkit = RecordingToolkit::new();
    let err = scheduler.build("L*G*X", &mut toolkit).unwrap_err();
    assert!(matches!(err, Error::UnknownComponent('X')), "{err}");
    assert!(toolkit.steps().is_empty());
}

#[test]
fn missing_operand() {
    let mut toolkit = RecordingToolkit::new();
    let err = scheduler(false).build("L*", &mut toolkit).unwrap_err();
    insta::assert_snapshot!(err, @"operator `*` is missing an operand");

    let err = scheduler(false).build("det_w()", &mut toolkit).unwrap_err();
    insta::assert_snapshot!(err, @"operator `det_w` is missing an operand");
}

#[test]
fn dangling_operands() {
    let mut toolkit = RecordingToolkit::new();
    let err = scheduler(false).build("L G", &mut toolkit).unwrap_err();
    assert!(matches!(err, Error::DanglingOperands { count: 2 }), "{err}");
}

#[test]
fn custom_component_set() {
    let mut components = ComponentSet::new();
    components.insert(Component::new('A', Alphabet::Words, Alphabet::Words, Source::Prebuilt));
    let scheduler = Scheduler::new(components, BuildConfig::new().prefix("run/a"));
    let mut toolkit = RecordingToolkit::new();

    let outcome = scheduler.build("A*A", &mut toolkit).unwrap();
    assert_eq!(outcome.artifact.name, "aa");
    insta::assert_snapshot!(toolkit.script(), @"fstcompose run/a.a.fst run/a.a.fst > run/a.aa.fst");
}

#[test]
fn outcome_serializes() {
    let mut toolkit = RecordingToolkit::new();
    let outcome = scheduler(false).build("rmeps(G)", &mut toolkit).unwrap();
    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["artifact"]["name"], "rmg");
    assert_eq!(json["artifact"]["input"], "words");
    assert_eq!(json["steps"][0]["step"], "run");
    assert_eq!(json["steps"][0]["stages"][0]["program"], "fstrmepsilon");
}
