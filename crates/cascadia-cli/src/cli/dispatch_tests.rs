//! Tests for CLI dispatch logic: parsing, defaults resolved against
//! `--prefix`, and params extraction.

use std::path::PathBuf;

use cascadia_core::Semiring;

use super::*;
use crate::cli::commands::{
    arpa_command, build_command, context_command, hmm_command, lexicon_command, regex_command,
    silence_command,
};
use crate::commands::arpa::ArpaArgs;
use crate::commands::build::BuildArgs;
use crate::commands::context::ContextArgs;
use crate::commands::hmm::HmmArgs;
use crate::commands::regex::RegexArgs;
use crate::commands::silence::SilenceArgs;

#[test]
fn cli_is_well_formed() {
    build_cli().debug_assert();
}

#[test]
fn arpa_params() {
    let m = arpa_command()
        .try_get_matches_from([
            "arpa",
            "lm.arpa",
            "-p",
            "out/wsj",
            "--lexicon",
            "wsj.dic",
            "--max-order",
            "2",
            "--semiring",
            "tropical",
        ])
        .unwrap();
    let params = ArpaParams::from_matches(&m);
    assert_eq!(params.input, PathBuf::from("lm.arpa"));
    assert_eq!(params.prefix, "out/wsj");
    assert_eq!(params.lexicon, Some(PathBuf::from("wsj.dic")));
    assert_eq!(params.max_order, Some(2));
    assert_eq!(params.backoff_label, None);
    assert!(!params.normalize);
    assert_eq!(params.epsilon, "<eps>");
    assert_eq!(params.semiring, Semiring::Tropical);
}

#[test]
fn arpa_normalize_flag_reaches_args() {
    let m = arpa_command()
        .try_get_matches_from(["arpa", "lm.arpa", "--normalize"])
        .unwrap();
    let args = ArpaArgs::from(ArpaParams::from_matches(&m));
    assert!(args.normalize);
    assert_eq!(args.prefix, "cascade");
}

#[test]
fn arpa_requires_model() {
    assert!(arpa_command().try_get_matches_from(["arpa"]).is_err());
}

#[test]
fn lexicon_defaults() {
    let m = lexicon_command().try_get_matches_from(["lexicon", "wsj.dic"]).unwrap();
    let params = LexiconParams::from_matches(&m);
    assert_eq!(params.prefix, "cascade");
    assert_eq!(params.aux_prefix, "#");
    assert!(!params.positional);
    assert_eq!(params.words, None);
    assert_eq!(params.semiring, Semiring::Log);
}

#[test]
fn context_paths_follow_prefix() {
    let m = context_command()
        .try_get_matches_from(["context", "-p", "x", "--tied", "t.mdef", "--mdef", "--logical"])
        .unwrap();
    let args: ContextArgs = ContextParams::from_matches(&m).into();
    assert_eq!(args.phones, PathBuf::from("x.phones"));
    assert_eq!(args.aux, PathBuf::from("x.aux"));
    assert_eq!(args.phone_symbols, PathBuf::from("x.l.isyms"));
    assert_eq!(args.tied, Some(PathBuf::from("t.mdef")));
    assert!(args.mdef);
    assert!(args.logical);
    assert!(args.inverted);
    assert!(!args.aux_epsilon);
    assert_eq!(args.silence, "sil");
}

#[test]
fn context_explicit_inventory() {
    let m = context_command()
        .try_get_matches_from(["context", "--phones", "p.txt", "--no-invert", "--aux-epsilon"])
        .unwrap();
    let args: ContextArgs = ContextParams::from_matches(&m).into();
    assert_eq!(args.phones, PathBuf::from("p.txt"));
    assert!(!args.inverted);
    assert!(args.aux_epsilon);
}

#[test]
fn hmm_defaults_follow_prefix() {
    let m = hmm_command().try_get_matches_from(["hmm", "-p", "x", "model.mdef"]).unwrap();
    let args: HmmArgs = HmmParams::from_matches(&m).into();
    assert_eq!(args.input, PathBuf::from("model.mdef"));
    assert_eq!(args.aux, PathBuf::from("x.aux"));
    assert_eq!(args.units, PathBuf::from("x.c.isyms"));
    assert!(!args.hmm_list);
    assert!(!args.aux_passthrough);
}

#[test]
fn hmm_list_with_explicit_units() {
    let m = hmm_command()
        .try_get_matches_from(["hmm", "hmms.txt", "--hmm-list", "--units", "x.d.isyms", "--aux-passthrough"])
        .unwrap();
    let args: HmmArgs = HmmParams::from_matches(&m).into();
    assert!(args.hmm_list);
    assert!(args.aux_passthrough);
    assert_eq!(args.units, PathBuf::from("x.d.isyms"));
    assert!(hmm_command().try_get_matches_from(["hmm"]).is_err());
}

#[test]
fn silence_defaults() {
    let m = silence_command().try_get_matches_from(["silence", "-p", "x"]).unwrap();
    let args: SilenceArgs = SilenceParams::from_matches(&m).into();
    assert_eq!(args.words, PathBuf::from("x.words.syms"));
    assert_eq!(args.silence, "<sil>");
    assert_eq!(args.probability, 0.117);
}

#[test]
fn regex_expression_or_file() {
    let m = regex_command().try_get_matches_from(["regex", "a (b|c)*"]).unwrap();
    let params = RegexParams::from_matches(&m);
    assert_eq!(params.expression.as_deref(), Some("a (b|c)*"));
    assert_eq!(params.file, None);

    let m = regex_command().try_get_matches_from(["regex", "-f", "g.jsgf"]).unwrap();
    let params = RegexParams::from_matches(&m);
    assert_eq!(params.file, Some(PathBuf::from("g.jsgf")));
    let args: RegexArgs = params.into();
    assert_eq!(args.words, PathBuf::from("cascade.words.syms"));

    let m = regex_command()
        .try_get_matches_from(["regex", "a", "--words", "lex.words.syms"])
        .unwrap();
    let args: RegexArgs = RegexParams::from_matches(&m).into();
    assert_eq!(args.words, PathBuf::from("lex.words.syms"));

    assert!(regex_command().try_get_matches_from(["regex"]).is_err());
    assert!(
        regex_command()
            .try_get_matches_from(["regex", "a", "-f", "g.jsgf"])
            .is_err()
    );
}

#[test]
fn build_params() {
    let m = build_command()
        .try_get_matches_from(["build", "min(det(C*det(L*G)))", "--dry-run", "--json", "-vv"])
        .unwrap();
    assert_eq!(m.get_count("verbose"), 2);
    let args: BuildArgs = BuildParams::from_matches(&m).into();
    assert_eq!(args.expression, "min(det(C*det(L*G)))");
    assert!(args.dry_run);
    assert!(args.json);
    assert!(args.compile_components);
    assert_eq!(args.bin_dir, None);
}

#[test]
fn build_rejects_unknown_semiring() {
    let result = build_command().try_get_matches_from(["build", "L*G", "--semiring", "real"]);
    assert!(result.is_err());
}

#[test]
fn build_requires_expression() {
    assert!(build_command().try_get_matches_from(["build", "--dry-run"]).is_err());
}
