use std::path::PathBuf;

use super::files::{CommandError, format_list, parse_list, prefixed, read, read_symbols, write};

#[test]
fn list_round_trip() {
    let items = parse_list("AX\n\n  DH \nIY\n");
    assert_eq!(items, ["AX", "DH", "IY"]);
    assert_eq!(format_list(&items), "AX\nDH\nIY\n");
}

#[test]
fn prefixed_paths() {
    assert_eq!(prefixed("out/wsj", "l.isyms"), PathBuf::from("out/wsj.l.isyms"));
}

#[test]
fn symbols_through_files() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("words.syms");
    write(&path, "<eps>\t0\nthe\t1\na\t2\n").unwrap();

    let symbols = read_symbols(&path).unwrap();
    assert_eq!(symbols.len(), 3);
    assert_eq!(symbols.find("a").map(|l| l.as_u32()), Some(2));
}

#[test]
fn read_error_names_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let err = read(&dir.path().join("missing.arpa")).unwrap_err();
    assert!(matches!(err, CommandError::Read { .. }));
    assert!(err.to_string().contains("missing.arpa"), "{err}");
}

#[test]
fn syntax_errors_are_rendered() {
    let source = "det_l[tropical](L)";
    let err = cascadia_compiler::cascade::to_postfix(source).unwrap_err();
    let err = CommandError::with_source(err.into(), source);
    let CommandError::Diagnostic(rendered) = err else {
        panic!("expected a rendered diagnostic");
    };
    assert!(rendered.contains("both log and tropical"), "{rendered}");
}

#[test]
fn other_errors_pass_through() {
    let err = CommandError::with_source(cascadia_compiler::Error::UnknownComponent('X'), "X");
    insta::assert_snapshot!(err, @"unknown component `X`");
}
