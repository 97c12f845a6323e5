//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` so the same definition is reused by
//! every command that needs it.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Input file (positional, required).
pub fn input_arg(value_name: &'static str, help: &'static str) -> Arg {
    Arg::new("input")
        .value_name(value_name)
        .value_parser(value_parser!(PathBuf))
        .required(true)
        .help(help)
}

/// Artifact prefix (-p/--prefix).
pub fn prefix_arg() -> Arg {
    Arg::new("prefix")
        .short('p')
        .long("prefix")
        .value_name("PREFIX")
        .default_value("cascade")
        .help("Prefix of every written file: <PREFIX>.<name>")
}

/// Weight semiring (--semiring).
pub fn semiring_arg() -> Arg {
    Arg::new("semiring")
        .long("semiring")
        .value_name("SEMIRING")
        .default_value("log")
        .value_parser(["log", "tropical"])
        .help("Weight semiring of the compiled automata")
}

/// Epsilon symbol (--epsilon).
pub fn epsilon_arg() -> Arg {
    Arg::new("epsilon")
        .long("epsilon")
        .value_name("SYMBOL")
        .default_value("<eps>")
        .help("Epsilon symbol (id 0 of every table)")
}

/// Failure/backoff symbol (--failure).
pub fn failure_arg() -> Arg {
    Arg::new("failure")
        .long("failure")
        .value_name("SYMBOL")
        .help("Failure symbol for backoff transitions")
}

/// Word symbol table to reuse (--words).
pub fn words_arg() -> Arg {
    Arg::new("words")
        .long("words")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Word symbol table [default: <PREFIX>.words.syms]")
}

/// Position-tagged phones (--positional).
pub fn positional_arg() -> Arg {
    Arg::new("positional")
        .long("positional")
        .action(ArgAction::SetTrue)
        .help("Tag phones with their word position (_b, _i, _e, _s)")
}

/// Lexicon used for the word table (--lexicon).
pub fn lexicon_arg() -> Arg {
    Arg::new("lexicon")
        .long("lexicon")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Pronunciation dictionary whose words order the word table")
}

/// Highest n-gram order (--max-order).
pub fn max_order_arg() -> Arg {
    Arg::new("max_order")
        .long("max-order")
        .value_name("N")
        .value_parser(value_parser!(usize))
        .help("Build n-grams only up to order N")
}

/// Backoff arc label (--backoff-label).
pub fn backoff_label_arg() -> Arg {
    Arg::new("backoff_label")
        .long("backoff-label")
        .value_name("SYMBOL")
        .help("Label backoff arcs with SYMBOL instead of epsilon")
}

/// Per-state weight normalization (--normalize).
pub fn normalize_arg() -> Arg {
    Arg::new("normalize")
        .long("normalize")
        .action(ArgAction::SetTrue)
        .help("Rescale each state's outgoing arcs to sum to one in the log semiring")
}

/// Disambiguation symbol prefix (--aux-prefix).
pub fn aux_prefix_arg() -> Arg {
    Arg::new("aux_prefix")
        .long("aux-prefix")
        .value_name("PREFIX")
        .default_value("#")
        .help("Prefix of disambiguation symbols")
}

/// Tied unit table (--tied).
pub fn tied_arg() -> Arg {
    Arg::new("tied")
        .long("tied")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Tied unit table (flat `unit [canonical]` list)")
}

/// Treat the tied table as a model definition (--mdef).
pub fn mdef_arg() -> Arg {
    Arg::new("mdef")
        .long("mdef")
        .action(ArgAction::SetTrue)
        .help("Read the tied table as a structured model definition")
}

/// Phone inventory (--phones).
pub fn phones_arg() -> Arg {
    Arg::new("phones")
        .long("phones")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Phone inventory, one per line [default: <PREFIX>.phones]")
}

/// Auxiliary symbol list (--aux).
pub fn aux_arg() -> Arg {
    Arg::new("aux")
        .long("aux")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Auxiliary symbols, one per line [default: <PREFIX>.aux]")
}

/// Non-deterministic context construction (--nondeterministic).
pub fn nondeterministic_arg() -> Arg {
    Arg::new("nondeterministic")
        .long("nondeterministic")
        .action(ArgAction::SetTrue)
        .help("Build the non-deterministic context transducer")
}

/// Keep phones on the input side (--no-invert).
pub fn no_invert_arg() -> Arg {
    Arg::new("no_invert")
        .long("no-invert")
        .action(ArgAction::SetTrue)
        .help("Put units on the output side instead of the input side")
}

/// Epsilon on the input side of aux loops (--aux-epsilon).
pub fn aux_epsilon_arg() -> Arg {
    Arg::new("aux_epsilon")
        .long("aux-epsilon")
        .action(ArgAction::SetTrue)
        .help("Emit auxiliary loops as <eps>:aux instead of aux:aux")
}

/// Logical context units (--logical).
pub fn logical_arg() -> Arg {
    Arg::new("logical")
        .long("logical")
        .action(ArgAction::SetTrue)
        .help("Use logical units on C and bridge them with the d mapper")
}

/// Read the HMM input as an HTK hmm list (--hmm-list).
pub fn hmm_list_arg() -> Arg {
    Arg::new("hmm_list")
        .long("hmm-list")
        .action(ArgAction::SetTrue)
        .help("Read MODEL as an HTK hmm list (`unit model s1 s2 s3`)")
}

/// Unit table H must agree with (--units).
pub fn units_arg() -> Arg {
    Arg::new("units")
        .long("units")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Unit table of C; units it lacks are skipped [default: <PREFIX>.c.isyms]")
}

/// Auxiliary loops read their symbol (--aux-passthrough).
pub fn aux_passthrough_arg() -> Arg {
    Arg::new("aux_passthrough")
        .long("aux-passthrough")
        .action(ArgAction::SetTrue)
        .help("Emit auxiliary loops as aux:aux instead of <eps>:aux")
}

/// Silence symbol (--silence).
pub fn silence_arg(default: &'static str) -> Arg {
    Arg::new("silence")
        .long("silence")
        .value_name("SYMBOL")
        .default_value(default)
        .help("Silence symbol")
}

/// Silence probability (--probability).
pub fn probability_arg() -> Arg {
    Arg::new("probability")
        .long("probability")
        .value_name("P")
        .default_value("0.117")
        .value_parser(value_parser!(f64))
        .help("Probability of silence after each word")
}

/// Regular expression (positional).
pub fn expression_arg(help: &'static str) -> Arg {
    Arg::new("expression").value_name("EXPR").help(help)
}

/// Grammar file (-f/--file).
pub fn file_arg() -> Arg {
    Arg::new("file")
        .short('f')
        .long("file")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .conflicts_with("expression")
        .help("Grammar file with `$NAME ::= expr` rules")
}

/// Record the pipelines without running them (--dry-run).
pub fn dry_run_arg() -> Arg {
    Arg::new("dry_run")
        .long("dry-run")
        .action(ArgAction::SetTrue)
        .help("Print the toolkit pipelines without running them")
}

/// JSON build summary (--json).
pub fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Print the build summary as JSON")
}

/// Toolkit binary directory (--bin-dir).
pub fn bin_dir_arg() -> Arg {
    Arg::new("bin_dir")
        .long("bin-dir")
        .value_name("DIR")
        .value_parser(value_parser!(PathBuf))
        .help("Directory of the OpenFst binaries [default: PATH lookup]")
}

/// Skip component compilation (--no-compile).
pub fn no_compile_arg() -> Arg {
    Arg::new("no_compile")
        .long("no-compile")
        .action(ArgAction::SetTrue)
        .help("Assume components are already compiled to <PREFIX>.<x>.fst")
}

/// Verbosity (-v).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .long("verbose")
        .action(ArgAction::Count)
        .help("Verbosity level (-v for debug, -vv for trace)")
}
