//! Command builders for the CLI.
//!
//! Every compile command writes `<PREFIX>.<name>` files that `build` later
//! picks up as components.

use clap::Command;

use super::args::*;

/// Args every command accepts.
fn with_common_args(cmd: Command) -> Command {
    cmd.arg(prefix_arg()).arg(verbose_arg())
}

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("cascadia")
        .about("WFST builders for speech recognition decoding graphs")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(arpa_command())
        .subcommand(lexicon_command())
        .subcommand(context_command())
        .subcommand(hmm_command())
        .subcommand(silence_command())
        .subcommand(regex_command())
        .subcommand(build_command())
}

/// Compile an ARPA language model into the grammar acceptor (G).
///
/// Writes `<PREFIX>.g.fst.txt`, `<PREFIX>.g.ssyms` and `<PREFIX>.words.syms`.
pub fn arpa_command() -> Command {
    with_common_args(
        Command::new("arpa")
            .about("Compile an ARPA language model into G")
            .arg(input_arg("MODEL", "ARPA language model"))
            .arg(lexicon_arg())
            .arg(max_order_arg())
            .arg(backoff_label_arg())
            .arg(normalize_arg())
            .arg(failure_arg())
            .arg(epsilon_arg())
            .arg(semiring_arg()),
    )
}

/// Compile a pronunciation dictionary into the lexicon transducer (L).
///
/// Writes `<PREFIX>.l.fst.txt`, `<PREFIX>.l.isyms`, `<PREFIX>.words.syms`,
/// and the `<PREFIX>.phones` / `<PREFIX>.aux` inventories for `context`.
pub fn lexicon_command() -> Command {
    with_common_args(
        Command::new("lexicon")
            .about("Compile a pronunciation dictionary into L")
            .arg(input_arg("DICT", "Pronunciation dictionary (`WORD PH1 PH2 ...`)"))
            .arg(words_arg())
            .arg(positional_arg())
            .arg(aux_prefix_arg())
            .arg(failure_arg())
            .arg(epsilon_arg())
            .arg(semiring_arg()),
    )
}

/// Compile the context-dependency transducer (C).
///
/// Writes `<PREFIX>.c.fst.txt` and `<PREFIX>.c.isyms`; with `--logical`
/// also `<PREFIX>.d.fst.txt` and `<PREFIX>.d.isyms`.
pub fn context_command() -> Command {
    with_common_args(
        Command::new("context")
            .about("Compile the context-dependency transducer C")
            .arg(phones_arg())
            .arg(aux_arg())
            .arg(tied_arg())
            .arg(mdef_arg())
            .arg(nondeterministic_arg())
            .arg(no_invert_arg())
            .arg(aux_epsilon_arg())
            .arg(logical_arg())
            .arg(positional_arg())
            .arg(silence_arg("sil"))
            .arg(epsilon_arg())
            .arg(semiring_arg()),
    )
}

/// Compile the HMM transducer (H) from a model definition or hmm list.
///
/// Writes `<PREFIX>.h.fst.txt`, `<PREFIX>.h.isyms`, `<PREFIX>.h.osyms` and
/// the `<PREFIX>.e.fst.txt` / `<PREFIX>.e.isyms` emission mapper.
pub fn hmm_command() -> Command {
    with_common_args(
        Command::new("hmm")
            .about("Compile the HMM transducer H")
            .arg(input_arg("MODEL", "Model definition (mdef 0.3) or HTK hmm list"))
            .arg(hmm_list_arg())
            .arg(aux_arg())
            .arg(units_arg())
            .arg(aux_passthrough_arg())
            .arg(epsilon_arg())
            .arg(semiring_arg()),
    )
}

/// Compile the optional inter-word silence transducer (T).
///
/// Writes `<PREFIX>.t.fst.txt` and `<PREFIX>.t.osyms`.
pub fn silence_command() -> Command {
    with_common_args(
        Command::new("silence")
            .about("Compile the inter-word silence transducer T")
            .arg(words_arg())
            .arg(silence_arg("<sil>"))
            .arg(probability_arg())
            .arg(failure_arg())
            .arg(epsilon_arg())
            .arg(semiring_arg()),
    )
}

/// Compile a regular expression or grammar file into G.
///
/// Reuses the word table when it exists and writes it back extended, along
/// with `<PREFIX>.g.fst.txt`.
pub fn regex_command() -> Command {
    with_common_args(
        Command::new("regex")
            .about("Compile a regular expression grammar into G")
            .arg(
                expression_arg("Regular expression over words")
                    .required_unless_present("file"),
            )
            .arg(file_arg())
            .arg(words_arg())
            .arg(epsilon_arg())
            .arg(semiring_arg()),
    )
}

/// Evaluate a build expression such as `min(det(C*det(L*G)))`.
pub fn build_command() -> Command {
    with_common_args(
        Command::new("build")
            .about("Build a cascade with the OpenFst toolkit")
            .arg(
                expression_arg("Build expression, e.g. `min(det(C*det(L*G)))`")
                    .required(true),
            )
            .arg(semiring_arg())
            .arg(logical_arg())
            .arg(dry_run_arg())
            .arg(json_arg())
            .arg(bin_dir_arg())
            .arg(no_compile_arg()),
    )
}
