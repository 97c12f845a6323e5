use std::path::PathBuf;

use cascadia_compiler::lexicon::parse_lexicon;
use cascadia_compiler::{LexiconCompiler, LexiconConfig};
use cascadia_core::Semiring;

use super::files::{Result, fail, format_list, prefixed, read, read_symbols, write};

pub struct LexiconArgs {
    pub input: PathBuf,
    pub prefix: String,
    pub words: Option<PathBuf>,
    pub positional: bool,
    pub aux_prefix: String,
    pub failure: Option<String>,
    pub epsilon: String,
    pub semiring: Semiring,
}

pub fn run(args: LexiconArgs) {
    if let Err(err) = execute(&args) {
        fail(err);
    }
}

fn execute(args: &LexiconArgs) -> Result<()> {
    let entries = parse_lexicon(&read(&args.input)?)?;

    let mut config = LexiconConfig::new()
        .epsilon(args.epsilon.as_str())
        .positional(args.positional)
        .aux_prefix(args.aux_prefix.as_str())
        .semiring(args.semiring);
    if let Some(failure) = &args.failure {
        config = config.failure(failure.as_str());
    }
    let compiler = LexiconCompiler::new(config);

    let output = match &args.words {
        Some(path) => compiler.compile_with_words(&entries, read_symbols(path)?)?,
        None => compiler.compile(&entries)?,
    };
    let fst = &output.automaton;

    write(&prefixed(&args.prefix, "l.fst.txt"), &fst.serialize())?;
    write(&prefixed(&args.prefix, "l.isyms"), &fst.input_symbols().to_text())?;
    write(&prefixed(&args.prefix, "words.syms"), &fst.output_symbols().to_text())?;
    write(&prefixed(&args.prefix, "phones"), &format_list(&output.phones))?;
    write(&prefixed(&args.prefix, "aux"), &format_list(&output.aux))?;
    Ok(())
}
