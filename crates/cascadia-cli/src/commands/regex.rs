use std::path::PathBuf;

use cascadia_compiler::{RegexCompiler, RegexConfig};
use cascadia_core::{Semiring, SymbolTable};

use super::files::{CommandError, Result, fail, prefixed, read, read_symbols, write};

pub struct RegexArgs {
    pub prefix: String,
    pub expression: Option<String>,
    pub file: Option<PathBuf>,
    /// Shared word table; reused when present so ids agree with L.
    pub words: PathBuf,
    pub epsilon: String,
    pub semiring: Semiring,
}

pub fn run(args: RegexArgs) {
    if let Err(err) = execute(&args) {
        fail(err);
    }
}

fn execute(args: &RegexArgs) -> Result<()> {
    let compiler = RegexCompiler::new(
        RegexConfig::new()
            .epsilon(args.epsilon.as_str())
            .semiring(args.semiring),
    );

    let words = if args.words.exists() {
        read_symbols(&args.words)?
    } else {
        SymbolTable::new(&args.epsilon)
    };

    let fst = match (&args.file, &args.expression) {
        (Some(path), _) => compiler.compile_grammar_with_symbols(&read(path)?, words)?,
        (None, Some(expr)) => compiler
            .compile_with_symbols(expr, words)
            .map_err(|err| CommandError::with_source(err, expr))?,
        (None, None) => {
            return Err(CommandError::Diagnostic(
                "error: either EXPR or --file is required\n".to_string(),
            ));
        }
    };

    write(&prefixed(&args.prefix, "g.fst.txt"), &fst.serialize())?;
    write(&prefixed(&args.prefix, "words.syms"), &fst.input_symbols().to_text())?;
    Ok(())
}
