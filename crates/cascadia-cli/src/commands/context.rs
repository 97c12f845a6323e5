use std::path::PathBuf;

use cascadia_compiler::context::{AuxInput, ContextMode};
use cascadia_compiler::{ContextCompiler, ContextConfig, TiedTable};
use cascadia_core::Semiring;
use tracing::debug;

use super::files::{Result, fail, prefixed, read, read_list, read_symbols, write};

pub struct ContextArgs {
    pub prefix: String,
    pub phones: PathBuf,
    /// Read only when present.
    pub aux: PathBuf,
    /// Lexicon input table; reused when present so phone ids agree with L.
    pub phone_symbols: PathBuf,
    pub tied: Option<PathBuf>,
    pub mdef: bool,
    pub nondeterministic: bool,
    pub inverted: bool,
    pub aux_epsilon: bool,
    pub logical: bool,
    pub positional: bool,
    pub silence: String,
    pub epsilon: String,
    pub semiring: Semiring,
}

pub fn run(args: ContextArgs) {
    if let Err(err) = execute(&args) {
        fail(err);
    }
}

fn execute(args: &ContextArgs) -> Result<()> {
    let phones = read_list(&args.phones)?;
    let aux = if args.aux.exists() {
        read_list(&args.aux)?
    } else {
        debug!(path = %args.aux.display(), "no auxiliary symbols");
        Vec::new()
    };

    let table = match &args.tied {
        Some(path) => {
            let text = read(path)?;
            let table = if args.mdef {
                TiedTable::parse_mdef(&text)?
            } else {
                TiedTable::parse_flat(&text)?
            };
            Some(table)
        }
        None => None,
    };

    let config = ContextConfig::new()
        .epsilon(args.epsilon.as_str())
        .silence(args.silence.as_str())
        .mode(if args.nondeterministic {
            ContextMode::NonDeterministic
        } else {
            ContextMode::Deterministic
        })
        .inverted(args.inverted)
        .aux_input(if args.aux_epsilon {
            AuxInput::Epsilon
        } else {
            AuxInput::Passthrough
        })
        .logical_input(args.logical)
        .positional(args.positional)
        .semiring(args.semiring);
    let compiler = ContextCompiler::new(config);

    let output = if args.phone_symbols.exists() {
        let symbols = read_symbols(&args.phone_symbols)?;
        compiler.compile_with_symbols(&phones, &aux, table.as_ref(), symbols)
    } else {
        compiler.compile(&phones, &aux, table.as_ref())
    };
    let fst = &output.automaton;

    write(&prefixed(&args.prefix, "c.fst.txt"), &fst.serialize())?;
    write(&prefixed(&args.prefix, "c.isyms"), &fst.input_symbols().to_text())?;
    write(&prefixed(&args.prefix, "c.osyms"), &fst.output_symbols().to_text())?;
    if let Some(mapper) = &output.mapper {
        write(&prefixed(&args.prefix, "d.fst.txt"), &mapper.serialize())?;
        write(&prefixed(&args.prefix, "d.isyms"), &mapper.input_symbols().to_text())?;
    }
    Ok(())
}
