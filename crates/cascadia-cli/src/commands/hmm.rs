use std::path::PathBuf;

use cascadia_compiler::context::AuxInput;
use cascadia_compiler::{HmmCompiler, HmmConfig, HmmModel};
use cascadia_core::Semiring;
use tracing::debug;

use super::files::{Result, fail, prefixed, read, read_list, read_symbols, write};

pub struct HmmArgs {
    pub input: PathBuf,
    pub prefix: String,
    pub hmm_list: bool,
    /// Read only when present.
    pub aux: PathBuf,
    /// Unit table of C; read only when present.
    pub units: PathBuf,
    pub aux_passthrough: bool,
    pub epsilon: String,
    pub semiring: Semiring,
}

pub fn run(args: HmmArgs) {
    if let Err(err) = execute(&args) {
        fail(err);
    }
}

fn execute(args: &HmmArgs) -> Result<()> {
    let text = read(&args.input)?;
    let model = if args.hmm_list {
        HmmModel::parse_list(&text)?
    } else {
        HmmModel::parse_mdef(&text)?
    };
    let aux = if args.aux.exists() {
        read_list(&args.aux)?
    } else {
        debug!(path = %args.aux.display(), "no auxiliary symbols");
        Vec::new()
    };

    let config = HmmConfig::new()
        .epsilon(args.epsilon.as_str())
        .aux_input(if args.aux_passthrough {
            AuxInput::Passthrough
        } else {
            AuxInput::Epsilon
        })
        .semiring(args.semiring);
    let compiler = HmmCompiler::new(config);

    let output = if args.units.exists() {
        let units = read_symbols(&args.units)?;
        compiler.compile_with_units(&model, &aux, units)
    } else {
        compiler.compile(&model, &aux)
    };
    let fst = &output.automaton;

    write(&prefixed(&args.prefix, "h.fst.txt"), &fst.serialize())?;
    write(&prefixed(&args.prefix, "h.isyms"), &fst.input_symbols().to_text())?;
    write(&prefixed(&args.prefix, "h.osyms"), &fst.output_symbols().to_text())?;
    write(&prefixed(&args.prefix, "e.fst.txt"), &output.mapper.serialize())?;
    write(&prefixed(&args.prefix, "e.isyms"), &output.mapper.input_symbols().to_text())?;
    Ok(())
}
