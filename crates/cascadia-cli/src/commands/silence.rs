use std::path::PathBuf;

use cascadia_compiler::{SilenceCompiler, SilenceConfig};
use cascadia_core::Semiring;

use super::files::{Result, fail, prefixed, read_symbols, write};

pub struct SilenceArgs {
    pub prefix: String,
    pub words: PathBuf,
    pub silence: String,
    pub probability: f64,
    pub failure: Option<String>,
    pub epsilon: String,
    pub semiring: Semiring,
}

pub fn run(args: SilenceArgs) {
    if let Err(err) = execute(&args) {
        fail(err);
    }
}

fn execute(args: &SilenceArgs) -> Result<()> {
    let words = read_symbols(&args.words)?;

    let mut config = SilenceConfig::new()
        .silence(args.silence.as_str())
        .epsilon(args.epsilon.as_str())
        .probability(args.probability)
        .semiring(args.semiring);
    if let Some(failure) = &args.failure {
        config = config.failure(failure.as_str());
    }
    let fst = SilenceCompiler::new(config).compile(&words);

    write(&prefixed(&args.prefix, "t.fst.txt"), &fst.serialize())?;
    write(&prefixed(&args.prefix, "t.osyms"), &fst.output_symbols().to_text())?;
    Ok(())
}
