use std::path::PathBuf;

use cascadia_compiler::grammar::build_word_table;
use cascadia_compiler::lexicon::parse_lexicon;
use cascadia_compiler::{ArpaConfig, ArpaModel, GrammarCompiler};
use cascadia_core::Semiring;
use tracing::warn;

use super::files::{Result, fail, prefixed, read, write};

pub struct ArpaArgs {
    pub input: PathBuf,
    pub prefix: String,
    pub lexicon: Option<PathBuf>,
    pub max_order: Option<usize>,
    pub backoff_label: Option<String>,
    pub normalize: bool,
    pub failure: Option<String>,
    pub epsilon: String,
    pub semiring: Semiring,
}

pub fn run(args: ArpaArgs) {
    if let Err(err) = execute(&args) {
        fail(err);
    }
}

fn execute(args: &ArpaArgs) -> Result<()> {
    let model = ArpaModel::parse(&read(&args.input)?)?;

    let mut config = ArpaConfig::new()
        .epsilon(args.epsilon.as_str())
        .semiring(args.semiring)
        .normalize(args.normalize);
    if let Some(max_order) = args.max_order {
        config = config.max_order(max_order);
    }
    if let Some(label) = &args.backoff_label {
        config = config.backoff_label(label.as_str());
    }
    let compiler = GrammarCompiler::new(config);

    let fst = match &args.lexicon {
        Some(path) => {
            let entries = parse_lexicon(&read(path)?)?;
            let table = build_word_table(
                entries.iter().map(|e| e.word.as_str()),
                &model,
                compiler.config(),
                args.failure.as_deref(),
            );
            if !table.missing.is_empty() {
                warn!(count = table.missing.len(), "model words missing from the lexicon");
            }
            compiler.compile_with_symbols(&model, table.symbols)?
        }
        None => compiler.compile(&model)?,
    };

    write(&prefixed(&args.prefix, "g.fst.txt"), &fst.serialize())?;
    write(&prefixed(&args.prefix, "g.ssyms"), &fst.state_symbols())?;
    write(&prefixed(&args.prefix, "words.syms"), &fst.input_symbols().to_text())?;
    Ok(())
}
