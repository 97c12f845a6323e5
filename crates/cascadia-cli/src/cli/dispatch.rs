//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! `*Params` structs mirror the command `*Args` but are populated from clap.
//! Defaults that depend on `--prefix` are resolved in the `Into<*Args>`
//! impls, so the command handlers only see concrete paths.

use std::path::PathBuf;

use cascadia_core::Semiring;
use clap::ArgMatches;

use crate::commands::arpa::ArpaArgs;
use crate::commands::build::BuildArgs;
use crate::commands::context::ContextArgs;
use crate::commands::hmm::HmmArgs;
use crate::commands::lexicon::LexiconArgs;
use crate::commands::regex::RegexArgs;
use crate::commands::silence::SilenceArgs;

pub struct ArpaParams {
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

impl ArpaParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            input: input(m),
            prefix: prefix(m),
            lexicon: m.get_one::<PathBuf>("lexicon").cloned(),
            max_order: m.get_one::<usize>("max_order").copied(),
            backoff_label: m.get_one::<String>("backoff_label").cloned(),
            normalize: m.get_flag("normalize"),
            failure: m.get_one::<String>("failure").cloned(),
            epsilon: epsilon(m),
            semiring: semiring(m),
        }
    }
}

impl From<ArpaParams> for ArpaArgs {
    fn from(p: ArpaParams) -> Self {
        Self {
            input: p.input,
            prefix: p.prefix,
            lexicon: p.lexicon,
            max_order: p.max_order,
            backoff_label: p.backoff_label,
            normalize: p.normalize,
            failure: p.failure,
            epsilon: p.epsilon,
            semiring: p.semiring,
        }
    }
}

pub struct LexiconParams {
    pub input: PathBuf,
    pub prefix: String,
    pub words: Option<PathBuf>,
    pub positional: bool,
    pub aux_prefix: String,
    pub failure: Option<String>,
    pub epsilon: String,
    pub semiring: Semiring,
}

impl LexiconParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            input: input(m),
            prefix: prefix(m),
            words: m.get_one::<PathBuf>("words").cloned(),
            positional: m.get_flag("positional"),
            aux_prefix: m
                .get_one::<String>("aux_prefix")
                .cloned()
                .unwrap_or_else(|| "#".to_string()),
            failure: m.get_one::<String>("failure").cloned(),
            epsilon: epsilon(m),
            semiring: semiring(m),
        }
    }
}

impl From<LexiconParams> for LexiconArgs {
    fn from(p: LexiconParams) -> Self {
        Self {
            input: p.input,
            words: p.words,
            prefix: p.prefix,
            positional: p.positional,
            aux_prefix: p.aux_prefix,
            failure: p.failure,
            epsilon: p.epsilon,
            semiring: p.semiring,
        }
    }
}

pub struct ContextParams {
    pub prefix: String,
    pub phones: Option<PathBuf>,
    pub aux: Option<PathBuf>,
    pub tied: Option<PathBuf>,
    pub mdef: bool,
    pub nondeterministic: bool,
    pub no_invert: bool,
    pub aux_epsilon: bool,
    pub logical: bool,
    pub positional: bool,
    pub silence: String,
    pub epsilon: String,
    pub semiring: Semiring,
}

impl ContextParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            prefix: prefix(m),
            phones: m.get_one::<PathBuf>("phones").cloned(),
            aux: m.get_one::<PathBuf>("aux").cloned(),
            tied: m.get_one::<PathBuf>("tied").cloned(),
            mdef: m.get_flag("mdef"),
            nondeterministic: m.get_flag("nondeterministic"),
            no_invert: m.get_flag("no_invert"),
            aux_epsilon: m.get_flag("aux_epsilon"),
            logical: m.get_flag("logical"),
            positional: m.get_flag("positional"),
            silence: silence(m),
            epsilon: epsilon(m),
            semiring: semiring(m),
        }
    }
}

impl From<ContextParams> for ContextArgs {
    fn from(p: ContextParams) -> Self {
        let phones = p.phones.unwrap_or_else(|| prefixed(&p.prefix, "phones"));
        let aux = p.aux.unwrap_or_else(|| prefixed(&p.prefix, "aux"));
        Self {
            phones,
            aux,
            phone_symbols: prefixed(&p.prefix, "l.isyms"),
            prefix: p.prefix,
            tied: p.tied,
            mdef: p.mdef,
            nondeterministic: p.nondeterministic,
            inverted: !p.no_invert,
            aux_epsilon: p.aux_epsilon,
            logical: p.logical,
            positional: p.positional,
            silence: p.silence,
            epsilon: p.epsilon,
            semiring: p.semiring,
        }
    }
}

pub struct HmmParams {
    pub input: PathBuf,
    pub prefix: String,
    pub hmm_list: bool,
    pub aux: Option<PathBuf>,
    pub units: Option<PathBuf>,
    pub aux_passthrough: bool,
    pub epsilon: String,
    pub semiring: Semiring,
}

impl HmmParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            input: input(m),
            prefix: prefix(m),
            hmm_list: m.get_flag("hmm_list"),
            aux: m.get_one::<PathBuf>("aux").cloned(),
            units: m.get_one::<PathBuf>("units").cloned(),
            aux_passthrough: m.get_flag("aux_passthrough"),
            epsilon: epsilon(m),
            semiring: semiring(m),
        }
    }
}

impl From<HmmParams> for HmmArgs {
    fn from(p: HmmParams) -> Self {
        let aux = p.aux.unwrap_or_else(|| prefixed(&p.prefix, "aux"));
        let units = p.units.unwrap_or_else(|| prefixed(&p.prefix, "c.isyms"));
        Self {
            input: p.input,
            aux,
            units,
            prefix: p.prefix,
            hmm_list: p.hmm_list,
            aux_passthrough: p.aux_passthrough,
            epsilon: p.epsilon,
            semiring: p.semiring,
        }
    }
}

pub struct SilenceParams {
    pub prefix: String,
    pub words: Option<PathBuf>,
    pub silence: String,
    pub probability: f64,
    pub failure: Option<String>,
    pub epsilon: String,
    pub semiring: Semiring,
}

impl SilenceParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            prefix: prefix(m),
            words: m.get_one::<PathBuf>("words").cloned(),
            silence: silence(m),
            probability: m.get_one::<f64>("probability").copied().unwrap_or(0.117),
            failure: m.get_one::<String>("failure").cloned(),
            epsilon: epsilon(m),
            semiring: semiring(m),
        }
    }
}

impl From<SilenceParams> for SilenceArgs {
    fn from(p: SilenceParams) -> Self {
        let words = p.words.unwrap_or_else(|| prefixed(&p.prefix, "words.syms"));
        Self {
            words,
            prefix: p.prefix,
            silence: p.silence,
            probability: p.probability,
            failure: p.failure,
            epsilon: p.epsilon,
            semiring: p.semiring,
        }
    }
}

pub struct RegexParams {
    pub prefix: String,
    pub expression: Option<String>,
    pub file: Option<PathBuf>,
    pub words: Option<PathBuf>,
    pub epsilon: String,
    pub semiring: Semiring,
}

impl RegexParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            prefix: prefix(m),
            expression: m.get_one::<String>("expression").cloned(),
            file: m.get_one::<PathBuf>("file").cloned(),
            words: m.get_one::<PathBuf>("words").cloned(),
            epsilon: epsilon(m),
            semiring: semiring(m),
        }
    }
}

impl From<RegexParams> for RegexArgs {
    fn from(p: RegexParams) -> Self {
        let words = p.words.unwrap_or_else(|| prefixed(&p.prefix, "words.syms"));
        Self {
            words,
            prefix: p.prefix,
            expression: p.expression,
            file: p.file,
            epsilon: p.epsilon,
            semiring: p.semiring,
        }
    }
}

pub struct BuildParams {
    pub prefix: String,
    pub expression: String,
    pub semiring: Semiring,
    pub logical: bool,
    pub dry_run: bool,
    pub json: bool,
    pub bin_dir: Option<PathBuf>,
    pub no_compile: bool,
}

impl BuildParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            prefix: prefix(m),
            expression: m.get_one::<String>("expression").cloned().unwrap_or_default(),
            semiring: semiring(m),
            logical: m.get_flag("logical"),
            dry_run: m.get_flag("dry_run"),
            json: m.get_flag("json"),
            bin_dir: m.get_one::<PathBuf>("bin_dir").cloned(),
            no_compile: m.get_flag("no_compile"),
        }
    }
}

impl From<BuildParams> for BuildArgs {
    fn from(p: BuildParams) -> Self {
        Self {
            prefix: p.prefix,
            expression: p.expression,
            semiring: p.semiring,
            logical: p.logical,
            dry_run: p.dry_run,
            json: p.json,
            bin_dir: p.bin_dir,
            compile_components: !p.no_compile,
        }
    }
}

fn input(m: &ArgMatches) -> PathBuf {
    m.get_one::<PathBuf>("input").cloned().unwrap_or_default()
}

fn prefix(m: &ArgMatches) -> String {
    m.get_one::<String>("prefix")
        .cloned()
        .unwrap_or_else(|| "cascade".to_string())
}

fn epsilon(m: &ArgMatches) -> String {
    m.get_one::<String>("epsilon")
        .cloned()
        .unwrap_or_else(|| "<eps>".to_string())
}

fn silence(m: &ArgMatches) -> String {
    m.get_one::<String>("silence").cloned().unwrap_or_default()
}

fn semiring(m: &ArgMatches) -> Semiring {
    m.get_one::<String>("semiring")
        .and_then(|s| Semiring::from_name(s))
        .unwrap_or_default()
}

fn prefixed(prefix: &str, file: &str) -> PathBuf {
    PathBuf::from(format!("{prefix}.{file}"))
}
