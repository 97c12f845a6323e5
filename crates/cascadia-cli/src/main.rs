mod cli;
mod commands;

use cli::{
    ArpaParams, BuildParams, ContextParams, HmmParams, LexiconParams, RegexParams, SilenceParams,
    build_cli,
};
use tracing_subscriber::EnvFilter;

fn main() {
    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("arpa", m)) => {
            init_logging(m.get_count("verbose"));
            let params = ArpaParams::from_matches(m);
            commands::arpa::run(params.into());
        }
        Some(("lexicon", m)) => {
            init_logging(m.get_count("verbose"));
            let params = LexiconParams::from_matches(m);
            commands::lexicon::run(params.into());
        }
        Some(("context", m)) => {
            init_logging(m.get_count("verbose"));
            let params = ContextParams::from_matches(m);
            commands::context::run(params.into());
        }
        Some(("hmm", m)) => {
            init_logging(m.get_count("verbose"));
            let params = HmmParams::from_matches(m);
            commands::hmm::run(params.into());
        }
        Some(("silence", m)) => {
            init_logging(m.get_count("verbose"));
            let params = SilenceParams::from_matches(m);
            commands::silence::run(params.into());
        }
        Some(("regex", m)) => {
            init_logging(m.get_count("verbose"));
            let params = RegexParams::from_matches(m);
            commands::regex::run(params.into());
        }
        Some(("build", m)) => {
            init_logging(m.get_count("verbose"));
            let params = BuildParams::from_matches(m);
            commands::build::run(params.into());
        }
        _ => unreachable!("clap should have caught this"),
    }
}

/// Log to stderr; `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "cascadia=info",
        1 => "cascadia=debug",
        _ => "cascadia=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
