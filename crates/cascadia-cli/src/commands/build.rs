use std::path::PathBuf;

use cascadia_compiler::cascade::{ComponentSet, ProcessToolkit, RecordingToolkit, Toolkit};
use cascadia_compiler::{BuildConfig, BuildOutcome, Scheduler};
use cascadia_core::Semiring;

use super::files::{CommandError, Result, fail};

pub struct BuildArgs {
    pub prefix: String,
    pub expression: String,
    pub semiring: Semiring,
    pub logical: bool,
    pub dry_run: bool,
    pub json: bool,
    pub bin_dir: Option<PathBuf>,
    pub compile_components: bool,
}

pub fn run(args: BuildArgs) {
    if let Err(err) = execute(&args) {
        fail(err);
    }
}

fn execute(args: &BuildArgs) -> Result<()> {
    let outcome = if args.dry_run {
        build(args, &mut RecordingToolkit::new())?
    } else {
        let mut toolkit = ProcessToolkit::new();
        if let Some(dir) = &args.bin_dir {
            toolkit = toolkit.bin_dir(dir);
        }
        build(args, &mut toolkit)?
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else if args.dry_run {
        for step in &outcome.steps {
            println!("{step}");
        }
    } else {
        println!("{}", outcome.path.display());
    }
    Ok(())
}

fn build(args: &BuildArgs, toolkit: &mut dyn Toolkit) -> Result<BuildOutcome> {
    let components = ComponentSet::standard(&args.prefix, args.logical);
    let config = BuildConfig::new()
        .prefix(args.prefix.as_str())
        .semiring(args.semiring)
        .compile_components(args.compile_components);
    Scheduler::new(components, config)
        .build(&args.expression, toolkit)
        .map_err(|err| CommandError::with_source(err, &args.expression))
}
