//! Typed commands for the external finite-state toolkit.
//!
//! Operations the scheduler needs are expressed as [`Pipeline`]s of
//! [`Command`]s and executed through the [`Toolkit`] trait, so the same
//! evaluation can run OpenFst binaries or only record what it would run.

use std::fmt;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::process::{Child, Stdio};

use serde::Serialize;
use tracing::{debug, info};

use super::relabel::{complete_relabeling, format_pairs, parse_pairs};
use crate::{Error, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Program {
    #[serde(rename = "fstcompile")]
    Compile,
    #[serde(rename = "fstarcsort")]
    ArcSort,
    #[serde(rename = "fstclosure")]
    Closure,
    #[serde(rename = "fstcompose")]
    Compose,
    #[serde(rename = "fstconvert")]
    Convert,
    #[serde(rename = "fstrelabel")]
    Relabel,
    #[serde(rename = "fstdeterminize")]
    Determinize,
    #[serde(rename = "fstminimize")]
    Minimize,
    #[serde(rename = "fstpush")]
    Push,
    #[serde(rename = "fstrmepsilon")]
    RmEpsilon,
    #[serde(rename = "fstencode")]
    Encode,
    #[serde(rename = "fstprint")]
    Print,
}

impl Program {
    pub fn binary(self) -> &'static str {
        match self {
            Program::Compile => "fstcompile",
            Program::ArcSort => "fstarcsort",
            Program::Closure => "fstclosure",
            Program::Compose => "fstcompose",
            Program::Convert => "fstconvert",
            Program::Relabel => "fstrelabel",
            Program::Determinize => "fstdeterminize",
            Program::Minimize => "fstminimize",
            Program::Push => "fstpush",
            Program::RmEpsilon => "fstrmepsilon",
            Program::Encode => "fstencode",
            Program::Print => "fstprint",
        }
    }
}

/// One toolkit invocation: a program and its argument vector.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Command {
    pub program: Program,
    pub args: Vec<String>,
}

impl Command {
    pub fn new(program: Program) -> Self {
        Self {
            program,
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, value: impl AsRef<Path>) -> Self {
        self.args.push(value.as_ref().display().to_string());
        self
    }

    /// `--name=value`
    pub fn flag(mut self, name: &str, value: impl fmt::Display) -> Self {
        self.args.push(format!("--{name}={value}"));
        self
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.program.binary())?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Commands connected stdout to stdin; the last one optionally writes to a
/// file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Pipeline {
    pub stages: Vec<Command>,
    pub output: Option<PathBuf>,
}

impl Pipeline {
    pub fn new(first: Command) -> Self {
        Self {
            stages: vec![first],
            output: None,
        }
    }

    pub fn from_stages(stages: Vec<Command>) -> Self {
        Self {
            stages,
            output: None,
        }
    }

    pub fn pipe(mut self, next: Command) -> Self {
        self.stages.push(next);
        self
    }

    pub fn to(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = Some(path.into());
        self
    }
}

impl fmt::Display for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, stage) in self.stages.iter().enumerate() {
            if i > 0 {
                f.write_str(" | ")?;
            }
            write!(f, "{stage}")?;
        }
        if let Some(output) = &self.output {
            write!(f, " > {}", output.display())?;
        }
        Ok(())
    }
}

/// A unit of work the scheduler asked the toolkit to perform.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum Step {
    Run(Pipeline),
    Relabel { pairs: PathBuf, fixed: PathBuf },
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Run(pipeline) => write!(f, "{pipeline}"),
            Step::Relabel { pairs, fixed } => {
                write!(f, "relabel {} > {}", pairs.display(), fixed.display())
            }
        }
    }
}

pub trait Toolkit {
    fn run(&mut self, pipeline: &Pipeline) -> Result<()>;

    /// Read relabel pairs from `pairs`, complete them into a bijection and
    /// write the result to `fixed`.
    fn complete_relabeling(&mut self, pairs: &Path, fixed: &Path) -> Result<()>;
}

/// Runs OpenFst binaries as child processes.
#[derive(Clone, Debug, Default)]
pub struct ProcessToolkit {
    bin_dir: Option<PathBuf>,
}

impl ProcessToolkit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory holding the binaries; `PATH` lookup otherwise.
    pub fn bin_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.bin_dir = Some(dir.into());
        self
    }

    fn executable(&self, program: Program) -> PathBuf {
        match &self.bin_dir {
            Some(dir) => dir.join(program.binary()),
            None => PathBuf::from(program.binary()),
        }
    }

    fn spawn_all(&self, pipeline: &Pipeline) -> Result<Vec<(Program, Child)>> {
        let mut children: Vec<(Program, Child)> = Vec::with_capacity(pipeline.stages.len());
        let last = pipeline.stages.len().saturating_sub(1);

        for (i, stage) in pipeline.stages.iter().enumerate() {
            let mut command = std::process::Command::new(self.executable(stage.program));
            command.args(&stage.args);

            let upstream = children.last_mut().and_then(|(_, child)| child.stdout.take());
            if let Some(stdout) = upstream {
                command.stdin(Stdio::from(stdout));
            }

            if i < last {
                command.stdout(Stdio::piped());
            } else if let Some(output) = &pipeline.output {
                match File::create(output) {
                    Ok(file) => {
                        command.stdout(Stdio::from(file));
                    }
                    Err(err) => {
                        reap(children);
                        return Err(err.into());
                    }
                }
            }

            match command.spawn() {
                Ok(child) => children.push((stage.program, child)),
                Err(source) => {
                    reap(children);
                    return Err(Error::ToolkitSpawn {
                        program: stage.program.binary().to_string(),
                        source,
                    });
                }
            }
        }

        Ok(children)
    }
}

/// Stop children of a pipeline that could not be completed.
fn reap(children: Vec<(Program, Child)>) {
    for (_, mut child) in children {
        let _ = child.kill();
        let _ = child.wait();
    }
}

impl Toolkit for ProcessToolkit {
    fn run(&mut self, pipeline: &Pipeline) -> Result<()> {
        info!(%pipeline, "running");
        let children = self.spawn_all(pipeline)?;

        let mut failure: Option<Error> = None;
        for (program, mut child) in children {
            let status = child.wait()?;
            if !status.success() && failure.is_none() {
                failure = Some(Error::ToolkitFailed {
                    program: program.binary().to_string(),
                    status: status.to_string(),
                });
            }
        }

        match failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn complete_relabeling(&mut self, pairs: &Path, fixed: &Path) -> Result<()> {
        let original = parse_pairs(&fs::read_to_string(pairs)?)?;
        let completed = complete_relabeling(&original);
        debug!(
            original = original.len(),
            added = completed.len() - original.len(),
            "completed relabel pairs"
        );
        fs::write(fixed, format_pairs(&completed))?;
        Ok(())
    }
}

/// Records every step without running anything.
#[derive(Clone, Debug, Default)]
pub struct RecordingToolkit {
    steps: Vec<Step>,
}

impl RecordingToolkit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Steps rendered one per line.
    pub fn script(&self) -> String {
        let lines: Vec<String> = self.steps.iter().map(Step::to_string).collect();
        lines.join("\n")
    }
}

impl Toolkit for RecordingToolkit {
    fn run(&mut self, pipeline: &Pipeline) -> Result<()> {
        self.steps.push(Step::Run(pipeline.clone()));
        Ok(())
    }

    fn complete_relabeling(&mut self, pairs: &Path, fixed: &Path) -> Result<()> {
        self.steps.push(Step::Relabel {
            pairs: pairs.to_path_buf(),
            fixed: fixed.to_path_buf(),
        });
        Ok(())
    }
}
