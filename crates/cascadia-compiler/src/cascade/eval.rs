//! Postfix evaluation over an operand stack.

use std::path::{Path, PathBuf};

use cascadia_core::Semiring;
use indexmap::IndexSet;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::component::{Alphabet, Component, ComponentSet, Mapper, Source};
use super::config::BuildConfig;
use super::error::{SyntaxError, SyntaxErrorKind};
use super::parser::to_postfix;
use super::token::{CascadeToken, OptionSet, Operator, TokenKind};
use super::toolkit::{Command, Pipeline, Program, Step, Toolkit};
use crate::{Error, Result};

/// Intermediate or final automaton on the operand stack.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Artifact {
    pub name: String,
    pub input: Alphabet,
    pub output: Alphabet,
}

impl Artifact {
    fn new(name: String, input: Alphabet, output: Alphabet) -> Result<Self> {
        let valid = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.');
        if !valid {
            return Err(Error::InvalidArtifactName(name));
        }
        Ok(Self {
            name,
            input,
            output,
        })
    }

    fn of(component: &Component) -> Result<Self> {
        Self::new(component.name(), component.input(), component.output())
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct BuildOutcome {
    pub expression: String,
    pub artifact: Artifact,
    pub path: PathBuf,
    /// Every toolkit step in execution order.
    pub steps: Vec<Step>,
}

/// Evaluates build expressions against a declared component set.
#[derive(Clone, Debug)]
pub struct Scheduler {
    components: ComponentSet,
    config: BuildConfig,
}

impl Scheduler {
    pub fn new(components: ComponentSet, config: BuildConfig) -> Self {
        Self { components, config }
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Parse `expression` and run it through `toolkit`.
    ///
    /// Syntax errors and undeclared components are reported before the
    /// toolkit is invoked.
    pub fn build<T: Toolkit + ?Sized>(&self, expression: &str, toolkit: &mut T) -> Result<BuildOutcome> {
        let postfix = to_postfix(expression)?;
        let referenced = self.referenced(&postfix)?;
        info!(expression, semiring = %self.config.semiring, "building cascade");

        let mut eval = Evaluation {
            config: &self.config,
            components: &self.components,
            toolkit,
            steps: Vec::new(),
        };

        if self.config.compile_components {
            for component in referenced {
                eval.compile_component(component)?;
            }
        }

        let artifact = eval.evaluate(&postfix)?;
        let path = self.config.path(&format!("{}.fst", artifact.name));
        info!(artifact = %artifact.name, steps = eval.steps.len(), "cascade built");

        Ok(BuildOutcome {
            expression: expression.to_string(),
            artifact,
            path,
            steps: eval.steps,
        })
    }

    /// Components named in `postfix`, in first-reference order.
    fn referenced(&self, postfix: &[CascadeToken]) -> Result<Vec<&Component>> {
        let mut seen = IndexSet::new();
        for token in postfix {
            if let TokenKind::Component(symbol) = token.kind {
                seen.insert(symbol);
            }
        }
        seen.into_iter()
            .map(|symbol| self.components.get(symbol).ok_or(Error::UnknownComponent(symbol)))
            .collect()
    }
}

struct Evaluation<'a, T: ?Sized> {
    config: &'a BuildConfig,
    components: &'a ComponentSet,
    toolkit: &'a mut T,
    steps: Vec<Step>,
}

impl<T: Toolkit + ?Sized> Evaluation<'_, T> {
    fn evaluate(&mut self, postfix: &[CascadeToken]) -> Result<Artifact> {
        let mut stack: Vec<Artifact> = Vec::new();

        for token in postfix {
            let op = match token.kind {
                TokenKind::Component(symbol) => {
                    let component = self
                        .components
                        .get(symbol)
                        .ok_or(Error::UnknownComponent(symbol))?;
                    stack.push(Artifact::of(component)?);
                    continue;
                }
                TokenKind::Operator(op) => op,
                TokenKind::ParenOpen | TokenKind::ParenClose => continue,
            };

            let result = if op.is_binary() {
                let right = pop(&mut stack, token)?;
                let left = pop(&mut stack, token)?;
                let right = self.map_operand(&left, right)?;
                match op {
                    Operator::Lookahead => self.lookahead(&left, &right)?,
                    _ => self.compose(&left, &right)?,
                }
            } else {
                let operand = pop(&mut stack, token)?;
                match op {
                    Operator::RmEpsilon => self.rmepsilon(&operand)?,
                    _ => self.optimize(op, token.options, &operand)?,
                }
            };
            debug!(operator = %token.name(), result = %result.name, "evaluated");
            stack.push(result);
        }

        match stack.len() {
            1 => Ok(stack.remove(0)),
            0 => Err(SyntaxError::new(SyntaxErrorKind::EmptyExpression, 0..0).into()),
            count => Err(Error::DanglingOperands { count }),
        }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.config.path(&format!("{name}.fst"))
    }

    fn run(&mut self, pipeline: Pipeline) -> Result<()> {
        self.toolkit.run(&pipeline)?;
        self.steps.push(Step::Run(pipeline));
        Ok(())
    }

    fn relabel(&mut self, pairs: PathBuf, fixed: PathBuf) -> Result<()> {
        self.toolkit.complete_relabeling(&pairs, &fixed)?;
        self.steps.push(Step::Relabel { pairs, fixed });
        Ok(())
    }

    /// `fstcompile` of a text source; `None` for prebuilt sources.
    fn compile_source(&self, source: &Source) -> Option<Command> {
        let Source::Text {
            fst,
            isyms,
            osyms,
            acceptor,
        } = source
        else {
            return None;
        };
        let mut command = Command::new(Program::Compile).flag("arc_type", self.config.semiring.arc_type());
        if *acceptor {
            command = command.flag("acceptor", true);
        }
        if let Some(isyms) = isyms {
            command = command.flag("isymbols", isyms.display());
        }
        if let Some(osyms) = osyms {
            command = command.flag("osymbols", osyms.display());
        }
        Some(command.arg(fst))
    }

    fn compile_component(&mut self, component: &Component) -> Result<()> {
        let Some(compile) = self.compile_source(component.source()) else {
            debug!(component = %component.symbol(), "prebuilt, not compiled");
            return Ok(());
        };
        let mut pipeline = Pipeline::new(compile);
        if component.closure {
            pipeline = pipeline.pipe(Command::new(Program::Closure).arg("-"));
        }
        let pipeline = pipeline
            .pipe(
                Command::new(Program::ArcSort)
                    .flag("sort_type", component.sort.as_str())
                    .arg("-"),
            )
            .to(self.path(&component.name()));
        self.run(pipeline)
    }

    /// Compose a mapper in front of `right` when `left` produces a different
    /// alphabet than `right` consumes.
    fn map_operand(&mut self, left: &Artifact, right: Artifact) -> Result<Artifact> {
        if left.output == right.input {
            return Ok(right);
        }
        let components = self.components;
        let Some(mapper) = components.find_mapper(left.output, right.input) else {
            return Err(Error::AlphabetMismatch {
                left: left.name.clone(),
                right: right.name.clone(),
                output: left.output,
                input: right.input,
            });
        };

        let mapped = Artifact::new(format!("{}{}", mapper.name(), right.name), mapper.from, right.output)?;
        info!(mapper = mapper.name(), operand = %right.name, "mapping alphabets");
        let pipeline = self.mapper_pipeline(mapper, &right).to(self.path(&mapped.name));
        self.run(pipeline)?;
        Ok(mapped)
    }

    fn mapper_pipeline(&self, mapper: &Mapper, right: &Artifact) -> Pipeline {
        match self.compile_source(&mapper.source) {
            Some(compile) => Pipeline::new(compile)
                .pipe(Command::new(Program::ArcSort).flag("sort_type", "olabel").arg("-"))
                .pipe(Command::new(Program::Compose).arg("-").arg(self.path(&right.name))),
            None => Pipeline::new(
                Command::new(Program::Compose)
                    .arg(self.path(&mapper.name))
                    .arg(self.path(&right.name)),
            ),
        }
    }

    fn compose(&mut self, left: &Artifact, right: &Artifact) -> Result<Artifact> {
        let result = Artifact::new(format!("{}{}", left.name, right.name), left.input, right.output)?;
        let pipeline = Pipeline::new(
            Command::new(Program::Compose)
                .arg(self.path(&left.name))
                .arg(self.path(&right.name)),
        )
        .to(self.path(&result.name));
        self.run(pipeline)?;
        Ok(result)
    }

    fn lookahead(&mut self, left: &Artifact, right: &Artifact) -> Result<Artifact> {
        let joined = format!("{}{}", left.name, right.name);
        let result = Artifact::new(format!("{joined}.lkhd"), left.input, right.output)?;
        let pairs = self.config.path(&format!("{joined}.rlbl.txt"));
        let fixed = self.config.path(&format!("{joined}.rlbl.fix.txt"));
        let left_lookahead = self.path(&format!("{}.lkhd", left.name));
        let right_relabeled = self.path(&format!("{}.rlbl", right.name));

        self.run(
            Pipeline::new(
                Command::new(Program::Convert)
                    .flag("fst_type", "olabel_lookahead")
                    .flag("save_relabel_opairs", pairs.display())
                    .arg(self.path(&left.name)),
            )
            .to(&left_lookahead),
        )?;
        self.relabel(pairs, fixed.clone())?;
        self.run(
            Pipeline::new(
                Command::new(Program::Relabel)
                    .flag("relabel_ipairs", fixed.display())
                    .arg(self.path(&right.name)),
            )
            .pipe(Command::new(Program::ArcSort).arg("-"))
            .to(&right_relabeled),
        )?;
        self.run(
            Pipeline::new(
                Command::new(Program::Compose)
                    .arg(&left_lookahead)
                    .arg(&right_relabeled),
            )
            .to(self.path(&result.name)),
        )?;
        Ok(result)
    }

    fn optimize(&mut self, op: Operator, options: OptionSet, operand: &Artifact) -> Result<Artifact> {
        let stem = match op {
            Operator::Determinize => "det",
            Operator::Minimize => "min",
            _ => "pu",
        };
        let result = Artifact::new(
            format!("{stem}{}{}", options.suffix(), operand.name),
            operand.input,
            operand.output,
        )?;

        let build = self.config.semiring;
        let semiring = match options.semiring {
            Some(semiring) => semiring,
            None if op == Operator::Determinize && operand.name == "l" && build == Semiring::Log => {
                warn!("determinizing the lexicon in the tropical semiring");
                Semiring::Tropical
            }
            None => build,
        };
        let codex = self.config.path(&format!("{}.codex", result.name));

        let mut stages = Vec::new();
        let mut input = self.path(&operand.name);
        let stdin = Path::new("-");

        if semiring != build {
            stages.push(Command::new(Program::Print).arg(&input));
            stages.push(Command::new(Program::Compile).flag("arc_type", semiring.arc_type()).arg(stdin));
            input = stdin.to_path_buf();
        }
        if options.encodes() {
            let mut encode = Command::new(Program::Encode);
            if options.encode_labels {
                encode = encode.flag("encode_labels", true);
            }
            if options.encode_weights {
                encode = encode.flag("encode_weights", true);
            }
            stages.push(encode.arg(&input).arg(&codex));
            input = stdin.to_path_buf();
        }
        stages.push(match op {
            Operator::Determinize => Command::new(Program::Determinize).arg(&input),
            Operator::Minimize => Command::new(Program::Minimize).arg(&input),
            _ => Command::new(Program::Push).flag("push_weights", true).arg(&input),
        });
        if options.encodes() {
            stages.push(Command::new(Program::Encode).flag("decode", true).arg(stdin).arg(&codex));
        }
        if semiring != build {
            stages.push(Command::new(Program::Print).arg(stdin));
            stages.push(Command::new(Program::Compile).flag("arc_type", build.arc_type()).arg(stdin));
        }

        let pipeline = Pipeline::from_stages(stages).to(self.path(&result.name));
        self.run(pipeline)?;
        Ok(result)
    }

    fn rmepsilon(&mut self, operand: &Artifact) -> Result<Artifact> {
        let result = Artifact::new(format!("rm{}", operand.name), operand.input, operand.output)?;
        let pipeline = Pipeline::new(Command::new(Program::RmEpsilon).arg(self.path(&operand.name)))
            .to(self.path(&result.name));
        self.run(pipeline)?;
        Ok(result)
    }
}

fn pop(stack: &mut Vec<Artifact>, token: &CascadeToken) -> Result<Artifact> {
    stack.pop().ok_or_else(|| Error::MissingOperand {
        operator: token.name(),
    })
}
