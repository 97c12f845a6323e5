//! File plumbing shared by the commands.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use cascadia_core::SymbolTable;
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("cannot read `{}`: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("cannot write `{}`: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("`{}`: {source}", path.display())]
    Symbols {
        path: PathBuf,
        source: cascadia_core::Error,
    },

    #[error(transparent)]
    Compile(#[from] cascadia_compiler::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Already rendered against its source.
    #[error("{0}")]
    Diagnostic(String),
}

impl CommandError {
    /// Render span-carrying errors against `source`.
    pub fn with_source(err: cascadia_compiler::Error, source: &str) -> Self {
        match err {
            cascadia_compiler::Error::Syntax(e) => CommandError::Diagnostic(e.render(source)),
            cascadia_compiler::Error::Regex(e) => CommandError::Diagnostic(e.render(source)),
            other => CommandError::Compile(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, CommandError>;

/// Print the error and exit with status 1.
pub fn fail(err: CommandError) -> ! {
    match err {
        CommandError::Diagnostic(rendered) => eprint!("{rendered}"),
        other => eprintln!("error: {other}"),
    }
    std::process::exit(1);
}

pub fn prefixed(prefix: &str, file: &str) -> PathBuf {
    PathBuf::from(format!("{prefix}.{file}"))
}

pub fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| CommandError::Read {
        path: path.to_path_buf(),
        source,
    })
}

pub fn write(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).map_err(|source| CommandError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), "wrote");
    Ok(())
}

pub fn read_symbols(path: &Path) -> Result<SymbolTable> {
    SymbolTable::parse(&read(path)?).map_err(|source| CommandError::Symbols {
        path: path.to_path_buf(),
        source,
    })
}

/// Non-empty trimmed lines.
pub fn read_list(path: &Path) -> Result<Vec<String>> {
    Ok(parse_list(&read(path)?))
}

pub fn parse_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn format_list(items: &[String]) -> String {
    let mut out = String::new();
    for item in items {
        out.push_str(item);
        out.push('\n');
    }
    out
}
