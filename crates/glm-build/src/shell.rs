use std::fmt;
use std::path::Path;

use crate::error::BuildError;

/// Header of every generated script: strict mode, no globbing, no word
/// splitting of unquoted expansions.
const SCRIPT_PRELUDE: &str = "#!/bin/sh\nset -ef\nIFS=''\n";

/// One word of a shell command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Word {
    /// Plain text, already quoted so the shell reads it back unchanged.
    Literal(String),
    /// `$NAME`, or `''` when the value is known to be empty so the
    /// argument is not dropped by the shell.
    Var { name: String, empty: bool },
    /// `NAME=$NAME`, as taken by `docker build --build-arg`.
    Assign(String),
}

impl Word {
    pub fn literal(s: impl AsRef<str>) -> Result<Self, BuildError> {
        Ok(Self::Literal(quote(s.as_ref())?))
    }

    /// A file path. Paths that are not valid UTF-8 cannot be spelled in
    /// the script and are rejected.
    pub fn path(path: &Path) -> Result<Self, BuildError> {
        let text = path
            .to_str()
            .ok_or_else(|| BuildError::NonUtf8Path(path.to_path_buf()))?;
        Self::literal(text)
    }

    pub fn var(name: &str, value: &str) -> Result<Self, BuildError> {
        Ok(Self::Var {
            name: checked_name(name)?.to_owned(),
            empty: value.is_empty(),
        })
    }

    pub fn assign(name: &str) -> Result<Self, BuildError> {
        Ok(Self::Assign(checked_name(name)?.to_owned()))
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(s) => f.write_str(s),
            Self::Var { empty: true, .. } => f.write_str("''"),
            Self::Var { name, .. } => write!(f, "${name}"),
            Self::Assign(name) => write!(f, "{name}=${name}"),
        }
    }
}

/// A program and its arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShellCommand {
    words: Vec<Word>,
}

impl ShellCommand {
    /// `program` is written verbatim and must be a plain command name.
    pub fn new(program: &'static str) -> Self {
        Self {
            words: vec![Word::Literal(program.to_owned())],
        }
    }

    pub fn arg(mut self, word: Word) -> Self {
        self.words.push(word);
        self
    }

    pub fn args(mut self, words: impl IntoIterator<Item = Word>) -> Self {
        self.words.extend(words);
        self
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }
}

impl fmt::Display for ShellCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, word) in self.words.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{word}")?;
        }
        Ok(())
    }
}

/// Commands joined with `|`, optionally redirecting the last stdout to a file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pipeline {
    commands: Vec<ShellCommand>,
    stdout_to: Option<Word>,
}

impl Pipeline {
    pub fn new(first: ShellCommand) -> Self {
        Self {
            commands: vec![first],
            stdout_to: None,
        }
    }

    pub fn pipe(mut self, next: ShellCommand) -> Self {
        self.commands.push(next);
        self
    }

    pub fn redirect_to(mut self, path: &Path) -> Result<Self, BuildError> {
        self.stdout_to = Some(Word::path(path)?);
        Ok(self)
    }
}

impl From<ShellCommand> for Pipeline {
    fn from(command: ShellCommand) -> Self {
        Self::new(command)
    }
}

impl fmt::Display for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, command) in self.commands.iter().enumerate() {
            if i > 0 {
                f.write_str(" | ")?;
            }
            write!(f, "{command}")?;
        }
        if let Some(target) = &self.stdout_to {
            write!(f, " > {target}")?;
        }
        Ok(())
    }
}

/// A complete shell script running a single pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    pipeline: Pipeline,
}

impl Script {
    pub fn new(pipeline: impl Into<Pipeline>) -> Self {
        Self {
            pipeline: pipeline.into(),
        }
    }

    /// The command line, without the prelude.
    pub fn command_line(&self) -> String {
        self.pipeline.to_string()
    }

    pub fn render(&self) -> String {
        format!("{SCRIPT_PRELUDE}{}\n", self.pipeline)
    }
}

fn checked_name(name: &str) -> Result<&str, BuildError> {
    let mut chars = name.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    if valid_start && chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        Ok(name)
    } else {
        Err(BuildError::InvalidVariableName(name.to_owned()))
    }
}

/// POSIX quoting of a literal word. Words made only of characters the
/// shell leaves alone stay bare.
fn quote(s: &str) -> Result<String, BuildError> {
    shlex::try_quote(s)
        .map(|quoted| quoted.into_owned())
        .map_err(|e| BuildError::Unquotable {
            word: s.to_owned(),
            reason: e.to_string(),
        })
}
