//! Process execution seam for external commands.
//!
//! Commands are described as data so that orchestration code can be tested
//! without spawning processes: production code runs an [`Invocation`]
//! through [`SystemCommandExecutor`], tests substitute a mock of
//! [`CommandExecutor`].

use std::process::{Command, Output};

/// A fully described external command invocation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Invocation {
    /// Program name or path.
    pub program: String,
    /// Positional arguments, in order.
    pub args: Vec<String>,
    /// Environment variables set for the child process.
    pub env: Vec<(String, String)>,
}

impl Invocation {
    /// Describe an invocation of `program` with no arguments.
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env: Vec::new(),
        }
    }

    /// Append one argument.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append every argument in `args`.
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set an environment variable for the child process.
    #[must_use]
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }
}

/// Abstraction for running external commands.
#[cfg_attr(test, mockall::automock)]
pub trait CommandExecutor {
    /// Run the command to completion and capture its output.
    ///
    /// # Errors
    ///
    /// Returns an error when the process cannot be spawned or waited on.
    fn run(&self, invocation: &Invocation) -> std::io::Result<Output>;
}

/// Executor backed by [`std::process::Command`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandExecutor;

impl CommandExecutor for SystemCommandExecutor {
    fn run(&self, invocation: &Invocation) -> std::io::Result<Output> {
        Command::new(&invocation.program)
            .args(&invocation.args)
            .envs(
                invocation
                    .env
                    .iter()
                    .map(|(key, value)| (key.as_str(), value.as_str())),
            )
            .output()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_collects_arguments_and_environment() {
        let invocation = Invocation::new("gem")
            .arg("install")
            .args(["--local", "widget.gem"])
            .env("GEM_HOME", "/tmp/gems");
        assert_eq!(invocation.program, "gem");
        assert_eq!(invocation.args, vec!["install", "--local", "widget.gem"]);
        assert_eq!(
            invocation.env,
            vec![("GEM_HOME".to_owned(), "/tmp/gems".to_owned())]
        );
    }

    #[test]
    fn system_executor_captures_output() {
        let output = SystemCommandExecutor
            .run(&Invocation::new("true"))
            .expect("spawn true");
        assert!(output.status.success());
    }
}
