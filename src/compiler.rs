use std::ffi::OsString;
use std::process::Command;

use crate::invocation::Invocation;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Succeeded,
    /// The compiler ran and exited non-zero. `code` is `None` when it was
    /// terminated by a signal.
    Failed { code: Option<i32> },
    /// The compiler process could not be started at all.
    NotStarted { reason: String },
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Succeeded)
    }
}

pub trait ShaderCompiler {
    fn compile(&mut self, invocation: &Invocation) -> Outcome;
}

/// Runs `glslc` as a child process, one blocking run per invocation.
/// Its stdout and stderr are inherited so diagnostics reach the terminal.
#[derive(Debug, Clone)]
pub struct Glslc {
    program: OsString,
}

impl Glslc {
    pub fn with_program(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for Glslc {
    fn default() -> Self {
        Self::with_program("glslc")
    }
}

impl ShaderCompiler for Glslc {
    fn compile(&mut self, invocation: &Invocation) -> Outcome {
        match Command::new(&self.program).args(&invocation.args).status() {
            Ok(status) if status.success() => Outcome::Succeeded,
            Ok(status) => Outcome::Failed {
                code: status.code(),
            },
            Err(e) => Outcome::NotStarted {
                reason: format!("failed to run {:?}: {e}", self.program),
            },
        }
    }
}
