use crate::debugger::{load_source, DebugContext, StepRequest};
use crate::error::{DebugError, Result};
use crate::executor::Console;
use crate::parser::Program;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Launch arguments, usually read from a JSON file:
///
/// ```json
/// { "program": "fib.x.cod", "breakpoints": [3, 7], "stopOnEntry": true }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LaunchConfig {
    pub program: PathBuf,
    /// Source text shown alongside the bytecode. Defaults to the program
    /// path without its `.cod` extension.
    pub source: Option<PathBuf>,
    pub breakpoints: Vec<usize>,
    pub stop_on_entry: bool,
}

impl LaunchConfig {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            ..Self::default()
        }
    }

    pub fn from_json(text: &str, path: &Path) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| DebugError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| DebugError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_json(&text, path)
    }

    pub fn source_path(&self) -> PathBuf {
        match &self.source {
            Some(path) => path.clone(),
            None if self.program.extension().is_some_and(|e| e == "cod") => {
                self.program.with_extension("")
            }
            None => self.program.clone(),
        }
    }

    /// Load program and source, then apply the configured breakpoints one
    /// at a time so a bad line only drops itself.
    pub fn launch<C: Console>(&self, console: C) -> Result<DebugContext<C>> {
        let program = Program::load(&self.program)?;
        let source = load_source(&self.source_path())?;
        info!(
            program = %self.program.display(),
            instructions = program.len(),
            source_lines = source.len(),
            "launching"
        );

        let mut ctx = DebugContext::new(program, source, console);
        for &line in &self.breakpoints {
            if !ctx.set_breakpoints(&[line]) {
                warn!(line, "ignoring breakpoint on a line with no code");
            }
        }
        if self.stop_on_entry {
            ctx.request_step(StepRequest::StepInto);
        }
        Ok(ctx)
    }
}
