use crate::error::{DebugError, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// One line of source text and whether execution should stop on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    pub text: String,
    pub breakpoint: bool,
}

impl SourceLine {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            breakpoint: false,
        }
    }
}

/// Read a source file into one record per line, in file order.
pub fn load_source(path: &Path) -> Result<Vec<SourceLine>> {
    let contents = fs::read_to_string(path).map_err(|source| DebugError::Source {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(contents.lines().map(SourceLine::new).collect())
}

/// Breakpoint flags over the loaded source, addressed by 1-based line.
#[derive(Debug, Default)]
pub struct Breakpoints {
    lines: Vec<SourceLine>,
}

impl Breakpoints {
    pub fn new(lines: Vec<SourceLine>) -> Self {
        Self { lines }
    }

    pub fn from_text(text: &str) -> Self {
        Self::new(text.lines().map(SourceLine::new).collect())
    }

    pub fn lines(&self) -> &[SourceLine] {
        &self.lines
    }

    pub fn get(&self, line: usize) -> Option<&SourceLine> {
        line.checked_sub(1).and_then(|i| self.lines.get(i))
    }

    pub fn contains(&self, line: usize) -> bool {
        self.get(line).is_some_and(|l| l.breakpoint)
    }

    /// Flag every line, or none of them: the whole batch is checked with
    /// `is_valid` (and against the loaded source) before anything changes.
    pub fn set(&mut self, lines: &[usize], is_valid: impl Fn(usize) -> bool) -> bool {
        if let Some(bad) = lines
            .iter()
            .copied()
            .find(|&l| !is_valid(l) || self.get(l).is_none())
        {
            warn!(line = bad, "rejected breakpoint batch");
            return false;
        }
        for &line in lines {
            self.lines[line - 1].breakpoint = true;
            debug!(line, "breakpoint set");
        }
        true
    }

    /// Clearing a line that has no breakpoint, or does not exist, does nothing.
    pub fn remove(&mut self, lines: &[usize]) {
        for &line in lines {
            if let Some(l) = line.checked_sub(1).and_then(|i| self.lines.get_mut(i)) {
                l.breakpoint = false;
                debug!(line, "breakpoint cleared");
            }
        }
    }

    /// Lines that currently hold a breakpoint, ascending.
    pub fn active(&self) -> Vec<usize> {
        self.lines
            .iter()
            .enumerate()
            .filter(|(_, l)| l.breakpoint)
            .map(|(i, _)| i + 1)
            .collect()
    }
}
