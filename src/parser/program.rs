use super::commands::{is_comment, parse_instruction, split_tokens};
use super::labels::build_label_map;
use super::types::Instruction;
use crate::error::{DebugError, Result};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use tracing::debug;

/// An assembled, immutable instruction stream.
#[derive(Debug, Clone)]
pub struct Program {
    code: Vec<Instruction>,
    breakable: BTreeSet<usize>,
}

impl Program {
    pub fn new(code: Vec<Instruction>) -> Self {
        let breakable = code
            .iter()
            .filter_map(|i| match i {
                Instruction::Line(n) if *n > 0 => Some(*n),
                _ => None,
            })
            .collect();
        Self { code, breakable }
    }

    /// Assemble bytecode text: one instruction per line, labels resolved in a
    /// second pass.
    pub fn parse(text: &str) -> Result<Self> {
        let raw = text
            .lines()
            .enumerate()
            .filter(|(_, l)| !is_comment(l))
            .map(|(i, l)| split_tokens(l, i + 1))
            .collect::<Result<Vec<_>>>()?;

        let labels = build_label_map(&raw)?;
        let code = raw
            .iter()
            .map(|r| parse_instruction(r, &labels))
            .collect::<Result<Vec<_>>>()?;

        debug!(
            instructions = code.len(),
            labels = labels.len(),
            "assembled program"
        );
        Ok(Self::new(code))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| DebugError::ProgramFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    pub fn instruction(&self, pc: usize) -> Option<&Instruction> {
        self.code.get(pc)
    }

    pub fn len(&self) -> usize {
        self.code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }

    /// A line can hold a breakpoint only if some `LINE` marker names it.
    pub fn is_valid_breakpoint_line(&self, line: usize) -> bool {
        self.breakable.contains(&line)
    }

    /// The line of the first `LINE` at or after `pc`; `None` if that marker
    /// has no source line or there is none.
    pub fn upcoming_line(&self, pc: usize) -> Option<usize> {
        let line = self.code.iter().skip(pc).find_map(|i| match i {
            Instruction::Line(n) => Some(*n),
            _ => None,
        })?;
        (line > 0).then_some(line)
    }
}
