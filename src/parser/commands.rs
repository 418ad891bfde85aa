use super::types::{BinaryOp, Instruction, Target};
use crate::error::{DebugError, Result};
use std::collections::HashMap;

/// One tokenized bytecode line, remembering where it came from.
#[derive(Debug, Clone)]
pub struct RawLine {
    pub line: usize,
    pub tokens: Vec<String>,
}

impl RawLine {
    pub fn opcode(&self) -> String {
        self.tokens
            .first()
            .map(|t| t.to_uppercase())
            .unwrap_or_default()
    }
}

/// Check if a bytecode line carries no instruction
pub fn is_comment(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with(';')
}

/// Split a bytecode line into tokens, honoring quotes.
pub fn split_tokens(text: &str, line: usize) -> Result<RawLine> {
    let tokens = shlex::split(text.trim()).ok_or_else(|| DebugError::Program {
        line,
        message: format!("unbalanced quotes in {text:?}"),
    })?;
    Ok(RawLine { line, tokens })
}

/// Decode one tokenized line. Branch targets are looked up in `labels`.
pub fn parse_instruction(raw: &RawLine, labels: &HashMap<String, usize>) -> Result<Instruction> {
    let err = |message: String| DebugError::Program {
        line: raw.line,
        message,
    };
    let args = &raw.tokens[1..];
    let opcode = raw.opcode();

    let arg = |i: usize| -> Result<&str> {
        args.get(i)
            .map(String::as_str)
            .ok_or_else(|| err(format!("{opcode} is missing operand {}", i + 1)))
    };
    let optional = |i: usize| args.get(i).cloned();
    let number = |i: usize| -> Result<usize> {
        let tok = arg(i)?;
        tok.parse::<usize>()
            .map_err(|_| err(format!("{opcode}: expected a count or offset, got {tok:?}")))
    };
    let line_number = |i: usize| -> Result<usize> {
        let tok = arg(i)?;
        let n = tok
            .parse::<i64>()
            .map_err(|_| err(format!("{opcode}: expected a line number, got {tok:?}")))?;
        Ok(usize::try_from(n).unwrap_or(0))
    };
    let target = |i: usize| -> Result<Target> {
        let label = arg(i)?.to_string();
        match labels.get(&label) {
            Some(&address) => Ok(Target { label, address }),
            None => Err(err(format!("{opcode} to unknown label {label:?}"))),
        }
    };

    let instruction = match opcode.as_str() {
        "HALT" => Instruction::Halt,
        "POP" => Instruction::Pop(number(0)?),
        "FALSEBRANCH" => Instruction::FalseBranch(target(0)?),
        "GOTO" => Instruction::Goto(target(0)?),
        "STORE" => Instruction::Store {
            offset: number(0)?,
            name: optional(1),
        },
        "LOAD" => Instruction::Load {
            offset: number(0)?,
            name: optional(1),
        },
        "LIT" => {
            let tok = arg(0)?;
            let value = tok
                .parse::<i32>()
                .map_err(|_| err(format!("LIT: expected an integer, got {tok:?}")))?;
            Instruction::Lit {
                value,
                name: optional(1),
            }
        }
        "ARGS" => Instruction::Args(number(0)?),
        "CALL" => Instruction::Call(target(0)?),
        "RETURN" => Instruction::Return { label: optional(0) },
        "BOP" => {
            let tok = arg(0)?;
            let op = BinaryOp::parse(tok)
                .ok_or_else(|| err(format!("BOP: unknown operator {tok:?}")))?;
            Instruction::Bop(op)
        }
        "READ" => Instruction::Read,
        "WRITE" => Instruction::Write,
        "LABEL" => Instruction::Label(arg(0)?.to_string()),
        "LINE" => Instruction::Line(line_number(0)?),
        "FUNCTION" => Instruction::Function {
            name: arg(0)?.to_string(),
            start: line_number(1)?,
            end: line_number(2)?,
        },
        "FORMAL" => Instruction::Formal {
            name: arg(0)?.to_string(),
            offset: number(1)?,
        },
        "DUMP" => match arg(0)?.to_uppercase().as_str() {
            "ON" => Instruction::Dump(true),
            "OFF" => Instruction::Dump(false),
            other => return Err(err(format!("DUMP expects ON or OFF, got {other:?}"))),
        },
        "" => return Err(err("empty instruction".to_string())),
        other => return Err(err(format!("unknown opcode {other:?}"))),
    };

    Ok(instruction)
}
