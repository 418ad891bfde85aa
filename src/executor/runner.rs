use super::console::Console;
use crate::debugger::{DebugContext, StepMode, StepRequest};
use crate::error::{DebugError, Result};
use crate::parser::{Category, Instruction};
use serde::Serialize;
use tracing::debug;

/// Built-in operations that have no source line of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Intrinsic {
    Read,
    Write,
}

/// Why `run_debugger` handed control back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "camelCase")]
pub enum Stop {
    /// Stopped on a line with a breakpoint, before its code ran.
    Breakpoint { line: usize },
    /// The requested step finished.
    Step { request: StepRequest },
    /// A step-into reached a `READ` or `WRITE`. The step stays pending.
    Intrinsic { op: Intrinsic },
    /// The program executed `HALT`.
    Halted,
}

/// Execute instructions until a breakpoint, a finished step or `HALT`.
///
/// Calling it again resumes at the next unexecuted instruction.
pub fn run_debugger<C: Console>(ctx: &mut DebugContext<C>) -> Result<Stop> {
    if !ctx.machine.running {
        return Ok(Stop::Halted);
    }
    ctx.intrinsic = false;

    // When parked in front of a LINE, that line was already reported as the
    // stop location, so running it now is not a new line boundary.
    let parked = std::mem::take(&mut ctx.parked);
    let mut first = true;

    loop {
        let pc = ctx.machine.pc;
        let instruction = ctx
            .program
            .instruction(pc)
            .ok_or(DebugError::RanOffEnd { pc })?;
        let new_line = instruction.is_line_marker() && !(first && parked);

        if new_line {
            if !first && matches!(ctx.step, StepMode::In { .. }) {
                ctx.step = StepMode::None;
                ctx.parked = true;
                debug!(pc, "step into arrived at a new line");
                return Ok(Stop::Step {
                    request: StepRequest::StepInto,
                });
            }

            if let Instruction::Line(line) = *instruction {
                if line > 0 && ctx.breakpoints.contains(line) {
                    ctx.step = StepMode::None;
                    execute_one(ctx, pc)?;
                    // stop with the callee's frame fully bound
                    loop {
                        let next_pc = ctx.machine.pc;
                        let entering = ctx.program.instruction(next_pc).is_some_and(|next| {
                            matches!(
                                next.category(),
                                Category::FunctionEntry | Category::ParameterBind
                            )
                        });
                        if !entering {
                            break;
                        }
                        execute_one(ctx, next_pc)?;
                    }
                    debug!(line, "hit breakpoint");
                    return Ok(Stop::Breakpoint { line });
                }
            }
        }

        execute_one(ctx, pc)?;
        first = false;

        if !ctx.machine.running {
            debug!(pc, "program halted");
            return Ok(Stop::Halted);
        }

        let depth = ctx.machine.env.depth();
        let mode = ctx.step;
        let request = match mode {
            StepMode::None => None,
            StepMode::Out { target } => (depth == target).then_some(StepRequest::StepOut),
            StepMode::In { target } => {
                if let Some(op) = intrinsic_of(ctx, pc) {
                    ctx.intrinsic = true;
                    debug!(?op, "stepped into intrinsic");
                    return Ok(Stop::Intrinsic { op });
                }
                (depth == target || new_line).then_some(StepRequest::StepInto)
            }
            StepMode::Over { target } => {
                (depth == target && new_line).then_some(StepRequest::StepOver)
            }
        };

        if let Some(request) = request {
            ctx.step = StepMode::None;
            ctx.park_if_before_line();
            debug!(?request, depth, "step complete");
            return Ok(Stop::Step { request });
        }
    }
}

/// Execute the instruction at `pc`, recording function ranges on entry.
fn execute_one<C: Console>(ctx: &mut DebugContext<C>, pc: usize) -> Result<()> {
    let instruction = ctx
        .program
        .instruction(pc)
        .ok_or(DebugError::RanOffEnd { pc })?;
    if let Instruction::Function { start, end, .. } = instruction {
        ctx.machine.markers.push(*start, *end);
    }
    ctx.machine.execute(instruction)
}

fn intrinsic_of<C>(ctx: &DebugContext<C>, pc: usize) -> Option<Intrinsic> {
    match ctx.program.instruction(pc)?.category() {
        Category::ReadIntrinsic => Some(Intrinsic::Read),
        Category::WriteIntrinsic => Some(Intrinsic::Write),
        _ => None,
    }
}
