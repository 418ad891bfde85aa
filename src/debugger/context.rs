use super::breakpoints::{Breakpoints, SourceLine};
use super::stepping::{StepMode, StepRequest};
use crate::error::Result;
use crate::executor::{run_debugger, Console, Machine, Stop};
use crate::parser::{Instruction, Program};
use serde::Serialize;
use tracing::debug;

/// A variable of the active frame with its current value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Variable {
    pub name: String,
    pub offset: usize,
    /// `None` when the slot has already been popped.
    pub value: Option<i32>,
}

/// One debugging session over a loaded program: the machine state plus the
/// breakpoint table and the pending step.
pub struct DebugContext<C> {
    pub(crate) program: Program,
    pub(crate) breakpoints: Breakpoints,
    pub(crate) machine: Machine<C>,
    pub(crate) step: StepMode,
    /// Stopped directly in front of a `LINE` whose line is reported as current.
    pub(crate) parked: bool,
    pub(crate) intrinsic: bool,
}

impl<C: Console> DebugContext<C> {
    pub fn new(program: Program, source: Vec<SourceLine>, console: C) -> Self {
        Self {
            program,
            breakpoints: Breakpoints::new(source),
            machine: Machine::new(console),
            step: StepMode::None,
            parked: false,
            intrinsic: false,
        }
    }

    /// Run until the next stop. A fatal error ends the session.
    pub fn run(&mut self) -> Result<Stop> {
        let result = run_debugger(self);
        if let Err(e) = &result {
            if e.is_fatal() {
                self.machine.running = false;
            }
        }
        result
    }

    pub fn request_step(&mut self, request: StepRequest) {
        self.step = StepMode::from_request(request, self.machine.env.depth());
        debug!(?request, mode = ?self.step, "step requested");
    }

    pub fn step_mode(&self) -> StepMode {
        self.step
    }

    /// Returns `false`, changing nothing, if any line is not a valid
    /// breakpoint target.
    pub fn set_breakpoints(&mut self, lines: &[usize]) -> bool {
        let program = &self.program;
        self.breakpoints
            .set(lines, |line| program.is_valid_breakpoint_line(line))
    }

    pub fn clear_breakpoints(&mut self, lines: &[usize]) {
        self.breakpoints.remove(lines);
    }

    pub fn breakpoints(&self) -> Vec<usize> {
        self.breakpoints.active()
    }

    pub fn source_lines(&self) -> &[SourceLine] {
        self.breakpoints.lines()
    }

    /// Line range of the innermost function that has been entered.
    pub fn current_function_range(&self) -> Option<(usize, usize)> {
        self.machine.markers.current()
    }

    pub fn current_function(&self) -> &str {
        &self.machine.env.active().function
    }

    /// The source line execution is stopped at; 0 when there is none to show.
    pub fn current_line(&self) -> usize {
        if self.parked {
            return match self.program.instruction(self.machine.pc) {
                Some(Instruction::Line(line)) => *line,
                _ => 0,
            };
        }
        match self.machine.env.active().current_line {
            // a callee with no line yet (an intrinsic) reports 0
            0 if self.depth() == 0 => {
                self.program.upcoming_line(self.machine.pc).unwrap_or(0)
            }
            line => line,
        }
    }

    /// Bound variables of the active frame, by offset.
    pub fn snapshot(&self) -> Vec<Variable> {
        self.machine
            .env
            .active()
            .visible()
            .into_iter()
            .map(|b| Variable {
                name: b.name.clone(),
                offset: b.offset,
                value: self.machine.stack.value_at(b.offset),
            })
            .collect()
    }

    pub fn is_running(&self) -> bool {
        self.machine.running
    }

    /// End the session; later `run` calls report `Halted`.
    pub fn stop(&mut self) {
        self.machine.running = false;
    }

    /// Whether the last stop was a step into `READ`/`WRITE`.
    pub fn is_intrinsic(&self) -> bool {
        self.intrinsic
    }

    pub fn pc(&self) -> usize {
        self.machine.pc
    }

    pub fn depth(&self) -> usize {
        self.machine.env.depth()
    }

    pub fn console(&self) -> &C {
        &self.machine.console
    }

    pub fn console_mut(&mut self) -> &mut C {
        &mut self.machine.console
    }

    /// A step that lands in a frame with no line yet stops in front of the
    /// frame's first `LINE`; report that line and don't count it twice.
    pub(crate) fn park_if_before_line(&mut self) {
        let at_marker = self
            .program
            .instruction(self.machine.pc)
            .is_some_and(Instruction::is_line_marker);
        self.parked = at_marker && self.machine.env.active().current_line == 0;
    }
}
