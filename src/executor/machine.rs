use super::console::Console;
use super::runtime_stack::RunTimeStack;
use crate::debugger::{CallDepthMarkers, EnvironmentStack};
use crate::error::{DebugError, Result};
use crate::parser::{BinaryOp, Instruction};
use tracing::{debug, trace};

/// Everything an instruction can touch while it runs.
#[derive(Debug)]
pub struct Machine<C> {
    pub pc: usize,
    pub stack: RunTimeStack,
    pub return_addresses: Vec<usize>,
    pub env: EnvironmentStack,
    pub markers: CallDepthMarkers,
    pub running: bool,
    pub dump: bool,
    pub console: C,
}

impl<C: Console> Machine<C> {
    pub fn new(console: C) -> Self {
        Self {
            pc: 0,
            stack: RunTimeStack::new(),
            return_addresses: Vec::new(),
            env: EnvironmentStack::new(),
            markers: CallDepthMarkers::default(),
            running: true,
            dump: false,
            console,
        }
    }

    /// Run one instruction at the current pc, then move past it.
    pub fn execute(&mut self, instruction: &Instruction) -> Result<()> {
        instruction.execute(self)?;
        self.pc += 1;
        trace!(pc = self.pc, %instruction, depth = self.env.depth(), "executed");
        if self.dump {
            debug!(%instruction, stack = %self.stack, "dump");
        }
        Ok(())
    }

    fn pop(&mut self) -> Result<i32> {
        self.stack
            .pop()
            .ok_or(DebugError::StackUnderflow { pc: self.pc })
    }
}

impl Instruction {
    /// Apply this instruction's effect. Control transfers leave `pc` on the
    /// target `LABEL`; the caller's unconditional advance steps past it.
    pub fn execute<C: Console>(&self, vm: &mut Machine<C>) -> Result<()> {
        let pc = vm.pc;
        match self {
            Self::Halt => vm.running = false,
            Self::Pop(n) => {
                vm.stack.pop_n(*n);
                vm.env.unbind(vm.stack.frame_len());
            }
            Self::FalseBranch(target) => {
                if vm.pop()? == 0 {
                    vm.pc = target.address;
                }
            }
            Self::Goto(target) => vm.pc = target.address,
            Self::Store { offset, .. } => {
                vm.stack
                    .store(*offset)
                    .ok_or(DebugError::BadOffset { pc, offset: *offset })?;
            }
            Self::Load { offset, .. } => {
                vm.stack
                    .load(*offset)
                    .ok_or(DebugError::BadOffset { pc, offset: *offset })?;
            }
            Self::Lit { value, name } => {
                vm.stack.push(*value);
                if let Some(name) = name {
                    let offset = vm.stack.frame_len() - 1;
                    vm.env.bind(name, offset);
                }
            }
            Self::Args(n) => {
                vm.stack
                    .new_frame_at(*n)
                    .ok_or(DebugError::StackUnderflow { pc })?;
            }
            Self::Call(target) => {
                vm.return_addresses.push(pc);
                vm.env.enter_frame();
                vm.pc = target.address;
            }
            Self::Return { .. } => {
                let address = vm
                    .return_addresses
                    .pop()
                    .ok_or(DebugError::ReturnAddressUnderflow { pc })?;
                vm.stack
                    .pop_frame()
                    .ok_or(DebugError::StackUnderflow { pc })?;
                vm.env.exit_frame(pc)?;
                vm.markers.pop(pc)?;
                vm.pc = address;
            }
            Self::Bop(op) => {
                let rhs = vm.pop()?;
                let lhs = vm.pop()?;
                let value = apply(*op, lhs, rhs).ok_or(DebugError::DivisionByZero { pc })?;
                vm.stack.push(value);
            }
            Self::Read => {
                let value = vm.console.read_int()?;
                vm.stack.push(value);
            }
            Self::Write => {
                let value = vm
                    .stack
                    .peek()
                    .ok_or(DebugError::StackUnderflow { pc })?;
                vm.console.write_int(value)?;
            }
            Self::Label(_) => {}
            Self::Line(line) => vm.env.set_current_line(*line),
            Self::Function { name, start, .. } => vm.env.set_function(name, *start),
            Self::Formal { name, offset } => vm.env.bind(name, *offset),
            Self::Dump(on) => vm.dump = *on,
        }
        Ok(())
    }
}

fn apply(op: BinaryOp, lhs: i32, rhs: i32) -> Option<i32> {
    let truth = |b: bool| i32::from(b);
    let value = match op {
        BinaryOp::Add => lhs.wrapping_add(rhs),
        BinaryOp::Sub => lhs.wrapping_sub(rhs),
        BinaryOp::Mul => lhs.wrapping_mul(rhs),
        BinaryOp::Div => lhs.checked_div(rhs)?,
        BinaryOp::Eq => truth(lhs == rhs),
        BinaryOp::Ne => truth(lhs != rhs),
        BinaryOp::Lt => truth(lhs < rhs),
        BinaryOp::Le => truth(lhs <= rhs),
        BinaryOp::Gt => truth(lhs > rhs),
        BinaryOp::Ge => truth(lhs >= rhs),
        BinaryOp::And => truth(lhs != 0 && rhs != 0),
        BinaryOp::Or => truth(lhs != 0 || rhs != 0),
    };
    Some(value)
}
