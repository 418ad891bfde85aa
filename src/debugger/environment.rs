use crate::error::{DebugError, Result};
use tracing::debug;

/// A variable visible in a frame, addressed relative to that frame's base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub name: String,
    pub offset: usize,
}

/// The live scope of one function activation.
#[derive(Debug, Clone, Default)]
pub struct CallFrame {
    pub function: String,
    /// Last source line reached in this frame; 0 until a `LINE` runs here.
    pub current_line: usize,
    symbols: Vec<Binding>,
}

impl CallFrame {
    pub fn symbols(&self) -> &[Binding] {
        &self.symbols
    }

    /// Visible bindings ordered by offset. A rebound name hides its older slot.
    pub fn visible(&self) -> Vec<&Binding> {
        let mut out: Vec<&Binding> = Vec::new();
        for binding in self.symbols.iter().rev() {
            if !out.iter().any(|b| b.name == binding.name) {
                out.push(binding);
            }
        }
        out.sort_by_key(|b| b.offset);
        out
    }
}

/// Stack of suspended frames plus the active one. Depth counts only the
/// suspended frames, so the root frame sits at depth 0.
#[derive(Debug, Default)]
pub struct EnvironmentStack {
    frames: Vec<CallFrame>,
    active: CallFrame,
}

impl EnvironmentStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn active(&self) -> &CallFrame {
        &self.active
    }

    pub fn enter_frame(&mut self) {
        let caller = std::mem::take(&mut self.active);
        self.frames.push(caller);
        debug!(depth = self.frames.len(), "entered frame");
    }

    /// Drop the active frame and resume its caller. `pc` is only for reporting.
    pub fn exit_frame(&mut self, pc: usize) -> Result<CallFrame> {
        let caller = self
            .frames
            .pop()
            .ok_or(DebugError::FrameUnderflow { pc })?;
        let finished = std::mem::replace(&mut self.active, caller);
        debug!(
            depth = self.frames.len(),
            function = %finished.function,
            "left frame"
        );
        Ok(finished)
    }

    /// Name the active frame and move it to the function's first line.
    pub fn set_function(&mut self, name: &str, start: usize) {
        self.active.function = name.to_string();
        self.active.current_line = start;
    }

    pub fn set_current_line(&mut self, line: usize) {
        self.active.current_line = line;
    }

    pub fn bind(&mut self, name: &str, offset: usize) {
        self.active.symbols.push(Binding {
            name: name.to_string(),
            offset,
        });
    }

    /// Forget every binding stored at or beyond `offset`.
    pub fn unbind(&mut self, offset: usize) {
        self.active.symbols.retain(|b| b.offset < offset);
    }
}

/// Line ranges of the functions currently executing, innermost last.
/// Kept apart from the environment stack: this only answers "which
/// function body is being shown".
#[derive(Debug, Default)]
pub struct CallDepthMarkers {
    ranges: Vec<(usize, usize)>,
}

impl CallDepthMarkers {
    pub fn push(&mut self, start: usize, end: usize) {
        self.ranges.push((start, end));
    }

    pub fn pop(&mut self, pc: usize) -> Result<(usize, usize)> {
        self.ranges
            .pop()
            .ok_or(DebugError::DepthMarkerUnderflow { pc })
    }

    pub fn current(&self) -> Option<(usize, usize)> {
        self.ranges.last().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}
