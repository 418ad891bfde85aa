use std::fmt;

/// Offset-addressed value storage, split into activation frames.
///
/// Offsets used by `LOAD`, `STORE` and the debugger are relative to the base
/// of the current frame.
#[derive(Debug, Clone)]
pub struct RunTimeStack {
    values: Vec<i32>,
    frame_pointers: Vec<usize>,
}

impl Default for RunTimeStack {
    fn default() -> Self {
        Self::new()
    }
}

impl RunTimeStack {
    pub fn new() -> Self {
        Self {
            values: Vec::new(),
            frame_pointers: vec![0],
        }
    }

    fn base(&self) -> usize {
        self.frame_pointers.last().copied().unwrap_or(0)
    }

    /// Number of values in the current frame.
    pub fn frame_len(&self) -> usize {
        self.values.len() - self.base()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn push(&mut self, value: i32) {
        self.values.push(value);
    }

    /// Pop the top value; never reaches into the caller's frame.
    pub fn pop(&mut self) -> Option<i32> {
        if self.frame_len() == 0 {
            return None;
        }
        self.values.pop()
    }

    pub fn peek(&self) -> Option<i32> {
        if self.frame_len() == 0 {
            return None;
        }
        self.values.last().copied()
    }

    /// Pop up to `n` values, stopping at the frame boundary.
    pub fn pop_n(&mut self, n: usize) -> usize {
        let count = n.min(self.frame_len());
        self.values.truncate(self.values.len() - count);
        count
    }

    /// Start a frame whose first slot is the `n`-th value from the top.
    pub fn new_frame_at(&mut self, n: usize) -> Option<()> {
        let base = self.values.len().checked_sub(n)?;
        if base < self.base() {
            return None;
        }
        self.frame_pointers.push(base);
        Some(())
    }

    /// Discard the current frame, keeping its top value as the return value
    /// pushed onto the caller's frame.
    pub fn pop_frame(&mut self) -> Option<i32> {
        if self.frame_pointers.len() < 2 {
            return None;
        }
        let result = self.peek()?;
        let base = self.frame_pointers.pop()?;
        self.values.truncate(base);
        self.values.push(result);
        Some(result)
    }

    /// Pop the top value into the slot at `offset`.
    pub fn store(&mut self, offset: usize) -> Option<i32> {
        if offset >= self.frame_len().saturating_sub(1) {
            return None;
        }
        let slot = self.base() + offset;
        let value = self.pop()?;
        self.values[slot] = value;
        Some(value)
    }

    /// Push a copy of the value at `offset`.
    pub fn load(&mut self, offset: usize) -> Option<i32> {
        let value = self.value_at(offset)?;
        self.push(value);
        Some(value)
    }

    pub fn value_at(&self, offset: usize) -> Option<i32> {
        if offset >= self.frame_len() {
            return None;
        }
        self.values.get(self.base() + offset).copied()
    }
}

impl fmt::Display for RunTimeStack {
    /// Frames in brackets, oldest first: `[1 2] [3]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut bounds = self.frame_pointers.clone();
        bounds.push(self.values.len());
        let frames: Vec<String> = bounds
            .windows(2)
            .map(|w| {
                let items: Vec<String> = self.values[w[0]..w[1]]
                    .iter()
                    .map(i32::to_string)
                    .collect();
                format!("[{}]", items.join(" "))
            })
            .collect();
        write!(f, "{}", frames.join(" "))
    }
}
