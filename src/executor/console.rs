use crate::error::{DebugError, Result};
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// Where `READ` and `WRITE` get and put their integers.
pub trait Console {
    fn read_int(&mut self) -> Result<i32>;
    fn write_int(&mut self, value: i32) -> Result<()>;
}

/// Prompts on stdout and reads from stdin.
#[derive(Debug, Default)]
pub struct StdConsole;

impl Console for StdConsole {
    fn read_int(&mut self) -> Result<i32> {
        print!("Enter an integer: ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().lock().read_line(&mut input)?;
        let trimmed = input.trim();
        trimmed
            .parse()
            .map_err(|_| DebugError::BadInput(trimmed.to_string()))
    }

    fn write_int(&mut self, value: i32) -> Result<()> {
        println!("{value}");
        Ok(())
    }
}

/// Scripted input and captured output, for tests and non-interactive runs.
#[derive(Debug, Default, Clone)]
pub struct BufferedConsole {
    pub input: VecDeque<i32>,
    pub output: Vec<i32>,
}

impl BufferedConsole {
    pub fn with_input(input: impl IntoIterator<Item = i32>) -> Self {
        Self {
            input: input.into_iter().collect(),
            output: Vec::new(),
        }
    }
}

impl Console for BufferedConsole {
    fn read_int(&mut self) -> Result<i32> {
        self.input
            .pop_front()
            .ok_or_else(|| DebugError::BadInput("<end of input>".to_string()))
    }

    fn write_int(&mut self, value: i32) -> Result<()> {
        self.output.push(value);
        Ok(())
    }
}
