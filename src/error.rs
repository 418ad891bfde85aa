use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DebugError>;

/// Everything that can go wrong while loading or driving a debug session.
#[derive(Debug, Error)]
pub enum DebugError {
    /// The source text shown next to the bytecode could not be read.
    #[error("failed to read source file {path}: {source}")]
    Source {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The bytecode file could not be read.
    #[error("failed to read program file {path}: {source}")]
    ProgramFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A bytecode line could not be decoded.
    #[error("line {line}: {message}")]
    Program { line: usize, message: String },

    #[error("failed to load launch config {path}: {message}")]
    Config { path: PathBuf, message: String },

    #[error("environment stack underflow at pc {pc}")]
    FrameUnderflow { pc: usize },

    #[error("call depth marker underflow at pc {pc}")]
    DepthMarkerUnderflow { pc: usize },

    #[error("return address stack underflow at pc {pc}")]
    ReturnAddressUnderflow { pc: usize },

    #[error("runtime stack underflow at pc {pc}")]
    StackUnderflow { pc: usize },

    #[error("division by zero at pc {pc}")]
    DivisionByZero { pc: usize },

    #[error("no value at frame offset {offset} (pc {pc})")]
    BadOffset { pc: usize, offset: usize },

    /// Execution walked past the last instruction without a `HALT`.
    #[error("execution ran off the end of the program at pc {pc}")]
    RanOffEnd { pc: usize },

    #[error("console input is not an integer: {0:?}")]
    BadInput(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl DebugError {
    /// Internal-consistency failures leave the session unusable.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            Self::Source { .. } | Self::ProgramFile { .. } | Self::Program { .. } | Self::Config { .. }
        )
    }
}
