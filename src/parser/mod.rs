mod commands;
mod labels;
mod program;
mod types;

pub use commands::{is_comment, parse_instruction, split_tokens, RawLine};
pub use labels::build_label_map;
pub use program::Program;
pub use types::{BinaryOp, Category, Instruction, Target};
