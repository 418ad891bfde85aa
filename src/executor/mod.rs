mod console;
mod machine;
mod runner;
mod runtime_stack;

pub use console::{BufferedConsole, Console, StdConsole};
pub use machine::Machine;
pub use runner::{run_debugger, Intrinsic, Stop};
pub use runtime_stack::RunTimeStack;
