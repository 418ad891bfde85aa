mod breakpoints;
mod context;
mod environment;
mod stepping;

pub use breakpoints::{load_source, Breakpoints, SourceLine};
pub use context::{DebugContext, Variable};
pub use environment::{Binding, CallDepthMarkers, CallFrame, EnvironmentStack};
pub use stepping::{StepMode, StepRequest};
