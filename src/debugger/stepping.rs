use serde::Serialize;

/// What the client asked for when it last resumed execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum StepRequest {
    /// Run until a breakpoint or the end of the program.
    Continue,
    StepOver,
    StepInto,
    StepOut,
}

/// The single in-flight step, with the environment depth that completes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StepMode {
    #[default]
    None,
    Out { target: usize },
    In { target: usize },
    Over { target: usize },
}

impl StepMode {
    /// Resolve a request issued at environment depth `depth`.
    ///
    /// Step-out from the root frame has nowhere to return to, so it runs on
    /// like a plain continue.
    pub fn from_request(request: StepRequest, depth: usize) -> Self {
        match request {
            StepRequest::Continue => Self::None,
            StepRequest::StepOver => Self::Over { target: depth },
            StepRequest::StepInto => Self::In { target: depth + 1 },
            StepRequest::StepOut => depth
                .checked_sub(1)
                .map_or(Self::None, |target| Self::Out { target }),
        }
    }

    pub fn is_active(self) -> bool {
        self != Self::None
    }
}
