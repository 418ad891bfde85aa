use std::fmt;

/// What the debugger needs to know about an instruction without running it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    LineMarker,
    FunctionEntry,
    ParameterBind,
    ReadIntrinsic,
    WriteIntrinsic,
    Other,
}

/// Operators accepted by `BOP`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
}

impl BinaryOp {
    pub fn parse(token: &str) -> Option<Self> {
        let op = match token {
            "+" => Self::Add,
            "-" => Self::Sub,
            "*" => Self::Mul,
            "/" => Self::Div,
            "==" => Self::Eq,
            "!=" => Self::Ne,
            "<" => Self::Lt,
            "<=" => Self::Le,
            ">" => Self::Gt,
            ">=" => Self::Ge,
            "&" => Self::And,
            "|" => Self::Or,
            _ => return None,
        };
        Some(op)
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::And => "&",
            Self::Or => "|",
        }
    }
}

/// A branch target: the label as written plus its resolved instruction index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub label: String,
    pub address: usize,
}

/// One assembled instruction. The set is closed; `Instruction::execute`
/// dispatches on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    Halt,
    Pop(usize),
    FalseBranch(Target),
    Goto(Target),
    Store { offset: usize, name: Option<String> },
    Load { offset: usize, name: Option<String> },
    Lit { value: i32, name: Option<String> },
    Args(usize),
    Call(Target),
    Return { label: Option<String> },
    Bop(BinaryOp),
    Read,
    Write,
    Label(String),
    /// Source line marker. Lines `<= 0` in the bytecode become `0`, meaning
    /// "no source line" (intrinsics and other generated code).
    Line(usize),
    Function { name: String, start: usize, end: usize },
    Formal { name: String, offset: usize },
    Dump(bool),
}

impl Instruction {
    pub fn category(&self) -> Category {
        match self {
            Self::Line(_) => Category::LineMarker,
            Self::Function { .. } => Category::FunctionEntry,
            Self::Formal { .. } => Category::ParameterBind,
            Self::Read => Category::ReadIntrinsic,
            Self::Write => Category::WriteIntrinsic,
            _ => Category::Other,
        }
    }

    pub fn is_line_marker(&self) -> bool {
        self.category() == Category::LineMarker
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn suffix(name: &Option<String>) -> String {
            name.as_ref().map(|n| format!(" {n}")).unwrap_or_default()
        }

        match self {
            Self::Halt => write!(f, "HALT"),
            Self::Pop(n) => write!(f, "POP {n}"),
            Self::FalseBranch(t) => write!(f, "FALSEBRANCH {}", t.label),
            Self::Goto(t) => write!(f, "GOTO {}", t.label),
            Self::Store { offset, name } => write!(f, "STORE {offset}{}", suffix(name)),
            Self::Load { offset, name } => write!(f, "LOAD {offset}{}", suffix(name)),
            Self::Lit { value, name } => write!(f, "LIT {value}{}", suffix(name)),
            Self::Args(n) => write!(f, "ARGS {n}"),
            Self::Call(t) => write!(f, "CALL {}", t.label),
            Self::Return { label } => write!(f, "RETURN{}", suffix(label)),
            Self::Bop(op) => write!(f, "BOP {}", op.symbol()),
            Self::Read => write!(f, "READ"),
            Self::Write => write!(f, "WRITE"),
            Self::Label(l) => write!(f, "LABEL {l}"),
            Self::Line(n) => write!(f, "LINE {n}"),
            Self::Function { name, start, end } => write!(f, "FUNCTION {name} {start} {end}"),
            Self::Formal { name, offset } => write!(f, "FORMAL {name} {offset}"),
            Self::Dump(on) => write!(f, "DUMP {}", if *on { "ON" } else { "OFF" }),
        }
    }
}
