#![allow(dead_code)]

use bytecode_debugger::debugger::SourceLine;
use bytecode_debugger::executor::BufferedConsole;
use bytecode_debugger::parser::Program;
use bytecode_debugger::DebugContext;

/// `main` on lines 1-5 calls `f` (lines 10-12) on line 3 and the `Write`
/// intrinsic on line 4.
pub const CALL_PROGRAM: &str = r#"
GOTO start<<1>>
LABEL Write
LINE -1
FUNCTION Write -1 -1
FORMAL dummyFormal 0
LOAD 0 dummyFormal
WRITE
RETURN
LABEL f<<2>>
LINE 10
FUNCTION f 10 12
FORMAL n 0
LINE 11
LOAD 0 n
LIT 1
BOP +
STORE 0 n
LINE 12
LOAD 0 n
RETURN f<<2>>
LABEL start<<1>>
LINE 1
FUNCTION main 1 5
LIT 0 i
LINE 2
LIT 2
STORE 0 i
LINE 3
LOAD 0 i
ARGS 1
CALL f<<2>>
STORE 0 i
LINE 4
LOAD 0 i
ARGS 1
CALL Write
POP 1
LINE 5
HALT
"#;

pub const CALL_SOURCE: &str = "program { int i
  i = 2
  i = f(i)
  write(i)
}




int f(int n) {
  n = n + 1
  return n }
";

/// Counts `i` from 0 to 3; line 2 is re-entered on every iteration.
pub const LOOP_PROGRAM: &str = r#"
GOTO start
LABEL start
LINE 1
FUNCTION main 1 4
LIT 0 i
LABEL while
LINE 2
LOAD 0 i
LIT 3
BOP <
FALSEBRANCH done
LINE 3
LOAD 0 i
LIT 1
BOP +
STORE 0 i
GOTO while
LABEL done
LINE 4
HALT
"#;

pub const LOOP_SOURCE: &str = "program { int i = 0
  while (i < 3) {
    i = i + 1 }
}
";

/// Reads a number on line 2 and echoes it on line 3.
pub const READ_PROGRAM: &str = r#"
GOTO start
LABEL start
LINE 1
FUNCTION main 1 3
LIT 0 x
LINE 2
READ
STORE 0 x
LINE 3
LOAD 0 x
WRITE
HALT
"#;

pub const READ_SOURCE: &str = "program { int x
  x = read()
  write(x) }
";

/// `main` calls `f` on line 2 and `f` calls `g` on line 11, so a step out
/// of `f` passes through depth 2 and back before `f` returns.
pub const NESTED_PROGRAM: &str = r#"
GOTO start
LABEL g
LINE 20
FUNCTION g 20 21
FORMAL m 0
LINE 21
LOAD 0 m
LIT 1
BOP +
RETURN g
LABEL f
LINE 10
FUNCTION f 10 12
FORMAL n 0
LINE 11
LOAD 0 n
ARGS 1
CALL g
STORE 0 n
LINE 12
LOAD 0 n
RETURN f
LABEL start
LINE 1
FUNCTION main 1 3
LIT 5 a
LINE 2
LOAD 0 a
ARGS 1
CALL f
STORE 0 a
LINE 3
HALT
"#;

pub const NESTED_SOURCE: &str = "program { int a = 5
  a = f(a)
}






int f(int n) {
  n = g(n)
  return n }







int g(int m) {
  return m + 1 }
";

pub fn session_with_input(
    program: &str,
    source: &str,
    input: &[i32],
) -> DebugContext<BufferedConsole> {
    let program = Program::parse(program).expect("fixture program assembles");
    let source = source.lines().map(SourceLine::new).collect();
    DebugContext::new(
        program,
        source,
        BufferedConsole::with_input(input.iter().copied()),
    )
}

pub fn session(program: &str, source: &str) -> DebugContext<BufferedConsole> {
    session_with_input(program, source, &[])
}

pub fn value_of(ctx: &DebugContext<BufferedConsole>, name: &str) -> Option<i32> {
    ctx.snapshot()
        .into_iter()
        .find(|v| v.name == name)
        .and_then(|v| v.value)
}
