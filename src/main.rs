use bytecode_debugger::executor::{Console, StdConsole};
use bytecode_debugger::logging::init_logging;
use bytecode_debugger::{DebugContext, LaunchConfig, Result, Stop, StepRequest};
use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;

/// Step through an assembled bytecode program.
#[derive(Debug, Parser)]
#[command(name = "bytecode-debugger", version)]
struct Cli {
    /// Bytecode file (`*.cod`)
    program: Option<PathBuf>,

    /// Source file shown next to the bytecode (default: program without `.cod`)
    #[arg(long)]
    source: Option<PathBuf>,

    /// JSON launch config; command-line flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Set a breakpoint before starting (repeatable)
    #[arg(short, long = "break", value_name = "LINE")]
    breakpoints: Vec<usize>,

    /// Stop at the first source line
    #[arg(long)]
    stop_on_entry: bool,

    /// Print stops and variables as JSON lines
    #[arg(long)]
    json: bool,

    /// Log every stop to stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn launch_config(&self) -> Result<LaunchConfig> {
        let mut config = match &self.config {
            Some(path) => LaunchConfig::from_file(path)?,
            None => LaunchConfig::default(),
        };
        if let Some(program) = &self.program {
            config.program = program.clone();
        }
        if self.source.is_some() {
            config.source = self.source.clone();
        }
        config.breakpoints.extend(&self.breakpoints);
        config.stop_on_entry |= self.stop_on_entry;
        Ok(config)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = cli.launch_config()?;
    if config.program.as_os_str().is_empty() {
        eprintln!("no program given; pass a .cod file or --config");
        return Ok(());
    }

    let mut ctx = config.launch(StdConsole)?;
    let mut stop = ctx.run()?;

    while ctx.is_running() {
        report(&ctx, stop, cli.json);

        let Some(request) = prompt(&mut ctx, cli.json)? else {
            ctx.stop();
            break;
        };
        ctx.request_step(request);
        stop = ctx.run()?;
    }

    eprintln!("Program finished");
    Ok(())
}

fn report<C: Console>(ctx: &DebugContext<C>, stop: Stop, json: bool) {
    if json {
        if let Ok(line) = serde_json::to_string(&stop) {
            println!("{line}");
        }
        return;
    }

    if let Stop::Intrinsic { op } = stop {
        eprintln!("\n**** {} ****", format!("{op:?}").to_uppercase());
        return;
    }

    let line = ctx.current_line();
    eprintln!("\nStopped at line {line} ({stop:?})");
    if let Some(source) = line.checked_sub(1).and_then(|i| ctx.source_lines().get(i)) {
        let marker = if source.breakpoint { '*' } else { ' ' };
        eprintln!("{marker}{line:>4}: {}", source.text);
    }
}

/// Read commands until one resumes execution. `None` means quit.
fn prompt<C: Console>(ctx: &mut DebugContext<C>, json: bool) -> Result<Option<StepRequest>> {
    loop {
        eprintln!(
            "Commands: (c)ontinue, (n)ext/stepOver, (s)tepIn, (o)ut/stepOut, \
             (b)reak <lines>, (d)elete <lines>, (l)ist, (v)ars, (f)unction, (q)uit"
        );
        eprint!("> ");
        io::stderr().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            return Ok(None);
        }
        let mut words = input.split_whitespace();
        let cmd = words.next().unwrap_or("");
        let lines: Vec<usize> = words.filter_map(|w| w.parse().ok()).collect();

        match cmd {
            "c" | "continue" => return Ok(Some(StepRequest::Continue)),
            "n" | "next" | "stepOver" | "" => return Ok(Some(StepRequest::StepOver)),
            "s" | "stepIn" | "stepInto" => return Ok(Some(StepRequest::StepInto)),
            "o" | "out" | "stepOut" => return Ok(Some(StepRequest::StepOut)),
            "q" | "quit" => return Ok(None),
            "b" | "break" => {
                if lines.is_empty() || !ctx.set_breakpoints(&lines) {
                    eprintln!("Invalid breakpoint line(s), nothing set");
                }
            }
            "d" | "delete" => ctx.clear_breakpoints(&lines),
            "l" | "list" => eprintln!("Breakpoints: {:?}", ctx.breakpoints()),
            "v" | "vars" => {
                let vars = ctx.snapshot();
                if json {
                    if let Ok(line) = serde_json::to_string(&vars) {
                        println!("{line}");
                    }
                } else {
                    for var in vars {
                        let value = var.value.map_or("?".to_string(), |v| v.to_string());
                        eprintln!("  {} = {value}", var.name);
                    }
                }
            }
            "f" | "function" => match ctx.current_function_range() {
                Some((start, end)) => {
                    eprintln!("{} (lines {start}-{end})", ctx.current_function())
                }
                None => eprintln!("<top level>"),
            },
            other => eprintln!("Unknown command: {other}"),
        }
    }
}
