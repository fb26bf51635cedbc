//! Rill interpreter CLI.
//!
//! `rill run <file.rill>` executes a script; `rill repl` (or no arguments)
//! starts an interactive session. Exit codes follow the sysexits
//! convention: 64 usage, 65 static errors, 66 unreadable input, 70 runtime
//! error.

use std::io::{self, BufRead, Write};
use std::path::Path;
use std::process::ExitCode;

use tracing::debug;
use tracing_subscriber::EnvFilter;

use rill_diagnostic::DiagnosticQueue;
use rill_eval::Interpreter;
use rill_ir::Stmt;

const EX_USAGE: u8 = 64;
const EX_DATAERR: u8 = 65;
const EX_NOINPUT: u8 = 66;
const EX_SOFTWARE: u8 = 70;

fn main() -> ExitCode {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();

    match args.get(1).map(String::as_str) {
        None | Some("repl") => repl(),
        Some("run") => {
            let Some(path) = args.get(2) else {
                eprintln!("Usage: rill run <file.rill>");
                return ExitCode::from(EX_USAGE);
            };
            run_file(path)
        }
        Some("help" | "--help" | "-h") => {
            print_usage();
            ExitCode::SUCCESS
        }
        Some("version" | "--version" | "-V") => {
            println!("Rill {}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Some(other) => {
            // A bare script path works as shorthand for `run`.
            if Path::new(other)
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("rill"))
            {
                run_file(other)
            } else {
                eprintln!("Unknown command: {other}");
                eprintln!();
                print_usage();
                ExitCode::from(EX_USAGE)
            }
        }
    }
}

/// Honors `RILL_LOG` (e.g. `RILL_LOG=rill_eval=trace`); silent by default.
fn init_tracing() {
    let filter = EnvFilter::try_from_env("RILL_LOG").unwrap_or_else(|_| EnvFilter::new("off"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run_file(path: &str) -> ExitCode {
    let source = match std::fs::read_to_string(path) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("error: could not read {path}: {err}");
            return ExitCode::from(EX_NOINPUT);
        }
    };
    debug!(path, bytes = source.len(), "running script");

    let mut queue = DiagnosticQueue::new();
    let statements = frontend(&source, &mut queue);

    // Static errors: report everything, interpret nothing.
    if queue.has_errors() {
        queue.emit_to_stderr();
        return ExitCode::from(EX_DATAERR);
    }

    let mut interpreter = Interpreter::default();
    if !interpreter.interpret(&statements, &mut queue) {
        queue.emit_to_stderr();
        return ExitCode::from(EX_SOFTWARE);
    }
    ExitCode::SUCCESS
}

fn repl() -> ExitCode {
    println!("Rill {} (type Ctrl-D to exit)", env!("CARGO_PKG_VERSION"));

    let mut interpreter = Interpreter::default();
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        let _ = stdout.flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(err) => {
                eprintln!("error: could not read input: {err}");
                return ExitCode::from(EX_NOINPUT);
            }
        }
        if line.trim().is_empty() {
            continue;
        }

        // A bare expression gets an implicit trailing semicolon so
        // `1 + 2` works without ceremony.
        let mut queue = DiagnosticQueue::new();
        let mut statements = frontend(&line, &mut queue);
        if queue.has_errors() {
            let mut retry = DiagnosticQueue::new();
            let retried = frontend(&format!("{line};"), &mut retry);
            if retry.has_errors() {
                queue.emit_to_stderr();
                continue;
            }
            statements = retried;
            queue = retry;
        }

        // Echo the value of a lone expression; run everything else.
        if let [Stmt::Expression(expr)] = statements.as_slice() {
            match interpreter.evaluate_expression(expr) {
                Ok(value) => println!("{value}"),
                Err(err) => eprintln!("{}", err.to_diagnostic()),
            }
            continue;
        }

        if !interpreter.interpret(&statements, &mut queue) {
            queue.emit_to_stderr();
        }
    }
    ExitCode::SUCCESS
}

/// Lex and parse, collecting all static diagnostics into `queue`.
fn frontend(source: &str, queue: &mut DiagnosticQueue) -> Vec<Stmt> {
    let tokens = rill_lexer::lex(source, queue);
    rill_parse::parse(&tokens, queue)
}

fn print_usage() {
    println!("Rill interpreter");
    println!();
    println!("Usage: rill <command> [options]");
    println!();
    println!("Commands:");
    println!("  run <file.rill>   Run a Rill script");
    println!("  repl              Start an interactive session (default)");
    println!("  help              Show this help message");
    println!("  version           Show version information");
    println!();
    println!("Environment:");
    println!("  RILL_LOG          Tracing filter, e.g. RILL_LOG=rill_eval=trace");
}
