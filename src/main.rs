use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process;

use anyhow::Context;
use clap::error::ErrorKind;
use clap::{Parser as ClapParser, Subcommand};
use log::info;

use treelox::ast_printer::AstPrinter;
use treelox::interpreter::Interpreter;
use treelox::parser::Parser;
use treelox::resolver::Resolver;
use treelox::scanner::Scanner;

#[derive(ClapParser, Debug)]
#[command(version, about, long_about = None, args_conflicts_with_subcommands = true)]
struct Cli {
    /// Lox script to run; starts a REPL when omitted
    script: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Dump the token stream of a script
    Tokenize { filename: PathBuf },

    /// Dump the parsed syntax tree of a script
    Parse { filename: PathBuf },
}

/// Sysexits-style process codes.
const EX_USAGE: i32 = 64;
const EX_DATAERR: i32 = 65;
const EX_SOFTWARE: i32 = 70;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli: Cli = match Cli::try_parse() {
        Ok(cli) => cli,

        Err(err) => {
            if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
                err.exit();
            }

            eprintln!("{}", err);
            process::exit(EX_USAGE);
        }
    };

    match cli.command {
        Some(Commands::Tokenize { filename }) => tokenize(&filename),
        Some(Commands::Parse { filename }) => parse(&filename),
        None => match cli.script {
            Some(script) => run_file(&script),
            None => run_repl(),
        },
    }
}

/// Outcome of one trip through the pipeline; drives the exit code.
enum Outcome {
    Success,
    CompileError,
    RuntimeError,
}

/// Scans, parses, resolves, and executes one program against the given
/// interpreter, reporting every diagnostic to standard error.
fn run<W: Write>(source: &str, interpreter: &mut Interpreter<'_, W>) -> Outcome {
    let (tokens, scan_errors) = Scanner::new(source.as_bytes()).scan_tokens();
    for err in &scan_errors {
        eprintln!("{}", err);
    }

    let (statements, parse_errors) = Parser::new(tokens).parse();
    for err in &parse_errors {
        eprintln!("{}", err);
    }

    if !scan_errors.is_empty() || !parse_errors.is_empty() {
        return Outcome::CompileError;
    }

    let bindings = match Resolver::new().resolve(&statements) {
        Ok(bindings) => bindings,

        Err(err) => {
            eprintln!("{}", err);
            return Outcome::CompileError;
        }
    };

    interpreter.note_locals(bindings);

    match interpreter.interpret(&statements) {
        Ok(()) => Outcome::Success,

        Err(err) => {
            eprintln!("{}", err);
            Outcome::RuntimeError
        }
    }
}

fn run_file(path: &Path) -> anyhow::Result<()> {
    let source: String =
        fs::read_to_string(path).with_context(|| format!("could not read {}", path.display()))?;

    info!("Running {}", path.display());

    let mut stdout = io::stdout();
    let mut interpreter = Interpreter::new(&mut stdout);

    match run(&source, &mut interpreter) {
        Outcome::Success => Ok(()),
        Outcome::CompileError => process::exit(EX_DATAERR),
        Outcome::RuntimeError => process::exit(EX_SOFTWARE),
    }
}

fn run_repl() -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut sink = io::stdout();
    let mut interpreter = Interpreter::new(&mut sink);

    let mut line: String = String::new();
    loop {
        print!("> ");
        io::stdout().flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        // Errors were already reported; the prompt survives them.
        let _ = run(&line, &mut interpreter);
    }

    Ok(())
}

fn tokenize(path: &Path) -> anyhow::Result<()> {
    let source: String =
        fs::read_to_string(path).with_context(|| format!("could not read {}", path.display()))?;

    let mut clean: bool = true;
    for item in Scanner::new(source.as_bytes()) {
        match item {
            Ok(token) => println!("{}", token),

            Err(err) => {
                clean = false;
                eprintln!("{}", err);
            }
        }
    }

    if !clean {
        process::exit(EX_DATAERR);
    }

    Ok(())
}

fn parse(path: &Path) -> anyhow::Result<()> {
    let source: String =
        fs::read_to_string(path).with_context(|| format!("could not read {}", path.display()))?;

    let (tokens, scan_errors) = Scanner::new(source.as_bytes()).scan_tokens();
    for err in &scan_errors {
        eprintln!("{}", err);
    }

    let (statements, parse_errors) = Parser::new(tokens).parse();
    for err in &parse_errors {
        eprintln!("{}", err);
    }

    if !scan_errors.is_empty() || !parse_errors.is_empty() {
        process::exit(EX_DATAERR);
    }

    for statement in &statements {
        println!("{}", AstPrinter::print_stmt(statement));
    }

    Ok(())
}
