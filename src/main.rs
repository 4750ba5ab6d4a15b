mod ast;
mod builtins;
mod config;
mod env;
mod error;
mod eval;
mod lexer;
mod module_loader;
mod parser;
mod stdlib;
mod token;
mod value;

use clap::{Parser, Subcommand};
use eval::Interpreter;
use std::path::PathBuf;
use std::process::ExitCode;

/// Axion scripting language interpreter
#[derive(Parser, Debug)]
#[command(name = "axion")]
#[command(version = config::VERSION)]
#[command(about = config::ABOUT)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run an Axion script file
    Run {
        /// Path to the .ax script file
        file: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let Command::Run { file } = cli.command;

    let source = match std::fs::read_to_string(&file) {
        Ok(source) => source,
        Err(_) => {
            println!("File not found: {}", file.display());
            return ExitCode::SUCCESS;
        }
    };

    match run(&source) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            println!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(source: &str) -> Result<(), error::AxionError> {
    let tokens = lexer::tokenize(source)?;
    let program = parser::parse_program(tokens)?;
    let interpreter = Interpreter::new();
    interpreter.run(&program)
}
