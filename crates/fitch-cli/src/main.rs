//! fitch: prove propositional tautologies, print Fitch-style derivations.
//!
//! The prover searches for a natural-deduction proof by iterative
//! deepening; the CLI caps the search so that non-theorems fail instead
//! of running forever.

use clap::{Parser, Subcommand};
use colored::Colorize;
use fitch_core::Formula;
use fitch_parse::parse_formula;
use fitch_prove::Prover;
use fitch_viz::render_proof;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "fitch")]
#[command(version)]
#[command(about = "Prove propositional tautologies and print Fitch-style derivations", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Prove a formula and print its Fitch-style derivation
    Prove {
        /// Formula to prove, e.g. "a > (b > a)"
        formula: String,

        /// Largest proof size to try before giving up
        #[arg(short, long, default_value = "30")]
        max_size: usize,

        /// Also print the raw proof tree
        #[arg(short, long)]
        tree: bool,
    },

    /// Parse a formula and echo its canonical form
    Parse {
        /// Formula to parse
        formula: String,
    },

    /// Run an interactive session
    Repl,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Prove {
            formula,
            max_size,
            tree,
        } => match parse_formula(&formula) {
            Ok(parsed) => prove_and_print(&parsed, max_size, tree),
            Err(error) => {
                eprintln!("{} {}", "parse error:".red().bold(), error);
                ExitCode::FAILURE
            }
        },

        Commands::Parse { formula } => match parse_formula(&formula) {
            Ok(parsed) => {
                println!("{}", parsed);
                ExitCode::SUCCESS
            }
            Err(error) => {
                eprintln!("{} {}", "parse error:".red().bold(), error);
                ExitCode::FAILURE
            }
        },

        Commands::Repl => repl(),
    }
}

fn prove_and_print(formula: &Formula, max_size: usize, show_tree: bool) -> ExitCode {
    let mut prover = Prover::with_max_size(max_size);

    match prover.prove(formula) {
        Some(proof) => {
            if show_tree {
                println!("{}\n", proof.pretty());
            }
            match render_proof(&proof) {
                Ok(derivation) => {
                    println!("{}", derivation);
                    ExitCode::SUCCESS
                }
                Err(error) => {
                    eprintln!("{} {}", "internal error:".red().bold(), error);
                    ExitCode::FAILURE
                }
            }
        }
        None => {
            println!(
                "{} no proof of {} within size {}",
                "not proven:".yellow().bold(),
                formula,
                max_size
            );
            ExitCode::FAILURE
        }
    }
}

fn repl() -> ExitCode {
    let mut editor = match rustyline::DefaultEditor::new() {
        Ok(editor) => editor,
        Err(error) => {
            eprintln!("{} {}", "error:".red().bold(), error);
            return ExitCode::FAILURE;
        }
    };

    println!("fitch: type a formula to prove it, :help for commands");

    loop {
        let line = match editor.readline("fitch> ") {
            Ok(line) => line,
            Err(rustyline::error::ReadlineError::Interrupted)
            | Err(rustyline::error::ReadlineError::Eof) => break,
            Err(error) => {
                eprintln!("{} {}", "error:".red().bold(), error);
                return ExitCode::FAILURE;
            }
        };

        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        let _ = editor.add_history_entry(input);

        match input {
            ":quit" | ":q" => break,
            ":help" => {
                println!("  <formula>        prove the formula");
                println!("  :parse <formula> parse and echo the canonical form");
                println!("  :help            show this help");
                println!("  :quit            exit");
            }
            _ => {
                if let Some(rest) = input.strip_prefix(":parse") {
                    match parse_formula(rest) {
                        Ok(parsed) => println!("{}", parsed),
                        Err(error) => {
                            eprintln!("{} {}", "parse error:".red().bold(), error)
                        }
                    }
                } else if input.starts_with(':') {
                    eprintln!("unknown command; :help lists the commands");
                } else {
                    match parse_formula(input) {
                        Ok(parsed) => {
                            prove_and_print(&parsed, 30, false);
                        }
                        Err(error) => {
                            eprintln!("{} {}", "parse error:".red().bold(), error)
                        }
                    }
                }
            }
        }
    }

    ExitCode::SUCCESS
}
