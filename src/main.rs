// ABOUTME: CLI entry point: script mode, piped batch mode, interactive REPL

use clap::Parser;
use lish::config::{HISTORY_FILE, WELCOME_FOOTER, WELCOME_MESSAGE, WELCOME_SUBTITLE};
use lish::env;
use lish::highlighter::LishHelper;
use lish::runner::{self, Echo};
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{Config, Editor};
use std::io::{IsTerminal, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// A Lisp-flavored interactive shell
#[derive(Parser, Debug)]
#[command(name = "lish")]
#[command(version = lish::config::VERSION)]
#[command(about = "A Lisp-flavored interactive shell")]
struct CliArgs {
    /// Script file to execute (if omitted, reads stdin)
    #[arg(value_name = "FILE")]
    script: Option<PathBuf>,

    /// Skip loading the prelude
    #[arg(long = "no-prelude")]
    no_prelude: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = CliArgs::parse();

    env::bootstrap();
    if !args.no_prelude {
        runner::load_prelude();
    }

    if let Some(path) = args.script {
        return run_script(&path);
    }

    if !std::io::stdin().is_terminal() {
        return run_batch();
    }

    run_repl()
}

/// Execute a script file without echoing results.
fn run_script(path: &Path) -> ExitCode {
    let source = match std::fs::read_to_string(path) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("lish: cannot read {}: {}", path.display(), error);
            return ExitCode::FAILURE;
        }
    };
    match runner::run_source(&source, Echo::Silent) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("lish: {}: {}", path.display(), error);
            ExitCode::FAILURE
        }
    }
}

/// Evaluate piped stdin, printing every value, one per line.
fn run_batch() -> ExitCode {
    let mut source = String::new();
    if let Err(error) = std::io::stdin().read_to_string(&mut source) {
        eprintln!("lish: cannot read stdin: {error}");
        return ExitCode::FAILURE;
    }
    match runner::run_source(&source, Echo::Print) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("lish: {error}");
            ExitCode::FAILURE
        }
    }
}

/// The interactive loop: prompt, read one (possibly multi-line) entry,
/// evaluate every form in it, print each value.
fn run_repl() -> ExitCode {
    let config = Config::builder().auto_add_history(true).build();
    let mut editor: Editor<LishHelper, DefaultHistory> = match Editor::with_config(config) {
        Ok(editor) => editor,
        Err(error) => {
            eprintln!("lish: cannot start line editor: {error}");
            return ExitCode::FAILURE;
        }
    };
    editor.set_helper(Some(LishHelper));
    let _ = editor.load_history(HISTORY_FILE);

    println!("{WELCOME_MESSAGE}");
    println!("{WELCOME_SUBTITLE}");
    println!("{WELCOME_FOOTER}");

    loop {
        match editor.readline(">") {
            Ok(line) => {
                match line.trim() {
                    "" => continue,
                    "(quit)" | "(exit)" => break,
                    "(clear)" => {
                        print!("\x1b[2J\x1b[H");
                        continue;
                    }
                    _ => {}
                }
                if let Err(error) = runner::run_source(&line, Echo::Print) {
                    eprintln!("lish: {error}");
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(error) => {
                eprintln!("lish: {error}");
                break;
            }
        }
    }

    let _ = editor.save_history(HISTORY_FILE);
    ExitCode::SUCCESS
}
