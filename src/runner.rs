// ABOUTME: Drives source text through the read-eval-print pipeline

use crate::env::top_level;
use crate::error::ParseError;
use crate::eval::eval;
use crate::parser;
use log::{debug, warn};

/// Whether evaluated values are echoed to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Echo {
    Print,
    Silent,
}

/// Evaluate every form in `source` against the top-level environment,
/// re-reading the environment slot before each form so `global` bindings
/// from earlier forms are visible. Trailing incomplete input is a clean
/// stop, matching end-of-input mid-expression.
pub fn run_source(source: &str, echo: Echo) -> Result<(), ParseError> {
    let mut rest = source;
    loop {
        rest = parser::skip_ignored(rest);
        if rest.is_empty() {
            return Ok(());
        }
        match parser::parse(rest) {
            Ok((form, remainder)) => {
                let value = eval(&form, &top_level());
                if echo == Echo::Print {
                    println!("{value}");
                }
                rest = remainder;
            }
            Err(ParseError::Incomplete) => return Ok(()),
            Err(error) => return Err(error),
        }
    }
}

/// The default library, written in the language itself.
pub const PRELUDE: &str = include_str!("prelude.lisp");

/// Load the prelude into the top-level environment. Trouble here is logged
/// and otherwise ignored; the interpreter is usable without it.
pub fn load_prelude() {
    debug!("loading prelude");
    if let Err(error) = run_source(PRELUDE, Echo::Silent) {
        warn!("prelude: {error}");
    }
}
