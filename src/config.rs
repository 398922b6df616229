// ABOUTME: Constants for the interpreter binary

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const WELCOME_MESSAGE: &str = "lish - a Lisp-flavored shell";
pub const WELCOME_SUBTITLE: &str =
    "Try: (+ 1 2), (run \"ls -l\"), (pipe \"ps ax\" \"grep lish\"), (cd \"..\")";
pub const WELCOME_FOOTER: &str = "Type (quit) or press Ctrl-D to exit.";

/// History file for the interactive REPL, kept in the working directory.
pub const HISTORY_FILE: &str = ".lish_history";
