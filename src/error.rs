// ABOUTME: Error types for the reader

use thiserror::Error;

/// Reader-side failures. Evaluation never produces these: domain errors in
/// running programs travel as `ERROR:`-prefixed symbol values instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The input ran out inside a form. The REPL responds by reading
    /// continuation lines; batch drivers treat it as a clean end of input.
    #[error("unexpected end of input")]
    Incomplete,

    #[error("unexpected `{0}`")]
    UnexpectedClose(char),

    #[error("expected `{expected}` to close the list, found `{found}`")]
    MismatchedClose { expected: char, found: char },

    #[error("expected `{0}` after dotted tail")]
    BadDottedTail(char),
}
