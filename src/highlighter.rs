// ABOUTME: rustyline helper: syntax colors and multi-line input validation

use crate::builtins;
use crate::parser;
use rustyline::highlight::{CmdKind, Highlighter};
use rustyline::validate::{ValidationContext, ValidationResult, Validator};
use rustyline_derive::{Completer, Helper, Hinter};
use std::borrow::Cow;

// ANSI color codes (3-bit/4-bit colors for maximum terminal compatibility)
const COLOR_RESET: &str = "\x1b[0m";
const COLOR_PARENS: &str = "\x1b[1;34m"; // Bold blue
const COLOR_PRIMITIVE: &str = "\x1b[36m"; // Cyan
const COLOR_NUMBER: &str = "\x1b[33m"; // Yellow
const COLOR_STRING: &str = "\x1b[32m"; // Green
const COLOR_COMMENT: &str = "\x1b[90m"; // Bright black (gray)
const COLOR_QUOTE: &str = "\x1b[1;33m"; // Bold yellow

/// REPL helper: colors tokens the same way the reader classifies them, and
/// keeps the editor reading continuation lines while a form is unfinished.
#[derive(Completer, Helper, Hinter)]
pub struct LishHelper;

impl Highlighter for LishHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        let highlighted = highlight_line(line);
        if highlighted == line {
            Cow::Borrowed(line)
        } else {
            Cow::Owned(highlighted)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _kind: CmdKind) -> bool {
        true
    }
}

impl Validator for LishHelper {
    fn validate(&self, ctx: &mut ValidationContext) -> rustyline::Result<ValidationResult> {
        if parser::is_incomplete(ctx.input()) {
            Ok(ValidationResult::Incomplete)
        } else {
            Ok(ValidationResult::Valid(None))
        }
    }
}

fn paint(out: &mut String, color: &str, text: &str) {
    out.push_str(color);
    out.push_str(text);
    out.push_str(COLOR_RESET);
}

/// Tokenize a line the way the reader would and wrap tokens in color codes.
fn highlight_line(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let chars: Vec<char> = line.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            // Comment to end of line
            ';' => {
                let rest: String = chars[i..].iter().collect();
                paint(&mut out, COLOR_COMMENT, &rest);
                i = chars.len();
            }

            // String token: runs to the closing quote or end of line
            '"' => {
                let start = i;
                i += 1;
                while i < chars.len() && chars[i] != '"' {
                    i += 1;
                }
                if i < chars.len() {
                    i += 1;
                }
                let token: String = chars[start..i].iter().collect();
                paint(&mut out, COLOR_STRING, &token);
            }

            c @ ('(' | ')' | '[' | ']') => {
                paint(&mut out, COLOR_PARENS, &c.to_string());
                i += 1;
            }

            '\'' => {
                paint(&mut out, COLOR_QUOTE, "'");
                i += 1;
            }

            c if (c as u32) <= 0x20 => {
                out.push(c);
                i += 1;
            }

            // Atom run: classify as number, primitive, or plain symbol
            _ => {
                let start = i;
                while i < chars.len()
                    && (chars[i] as u32) > 0x20
                    && !matches!(chars[i], '(' | ')' | '[' | ']')
                {
                    i += 1;
                }
                let token: String = chars[start..i].iter().collect();
                if token.parse::<f64>().is_ok() {
                    paint(&mut out, COLOR_NUMBER, &token);
                } else if builtins::is_primitive_name(&token) {
                    paint(&mut out, COLOR_PRIMITIVE, &token);
                } else {
                    out.push_str(&token);
                }
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_symbols_are_left_alone() {
        assert_eq!(highlight_line("foo bar"), "foo bar");
    }

    #[test]
    fn test_primitives_and_numbers_are_colored() {
        let highlighted = highlight_line("cons 42");
        assert!(highlighted.contains(COLOR_PRIMITIVE));
        assert!(highlighted.contains(COLOR_NUMBER));
    }

    #[test]
    fn test_comment_swallows_the_rest_of_the_line() {
        let highlighted = highlight_line("x ; (cons 1 2)");
        assert!(highlighted.starts_with("x "));
        assert!(highlighted.contains(COLOR_COMMENT));
        assert!(!highlighted.contains(COLOR_PARENS));
    }

    #[test]
    fn test_string_contents_are_not_classified() {
        let highlighted = highlight_line("\"cons 42\"");
        assert!(highlighted.contains(COLOR_STRING));
        assert!(!highlighted.contains(COLOR_PRIMITIVE));
        assert!(!highlighted.contains(COLOR_NUMBER));
    }
}
