//! String operations: printf, string->char-list
//!
//! - `printf`: write string arguments to stdout with `\n`/`\t` expansion,
//!   returning the last string unexpanded
//! - `string->char-list`: byte codes of a string, as a list

use crate::eval::{eval, eval_list};
use crate::value::Value;
use std::io::{self, Write};

/// Expand `\n` and `\t`. For any other character after a backslash the
/// backslash is kept and the character dropped.
fn expand_escapes(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            _ => out.push('\\'),
        }
    }
    out
}

pub fn builtin_printf(args: &Value, env: &Value) -> Value {
    const ERR: &str = "ERROR: printf FAILED; MUST BE OF THE FORM (printf string)";
    if args.list_len() == 0 {
        return Value::symbol(ERR);
    }
    let values = eval_list(args, env);
    let mut out = io::stdout().lock();
    let mut last = Value::Nil;
    let mut cursor = &values;
    while let Value::Cons(pair) = cursor {
        let Value::String(text) = &pair.car else {
            return Value::symbol(ERR);
        };
        let _ = write!(out, "{}", expand_escapes(text));
        last = pair.car.clone();
        cursor = &pair.cdr;
    }
    let _ = out.flush();
    last
}

pub fn builtin_string_to_char_list(args: &Value, env: &Value) -> Value {
    const ERR: &str =
        "ERROR: string->char-list FAILED; MUST BE OF THE FORM (string->char-list string)";
    if args.list_len() != 1 {
        return Value::symbol(ERR);
    }
    let value = eval(&args.car(), env);
    let Value::String(text) = &value else {
        return Value::symbol(ERR);
    };
    // Prepending reverses the bytes; callers depend on that order.
    let mut list = Value::Nil;
    for byte in text.bytes() {
        list = Value::cons(Value::Number(byte as f64), list);
    }
    list
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::bootstrap;
    use crate::parser;

    fn eval_str(source: &str) -> Value {
        let env = bootstrap();
        eval(&parser::parse(source).expect("parse failed").0, &env)
    }

    #[test]
    fn test_expand_escapes_newline_and_tab() {
        assert_eq!(expand_escapes("a\\nb"), "a\nb");
        assert_eq!(expand_escapes("a\\tb"), "a\tb");
        assert_eq!(expand_escapes("plain"), "plain");
    }

    #[test]
    fn test_expand_escapes_drops_the_unknown_escaped_character() {
        assert_eq!(expand_escapes("a\\xb"), "a\\b");
        assert_eq!(expand_escapes("a\\\\n"), "a\\n");
        // A trailing backslash survives as itself.
        assert_eq!(expand_escapes("a\\"), "a\\");
    }

    #[test]
    fn test_printf_returns_the_last_string_unexpanded() {
        assert_eq!(eval_str("(printf \"hi\\n\")"), Value::string("hi\\n"));
        assert_eq!(
            eval_str("(printf \"a\" \"b\" \"c\")"),
            Value::string("c")
        );
    }

    #[test]
    fn test_printf_rejects_non_strings() {
        assert!(eval_str("(printf 5)").is_error());
        assert!(eval_str("(printf \"ok\" 5)").is_error());
        assert!(eval_str("(printf)").is_error());
    }

    #[test]
    fn test_string_to_char_list_is_reversed() {
        assert_eq!(
            eval_str("(string->char-list \"ab\")").to_string(),
            "(98.000000 97.000000)"
        );
        assert_eq!(eval_str("(string->char-list \"\")"), Value::Nil);
    }

    #[test]
    fn test_string_to_char_list_requires_a_string() {
        assert!(eval_str("(string->char-list 5)").is_error());
        assert!(eval_str("(string->char-list)").is_error());
        assert!(eval_str("(string->char-list \"a\" \"b\")").is_error());
    }
}
