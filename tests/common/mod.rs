// ABOUTME: Shared helpers for the integration tests

use lish::env;
use lish::eval::eval;
use lish::parser;
use lish::runner;
use lish::value::Value;

/// Fresh top-level environment with the primitives installed.
pub fn setup() {
    env::bootstrap();
}

/// Fresh top-level environment with the prelude loaded on top.
#[allow(dead_code)]
pub fn setup_with_prelude() {
    env::bootstrap();
    runner::load_prelude();
}

/// Evaluate every form in `source` against the live top-level environment,
/// returning the last value.
pub fn eval_str(source: &str) -> Value {
    let mut rest = source;
    let mut result = Value::Nil;
    loop {
        rest = parser::skip_ignored(rest);
        if rest.is_empty() {
            return result;
        }
        let (form, remainder) = parser::parse(rest).expect("parse failed");
        result = eval(&form, &env::top_level());
        rest = remainder;
    }
}

/// The printed rendition of the last value of `source`.
pub fn printed(source: &str) -> String {
    eval_str(source).to_string()
}
