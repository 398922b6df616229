//! Arithmetic folds: +, -, *, /
//!
//! Each operator takes one or more numbers and folds left:
//!
//! - `+`: sum
//! - `-`: subtract the rest from the first; negates a single argument
//! - `*`: product
//! - `/`: divide the first by the rest; a single argument is returned
//!   unchanged (IEEE semantics throughout, so dividing by zero is inf/NaN)

use crate::eval::eval_list;
use crate::value::Value;

/// Evaluate the argument list and collect it as numbers. `None` when the
/// list is empty or any element evaluates to a non-number.
fn eval_numbers(args: &Value, env: &Value) -> Option<Vec<f64>> {
    if args.list_len() == 0 {
        return None;
    }
    let values = eval_list(args, env);
    let mut numbers = Vec::with_capacity(values.list_len());
    let mut cursor = &values;
    while let Value::Cons(pair) = cursor {
        match pair.car {
            Value::Number(n) => numbers.push(n),
            _ => return None,
        }
        cursor = &pair.cdr;
    }
    Some(numbers)
}

pub fn builtin_add(args: &Value, env: &Value) -> Value {
    const ERR: &str = "ERROR: + FAILED; MUST BE OF THE FORM (+ number ...)";
    match eval_numbers(args, env) {
        Some(numbers) => Value::Number(numbers.iter().sum()),
        None => Value::symbol(ERR),
    }
}

pub fn builtin_sub(args: &Value, env: &Value) -> Value {
    const ERR: &str = "ERROR: - FAILED; MUST BE OF THE FORM (- number ...)";
    match eval_numbers(args, env).as_deref() {
        Some([single]) => Value::Number(-single),
        Some([first, rest @ ..]) => {
            Value::Number(rest.iter().fold(*first, |acc, n| acc - n))
        }
        _ => Value::symbol(ERR),
    }
}

pub fn builtin_mul(args: &Value, env: &Value) -> Value {
    const ERR: &str = "ERROR: * FAILED; MUST BE OF THE FORM (* number ...)";
    match eval_numbers(args, env) {
        Some(numbers) => Value::Number(numbers.iter().product()),
        None => Value::symbol(ERR),
    }
}

pub fn builtin_div(args: &Value, env: &Value) -> Value {
    const ERR: &str = "ERROR: / FAILED; MUST BE OF THE FORM (/ number ...)";
    match eval_numbers(args, env).as_deref() {
        Some([first, rest @ ..]) => {
            Value::Number(rest.iter().fold(*first, |acc, n| acc / n))
        }
        _ => Value::symbol(ERR),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::bootstrap;
    use crate::eval::eval;
    use crate::parser;

    fn eval_str(source: &str) -> Value {
        let env = bootstrap();
        eval(&parser::parse(source).expect("parse failed").0, &env)
    }

    #[test]
    fn test_add() {
        assert_eq!(eval_str("(+ 1 2 3)"), Value::Number(6.0));
        assert_eq!(eval_str("(+ 5)"), Value::Number(5.0));
        assert!(eval_str("(+)").is_error());
    }

    #[test]
    fn test_sub_negates_a_single_argument() {
        assert_eq!(eval_str("(- 5)"), Value::Number(-5.0));
        assert_eq!(eval_str("(- 10 3 2)"), Value::Number(5.0));
        assert_eq!(eval_str("(- 5)"), eval_str("(- 0 5)"));
    }

    #[test]
    fn test_mul() {
        assert_eq!(eval_str("(* 2 3 4)"), Value::Number(24.0));
        assert_eq!(eval_str("(* 7)"), Value::Number(7.0));
    }

    #[test]
    fn test_div_returns_a_single_argument_unchanged() {
        assert_eq!(eval_str("(/ 5)"), Value::Number(5.0));
        assert_eq!(eval_str("(/ 20 4)"), Value::Number(5.0));
        assert_eq!(eval_str("(/ 100 2 5)"), Value::Number(10.0));
    }

    #[test]
    fn test_division_by_zero_follows_ieee() {
        assert_eq!(eval_str("(/ 1 0)"), Value::Number(f64::INFINITY));
    }

    #[test]
    fn test_non_numbers_are_type_errors() {
        assert!(eval_str("(+ 1 'a)").is_error());
        assert!(eval_str("(+ 'a 1)").is_error());
        assert!(eval_str("(* 2 \"x\")").is_error());
        assert!(eval_str("(- '(1))").is_error());
    }

    #[test]
    fn test_nested_arithmetic() {
        assert_eq!(eval_str("(+ 1 (* 2 3) (- 10 4))"), Value::Number(13.0));
    }
}
