//! Core forms: eval, quote, all, lambda, macro, global
//!
//! - `eval`: evaluate the argument, then evaluate the result
//! - `quote`: return the argument unevaluated
//! - `all`: sequence expressions, returning the last value
//! - `lambda`: construct a closure over the defining environment
//! - `macro`: construct a syntactic transformer
//! - `global`: bind a symbol in the top-level environment

use crate::env::{assoc_cons, set_top_level, top_level};
use crate::eval::{eval, eval_list};
use crate::value::{Pair, Value};
use std::rc::Rc;

pub fn builtin_eval(args: &Value, env: &Value) -> Value {
    const ERR: &str = "ERROR: eval FAILED; MUST BE OF THE FORM (eval expr)";
    if args.list_len() != 1 {
        return Value::symbol(ERR);
    }
    eval(&eval(&args.car(), env), env)
}

pub fn builtin_quote(args: &Value, _env: &Value) -> Value {
    const ERR: &str = "ERROR: quote FAILED; MUST BE OF THE FORM (quote expr)";
    if args.list_len() != 1 {
        return Value::symbol(ERR);
    }
    args.car()
}

pub fn builtin_all(args: &Value, env: &Value) -> Value {
    const ERR: &str = "ERROR: all FAILED; MUST BE OF THE FORM (all expr ...)";
    if args.list_len() == 0 {
        return Value::symbol(ERR);
    }
    eval_list(args, env).last()
}

/// A closure whose defining environment is the current top level stores Nil
/// instead, and resolves free symbols in the caller's environment at every
/// call. Because the top level only grows, this is usually indistinguishable
/// from lexical capture, and it is what lets top-level functions recurse.
fn close_over(params: Value, body: Value, env: &Value) -> Value {
    let captured = if *env == top_level() {
        Value::Nil
    } else {
        env.clone()
    };
    Value::Closure(Rc::new(Pair {
        car: Value::cons(params, body),
        cdr: captured,
    }))
}

pub fn builtin_lambda(args: &Value, env: &Value) -> Value {
    const ERR: &str = "ERROR: lambda FAILED; MUST BE OF THE FORM (lambda params expr ...)";
    if args.list_len() == 0 {
        return Value::symbol(ERR);
    }
    close_over(args.car(), args.cdr(), env)
}

pub fn builtin_macro(args: &Value, _env: &Value) -> Value {
    const ERR: &str = "ERROR: macro FAILED; MUST BE OF THE FORM (macro params expr ...)";
    if args.list_len() == 0 {
        return Value::symbol(ERR);
    }
    Value::Macro(Rc::new(Pair {
        car: args.car(),
        cdr: args.cdr(),
    }))
}

pub fn builtin_global(args: &Value, env: &Value) -> Value {
    const ERR: &str = "ERROR: global FAILED; MUST BE OF THE FORM (global variable expr)";
    if args.list_len() != 2 {
        return Value::symbol(ERR);
    }
    let key = args.car();
    let value = eval(&args.cdr().car(), env);
    set_top_level(assoc_cons(&key, &value, &top_level()));
    key
}
