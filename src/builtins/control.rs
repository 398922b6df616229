//! Control flow: if, when, unless, cond
//!
//! All of these evaluate their test first and only then the selected branch;
//! untaken branches are never evaluated.

use super::forms::builtin_all;
use crate::eval::eval;
use crate::value::Value;

pub fn builtin_if(args: &Value, env: &Value) -> Value {
    const ERR: &str = "ERROR: if FAILED; MUST BE OF THE FORM (if test-expr then-expr else-expr);";
    if args.list_len() != 3 {
        return Value::symbol(ERR);
    }
    let branches = args.cdr();
    let taken = if eval(&args.car(), env).is_nil() {
        branches.cdr().car()
    } else {
        branches.car()
    };
    eval(&taken, env)
}

pub fn builtin_when(args: &Value, env: &Value) -> Value {
    const ERR: &str = "ERROR: when FAILED; MUST BE OF THE FORM (when test-expr then-expr ...);";
    if args.list_len() < 2 {
        return Value::symbol(ERR);
    }
    if eval(&args.car(), env).is_nil() {
        Value::Nil
    } else {
        builtin_all(&args.cdr(), env)
    }
}

pub fn builtin_unless(args: &Value, env: &Value) -> Value {
    const ERR: &str = "ERROR: unless FAILED; MUST BE OF THE FORM (unless test-expr then-expr ...);";
    if args.list_len() < 2 {
        return Value::symbol(ERR);
    }
    if eval(&args.car(), env).is_nil() {
        builtin_all(&args.cdr(), env)
    } else {
        Value::Nil
    }
}

pub fn builtin_cond(args: &Value, env: &Value) -> Value {
    const ERR: &str = "ERROR: cond FAILED; MUST BE OF THE FORM (cond clause ...) WHERE clause is of the form (test-expr then-expr ...)";
    if args.list_len() == 0 {
        return Value::symbol(ERR);
    }
    let mut clauses = args;
    while let Value::Cons(pair) = clauses {
        if pair.car.list_len() < 2 {
            return Value::symbol(ERR);
        }
        clauses = &pair.cdr;
    }
    let mut clauses = args;
    while let Value::Cons(pair) = clauses {
        if !eval(&pair.car.car(), env).is_nil() {
            break;
        }
        clauses = &pair.cdr;
    }
    // With no matching clause the walk ends on Nil and the car/cdr error
    // symbols funnel into the all arity error.
    builtin_all(&clauses.car().cdr(), env)
}
