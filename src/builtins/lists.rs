//! Pair surgery: cons, car, cdr
//!
//! - `cons`: build a fresh pair from two evaluated values
//! - `car`: first field of a pair
//! - `cdr`: second field of a pair

use crate::eval::{eval, eval_list};
use crate::value::Value;

pub fn builtin_cons(args: &Value, env: &Value) -> Value {
    const ERR: &str = "ERROR: cons FAILED; MUST BE OF THE FORM (cons expr-1 expr-2)";
    if args.list_len() != 2 {
        return Value::symbol(ERR);
    }
    let values = eval_list(args, env);
    Value::cons(values.car(), values.cdr().car())
}

pub fn builtin_car(args: &Value, env: &Value) -> Value {
    const ERR: &str = "ERROR: car FAILED; MUST BE OF THE FORM (car pair)";
    if args.list_len() != 1 {
        return Value::symbol(ERR);
    }
    eval(&args.car(), env).car()
}

pub fn builtin_cdr(args: &Value, env: &Value) -> Value {
    const ERR: &str = "ERROR: cdr FAILED; MUST BE OF THE FORM (cdr pair)";
    if args.list_len() != 1 {
        return Value::symbol(ERR);
    }
    eval(&args.car(), env).cdr()
}
