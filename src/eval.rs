// ABOUTME: The eval / eval_list / apply trio at the heart of the interpreter

use crate::builtins::PRIMITIVES;
use crate::env::{assoc_list, assoc_ref};
use crate::value::Value;

/// Evaluate one form. Symbols are looked up, a pair applies its evaluated
/// head to its unevaluated tail, everything else is self-evaluating.
pub fn eval(form: &Value, env: &Value) -> Value {
    match form {
        Value::Symbol(_) => assoc_ref(form, env),
        Value::Cons(pair) => apply(&eval(&pair.car, env), &pair.cdr, env),
        _ => form.clone(),
    }
}

/// Evaluate each element of a list. A bare symbol evaluates as itself being
/// looked up, which lets a whole environment be passed along by reference;
/// any other non-pair yields `Nil`.
pub fn eval_list(forms: &Value, env: &Value) -> Value {
    match forms {
        Value::Symbol(_) => assoc_ref(forms, env),
        Value::Cons(pair) => Value::cons(eval(&pair.car, env), eval_list(&pair.cdr, env)),
        _ => Value::Nil,
    }
}

/// Apply a primitive, closure, or macro to the unevaluated argument list.
pub fn apply(applicable: &Value, args: &Value, env: &Value) -> Value {
    match applicable {
        Value::Primitive(index) => match PRIMITIVES.get(*index) {
            Some(primitive) => (primitive.run)(args, env),
            None => Value::symbol("ERROR: APPLY FAILED; UNKNOWN PRIMITIVE INDEX"),
        },
        Value::Closure(closure) => {
            let (params, body) = match &closure.car {
                Value::Cons(shape) => (&shape.car, &shape.cdr),
                _ => return Value::symbol("ERROR: APPLY FAILED; MALFORMED CLOSURE"),
            };
            // A Nil environment field means "resolve in the caller's
            // environment at every call" (the top-level capture rule).
            let base = if closure.cdr.is_nil() {
                env
            } else {
                &closure.cdr
            };
            let scope = assoc_list(params, &eval_list(args, env), base);
            eval_list(body, &scope).last()
        }
        Value::Macro(template) => {
            // Two passes: the body sees the unevaluated arguments and yields
            // an expansion, which is then evaluated in the caller's
            // environment. No hygiene; capture is the point.
            let scope = assoc_list(&template.car, args, env);
            let expansion = eval_list(&template.cdr, &scope);
            eval_list(&expansion, env).last()
        }
        _ => Value::symbol(
            "ERROR: APPLY FAILED; APPLY ONLY ACCEPTS PRIMITIVES, CLOSURES, AND MACROS",
        ),
    }
}
