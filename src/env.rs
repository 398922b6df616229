// ABOUTME: Association-list environments and the process-wide top-level slot

use crate::builtins;
use crate::value::Value;
use std::cell::RefCell;

thread_local! {
    /// The one mutable slot in the interpreter. `global` replaces the value
    /// here; nothing ever mutates an environment list in place.
    static TOP_LEVEL: RefCell<Value> = const { RefCell::new(Value::Nil) };
}

pub fn top_level() -> Value {
    TOP_LEVEL.with(|slot| slot.borrow().clone())
}

pub fn set_top_level(env: Value) {
    TOP_LEVEL.with(|slot| *slot.borrow_mut() = env);
}

/// Build the initial top-level environment (`#t`, `#f`, and the primitives
/// table) and install it in the slot. Returns the environment for callers
/// that want to hold on to it.
pub fn bootstrap() -> Value {
    let mut env = Value::Nil;
    env = assoc_cons(&Value::symbol("#t"), &Value::truth(), &env);
    env = assoc_cons(&Value::symbol("#f"), &Value::Nil, &env);
    env = builtins::install(env);
    set_top_level(env.clone());
    env
}

/// Prepend the binding `(key . value)`, returning the extended environment.
pub fn assoc_cons(key: &Value, value: &Value, env: &Value) -> Value {
    Value::cons(Value::cons(key.clone(), value.clone()), env.clone())
}

/// Left-to-right scan for the first binding whose key is structurally equal
/// to `key`. Earlier bindings shadow later ones.
pub fn assoc_ref(key: &Value, env: &Value) -> Value {
    let mut cursor = env;
    while let Value::Cons(entry) = cursor {
        if let Value::Cons(binding) = &entry.car {
            if binding.car == *key {
                return binding.cdr.clone();
            }
        }
        cursor = &entry.cdr;
    }
    Value::symbol("ERROR: ASSOC REF FAILED")
}

/// Zip parameters onto values. A bare symbol in `keys` position binds the
/// whole remaining value list (a rest parameter); surplus values are
/// discarded; a missing value binds the `car` error symbol.
pub fn assoc_list(keys: &Value, values: &Value, env: &Value) -> Value {
    match keys {
        Value::Nil => env.clone(),
        Value::Cons(pair) => assoc_list(
            &pair.cdr,
            &values.cdr(),
            &assoc_cons(&pair.car, &values.car(), env),
        ),
        rest => assoc_cons(rest, values, env),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sym(name: &str) -> Value {
        Value::symbol(name)
    }

    #[test]
    fn test_assoc_cons_and_ref() {
        let env = assoc_cons(&sym("x"), &Value::Number(42.0), &Value::Nil);
        assert_eq!(assoc_ref(&sym("x"), &env), Value::Number(42.0));
    }

    #[test]
    fn test_assoc_ref_miss_is_error_symbol() {
        let miss = assoc_ref(&sym("nope"), &Value::Nil);
        assert_eq!(miss, sym("ERROR: ASSOC REF FAILED"));
    }

    #[test]
    fn test_newer_bindings_shadow_older_ones() {
        let env = assoc_cons(&sym("x"), &Value::Number(1.0), &Value::Nil);
        let env = assoc_cons(&sym("x"), &Value::Number(2.0), &env);
        assert_eq!(assoc_ref(&sym("x"), &env), Value::Number(2.0));
    }

    #[test]
    fn test_assoc_list_zips_pairwise() {
        let keys = Value::cons(sym("a"), Value::cons(sym("b"), Value::Nil));
        let values = Value::cons(
            Value::Number(1.0),
            Value::cons(Value::Number(2.0), Value::Nil),
        );
        let env = assoc_list(&keys, &values, &Value::Nil);
        assert_eq!(assoc_ref(&sym("a"), &env), Value::Number(1.0));
        assert_eq!(assoc_ref(&sym("b"), &env), Value::Number(2.0));
    }

    #[test]
    fn test_assoc_list_discards_surplus_values() {
        let keys = Value::cons(sym("a"), Value::Nil);
        let values = Value::cons(
            Value::Number(1.0),
            Value::cons(Value::Number(2.0), Value::Nil),
        );
        let env = assoc_list(&keys, &values, &Value::Nil);
        assert_eq!(env.list_len(), 1);
        assert_eq!(assoc_ref(&sym("a"), &env), Value::Number(1.0));
    }

    #[test]
    fn test_assoc_list_rest_parameter_takes_whole_tail() {
        // (a . rest) against (1 2 3): rest gets (2 3)
        let keys = Value::cons(sym("a"), sym("rest"));
        let values = Value::cons(
            Value::Number(1.0),
            Value::cons(
                Value::Number(2.0),
                Value::cons(Value::Number(3.0), Value::Nil),
            ),
        );
        let env = assoc_list(&keys, &values, &Value::Nil);
        assert_eq!(assoc_ref(&sym("a"), &env), Value::Number(1.0));
        assert_eq!(assoc_ref(&sym("rest"), &env).list_len(), 2);
    }

    #[test]
    fn test_bootstrap_binds_truth_and_falsity() {
        let env = bootstrap();
        assert_eq!(assoc_ref(&sym("#t"), &env), sym("#t"));
        assert_eq!(assoc_ref(&sym("#f"), &env), Value::Nil);
        assert_eq!(top_level(), env);
    }

    #[test]
    fn test_top_level_slot_is_replaced_not_mutated() {
        let env = bootstrap();
        let extended = assoc_cons(&sym("fresh"), &Value::Number(9.0), &env);
        set_top_level(extended.clone());
        assert_eq!(top_level(), extended);
        // The environment captured before the update is unchanged.
        assert!(assoc_ref(&sym("fresh"), &env).is_error());
    }
}
