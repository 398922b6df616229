//! Process control: cd, cwd, run, daemon, pipe
//!
//! Command strings are tokenized on whitespace before spawning; there is no
//! shell in between, so no quoting and no expansion. `run` and `pipe` reap
//! every child before returning; `daemon` never does.

use crate::eval::{eval, eval_list};
use crate::value::Value;
use log::{debug, warn};
use std::process::{Command, Stdio};

/// Whitespace-tokenized argv. Empty when the string holds no tokens.
fn split_command(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_owned).collect()
}

pub fn builtin_cd(args: &Value, env: &Value) -> Value {
    const ERR: &str = "ERROR: cd FAILED; MUST BE OF THE FORM (cd string)";
    if args.list_len() != 1 {
        return Value::symbol(ERR);
    }
    let value = eval(&args.car(), env);
    let Value::String(path) = &value else {
        return Value::symbol(ERR);
    };
    match std::env::set_current_dir(path.as_ref()) {
        Ok(()) => value.clone(),
        Err(error) => {
            debug!("cd {path}: {error}");
            Value::Nil
        }
    }
}

pub fn builtin_cwd(args: &Value, _env: &Value) -> Value {
    const ERR: &str = "ERROR: cwd FAILED; MUST BE OF THE FORM (cwd)";
    if args.list_len() != 0 {
        return Value::symbol(ERR);
    }
    match std::env::current_dir() {
        Ok(path) => Value::string(&path.to_string_lossy()),
        Err(_) => Value::Nil,
    }
}

pub fn builtin_run(args: &Value, env: &Value) -> Value {
    const ERR: &str = "ERROR: run FAILED; MUST BE OF THE FORM (run arg-string ...)";
    if args.list_len() < 1 {
        return Value::symbol(ERR);
    }
    let values = eval_list(args, env);
    let mut all_ok = true;
    let mut cursor = &values;
    while let Value::Cons(pair) = cursor {
        let Value::String(command) = &pair.car else {
            return Value::symbol(ERR);
        };
        if !run_one(command) {
            all_ok = false;
        }
        cursor = &pair.cdr;
    }
    if all_ok {
        Value::truth()
    } else {
        Value::Nil
    }
}

/// Spawn one command and wait for it. A command that cannot be spawned
/// counts as a failed exit.
fn run_one(command: &str) -> bool {
    let argv = split_command(command);
    let Some((program, rest)) = argv.split_first() else {
        warn!("run: empty command");
        return false;
    };
    debug!("run: {argv:?}");
    match Command::new(program).args(rest).status() {
        Ok(status) => status.success(),
        Err(error) => {
            warn!("run {program}: {error}");
            false
        }
    }
}

pub fn builtin_daemon(args: &Value, env: &Value) -> Value {
    const ERR: &str = "ERROR: daemon FAILED; MUST BE OF THE FORM (daemon arg-string)";
    if args.list_len() != 1 {
        return Value::symbol(ERR);
    }
    let value = eval(&args.car(), env);
    let Value::String(command) = &value else {
        return Value::symbol(ERR);
    };
    let argv = split_command(command);
    if let Some((program, rest)) = argv.split_first() {
        debug!("daemon: {argv:?}");
        // The child is never reaped; its handle is dropped on the spot, and
        // the call reports truth whether or not the program could start.
        match Command::new(program).args(rest).spawn() {
            Ok(_) => {}
            Err(error) => warn!("daemon {program}: {error}"),
        }
    }
    Value::truth()
}

pub fn builtin_pipe(args: &Value, env: &Value) -> Value {
    const ERR: &str = "ERROR: pipe FAILED; MUST BE OF THE FORM (pipe arg-string-1 arg-string-2 ...)";
    if args.list_len() < 2 {
        return Value::symbol(ERR);
    }
    let values = eval_list(args, env);
    let mut stages = Vec::with_capacity(values.list_len());
    let mut cursor = &values;
    while let Value::Cons(pair) = cursor {
        let Value::String(command) = &pair.car else {
            return Value::symbol(ERR);
        };
        stages.push(command.to_string());
        cursor = &pair.cdr;
    }
    if run_pipeline(&stages) {
        Value::truth()
    } else {
        Value::Nil
    }
}

/// Wire stdout of each stage to stdin of the next, left to right, then reap
/// everything. Overall success requires every stage to exit 0.
fn run_pipeline(stages: &[String]) -> bool {
    let mut all_ok = true;
    let mut children = Vec::with_capacity(stages.len());
    let mut upstream: Option<Stdio> = None;
    let last = stages.len() - 1;
    for (index, stage) in stages.iter().enumerate() {
        let argv = split_command(stage);
        let Some((program, rest)) = argv.split_first() else {
            warn!("pipe: empty command");
            all_ok = false;
            upstream = None;
            continue;
        };
        let mut command = Command::new(program);
        command.args(rest);
        if let Some(stdin) = upstream.take() {
            command.stdin(stdin);
        }
        if index < last {
            command.stdout(Stdio::piped());
        }
        debug!("pipe stage {index}: {argv:?}");
        match command.spawn() {
            Ok(mut child) => {
                upstream = child.stdout.take().map(Stdio::from);
                children.push(child);
            }
            Err(error) => {
                warn!("pipe {program}: {error}");
                all_ok = false;
            }
        }
    }
    for mut child in children {
        match child.wait() {
            Ok(status) => {
                if !status.success() {
                    all_ok = false;
                }
            }
            Err(error) => {
                warn!("pipe: wait: {error}");
                all_ok = false;
            }
        }
    }
    all_ok
}
