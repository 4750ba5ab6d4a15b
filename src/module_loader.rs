//! Resolves an `include` path to source text, evaluates it once in an
//! isolated module environment, and exposes its top-level bindings as a
//! `Record` value in the including scope.

use crate::env::Environment;
use crate::error::AxionError;
use crate::eval::{FuncEntry, Interpreter};
use crate::lexer::tokenize;
use crate::parser::parse_program;
use crate::stdlib;
use crate::value::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::Path;
use std::rc::Rc;

pub fn include_module(
    interp: &Interpreter,
    path: &str,
    caller_env: &Rc<Environment>,
) -> Result<(), AxionError> {
    if interp.loaded_modules().borrow().contains(path) {
        return Ok(());
    }

    let source = resolve_source(path)?;

    // Marked loaded *before* evaluating, so mutually-including modules
    // observe each other's still-empty record instead of recursing forever.
    interp.loaded_modules().borrow_mut().insert(path.to_string());

    let tokens = tokenize(&source)?;
    let program = parse_program(tokens)?;

    let module_interp = interp.spawn_module_interpreter();
    let module_env = module_interp.global_env.clone();
    module_interp.run(&program)?;

    let record = build_module_record(&module_interp, &module_env);

    let module_name = Path::new(path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(path)
        .to_string();
    caller_env.declare(&module_name, record, false)?;
    Ok(())
}

fn resolve_source(path: &str) -> Result<String, AxionError> {
    if path.ends_with(".ax") || path.starts_with('.') || path.starts_with('/') {
        std::fs::read_to_string(path)
            .map_err(|_| AxionError::Runtime(format!("module file not found: {}", path)))
    } else {
        stdlib::lookup(path)
            .map(|s| s.to_string())
            .ok_or_else(|| AxionError::Runtime(format!("stdlib module not found: {}", path)))
    }
}

fn build_module_record(module_interp: &Interpreter, module_env: &Rc<Environment>) -> Value {
    let mut fields: HashMap<String, Value> = HashMap::new();
    for (name, value) in module_env.own_bindings() {
        fields.insert(name, value);
    }
    for (name, entry) in module_interp.functions().borrow().iter() {
        if let FuncEntry::User(decl) = entry {
            fields.insert(
                name.clone(),
                Value::UserFunction { decl: decl.clone(), env: module_env.clone() },
            );
        }
    }
    Value::Record(Rc::new(RefCell::new(fields)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;
    use crate::parser::parse_program;
    use std::io::Write;

    fn run(source: &str) -> Interpreter {
        let interp = Interpreter::new();
        let program = parse_program(tokenize(source).unwrap()).unwrap();
        interp.run(&program).unwrap();
        interp
    }

    #[test]
    fn includes_bundled_stdlib_module_by_bare_name() {
        let interp = run(r#"include "math"; set result = math.abs(0 - 5);"#);
        assert!(matches!(interp.global_env.get("result"), Some(Value::Integer(5))));
    }

    #[test]
    fn module_bindings_isolated_from_include_site() {
        let dir = tempfile::tempdir().unwrap();
        let module_path = dir.path().join("inner.ax");
        std::fs::write(&module_path, "set secret = 42;").unwrap();

        let source = format!(r#"include "{}";"#, module_path.display());
        let interp = run(&source);
        assert!(interp.global_env.get("secret").is_none());
        assert!(interp.global_env.get("inner").is_some());
    }

    #[test]
    fn module_idempotence_evaluates_top_level_once() {
        let dir = tempfile::tempdir().unwrap();
        let module_path = dir.path().join("counted.ax");
        let mut f = std::fs::File::create(&module_path).unwrap();
        writeln!(f, "set loaded = 1;").unwrap();

        let source = format!(
            r#"include "{}"; include "{}";"#,
            module_path.display(),
            module_path.display()
        );
        // Two includes of the same path must not error (no redeclaration of
        // the module binding in the caller's scope on the second include).
        run(&source);
    }

    #[test]
    fn missing_local_module_is_runtime_error() {
        let interp = Interpreter::new();
        let program = parse_program(tokenize(r#"include "./does_not_exist.ax";"#).unwrap()).unwrap();
        assert!(matches!(interp.run(&program), Err(AxionError::Runtime(_))));
    }
}
