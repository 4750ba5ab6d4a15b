// ABOUTME: Runtime value types for the Axion interpreter

use crate::ast::FuncDecl;
use crate::env::Environment;
use crate::error::AxionError;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// A host function exposed to Axion scripts under a fixed name.
pub type BuiltinFn = fn(&[Value]) -> Result<Value, AxionError>;

/// The runtime value tagged union.
#[derive(Clone)]
pub enum Value {
    Integer(i64),
    Float(f64),
    String(String),
    Boolean(bool),
    /// Ordered, mutable, zero-indexed, appendable. Shared by reference.
    Array(Rc<RefCell<Vec<Value>>>),
    /// A mapping from name to value. Shared by reference.
    Record(Rc<RefCell<HashMap<String, Value>>>),
    /// A function defined in Axion source plus the environment it closes
    /// over. Only produced for values exposed out of an included module
    /// (see `module_loader.rs`) — ordinary calls resolve through the
    /// function table instead.
    UserFunction {
        decl: Rc<FuncDecl>,
        env: Rc<Environment>,
    },
    BuiltinFunction(BuiltinFn),
    Null,
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Boolean(_) => "boolean",
            Value::Array(_) => "array",
            Value::Record(_) => "record",
            Value::UserFunction { .. } => "function",
            Value::BuiltinFunction(_) => "function",
            Value::Null => "null",
        }
    }

    pub fn is_callable(&self) -> bool {
        matches!(self, Value::UserFunction { .. } | Value::BuiltinFunction(_))
    }

    /// Truthiness used by `invert` and conditionals.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Boolean(b) => *b,
            Value::Integer(n) => *n != 0,
            Value::Float(n) => *n != 0.0,
            Value::String(s) => {
                let trimmed = s.trim();
                match trimmed.to_lowercase().as_str() {
                    "true" => true,
                    "false" => false,
                    _ => trimmed.parse::<f64>().map(|n| n != 0.0).unwrap_or(!trimmed.is_empty()),
                }
            }
            Value::Array(a) => !a.borrow().is_empty(),
            Value::Record(r) => !r.borrow().is_empty(),
            Value::UserFunction { .. } | Value::BuiltinFunction(_) => true,
            Value::Null => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{}", n),
            Value::Float(n) => write!(f, "{}", n),
            Value::String(s) => write!(f, "{}", s),
            Value::Boolean(b) => write!(f, "{}", if *b { "true" } else { "false" }),
            Value::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.borrow().iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Record(map) => {
                let map = map.borrow();
                let mut entries: Vec<_> = map.iter().collect();
                entries.sort_by_key(|(k, _)| k.as_str());
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}={}", key, value)?;
                }
                Ok(())
            }
            Value::UserFunction { decl, .. } => write!(f, "<function {}>", decl.name),
            Value::BuiltinFunction(_) => write!(f, "<builtin>"),
            Value::Null => write!(f, "null"),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.type_name(), self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_and_user_functions_are_callable_other_values_are_not() {
        fn noop(_args: &[Value]) -> Result<Value, AxionError> {
            Ok(Value::Null)
        }
        assert!(Value::BuiltinFunction(noop).is_callable());
        assert!(!Value::Integer(1).is_callable());
        assert!(!Value::Null.is_callable());
    }

    #[test]
    fn integer_and_float_display_distinctly() {
        assert_eq!(format!("{}", Value::Integer(42)), "42");
        assert_eq!(format!("{}", Value::Float(42.0)), "42");
        assert_eq!(format!("{}", Value::Float(2.5)), "2.5");
    }

    #[test]
    fn array_display_uses_comma_space() {
        let arr = Value::Array(Rc::new(RefCell::new(vec![
            Value::Integer(1),
            Value::Null,
            Value::Integer(3),
        ])));
        assert_eq!(format!("{}", arr), "[1, null, 3]");
    }

    #[test]
    fn null_displays_as_literal_token() {
        assert_eq!(format!("{}", Value::Null), "null");
    }

    #[test]
    fn truthiness_of_strings() {
        assert!(Value::String("true".into()).is_truthy());
        assert!(!Value::String("FALSE".into()).is_truthy());
        assert!(!Value::String("0".into()).is_truthy());
        assert!(Value::String("3".into()).is_truthy());
        assert!(Value::String("hello".into()).is_truthy());
        assert!(!Value::String("".into()).is_truthy());
    }

    #[test]
    fn truthiness_of_numbers_and_arrays() {
        assert!(!Value::Integer(0).is_truthy());
        assert!(Value::Integer(1).is_truthy());
        assert!(!Value::Array(Rc::new(RefCell::new(vec![]))).is_truthy());
        assert!(Value::Array(Rc::new(RefCell::new(vec![Value::Null]))).is_truthy());
    }
}
