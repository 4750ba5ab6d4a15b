//! Tree-walking evaluator: walks the AST against an `Environment` chain and
//! a process-scoped function table.

use crate::ast::{AssignOperator, BinaryOperator, Expr, FuncDecl, Program, Stmt, UnaryOperator};
use crate::builtins;
use crate::env::Environment;
use crate::error::AxionError;
use crate::lexer::tokenize;
use crate::module_loader;
use crate::parser;
use crate::value::Value;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

/// What a statement evaluation unwinds with. `Return`/`Break`/`Skip` are
/// consumed by the nearest function-call frame or loop respectively; `None`
/// means "ran to completion, nothing to propagate".
#[derive(Debug, Clone)]
pub enum Signal {
    None,
    Return(Value),
    Break,
    Skip,
}

/// One callable entry in the function table: either Axion source or a host
/// function registered under a fixed name.
#[derive(Clone)]
pub enum FuncEntry {
    User(Rc<FuncDecl>),
    Builtin(crate::value::BuiltinFn),
}

pub struct Interpreter {
    pub global_env: Rc<Environment>,
    functions: RefCell<HashMap<String, FuncEntry>>,
    loaded_modules: Rc<RefCell<HashSet<String>>>,
}

impl Interpreter {
    pub fn new() -> Self {
        let interp = Interpreter {
            global_env: Environment::new(),
            functions: RefCell::new(HashMap::new()),
            loaded_modules: Rc::new(RefCell::new(HashSet::new())),
        };
        builtins::register(&interp);
        interp
    }

    /// A fresh interpreter sharing the loaded-set but with its own function
    /// table, used for evaluating an included module in isolation.
    fn child_for_module(loaded_modules: Rc<RefCell<HashSet<String>>>) -> Self {
        let interp = Interpreter {
            global_env: Environment::new(),
            functions: RefCell::new(HashMap::new()),
            loaded_modules,
        };
        builtins::register(&interp);
        interp
    }

    pub fn register_builtin(&self, name: &str, f: crate::value::BuiltinFn) {
        self.functions
            .borrow_mut()
            .insert(name.to_string(), FuncEntry::Builtin(f));
    }

    pub fn run(&self, program: &Program) -> Result<(), AxionError> {
        self.eval_block(&program.body, &self.global_env)?;
        Ok(())
    }

    fn eval_block(&self, stmts: &[Stmt], env: &Rc<Environment>) -> Result<Signal, AxionError> {
        for stmt in stmts {
            match self.eval_statement(stmt, env)? {
                Signal::None => {}
                signal => return Ok(signal),
            }
        }
        Ok(Signal::None)
    }

    fn eval_statement(&self, stmt: &Stmt, env: &Rc<Environment>) -> Result<Signal, AxionError> {
        match stmt {
            Stmt::VarDecl { name, init } => {
                let value = match init {
                    Some(expr) => self.eval_expression(expr, env)?,
                    None => Value::Null,
                };
                env.declare(name, value, false)?;
                Ok(Signal::None)
            }
            Stmt::ConstDecl { name, init } => {
                let init = init.as_ref().ok_or_else(|| {
                    AxionError::Runtime("constant requires an initializer".to_string())
                })?;
                let value = self.eval_expression(init, env)?;
                env.declare(name, value, true)?;
                Ok(Signal::None)
            }
            Stmt::FuncDecl(decl) => {
                self.functions
                    .borrow_mut()
                    .insert(decl.name.clone(), FuncEntry::User(Rc::new(decl.clone())));
                Ok(Signal::None)
            }
            Stmt::Expression(expr) => {
                self.eval_expression(expr, env)?;
                Ok(Signal::None)
            }
            Stmt::Log { expr } => {
                let value = self.eval_expression(expr, env)?;
                print!("{}", value);
                Ok(Signal::None)
            }
            Stmt::Logln { expr } => {
                let value = self.eval_expression(expr, env)?;
                println!("{}", value);
                Ok(Signal::None)
            }
            Stmt::Input { target, message } => {
                self.eval_input(target, message.as_ref(), env)?;
                Ok(Signal::None)
            }
            Stmt::If { condition, body, elseifs, else_body } => {
                if self.eval_expression(condition, env)?.is_truthy() {
                    return self.eval_block(body, &Environment::with_parent(env.clone()));
                }
                for arm in elseifs {
                    if self.eval_expression(&arm.condition, env)?.is_truthy() {
                        return self.eval_block(&arm.body, &Environment::with_parent(env.clone()));
                    }
                }
                if let Some(else_body) = else_body {
                    return self.eval_block(else_body, &Environment::with_parent(env.clone()));
                }
                Ok(Signal::None)
            }
            Stmt::ForLoop { var, start, end, step, body } => {
                let start = as_i64(&self.eval_expression(start, env)?)?;
                let end = as_i64(&self.eval_expression(end, env)?)?;
                let step = as_i64(&self.eval_expression(step, env)?)?;
                let mut i = start;
                while i <= end {
                    let loop_env = Environment::with_parent(env.clone());
                    loop_env.declare(var, Value::Integer(i), false)?;
                    match self.eval_block(body, &loop_env)? {
                        Signal::Break => break,
                        Signal::Return(v) => return Ok(Signal::Return(v)),
                        Signal::Skip | Signal::None => {}
                    }
                    i += step;
                }
                Ok(Signal::None)
            }
            Stmt::WhileLoop { condition, body } => {
                while self.eval_expression(condition, env)?.is_truthy() {
                    match self.eval_block(body, &Environment::with_parent(env.clone()))? {
                        Signal::Break => break,
                        Signal::Return(v) => return Ok(Signal::Return(v)),
                        Signal::Skip | Signal::None => {}
                    }
                }
                Ok(Signal::None)
            }
            Stmt::DoWhileLoop { body, condition } => {
                loop {
                    match self.eval_block(body, &Environment::with_parent(env.clone()))? {
                        Signal::Break => break,
                        Signal::Return(v) => return Ok(Signal::Return(v)),
                        Signal::Skip | Signal::None => {}
                    }
                    if !self.eval_expression(condition, env)?.is_truthy() {
                        break;
                    }
                }
                Ok(Signal::None)
            }
            Stmt::Match { scrutinee, cases, else_body } => {
                let scrutinee_value = self.eval_expression(scrutinee, env)?;
                for case in cases {
                    let case_value = self.eval_expression(&case.value, env)?;
                    if values_equal(&scrutinee_value, &case_value) {
                        return self.eval_statement(&case.body, &Environment::with_parent(env.clone()));
                    }
                }
                if let Some(else_body) = else_body {
                    return self.eval_statement(else_body, &Environment::with_parent(env.clone()));
                }
                Ok(Signal::None)
            }
            Stmt::Return(expr) => Ok(Signal::Return(self.eval_expression(expr, env)?)),
            Stmt::Break => Ok(Signal::Break),
            Stmt::Skip => Ok(Signal::Skip),
            Stmt::Include { path } => {
                module_loader::include_module(self, path, env)?;
                Ok(Signal::None)
            }
        }
    }

    fn eval_input(
        &self,
        target: &Expr,
        message: Option<&Expr>,
        env: &Rc<Environment>,
    ) -> Result<(), AxionError> {
        if let Some(message) = message {
            let prompt = self.eval_expression(message, env)?;
            print!("{}", prompt);
            use std::io::Write;
            std::io::stdout().flush().ok();
        }
        let mut raw = String::new();
        std::io::stdin()
            .read_line(&mut raw)
            .map_err(|e| AxionError::Runtime(format!("failed to read stdin: {}", e)))?;
        let raw = raw.trim_end_matches('\n').trim_end_matches('\r');

        let value = if !raw.contains('.') {
            if let Ok(n) = raw.parse::<i64>() {
                Value::Integer(n)
            } else {
                Value::String(raw.to_string())
            }
        } else if let Ok(n) = raw.parse::<f64>() {
            Value::Float(n)
        } else {
            Value::String(raw.to_string())
        };

        self.assign_to_lvalue(target, value, env)?;
        Ok(())
    }

    fn eval_expression(&self, expr: &Expr, env: &Rc<Environment>) -> Result<Value, AxionError> {
        match expr {
            Expr::Number(lexeme) => {
                if lexeme.contains('.') {
                    lexeme
                        .parse::<f64>()
                        .map(Value::Float)
                        .map_err(|_| AxionError::Syntax(format!("invalid number literal '{}'", lexeme)))
                } else {
                    lexeme
                        .parse::<i64>()
                        .map(Value::Integer)
                        .map_err(|_| AxionError::Syntax(format!("invalid number literal '{}'", lexeme)))
                }
            }
            Expr::Str(raw) => self.interpolate(raw, env),
            Expr::Identifier(name) => env
                .get(name)
                .ok_or_else(|| AxionError::Name(format!("undefined variable '{}'", name))),
            Expr::BinaryOp { op, left, right } => {
                let left = self.eval_expression(left, env)?;
                let right = self.eval_expression(right, env)?;
                eval_binary_op(*op, left, right)
            }
            Expr::UnaryOp { op, operand } => {
                let value = self.eval_expression(operand, env)?;
                eval_unary_op(*op, value)
            }
            Expr::Assignment { target, op, value } => {
                let rhs = self.eval_expression(value, env)?;
                self.eval_assignment(target, *op, rhs, env)
            }
            Expr::Call { callee, args } => self.eval_call(callee, args, env),
            Expr::ArrayLiteral(elements) => {
                let mut values = Vec::with_capacity(elements.len());
                for el in elements {
                    values.push(self.eval_expression(el, env)?);
                }
                Ok(Value::Array(Rc::new(RefCell::new(values))))
            }
            Expr::Index { target, index } => {
                let target = self.eval_expression(target, env)?;
                let index = self.eval_expression(index, env)?;
                index_get(&target, &index)
            }
            Expr::MemberAccess { object, property } => {
                let object = self.eval_expression(object, env)?;
                member_get(&object, property)
            }
        }
    }

    /// Re-lexes and re-parses every balanced `{...}` run in a string literal,
    /// evaluating each as a single expression in the current scope.
    fn interpolate(&self, raw: &str, env: &Rc<Environment>) -> Result<Value, AxionError> {
        let mut result = String::new();
        let chars: Vec<char> = raw.chars().collect();
        let mut i = 0;
        while i < chars.len() {
            if chars[i] == '{' {
                let mut j = i + 1;
                while j < chars.len() && chars[j] != '}' {
                    j += 1;
                }
                if j >= chars.len() {
                    return Err(AxionError::Syntax("unclosed interpolation in string".into()));
                }
                let inner: String = chars[i + 1..j].iter().collect();
                let inner_tokens = tokenize(inner.trim())?;
                let inner_expr = parser::parse_expression(inner_tokens)?;
                let value = self.eval_expression(&inner_expr, env)?;
                result.push_str(&value.to_string());
                i = j + 1;
            } else {
                result.push(chars[i]);
                i += 1;
            }
        }
        Ok(Value::String(result))
    }

    fn eval_assignment(
        &self,
        target: &Expr,
        op: AssignOperator,
        rhs: Value,
        env: &Rc<Environment>,
    ) -> Result<Value, AxionError> {
        match target {
            Expr::Identifier(name) => {
                let new_value = if op == AssignOperator::Assign {
                    rhs
                } else {
                    let current = env
                        .get(name)
                        .ok_or_else(|| AxionError::Name(format!("undefined variable '{}'", name)))?;
                    apply_compound(op, current, rhs)?
                };
                env.set(name, new_value.clone())?;
                Ok(new_value)
            }
            Expr::Index { target, index } => {
                if let Expr::Identifier(name) = target.as_ref() {
                    if env.is_const(name) == Some(true) {
                        return Err(AxionError::Const(format!("cannot modify constant '{}'", name)));
                    }
                }
                let array = self.eval_expression(target, env)?;
                let index_value = self.eval_expression(index, env)?;
                let idx = as_usize(&index_value)?;
                let Value::Array(cells) = &array else {
                    return Err(AxionError::Type("index assignment target is not an array".into()));
                };
                let mut cells = cells.borrow_mut();
                while cells.len() <= idx {
                    cells.push(Value::Null);
                }
                let new_value = if op == AssignOperator::Assign {
                    rhs
                } else {
                    apply_compound(op, cells[idx].clone(), rhs)?
                };
                cells[idx] = new_value.clone();
                Ok(new_value)
            }
            _ => Err(AxionError::Syntax("invalid assignment target".into())),
        }
    }

    fn assign_to_lvalue(&self, target: &Expr, value: Value, env: &Rc<Environment>) -> Result<(), AxionError> {
        self.eval_assignment(target, AssignOperator::Assign, value, env)?;
        Ok(())
    }

    fn eval_call(&self, callee: &Expr, args: &[Expr], env: &Rc<Environment>) -> Result<Value, AxionError> {
        if let Expr::Identifier(name) = callee {
            let entry = self.functions.borrow().get(name).cloned();
            match entry {
                Some(FuncEntry::Builtin(f)) => {
                    let mut values = Vec::with_capacity(args.len());
                    for a in args {
                        values.push(self.eval_expression(a, env)?);
                    }
                    return f(&values);
                }
                Some(FuncEntry::User(decl)) => {
                    let mut values = Vec::with_capacity(args.len());
                    for a in args {
                        values.push(self.eval_expression(a, env)?);
                    }
                    return self.call_user_function(&decl, values, env.clone());
                }
                None => {}
            }

            let callee_value = env
                .get(name)
                .ok_or_else(|| AxionError::Name(format!("function '{}' is not defined", name)))?;
            let mut values = Vec::with_capacity(args.len());
            for a in args {
                values.push(self.eval_expression(a, env)?);
            }
            return self.invoke_value(&callee_value, values);
        }

        let callee_value = self.eval_expression(callee, env)?;
        let mut values = Vec::with_capacity(args.len());
        for a in args {
            values.push(self.eval_expression(a, env)?);
        }
        self.invoke_value(&callee_value, values)
    }

    fn invoke_value(&self, callee: &Value, args: Vec<Value>) -> Result<Value, AxionError> {
        match callee {
            Value::BuiltinFunction(f) => f(&args),
            Value::UserFunction { decl, env } => self.call_user_function(decl, args, env.clone()),
            _ => Err(AxionError::Type(format!("'{}' is not callable", callee.type_name()))),
        }
    }

    /// Binds parameters positionally in a new scope whose parent is the
    /// call-site scope, declares the function's own name for self-recursion,
    /// evaluates the body, and unwraps a return signal. Extra arguments are
    /// ignored and missing ones left unbound, matching a truncating
    /// positional zip rather than arity-checking the call.
    pub fn call_user_function(
        &self,
        decl: &Rc<FuncDecl>,
        args: Vec<Value>,
        calling_env: Rc<Environment>,
    ) -> Result<Value, AxionError> {
        let func_env = Environment::with_parent(calling_env);
        func_env.declare(
            &decl.name,
            Value::UserFunction { decl: decl.clone(), env: func_env.clone() },
            false,
        )?;
        for (pname, arg_val) in decl.params.iter().zip(args) {
            func_env.declare(pname, arg_val, false)?;
        }
        match self.eval_block(&decl.body, &func_env)? {
            Signal::Return(value) => Ok(value),
            _ => Ok(Value::Null),
        }
    }

    pub fn functions(&self) -> &RefCell<HashMap<String, FuncEntry>> {
        &self.functions
    }

    pub fn loaded_modules(&self) -> &Rc<RefCell<HashSet<String>>> {
        &self.loaded_modules
    }

    pub fn spawn_module_interpreter(&self) -> Interpreter {
        Interpreter::child_for_module(self.loaded_modules.clone())
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

fn as_i64(value: &Value) -> Result<i64, AxionError> {
    match value {
        Value::Integer(n) => Ok(*n),
        Value::Float(n) => Ok(*n as i64),
        other => Err(AxionError::Type(format!("expected a number, got {}", other.type_name()))),
    }
}

fn as_usize(value: &Value) -> Result<usize, AxionError> {
    let n = as_i64(value)?;
    usize::try_from(n).map_err(|_| AxionError::Type(format!("index must be non-negative, got {}", n)))
}

fn index_get(target: &Value, index: &Value) -> Result<Value, AxionError> {
    match target {
        Value::Array(cells) => {
            let idx = as_usize(index)?;
            Ok(cells.borrow().get(idx).cloned().unwrap_or(Value::Null))
        }
        other => Err(AxionError::Type(format!("cannot index into {}", other.type_name()))),
    }
}

fn member_get(object: &Value, property: &str) -> Result<Value, AxionError> {
    match object {
        Value::Record(fields) => fields
            .borrow()
            .get(property)
            .cloned()
            .ok_or_else(|| AxionError::Runtime(format!("property '{}' not found", property))),
        other => Err(AxionError::Type(format!(
            "cannot access member '{}' on {}",
            property,
            other.type_name()
        ))),
    }
}

fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Integer(a), Value::Integer(b)) => a == b,
        (Value::Float(a), Value::Float(b)) => a == b,
        (Value::Integer(a), Value::Float(b)) | (Value::Float(b), Value::Integer(a)) => *a as f64 == *b,
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Boolean(a), Value::Boolean(b)) => a == b,
        (Value::Null, Value::Null) => true,
        _ => false,
    }
}

fn eval_binary_op(op: BinaryOperator, left: Value, right: Value) -> Result<Value, AxionError> {
    use BinaryOperator::*;
    match op {
        Add => match (&left, &right) {
            (Value::String(a), Value::String(b)) => Ok(Value::String(format!("{}{}", a, b))),
            _ => numeric_op(left, right, |a, b| a + b, |a, b| a + b),
        },
        Sub => numeric_op(left, right, |a, b| a - b, |a, b| a - b),
        Mul => numeric_op(left, right, |a, b| a * b, |a, b| a * b),
        Div => numeric_op(left, right, |a, b| a / b, |a, b| a / b),
        Mod => numeric_op(left, right, |a, b| a % b, |a, b| a % b),
        Eq => Ok(Value::Boolean(values_equal(&left, &right))),
        NotEq => Ok(Value::Boolean(!values_equal(&left, &right))),
        Lt | LtEq | Gt | GtEq => compare(op, left, right),
        Both => Ok(Value::Boolean(left.is_truthy() && right.is_truthy())),
        Any => Ok(Value::Boolean(left.is_truthy() || right.is_truthy())),
        BitAnd => Ok(Value::Integer(as_i64(&left)? & as_i64(&right)?)),
        BitOr => Ok(Value::Integer(as_i64(&left)? | as_i64(&right)?)),
        BitXor => Ok(Value::Integer(as_i64(&left)? ^ as_i64(&right)?)),
        Shl => Ok(Value::Integer(as_i64(&left)? << as_i64(&right)?)),
        Shr => Ok(Value::Integer(as_i64(&left)? >> as_i64(&right)?)),
    }
}

fn numeric_op(
    left: Value,
    right: Value,
    int_op: fn(i64, i64) -> i64,
    float_op: fn(f64, f64) -> f64,
) -> Result<Value, AxionError> {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => Ok(Value::Integer(int_op(a, b))),
        (Value::Float(a), Value::Float(b)) => Ok(Value::Float(float_op(a, b))),
        (Value::Integer(a), Value::Float(b)) => Ok(Value::Float(float_op(a as f64, b))),
        (Value::Float(a), Value::Integer(b)) => Ok(Value::Float(float_op(a, b as f64))),
        (a, b) => Err(AxionError::Type(format!(
            "unsupported operand types: {} and {}",
            a.type_name(),
            b.type_name()
        ))),
    }
}

fn compare(op: BinaryOperator, left: Value, right: Value) -> Result<Value, AxionError> {
    let (a, b) = match (&left, &right) {
        (Value::Integer(a), Value::Integer(b)) => (*a as f64, *b as f64),
        (Value::Float(a), Value::Float(b)) => (*a, *b),
        (Value::Integer(a), Value::Float(b)) => (*a as f64, *b),
        (Value::Float(a), Value::Integer(b)) => (*a, *b as f64),
        _ => {
            return Err(AxionError::Type(format!(
                "cannot compare {} and {}",
                left.type_name(),
                right.type_name()
            )))
        }
    };
    let result = match op {
        BinaryOperator::Lt => a < b,
        BinaryOperator::LtEq => a <= b,
        BinaryOperator::Gt => a > b,
        BinaryOperator::GtEq => a >= b,
        _ => unreachable!(),
    };
    Ok(Value::Boolean(result))
}

fn eval_unary_op(op: UnaryOperator, value: Value) -> Result<Value, AxionError> {
    match op {
        UnaryOperator::BitNot => Ok(Value::Integer(!as_i64(&value)?)),
        UnaryOperator::Invert => Ok(Value::Boolean(!value.is_truthy())),
        UnaryOperator::Neg => match value {
            Value::Integer(n) => Ok(Value::Integer(-n)),
            Value::Float(n) => Ok(Value::Float(-n)),
            other => Err(AxionError::Type(format!("cannot negate {}", other.type_name()))),
        },
    }
}

fn apply_compound(op: AssignOperator, current: Value, rhs: Value) -> Result<Value, AxionError> {
    use AssignOperator::*;
    match op {
        Assign => Ok(rhs),
        AddAssign => eval_binary_op(BinaryOperator::Add, current, rhs),
        SubAssign => eval_binary_op(BinaryOperator::Sub, current, rhs),
        MulAssign => eval_binary_op(BinaryOperator::Mul, current, rhs),
        DivAssign => eval_binary_op(BinaryOperator::Div, current, rhs),
        ModAssign => eval_binary_op(BinaryOperator::Mod, current, rhs),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;
    use crate::parser::parse_program;

    fn run(source: &str) -> Interpreter {
        let interp = Interpreter::new();
        let program = parse_program(tokenize(source).unwrap()).unwrap();
        interp.run(&program).unwrap();
        interp
    }

    #[test]
    fn precedence_climbing_matches_expected_results() {
        let interp = run("set a = 1 + 2 * 3; set b = (1 + 2) * 3; set c = (1 == 1) both (2 == 2);");
        assert!(matches!(interp.global_env.get("a"), Some(Value::Integer(7))));
        assert!(matches!(interp.global_env.get("b"), Some(Value::Integer(9))));
        assert!(matches!(interp.global_env.get("c"), Some(Value::Boolean(true))));
    }

    #[test]
    fn recursive_fibonacci() {
        let interp = run(
            "func fib(n) { if (n < 2) then { return n; } return fib(n-1) + fib(n-2); } set r = fib(10);",
        );
        assert!(matches!(interp.global_env.get("r"), Some(Value::Integer(55))));
    }

    #[test]
    fn array_index_assignment_auto_extends() {
        let interp = run("set a = [1,2,3]; a[5] = 9;");
        let Some(Value::Array(cells)) = interp.global_env.get("a") else {
            panic!("expected array");
        };
        let cells = cells.borrow();
        assert_eq!(cells.len(), 6);
        assert!(matches!(cells[3], Value::Null));
        assert!(matches!(cells[5], Value::Integer(9)));
    }

    #[test]
    fn const_reassignment_errors() {
        let interp = Interpreter::new();
        let program = parse_program(tokenize("const pi = 3; pi = 4;").unwrap()).unwrap();
        assert!(matches!(interp.run(&program), Err(AxionError::Const(_))));
    }

    #[test]
    fn const_decl_without_initializer_is_runtime_error() {
        let interp = Interpreter::new();
        let program = parse_program(tokenize("const pi;").unwrap()).unwrap();
        assert!(matches!(interp.run(&program), Err(AxionError::Runtime(_))));
    }

    #[test]
    fn string_interpolation_substitutes_expression() {
        let interp = run(r#"set name = "Ada"; set s = "hi {name}!";"#);
        assert!(matches!(interp.global_env.get("s"), Some(Value::String(ref s)) if s == "hi Ada!"));
    }

    #[test]
    fn declaration_uniqueness_in_one_scope_errors() {
        let program = parse_program(tokenize("set x = 1; set x = 2;").unwrap()).unwrap();
        assert!(matches!(Interpreter::new().run(&program), Err(AxionError::Name(_))));
    }

    #[test]
    fn child_scope_may_shadow() {
        let interp = run("set x = 1; if (1 == 1) then { set x = 2; }");
        assert!(matches!(interp.global_env.get("x"), Some(Value::Integer(1))));
    }

    #[test]
    fn break_and_skip_control_loops() {
        let interp = run(
            "set total = 0; loop (i from 1 to 5 step 1) { if (i == 3) then { skip; } if (i == 5) then { break; } total += i; }",
        );
        // i=1,2 accumulate; i=3 skips before the add; i=5 breaks before the
        // add: total = 1 + 2 + 4 = 7.
        assert!(matches!(interp.global_env.get("total"), Some(Value::Integer(7))));
    }
}
