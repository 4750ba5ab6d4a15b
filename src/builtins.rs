//! Host functions exposed to Axion scripts under a fixed name.

use crate::error::AxionError;
use crate::eval::Interpreter;
use crate::value::Value;
use std::time::{SystemTime, UNIX_EPOCH};

pub fn register(interp: &Interpreter) {
    interp.register_builtin("time_now", time_now);
}

/// Wall-clock read returning integer milliseconds since the Unix epoch.
/// The sole time-oriented builtin; synchronous, no scheduling or
/// cancellation involved.
fn time_now(args: &[Value]) -> Result<Value, AxionError> {
    if !args.is_empty() {
        return Err(AxionError::Type(format!(
            "time_now() takes no arguments, got {}",
            args.len()
        )));
    }
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| AxionError::Runtime(format!("system clock error: {}", e)))?
        .as_millis();
    Ok(Value::Integer(millis as i64))
}
