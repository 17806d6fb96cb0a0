//! Built-in native functions.
//!
//! [`install`] binds the standard natives into a [`Context`]:
//!
//! | name | arguments | result |
//! |------|-----------|--------|
//! | `print` | any | prints the arguments separated by spaces; `Nil` |
//! | `println` | any | as `print`, then a newline; `Nil` |
//! | `list` | any | a new list of the arguments |
//! | `+` | numbers | sum (`0` when empty) |
//! | `-` | one or more numbers | negation, or left-to-right difference |
//! | `=` | two or more | `1` when all are equal, else `Nil` |
//! | `<` | two or more numbers | `1` when strictly increasing, else `Nil` |
//! | `define` | symbol, object | binds the symbol; returns the object |
//!
//! Integer arithmetic is checked. The result is `i32` when every operand
//! is `i32` and the result fits, `i64` otherwise; any float operand makes
//! the result `f64`.


use kel_object::{NativeCall, Runtime, Value};

use crate::errors::{type_mismatch, Arity, EvalError, EvalResult};
use crate::{Context, SharedPrintHandler};

/// Bind every prelude native into `ctx`, printing through `output`.
pub fn install(ctx: &mut Context<'_>, output: &SharedPrintHandler) -> Result<(), EvalError> {
    let out = SharedPrintHandler::clone(output);
    ctx.define_native("print", move |call| {
        out.print(&joined(call));
        Ok(Value::Nil)
    })?;
    let out = SharedPrintHandler::clone(output);
    ctx.define_native("println", move |call| {
        out.println(&joined(call));
        Ok(Value::Nil)
    })?;
    ctx.define_native("list", |call| {
        let items = call.args().to_vec();
        Ok(call.runtime.alloc_list(items)?.value())
    })?;
    ctx.define_native("+", add)?;
    ctx.define_native("-", subtract)?;
    ctx.define_native("=", equal)?;
    ctx.define_native("<", less)?;
    ctx.define_native("define", define)?;
    tracing::debug!(bindings = ctx.bindings().len(), "prelude installed");
    Ok(())
}

fn joined(call: &NativeCall<'_>) -> String {
    call.args()
        .iter()
        .map(|value| call.runtime.display(*value).to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

fn truth(holds: bool) -> Value {
    if holds {
        Value::Int(1)
    } else {
        Value::Nil
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    fn of(runtime: &Runtime, value: Value) -> Result<Number, EvalError> {
        match value {
            Value::Float(_) | Value::Double(_) => {
                Ok(Number::Float(value.as_f64().unwrap_or_default()))
            }
            _ => value
                .as_i64()
                .map(Number::Int)
                .ok_or_else(|| type_mismatch("number", runtime.type_name(value))),
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn as_f64(self) -> f64 {
        match self {
            Number::Int(v) => v as f64,
            Number::Float(v) => v,
        }
    }
}

/// Fold the arguments with checked integer and plain float arithmetic.
fn arithmetic(
    call: &NativeCall<'_>,
    first: Number,
    rest: &[Value],
    int_op: fn(i64, i64) -> Option<i64>,
    float_op: fn(f64, f64) -> f64,
) -> EvalResult {
    let mut acc = first;
    let mut all_i32 = true;
    for &value in call.args() {
        all_i32 &= matches!(value, Value::Int(_));
    }
    for &value in rest {
        let rhs = Number::of(call.runtime, value)?;
        acc = match (acc, rhs) {
            (Number::Int(a), Number::Int(b)) => Number::Int(int_op(a, b).ok_or_else(|| {
                EvalError::new(format!("integer overflow in `{}`", call.name()))
            })?),
            (a, b) => Number::Float(float_op(a.as_f64(), b.as_f64())),
        };
    }
    Ok(match acc {
        Number::Float(v) => Value::Double(v),
        Number::Int(v) if all_i32 => i32::try_from(v).map_or(Value::Long(v), Value::Int),
        Number::Int(v) => Value::Long(v),
    })
}

fn add(call: &mut NativeCall<'_>) -> EvalResult {
    arithmetic(call, Number::Int(0), call.args(), i64::checked_add, |a, b| a + b)
}

fn subtract(call: &mut NativeCall<'_>) -> EvalResult {
    call.expect_arity(Arity::AtLeast(1))?;
    let args = call.args();
    if args.len() == 1 {
        return arithmetic(call, Number::Int(0), args, i64::checked_sub, |a, b| a - b);
    }
    let first = Number::of(call.runtime, args[0])?;
    arithmetic(call, first, &args[1..], i64::checked_sub, |a, b| a - b)
}

/// Equality across the whole argument list: numbers by value regardless
/// of width, strings and symbols by text, anything else by identity.
fn equal(call: &mut NativeCall<'_>) -> EvalResult {
    call.expect_arity(Arity::AtLeast(2))?;
    let args = call.args();
    let holds = args
        .windows(2)
        .all(|pair| values_equal(call.runtime, pair[0], pair[1]));
    Ok(truth(holds))
}

#[allow(clippy::float_cmp)]
fn values_equal(runtime: &Runtime, a: Value, b: Value) -> bool {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        return x == y;
    }
    if let (Some(x), Some(y)) = (a.as_f64(), b.as_f64()) {
        return x == y;
    }
    if let (Some(x), Some(y)) = (a.object(), b.object()) {
        if let (Some(s), Some(t)) = (runtime.string(x), runtime.string(y)) {
            return s == t;
        }
        if let (Some(s), Some(t)) = (runtime.symbol(x), runtime.symbol(y)) {
            return s == t;
        }
        return x == y;
    }
    a == b
}

fn less(call: &mut NativeCall<'_>) -> EvalResult {
    call.expect_arity(Arity::AtLeast(2))?;
    let mut numbers = Vec::with_capacity(call.args().len());
    for &value in call.args() {
        numbers.push(Number::of(call.runtime, value)?);
    }
    let holds = numbers.windows(2).all(|pair| match (pair[0], pair[1]) {
        (Number::Int(a), Number::Int(b)) => a < b,
        (a, b) => a.as_f64() < b.as_f64(),
    });
    Ok(truth(holds))
}

/// `(define 'name value)`: bind `name` to the object `value` refers to.
fn define(call: &mut NativeCall<'_>) -> EvalResult {
    call.expect_arity(Arity::Exactly(2))?;
    let name = call.symbol_arg(0)?.to_string();
    let value = call.arg(1)?;
    let handle = value
        .object()
        .and_then(|r| call.runtime.host_ref(r))
        .ok_or_else(|| type_mismatch("object", call.runtime.type_name(value)))?;
    call.bindings.define(&name, handle);
    Ok(value)
}

#[cfg(test)]
mod tests;
