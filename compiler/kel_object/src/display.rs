//! Printing values in kel syntax.
//!
//! Two styles:
//! - *display*: strings print as their raw text (what `print` writes)
//! - *repr*: strings are quoted and escaped, and non-default integer
//!   widths carry their suffix, so the output reads back as the same value
//!
//! Lists nest arbitrarily deep and may be made cyclic by native code; the
//! walk grows the stack as needed and prints a list already being printed
//! as `(...)`.

use std::fmt;

use kel_stack::ensure_sufficient_stack;

use crate::{Object, ObjectRef, Runtime, Value};

/// Formatter returned by [`Runtime::display`] and [`Runtime::repr`].
pub struct ValueDisplay<'a> {
    runtime: &'a Runtime,
    value: Value,
    readable: bool,
}

impl Runtime {
    pub fn display(&self, value: Value) -> ValueDisplay<'_> {
        ValueDisplay {
            runtime: self,
            value,
            readable: false,
        }
    }

    pub fn repr(&self, value: Value) -> ValueDisplay<'_> {
        ValueDisplay {
            runtime: self,
            value,
            readable: true,
        }
    }
}

impl fmt::Display for ValueDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut open = Vec::new();
        write_value(f, self.runtime, self.value, self.readable, &mut open)
    }
}

fn write_value(
    f: &mut fmt::Formatter<'_>,
    rt: &Runtime,
    value: Value,
    readable: bool,
    open: &mut Vec<ObjectRef>,
) -> fmt::Result {
    match value {
        Value::Nil => f.write_str("()"),
        Value::Int(v) => write!(f, "{v}"),
        Value::Double(v) => write!(f, "{v:?}"),
        Value::Char(c) if readable => write!(f, "{c:?}"),
        Value::Char(c) => write!(f, "{c}"),
        Value::Byte(v) => write_int(f, v, "i8", readable),
        Value::UByte(v) => write_int(f, v, "u8", readable),
        Value::Short(v) => write_int(f, v, "i16", readable),
        Value::UShort(v) => write_int(f, v, "u16", readable),
        Value::UInt(v) => write_int(f, v, "u32", readable),
        Value::Long(v) => write_int(f, v, "i64", readable),
        Value::ULong(v) => write_int(f, v, "u64", readable),
        Value::Float(v) if readable => write!(f, "{v:?}f"),
        Value::Float(v) => write!(f, "{v:?}"),
        Value::Quoted(r) => {
            f.write_str("'")?;
            write_object(f, rt, r, readable, open)
        }
        Value::Object(r) => write_object(f, rt, r, readable, open),
    }
}

fn write_int(
    f: &mut fmt::Formatter<'_>,
    v: impl fmt::Display,
    suffix: &str,
    readable: bool,
) -> fmt::Result {
    if readable {
        write!(f, "{v}{suffix}")
    } else {
        write!(f, "{v}")
    }
}

fn write_object(
    f: &mut fmt::Formatter<'_>,
    rt: &Runtime,
    r: ObjectRef,
    readable: bool,
    open: &mut Vec<ObjectRef>,
) -> fmt::Result {
    match rt.object(r) {
        None => write!(f, "<dangling {r:?}>"),
        Some(Object::String(text)) if readable => write!(f, "\"{}\"", text.escape_default()),
        Some(Object::String(text)) => f.write_str(text),
        Some(Object::Symbol(name)) => f.write_str(name),
        Some(Object::NativeFunction(native)) => write!(f, "<native {}>", native.name()),
        Some(Object::List(_)) if open.contains(&r) => f.write_str("(...)"),
        Some(Object::List(items)) => {
            open.push(r);
            f.write_str("(")?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    f.write_str(" ")?;
                }
                ensure_sufficient_stack(|| write_value(f, rt, *item, readable, open))?;
            }
            open.pop();
            f.write_str(")")
        }
    }
}
