//! Host callback interface.

use std::fmt;
use std::sync::Arc;

use kel_ir::Span;

use crate::errors::{arity_mismatch, type_mismatch, Arity, EvalError, EvalResult};
use crate::{Bindings, ObjectKind, Runtime, Value};

/// A host function callable from kel code.
///
/// Any `Fn(&mut NativeCall<'_>) -> EvalResult` closure implements this, so
/// hosts can capture state (counters, channels, output buffers).
pub trait NativeFn: Send + Sync {
    fn call(&self, call: &mut NativeCall<'_>) -> EvalResult;
}

impl<F> NativeFn for F
where
    F: Fn(&mut NativeCall<'_>) -> EvalResult + Send + Sync,
{
    fn call(&self, call: &mut NativeCall<'_>) -> EvalResult {
        self(call)
    }
}

/// Payload of an [`Object::NativeFunction`](crate::Object::NativeFunction).
#[derive(Clone)]
pub struct NativeFunction {
    name: Box<str>,
    callback: Arc<dyn NativeFn>,
}

impl NativeFunction {
    pub fn new(name: &str, callback: Arc<dyn NativeFn>) -> Self {
        NativeFunction {
            name: name.into(),
            callback,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Shared handle to the callback, so it can run while the runtime is
    /// mutably borrowed.
    pub fn callback(&self) -> Arc<dyn NativeFn> {
        Arc::clone(&self.callback)
    }
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NativeFunction({})", self.name)
    }
}

/// The evaluation context seen by a native function.
///
/// `args` are the call's fully evaluated arguments, left to right, without
/// the head. Quoted arguments arrive with the quote tag dropped. A native returns its result (`Value::Nil` for side effects
/// only) or an error, which aborts the evaluation.
pub struct NativeCall<'a> {
    pub runtime: &'a mut Runtime,
    pub bindings: &'a mut Bindings,
    args: &'a [Value],
    name: &'a str,
    span: Option<Span>,
}

impl<'a> NativeCall<'a> {
    pub fn new(
        runtime: &'a mut Runtime,
        bindings: &'a mut Bindings,
        args: &'a [Value],
        name: &'a str,
        span: Option<Span>,
    ) -> Self {
        NativeCall {
            runtime,
            bindings,
            args,
            name,
            span,
        }
    }

    pub fn args(&self) -> &[Value] {
        self.args
    }

    /// Name the function was bound under.
    pub fn name(&self) -> &str {
        self.name
    }

    /// Span of the calling form, if it was parsed from source.
    pub fn span(&self) -> Option<Span> {
        self.span
    }

    pub fn expect_arity(&self, arity: Arity) -> Result<(), EvalError> {
        if arity.accepts(self.args.len()) {
            Ok(())
        } else {
            Err(arity_mismatch(self.name, arity, self.args.len()))
        }
    }

    /// Argument `index`, or an arity error naming how many were needed.
    pub fn arg(&self, index: usize) -> Result<Value, EvalError> {
        self.args
            .get(index)
            .copied()
            .ok_or_else(|| arity_mismatch(self.name, Arity::AtLeast(index + 1), self.args.len()))
    }

    /// Argument `index` as an integer widened to `i64`.
    pub fn int_arg(&self, index: usize) -> Result<i64, EvalError> {
        let value = self.arg(index)?;
        value
            .as_i64()
            .ok_or_else(|| type_mismatch("integer", self.runtime.type_name(value)))
    }

    /// Argument `index` as string text (quoted or not).
    pub fn string_arg(&self, index: usize) -> Result<&str, EvalError> {
        self.object_text(index, ObjectKind::String)
    }

    /// Argument `index` as a symbol name (quoted or not).
    pub fn symbol_arg(&self, index: usize) -> Result<&str, EvalError> {
        self.object_text(index, ObjectKind::Symbol)
    }

    fn object_text(&self, index: usize, kind: ObjectKind) -> Result<&str, EvalError> {
        let value = self.arg(index)?;
        let text = value.object().and_then(|r| match kind {
            ObjectKind::String => self.runtime.string(r),
            _ => self.runtime.symbol(r),
        });
        text.ok_or_else(|| type_mismatch(kind.name(), self.runtime.type_name(value)))
    }
}

#[cfg(test)]
mod tests;
