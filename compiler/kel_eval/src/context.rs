//! Evaluation context and the frame-stack trampoline.
//!
//! # State machine
//!
//! Each list under evaluation owns one [`Frame`]. The trampoline in
//! [`Context::eval`] repeatedly steps the top frame:
//!
//! ```text
//! Initial ──head is `if`──▶ IfTest ─▶ (IfReceivingTest) ─▶ IfBranch ─▶ (ReceivingResult)
//!    │
//!    └─head resolved─▶ EvalArgs ◀──▶ ReceivingEvaluatedArg
//!                          │
//!                          ▼
//!                         Call ──native──▶ done
//!                           └──list body──▶ ReceivingResult ─▶ done
//! ```
//!
//! A nested list in argument (or test/branch) position pushes a child
//! frame; when a frame finishes, it is popped and its value lands in the
//! parent's return slot. Native stack use is constant in the depth of the
//! interpreted program.
//!
//! # Evaluation rules
//!
//! - Scalars, strings, symbols and native functions evaluate to themselves.
//! - A quoted reference evaluates to its object. Inside a form (argument,
//!   test or branch) the quote tag is dropped; at the top level of
//!   [`Context::eval`] it is kept.
//! - An unquoted list is a call. `()` evaluates to `Nil`.
//! - The head must be a symbol. `if` is a special form; any other symbol is
//!   looked up in the bindings.
//! - Arguments are evaluated strictly left to right before the call.
//! - A native target receives the evaluated arguments. A list target is a
//!   parameterless user function: its arguments are evaluated and
//!   discarded, then the list itself is evaluated as the body.
//!
//! A `Context` belongs to one thread at a time; nothing in it is locked.

use kel_object::{
    Bindings, EvalBacktrace, EvalError, EvalResult, HostRef, NativeCall, Object, ObjectKind,
    ObjectRef, Runtime, Value,
};

use crate::errors::{
    invalid_special_form, not_callable, recursion_limit_exceeded, type_mismatch, unbound_symbol,
    BacktraceFrame,
};
use crate::frame::{EvalState, Frame};

/// Default cap on the explicit frame stack.
pub const DEFAULT_MAX_DEPTH: usize = 1_000_000;

/// Frames recorded in an error backtrace, innermost first.
const MAX_BACKTRACE_FRAMES: usize = 32;

/// Evaluation limits.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct EvalConfig {
    /// Maximum number of pending frames; `None` for no limit.
    pub max_depth: Option<usize>,
}

impl Default for EvalConfig {
    fn default() -> Self {
        EvalConfig {
            max_depth: Some(DEFAULT_MAX_DEPTH),
        }
    }
}

/// How an expression in evaluated position proceeds.
enum Operand {
    /// Already a value.
    Ready(Value),
    /// A list that needs its own frame.
    Call(ObjectRef),
}

/// One evaluation session over a runtime.
pub struct Context<'rt> {
    runtime: &'rt mut Runtime,
    bindings: Bindings,
    frames: Vec<Frame>,
    config: EvalConfig,
}

impl<'rt> Context<'rt> {
    pub fn new(runtime: &'rt mut Runtime) -> Self {
        Self::with_bindings(runtime, Bindings::new())
    }

    /// A context starting from an existing binding table, e.g. one kept by
    /// the host across sessions.
    pub fn with_bindings(runtime: &'rt mut Runtime, bindings: Bindings) -> Self {
        Context {
            runtime,
            bindings,
            frames: Vec::new(),
            config: EvalConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: EvalConfig) -> Self {
        self.config = config;
        self
    }

    pub fn runtime(&self) -> &Runtime {
        &*self.runtime
    }

    pub fn runtime_mut(&mut self) -> &mut Runtime {
        &mut *self.runtime
    }

    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    pub fn bindings_mut(&mut self) -> &mut Bindings {
        &mut self.bindings
    }

    /// End the session, handing the binding table back to the host.
    pub fn into_bindings(self) -> Bindings {
        self.bindings
    }

    /// Pending frames; zero between evaluations.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn define(&mut self, name: &str, object: HostRef) -> Option<HostRef> {
        self.bindings.define(name, object)
    }

    /// Allocate a native function and bind it under `name`.
    pub fn define_native<F>(&mut self, name: &str, callback: F) -> Result<(), EvalError>
    where
        F: Fn(&mut NativeCall<'_>) -> EvalResult + Send + Sync + 'static,
    {
        let handle = self.runtime.alloc_native(name, callback)?;
        self.bindings.define(name, handle);
        Ok(())
    }

    /// Evaluate one value.
    pub fn eval(&mut self, value: Value) -> EvalResult {
        match self.operand(value) {
            Operand::Ready(value) => Ok(value),
            Operand::Call(list) => self.run(list),
        }
    }

    /// Evaluate each element of a program list in order, returning the
    /// last result (`Nil` for an empty program).
    pub fn eval_program(&mut self, program: ObjectRef) -> EvalResult {
        let forms = match self.runtime.list(program) {
            Some(items) => items.to_vec(),
            None => {
                return Err(type_mismatch("list", self.runtime.type_name(Value::Object(program))))
            }
        };
        let mut last = Value::Nil;
        for form in forms {
            last = self.eval(form)?;
        }
        Ok(last)
    }

    fn operand(&self, value: Value) -> Operand {
        match value {
            Value::Object(r) if self.runtime.kind(r) == Some(ObjectKind::List) => Operand::Call(r),
            other => Operand::Ready(other),
        }
    }

    /// Like [`operand`](Self::operand) for a value nested inside a form:
    /// a quote only protects its object from evaluation, so the tag is
    /// dropped here.
    fn argument(&self, value: Value) -> Operand {
        match value {
            Value::Quoted(_) => Operand::Ready(value.unquoted()),
            other => self.operand(other),
        }
    }

    /// The trampoline.
    fn run(&mut self, list: ObjectRef) -> EvalResult {
        let base = self.frames.len();
        self.drive(base, list).map_err(|err| {
            let span = self.frames.last().and_then(|f| self.runtime.span_of(f.list));
            let backtrace = self.backtrace(base);
            self.frames.truncate(base);
            tracing::debug!(error = %err, "evaluation failed");
            err.or_span(span).with_backtrace(backtrace)
        })
    }

    fn drive(&mut self, base: usize, list: ObjectRef) -> EvalResult {
        self.push(list)?;
        loop {
            if let Some(value) = self.step(base)? {
                return Ok(value);
            }
        }
    }

    fn push(&mut self, list: ObjectRef) -> Result<(), EvalError> {
        if let Some(max) = self.config.max_depth {
            if self.frames.len() >= max {
                return Err(recursion_limit_exceeded(max));
            }
        }
        tracing::trace!(depth = self.frames.len(), list = ?list, "push frame");
        self.frames.push(Frame::new(list));
        Ok(())
    }

    /// Pop the finished top frame. Returns the value if it was the
    /// outermost frame of this run, otherwise hands it to the parent.
    fn finish(&mut self, base: usize, value: Value) -> Option<Value> {
        self.frames.pop();
        tracing::trace!(depth = self.frames.len(), "pop frame");
        if self.frames.len() == base {
            return Some(value);
        }
        if let Some(parent) = self.frames.last_mut() {
            parent.ret = value;
        }
        None
    }

    fn top(&mut self) -> &mut Frame {
        let last = self.frames.len() - 1;
        &mut self.frames[last]
    }

    fn step(&mut self, base: usize) -> Result<Option<Value>, EvalError> {
        let Some(frame) = self.frames.last() else {
            return Ok(Some(Value::Nil));
        };
        let (list, state) = (frame.list, frame.state);
        match state {
            EvalState::Initial => self.initial(base, list),
            EvalState::EvalArgs { index } => self.eval_args(index),
            EvalState::ReceivingEvaluatedArg { index } => {
                let frame = self.top();
                let value = frame.take_ret();
                frame.args[index] = value;
                frame.state = EvalState::EvalArgs { index: index + 1 };
                Ok(None)
            }
            EvalState::Call => self.call(base, list),
            EvalState::ReceivingResult => {
                let value = self.top().take_ret();
                Ok(self.finish(base, value))
            }
            EvalState::IfTest => {
                let test = self.element(list, 1);
                match self.argument(test) {
                    Operand::Ready(value) => {
                        self.top().state = EvalState::IfBranch {
                            truthy: value.is_truthy(),
                        };
                    }
                    Operand::Call(child) => {
                        self.top().state = EvalState::IfReceivingTest;
                        self.push(child)?;
                    }
                }
                Ok(None)
            }
            EvalState::IfReceivingTest => {
                let frame = self.top();
                let truthy = frame.take_ret().is_truthy();
                frame.state = EvalState::IfBranch { truthy };
                Ok(None)
            }
            EvalState::IfBranch { truthy } => {
                let branch = self.element(list, if truthy { 2 } else { 3 });
                match self.argument(branch) {
                    Operand::Ready(value) => Ok(self.finish(base, value)),
                    Operand::Call(child) => {
                        self.top().state = EvalState::ReceivingResult;
                        self.push(child)?;
                        Ok(None)
                    }
                }
            }
        }
    }

    /// Element `index` of a list, `Nil` when absent.
    fn element(&self, list: ObjectRef, index: usize) -> Value {
        self.runtime
            .list(list)
            .and_then(|items| items.get(index).copied())
            .unwrap_or_default()
    }

    fn initial(&mut self, base: usize, list: ObjectRef) -> Result<Option<Value>, EvalError> {
        let items = self.runtime.list(list).unwrap_or_default();
        let Some(&head) = items.first() else {
            return Ok(self.finish(base, Value::Nil));
        };

        let name = match head {
            Value::Object(r) => self.runtime.symbol(r),
            _ => None,
        };
        let Some(name) = name else {
            let type_name = match head {
                Value::Quoted(_) => format!("quoted {}", self.runtime.type_name(head)),
                _ => self.runtime.type_name(head).to_string(),
            };
            return Err(not_callable(&type_name));
        };

        if name == "if" {
            if !(3..=4).contains(&items.len()) {
                return Err(invalid_special_form(
                    "if",
                    "expected a test and one or two branches",
                ));
            }
            self.top().state = EvalState::IfTest;
            return Ok(None);
        }

        let target = self
            .bindings
            .lookup(name)
            .ok_or_else(|| unbound_symbol(name))?;
        let args = items[1..].iter().copied().collect();
        let frame = self.top();
        frame.target = Some(target);
        frame.args = args;
        frame.state = EvalState::EvalArgs { index: 0 };
        Ok(None)
    }

    fn eval_args(&mut self, start: usize) -> Result<Option<Value>, EvalError> {
        let mut index = start;
        loop {
            let Some(&arg) = self.top().args.get(index) else {
                self.top().state = EvalState::Call;
                return Ok(None);
            };
            match self.argument(arg) {
                Operand::Ready(value) => {
                    self.top().args[index] = value;
                    index += 1;
                }
                Operand::Call(child) => {
                    self.top().state = EvalState::ReceivingEvaluatedArg { index };
                    self.push(child)?;
                    return Ok(None);
                }
            }
        }
    }

    fn call(&mut self, base: usize, list: ObjectRef) -> Result<Option<Value>, EvalError> {
        let frame = self.top();
        let args = std::mem::take(&mut frame.args);
        let Some(target) = frame.target else {
            return Err(not_callable("nil"));
        };

        match self.runtime.object(target) {
            Some(Object::NativeFunction(native)) => {
                let callback = native.callback();
                let name: Box<str> = native.name().into();
                let span = self.runtime.span_of(list);
                let mut call =
                    NativeCall::new(&mut *self.runtime, &mut self.bindings, &args, &name, span);
                let value = callback.call(&mut call)?;
                Ok(self.finish(base, value))
            }
            Some(Object::List(_)) => {
                self.top().state = EvalState::ReceivingResult;
                self.push(target)?;
                Ok(None)
            }
            Some(other) => Err(not_callable(other.kind().name())),
            None => Err(not_callable("dangling reference")),
        }
    }

    fn backtrace(&self, base: usize) -> EvalBacktrace {
        let frames = self.frames[base..]
            .iter()
            .rev()
            .take(MAX_BACKTRACE_FRAMES)
            .map(|frame| BacktraceFrame {
                name: self.head_name(frame.list),
                span: self.runtime.span_of(frame.list),
            })
            .collect();
        EvalBacktrace::new(frames)
    }

    fn head_name(&self, list: ObjectRef) -> String {
        self.runtime
            .list(list)
            .and_then(|items| items.first())
            .and_then(|head| head.object())
            .and_then(|r| self.runtime.symbol(r))
            .unwrap_or("<list>")
            .to_string()
    }
}
