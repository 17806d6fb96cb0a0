//! Sessions: one runtime, its global bindings, and source in, values out.

use kel_diagnostic::{DiagnosticEmitter, TerminalEmitter};
use kel_eval::{prelude, stdout_handler, Context, SharedPrintHandler};
use kel_ir::LineIndex;
use kel_lexer::Lexer;
use kel_object::{
    Bindings, BudgetProvider, EvalResult, HostRefSet, NativeCall, Runtime, SystemProvider, Value,
};
use kel_parse::Parser;

use crate::{Config, Problem};

/// A runtime with the prelude installed and bindings that persist across
/// [`run`](Session::run) calls.
///
/// Values returned by `run` point into this session's runtime and stay
/// valid until the session is dropped, which frees every object at once.
pub struct Session {
    runtime: Runtime,
    bindings: Bindings,
    lexer: Lexer,
    config: Config,
    output: SharedPrintHandler,
}

impl Session {
    /// A session with default configuration printing to stdout.
    pub fn new() -> Result<Self, Problem> {
        Self::with_config(Config::default(), stdout_handler())
    }

    pub fn with_config(config: Config, output: SharedPrintHandler) -> Result<Self, Problem> {
        let runtime = match config.memory_limit {
            Some(limit) => Runtime::with_provider(BudgetProvider::new(limit)),
            None => Runtime::with_provider(SystemProvider),
        };
        let mut session = Session {
            runtime,
            bindings: Bindings::new(),
            lexer: Lexer::default(),
            config,
            output,
        };
        let output = SharedPrintHandler::clone(&session.output);
        session.with_context(|ctx| prelude::install(ctx, &output))?;
        Ok(session)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    /// Where `print` and `println` write.
    pub fn output(&self) -> &SharedPrintHandler {
        &self.output
    }

    /// Lex, parse and evaluate `source`, returning the value of its last
    /// top-level form (`Nil` when there is none).
    ///
    /// On error, objects allocated so far stay in the runtime and every
    /// binding made before the failing form is kept.
    #[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
    pub fn run(&mut self, source: &str) -> Result<Value, Problem> {
        self.lexer.reload(source)?;
        let program = {
            let mut protect = HostRefSet::new();
            Parser::new(&mut self.runtime).parse_program(&mut self.lexer, &mut protect)?
        };
        let value = self.with_context(|ctx| ctx.eval_program(program.object()))?;
        Ok(value)
    }

    /// Bind a host function under `name`.
    pub fn define_native<F>(&mut self, name: &str, callback: F) -> Result<(), Problem>
    where
        F: Fn(&mut NativeCall<'_>) -> EvalResult + Send + Sync + 'static,
    {
        self.with_context(|ctx| ctx.define_native(name, callback))?;
        Ok(())
    }

    /// Text of `value` as `print` would write it.
    pub fn display(&self, value: Value) -> String {
        self.runtime.display(value).to_string()
    }

    /// Text of `value` in readable form, e.g. strings quoted.
    pub fn repr(&self, value: Value) -> String {
        self.runtime.repr(value).to_string()
    }

    /// Render `problem` against the `source` it came from.
    pub fn render(&self, problem: &Problem, source: &str) -> String {
        let diagnostic = problem.to_diagnostic(&LineIndex::build(source));
        let mut emitter = TerminalEmitter::with_color_mode(Vec::new(), self.config.color, false)
            .with_source(source);
        emitter.emit(&diagnostic);
        emitter.flush();
        String::from_utf8_lossy(&emitter.into_inner()).into_owned()
    }

    /// Run `f` in a context over this session's runtime and bindings. The
    /// bindings come back even when `f` fails.
    fn with_context<T, E>(
        &mut self,
        f: impl FnOnce(&mut Context<'_>) -> Result<T, E>,
    ) -> Result<T, E> {
        let bindings = std::mem::take(&mut self.bindings);
        let mut ctx = Context::with_bindings(&mut self.runtime, bindings)
            .with_config(self.config.eval_config());
        let result = f(&mut ctx);
        self.bindings = ctx.into_bindings();
        result
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("runtime", &self.runtime)
            .field("bindings", &self.bindings.len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
