//! Public interface for running scripts.

use crate::arena::Arena;
use crate::context::Context;
use crate::evaluate::interpret;
use crate::io::{PrintWriter, StdPrint};
use crate::limits::{Limits, RunResult};
use crate::object::ScriptObject;
use crate::parser::parse;
use crate::scanner::tokenize;

/// Parses and executes a script, returning the value of its last executed
/// statement.
///
/// Every run owns a fresh arena and context, so an `Executor` can be run
/// repeatedly and shared freely between runs; there is no process-global
/// state. Malformed programs degrade to `undefined` results rather than
/// failing - the only errors a run surfaces are resource bounds.
///
/// # Example
/// ```
/// use minscript::{Executor, ScriptObject};
///
/// let ex = Executor::new("var x = 40; x + 2;".to_owned());
/// assert_eq!(ex.run().unwrap(), ScriptObject::Number(42.0));
/// ```
#[derive(Debug, Clone)]
pub struct Executor {
    code: String,
    limits: Limits,
}

impl Executor {
    /// Creates an executor with default limits.
    #[must_use]
    pub fn new(code: String) -> Self {
        Self {
            code,
            limits: Limits::default(),
        }
    }

    /// Creates an executor with custom resource limits.
    #[must_use]
    pub fn with_limits(code: String, limits: Limits) -> Self {
        Self { code, limits }
    }

    /// Returns the source code this executor runs.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Runs the script with `print` output going to standard output.
    pub fn run(&self) -> RunResult<ScriptObject> {
        self.run_with_writer(&mut StdPrint)
    }

    /// Runs the script with a custom `print` sink.
    ///
    /// This allows capturing or redirecting output from the executed code.
    ///
    /// # Example
    /// ```
    /// use minscript::{CollectStringPrint, Executor};
    ///
    /// let mut print = CollectStringPrint::new();
    /// let ex = Executor::new("print(\"hi\");".to_owned());
    /// ex.run_with_writer(&mut print).unwrap();
    /// assert_eq!(print.output(), "hi\n");
    /// ```
    pub fn run_with_writer(&self, print: &mut impl PrintWriter) -> RunResult<ScriptObject> {
        let mut arena = Arena::new(self.limits.arena_capacity);
        let tokens = tokenize(&self.code, &mut arena, &self.limits)?;
        let root = parse(&tokens, &mut arena, &self.limits)?;
        let mut ctx = Context::new(&self.limits);
        let value = interpret(root, &mut arena, &mut ctx, print)?;
        Ok(ScriptObject::new(value, &arena))
    }
}
