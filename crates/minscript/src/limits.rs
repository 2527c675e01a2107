//! Resource limits and the interpreter's only hard-failure channel.
//!
//! The interpreter is deliberately permissive: ill-typed or ill-formed
//! constructs degrade to `undefined` rather than raising diagnostics. The
//! hard failures are the resource bounds collected here - arena capacity and
//! the fixed table sizes - which surface as [`ResourceError`] and abort the
//! current run.

use std::fmt;

/// Result alias used throughout the interpreter for fallible operations.
pub type RunResult<T> = Result<T, ResourceError>;

/// A resource bound was exceeded.
///
/// Each variant carries the limit that was hit so hosts can distinguish
/// which bound to raise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceError {
    /// The arena cannot satisfy an allocation.
    Memory {
        /// Size of the refused allocation, already rounded for alignment.
        requested: usize,
        /// Total arena capacity in bytes.
        capacity: usize,
    },
    /// Too many variables bound in one context.
    Variables(usize),
    /// Too many functions registered in one context.
    Functions(usize),
    /// Too many parameters in a function declaration.
    Params(usize),
    /// Too many arguments in a call expression.
    Args(usize),
    /// Too many statements in one block.
    Statements(usize),
    /// User-function call depth exceeded.
    Recursion(usize),
}

impl fmt::Display for ResourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Memory { requested, capacity } => {
                write!(f, "arena exhausted: {requested} bytes requested, {capacity} byte capacity")
            }
            Self::Variables(limit) => write!(f, "too many variables (limit {limit})"),
            Self::Functions(limit) => write!(f, "too many functions (limit {limit})"),
            Self::Params(limit) => write!(f, "too many parameters (limit {limit})"),
            Self::Args(limit) => write!(f, "too many call arguments (limit {limit})"),
            Self::Statements(limit) => write!(f, "too many statements in block (limit {limit})"),
            Self::Recursion(limit) => write!(f, "call depth limit exceeded (limit {limit})"),
        }
    }
}

impl std::error::Error for ResourceError {}

/// Capacity bounds for a single run, fixed at construction time.
///
/// Defaults match the interpreter's tuning for small embedded scripts: a
/// 2 MiB arena, 50k tokens, 1000 variables and 100 functions per context,
/// 10 parameters/arguments, 100 statements per block and a call depth of 100.
///
/// # Example
/// ```
/// use minscript::Limits;
///
/// let limits = Limits::new().max_variables(16).max_call_depth(8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Limits {
    pub(crate) arena_capacity: usize,
    pub(crate) max_tokens: usize,
    pub(crate) max_variables: usize,
    pub(crate) max_functions: usize,
    pub(crate) max_params: usize,
    pub(crate) max_args: usize,
    pub(crate) max_block_statements: usize,
    pub(crate) max_call_depth: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            arena_capacity: 2 * 1024 * 1024,
            max_tokens: 50_000,
            max_variables: 1000,
            max_functions: 100,
            max_params: 10,
            max_args: 10,
            max_block_statements: 100,
            max_call_depth: 100,
        }
    }
}

impl Limits {
    /// Creates limits with the default bounds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the arena capacity in bytes.
    #[must_use]
    pub fn arena_capacity(mut self, bytes: usize) -> Self {
        self.arena_capacity = bytes;
        self
    }

    /// Sets the maximum token count; tokens beyond the bound are silently
    /// dropped by the scanner.
    #[must_use]
    pub fn max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Sets the maximum number of variables per context.
    #[must_use]
    pub fn max_variables(mut self, max_variables: usize) -> Self {
        self.max_variables = max_variables;
        self
    }

    /// Sets the maximum number of functions per context.
    #[must_use]
    pub fn max_functions(mut self, max_functions: usize) -> Self {
        self.max_functions = max_functions;
        self
    }

    /// Sets the maximum number of parameters per function declaration.
    #[must_use]
    pub fn max_params(mut self, max_params: usize) -> Self {
        self.max_params = max_params;
        self
    }

    /// Sets the maximum number of arguments per call expression.
    #[must_use]
    pub fn max_args(mut self, max_args: usize) -> Self {
        self.max_args = max_args;
        self
    }

    /// Sets the maximum number of statements per block.
    #[must_use]
    pub fn max_block_statements(mut self, max_block_statements: usize) -> Self {
        self.max_block_statements = max_block_statements;
        self
    }

    /// Sets the maximum user-function call depth.
    #[must_use]
    pub fn max_call_depth(mut self, max_call_depth: usize) -> Self {
        self.max_call_depth = max_call_depth;
        self
    }
}
