//! Execution context: variable and function bindings plus return state.
//!
//! Variables and functions live in two separate namespaces. Variable lookup
//! scans the current context's list only - there is no lexical chain, so
//! everything a function binds (parameters and locals) is invisible to its
//! caller. The function table is copied into each callee context at call
//! time, making the caller's functions visible to the callee.

use indexmap::IndexMap;

use crate::arena::{NodeId, StrId};
use crate::limits::{Limits, ResourceError, RunResult};
use crate::value::Value;

/// A user-defined function registered in a context.
#[derive(Debug, Clone)]
pub struct FunctionDef {
    pub name: StrId,
    /// Parameter names in declaration order.
    pub params: Vec<StrId>,
    /// The body block node.
    pub body: NodeId,
}

/// Per-invocation container for bindings and return state.
///
/// Capacities are fixed at construction from [`Limits`]; exceeding one is a
/// hard [`ResourceError`].
#[derive(Debug, Clone)]
pub struct Context {
    variables: Vec<(StrId, Value)>,
    functions: IndexMap<StrId, FunctionDef>,
    return_value: Value,
    return_pending: bool,
    /// User-function call depth of this context; the top level is 0.
    depth: usize,
    max_variables: usize,
    max_functions: usize,
    max_call_depth: usize,
}

impl Context {
    /// Creates an empty top-level context with the given bounds.
    #[must_use]
    pub fn new(limits: &Limits) -> Self {
        Self {
            variables: Vec::new(),
            functions: IndexMap::new(),
            return_value: Value::Undefined,
            return_pending: false,
            depth: 0,
            max_variables: limits.max_variables,
            max_functions: limits.max_functions,
            max_call_depth: limits.max_call_depth,
        }
    }

    /// Creates the callee context for a function call: fresh variables, the
    /// caller's function table copied, depth one deeper.
    pub(crate) fn child(&self) -> RunResult<Self> {
        if self.depth + 1 > self.max_call_depth {
            return Err(ResourceError::Recursion(self.max_call_depth));
        }
        Ok(Self {
            variables: Vec::new(),
            functions: self.functions.clone(),
            return_value: Value::Undefined,
            return_pending: false,
            depth: self.depth + 1,
            max_variables: self.max_variables,
            max_functions: self.max_functions,
            max_call_depth: self.max_call_depth,
        })
    }

    /// Binds `name` to `value`, overwriting an existing binding of the same
    /// name.
    pub fn set_variable(&mut self, name: StrId, value: Value) -> RunResult<()> {
        for binding in &mut self.variables {
            if binding.0 == name {
                binding.1 = value;
                return Ok(());
            }
        }
        if self.variables.len() == self.max_variables {
            return Err(ResourceError::Variables(self.max_variables));
        }
        self.variables.push((name, value));
        Ok(())
    }

    /// Looks up `name`; missing names evaluate to undefined.
    #[must_use]
    pub fn get_variable(&self, name: StrId) -> Value {
        self.variables
            .iter()
            .find(|(bound, _)| *bound == name)
            .map_or(Value::Undefined, |(_, value)| *value)
    }

    /// Registers a function, overwriting any prior binding of the same name.
    pub(crate) fn register_function(&mut self, def: FunctionDef) -> RunResult<()> {
        if !self.functions.contains_key(&def.name) && self.functions.len() == self.max_functions {
            return Err(ResourceError::Functions(self.max_functions));
        }
        self.functions.insert(def.name, def);
        Ok(())
    }

    pub(crate) fn function(&self, name: StrId) -> Option<&FunctionDef> {
        self.functions.get(&name)
    }

    /// Stores the return value and sets the return-pending flag, unwinding
    /// enclosing blocks and loops in this context.
    pub(crate) fn set_return(&mut self, value: Value) {
        self.return_value = value;
        self.return_pending = true;
    }

    /// True once a `return` has executed in this context.
    #[must_use]
    pub fn return_pending(&self) -> bool {
        self.return_pending
    }

    /// The context's return slot; undefined until a `return` executes.
    #[must_use]
    pub fn return_value(&self) -> Value {
        self.return_value
    }
}
