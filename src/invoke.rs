/// Resolution of a callable spec against a receiver.
///
/// Order, first match wins:
///   1. `Function`  — called as `f(receiver, ...args)`
///   2. `Text` naming a receiver member — method call, or property read
///   3. `Text` otherwise — compiled as a string lambda and applied
use thiserror::Error;

use crate::host::{Host, Member};
use crate::lambda::{compile_with, CompileError};
use crate::value::{Function, RuntimeError, Value};

#[derive(Debug, Clone)]
pub enum CallableSpec {
    Function(Function),
    /// Member name or lambda source; which one is decided at invocation time.
    Text(String),
}

impl CallableSpec {
    pub fn function(
        name: &str,
        body: impl Fn(&[Value]) -> Result<Value, RuntimeError> + 'static,
    ) -> Self {
        CallableSpec::Function(Function::new(name, body))
    }
}

impl From<&str> for CallableSpec {
    fn from(text: &str) -> Self {
        CallableSpec::Text(text.to_string())
    }
}

impl From<String> for CallableSpec {
    fn from(text: String) -> Self {
        CallableSpec::Text(text)
    }
}

impl From<Function> for CallableSpec {
    fn from(f: Function) -> Self {
        CallableSpec::Function(f)
    }
}

impl From<&CallableSpec> for CallableSpec {
    fn from(spec: &CallableSpec) -> Self {
        spec.clone()
    }
}

#[derive(Debug, Clone, Error)]
pub enum InvocationError {
    /// Not a member of the receiver and not a valid lambda either.
    #[error("'{text}' is neither a member of {receiver} nor a valid lambda: {error}")]
    Compile {
        text: String,
        receiver: &'static str,
        #[source]
        error: CompileError,
    },
    #[error("'{name}' is a property of {receiver} and takes no arguments, got {count}")]
    PropertyWithArgs {
        name: String,
        receiver: &'static str,
        count: usize,
    },
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

/// Invokes specs against receivers using one host's member and scope view.
#[derive(Clone, Copy)]
pub struct Invoker<'h> {
    host: &'h dyn Host,
}

impl<'h> Invoker<'h> {
    pub fn new(host: &'h dyn Host) -> Self {
        Invoker { host }
    }

    pub fn host(&self) -> &'h dyn Host {
        self.host
    }

    pub fn invoke(
        &self,
        receiver: &Value,
        spec: &CallableSpec,
        args: &[Value],
    ) -> Result<Value, InvocationError> {
        match spec {
            CallableSpec::Function(f) => {
                tracing::trace!(function = f.name(), "invoking function spec");
                let mut call_args = Vec::with_capacity(args.len() + 1);
                call_args.push(receiver.clone());
                call_args.extend(args.iter().cloned());
                Ok(f.call(&call_args)?)
            }
            CallableSpec::Text(text) => self.invoke_text(receiver, text, args),
        }
    }

    fn invoke_text(
        &self,
        receiver: &Value,
        text: &str,
        args: &[Value],
    ) -> Result<Value, InvocationError> {
        match self.host.member(receiver, text) {
            Some(Member::Method) => {
                tracing::trace!(member = text, "invoking receiver method");
                Ok(self.host.call_method(receiver, text, args)?)
            }
            Some(Member::Property(value)) => {
                if !args.is_empty() {
                    return Err(InvocationError::PropertyWithArgs {
                        name: text.to_string(),
                        receiver: receiver.type_name(),
                        count: args.len(),
                    });
                }
                tracing::trace!(member = text, "reading receiver property");
                Ok(value)
            }
            None => {
                let lambda =
                    compile_with(text, self.host).map_err(|error| InvocationError::Compile {
                        text: text.to_string(),
                        receiver: receiver.type_name(),
                        error,
                    })?;
                tracing::trace!(source = text, params = ?lambda.params(), "invoking string lambda");
                let mut call_args = Vec::with_capacity(args.len() + 1);
                call_args.push(receiver.clone());
                call_args.extend(args.iter().cloned());
                Ok(lambda.call(self.host, &call_args)?)
            }
        }
    }
}

/// One-shot form of `Invoker::invoke`.
pub fn invoke(
    host: &dyn Host,
    receiver: &Value,
    spec: &CallableSpec,
    args: &[Value],
) -> Result<Value, InvocationError> {
    Invoker::new(host).invoke(receiver, spec, args)
}
