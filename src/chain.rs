/// Chain proxy: a wrapper that lets K/T calls read as one fluent pipeline.
///
/// The chaining flag lives in the type. A `Wrapper<Plain>` returns the raw
/// result from `t`, ending the sequence; a `Wrapper<Chaining>` wraps it again
/// and keeps going until `value()`. `k` always returns a wrapper in the same
/// mode. Every step consumes the previous wrapper, so one chain never has two
/// live values.
use std::fmt;
use std::marker::PhantomData;

use crate::host::Host;
use crate::invoke::{CallableSpec, InvocationError, Invoker};
use crate::value::Value;

mod sealed {
    pub trait Sealed {}
}

pub trait Mode: sealed::Sealed {
    const CHAINING: bool;
}

#[derive(Debug)]
pub enum Plain {}

#[derive(Debug)]
pub enum Chaining {}

impl sealed::Sealed for Plain {}
impl sealed::Sealed for Chaining {}

impl Mode for Plain {
    const CHAINING: bool = false;
}

impl Mode for Chaining {
    const CHAINING: bool = true;
}

pub struct Wrapper<'h, M: Mode = Plain> {
    invoker: Invoker<'h>,
    value: Value,
    mode: PhantomData<M>,
}

pub fn wrap(host: &dyn Host, value: Value) -> Wrapper<'_> {
    Invoker::new(host).wrap(value)
}

impl<'h> Invoker<'h> {
    pub fn wrap(&self, value: Value) -> Wrapper<'h> {
        Wrapper::new(*self, value)
    }
}

impl<'h, M: Mode> Wrapper<'h, M> {
    fn new(invoker: Invoker<'h>, value: Value) -> Self {
        Wrapper {
            invoker,
            value,
            mode: PhantomData,
        }
    }

    pub fn is_chaining(&self) -> bool {
        M::CHAINING
    }

    /// Enter always-wrapped mode; a no-op when already chaining.
    pub fn chain(self) -> Wrapper<'h, Chaining> {
        Wrapper::new(self.invoker, self.value)
    }

    pub fn k(
        self,
        spec: impl Into<CallableSpec>,
        args: &[Value],
    ) -> Result<Self, InvocationError> {
        let value = self.invoker.k(self.value, spec, args)?;
        Ok(Wrapper::new(self.invoker, value))
    }

    /// Borrow the current value without ending the chain.
    pub fn peek(&self) -> &Value {
        &self.value
    }

    /// Unwrap, leaving chaining mode.
    pub fn value(self) -> Value {
        self.value
    }
}

impl<'h> Wrapper<'h, Plain> {
    pub fn t(self, spec: impl Into<CallableSpec>, args: &[Value]) -> Result<Value, InvocationError> {
        self.invoker.t(&self.value, spec, args)
    }
}

impl<'h> Wrapper<'h, Chaining> {
    pub fn t(self, spec: impl Into<CallableSpec>, args: &[Value]) -> Result<Self, InvocationError> {
        let value = self.invoker.t(&self.value, spec, args)?;
        Ok(Wrapper::new(self.invoker, value))
    }
}

impl<M: Mode> fmt::Debug for Wrapper<'_, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wrapper")
            .field("value", &self.value)
            .field("chaining", &M::CHAINING)
            .finish()
    }
}
