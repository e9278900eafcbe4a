/// K (kestrel) and T (thrush) over an explicit receiver.
///
/// `k` runs the spec for its effect and hands back the receiver it was given;
/// `t` hands back whatever the spec produced. The free functions are what an
/// external installer binds as instance operations.
use crate::host::Host;
use crate::invoke::{CallableSpec, InvocationError, Invoker};
use crate::value::Value;

impl<'h> Invoker<'h> {
    pub fn k(
        &self,
        receiver: Value,
        spec: impl Into<CallableSpec>,
        args: &[Value],
    ) -> Result<Value, InvocationError> {
        self.invoke(&receiver, &spec.into(), args)?;
        Ok(receiver)
    }

    pub fn t(
        &self,
        receiver: &Value,
        spec: impl Into<CallableSpec>,
        args: &[Value],
    ) -> Result<Value, InvocationError> {
        self.invoke(receiver, &spec.into(), args)
    }
}

pub fn k(
    host: &dyn Host,
    receiver: Value,
    spec: impl Into<CallableSpec>,
    args: &[Value],
) -> Result<Value, InvocationError> {
    Invoker::new(host).k(receiver, spec, args)
}

pub fn t(
    host: &dyn Host,
    receiver: &Value,
    spec: impl Into<CallableSpec>,
    args: &[Value],
) -> Result<Value, InvocationError> {
    Invoker::new(host).t(receiver, spec, args)
}
