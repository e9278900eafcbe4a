pub mod ast;
pub mod chain;
pub mod combinator;
pub mod eval;
pub mod host;
pub mod invoke;
pub mod lambda;
pub mod lexer;
pub mod parser;
pub mod value;

pub use chain::{wrap, Chaining, Plain, Wrapper};
pub use combinator::{k, t};
pub use host::{Builtins, Host, Member};
pub use invoke::{invoke, CallableSpec, InvocationError, Invoker};
pub use lambda::{compile, compile_with, CompileError, CompiledLambda, Form};
pub use value::{Function, RuntimeError, Value};
