use colored::Colorize;

use kestrel::host::Builtins;
use kestrel::value::{repr_inner, Value};
use kestrel::{compile_with, Invoker};

use crate::shared::{fail, parse_value};

pub(super) fn cmd_compile(source: &str, host: &Builtins) {
    let lambda = compile_with(source, host).unwrap_or_else(|e| fail(e));
    println!("{} {:?}", "form:".cyan(), lambda.form());
    println!("{} ({})", "params:".cyan(), lambda.params().join(", "));
    println!("{} {:?}", "body:".cyan(), lambda.body());
}

pub(super) fn cmd_t(receiver: &str, spec: &str, args: &[String], host: &Builtins) {
    let receiver = parse_value(receiver, host);
    let args = parse_args(args, host);
    let result = Invoker::new(host)
        .t(&receiver, spec, &args)
        .unwrap_or_else(|e| fail(e));
    println!("{}", repr_inner(&result));
}

pub(super) fn cmd_k(receiver: &str, spec: &str, args: &[String], host: &Builtins) {
    let receiver = parse_value(receiver, host);
    let args = parse_args(args, host);
    let result = Invoker::new(host)
        .k(receiver, spec, &args)
        .unwrap_or_else(|e| fail(e));
    println!("{}", repr_inner(&result));
}

pub(super) fn cmd_chain(receiver: &str, steps: &[String], host: &Builtins) {
    let mut wrapper = Invoker::new(host).wrap(parse_value(receiver, host)).chain();
    for step in steps {
        wrapper = match step.split_once(':') {
            Some(("k", spec)) => wrapper.k(spec, &[]),
            Some(("t", spec)) => wrapper.t(spec, &[]),
            _ => fail(format!("Invalid step '{}': expected k:SPEC or t:SPEC", step)),
        }
        .unwrap_or_else(|e| fail(format!("step '{}': {}", step, e)));
    }
    println!("{}", repr_inner(&wrapper.value()));
}

fn parse_args(args: &[String], host: &Builtins) -> Vec<Value> {
    args.iter().map(|a| parse_value(a, host)).collect()
}
