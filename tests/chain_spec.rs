/// Tests for the chain proxy.
use kestrel::host::Builtins;
use kestrel::invoke::{CallableSpec, Invoker};
use kestrel::value::Value;
use kestrel::{k, t, wrap};

fn s(text: &str) -> Value {
    Value::str(text)
}

fn ints(range: std::ops::RangeInclusive<i64>) -> Value {
    Value::list(range.map(Value::Int).collect())
}

// ---------------------------------------------------------------------------
// Plain mode
// ---------------------------------------------------------------------------

#[test]
fn plain_t_returns_raw_value() {
    let host = Builtins::new();
    let out: Value = wrap(&host, s("Hello")).t(".toUpperCase()", &[]).unwrap();
    assert_eq!(out, s("HELLO"));
}

#[test]
fn plain_k_stays_wrapped() {
    let host = Builtins::new();
    let arr = ints(1..=5);
    let wrapped = wrap(&host, arr.clone()).k("pop", &[]).unwrap();
    assert!(!wrapped.is_chaining());
    assert!(wrapped.peek().same(&arr));
    let last = wrapped.k("pop", &[]).unwrap().t("pop", &[]).unwrap();
    assert_eq!(last, Value::Int(3));
    assert_eq!(arr, ints(1..=2));
}

#[test]
fn value_unwraps_in_plain_mode() {
    let host = Builtins::new();
    assert_eq!(wrap(&host, Value::Int(4)).value(), Value::Int(4));
}

// ---------------------------------------------------------------------------
// Chaining mode
// ---------------------------------------------------------------------------

#[test]
fn chain_is_idempotent() {
    let host = Builtins::new();
    let chained = wrap(&host, Value::Null).chain().chain();
    assert!(chained.is_chaining());
    assert_eq!(chained.value(), Value::Null);
}

#[test]
fn chained_t_keeps_wrapping() {
    let host = Builtins::new();
    let out = wrap(&host, s("hello"))
        .chain()
        .t(".toUpperCase()", &[])
        .unwrap()
        .t("+ '!'", &[])
        .unwrap();
    assert!(out.is_chaining());
    assert_eq!(out.value(), s("HELLO!"));
}

#[test]
fn chained_k_keeps_receiver() {
    let host = Builtins::new();
    let arr = ints(1..=10);
    let out = wrap(&host, arr.clone())
        .chain()
        .k("pop", &[])
        .unwrap()
        .k("pop", &[])
        .unwrap()
        .value();
    assert!(out.same(&arr));
    assert_eq!(t(&host, &arr, "length", &[]).unwrap(), Value::Int(8));
}

#[test]
fn chain_round_trip_matches_direct_calls() {
    let host = Builtins::new();
    let f1 = CallableSpec::from("push");
    let f2 = CallableSpec::from("xs -> xs.join('-')");

    let via_proxy = wrap(&host, ints(1..=3))
        .chain()
        .k(&f1, &[Value::Int(4)])
        .unwrap()
        .t(&f2, &[])
        .unwrap()
        .value();

    let receiver = k(&host, ints(1..=3), &f1, &[Value::Int(4)]).unwrap();
    let direct = t(&host, &receiver, &f2, &[]).unwrap();

    assert_eq!(via_proxy, direct);
    assert_eq!(direct, s("1-2-3-4"));
}

#[test]
fn error_mid_chain_propagates() {
    let host = Builtins::new();
    let result = wrap(&host, Value::Int(1))
        .chain()
        .t("x -> x + 1", &[])
        .and_then(|w| w.t("x -> (", &[]));
    assert!(result.is_err());
}

#[test]
fn invoker_wrap_shares_host_scope() {
    let host = Builtins::new().with("bang", s("!"));
    let out = Invoker::new(&host)
        .wrap(s("hi"))
        .chain()
        .t("x + bang", &[])
        .unwrap()
        .t(".length", &[])
        .unwrap()
        .value();
    assert_eq!(out, Value::Int(3));
}
