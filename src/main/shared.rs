use colored::Colorize;

use kestrel::eval::{Env, Evaluator};
use kestrel::host::Builtins;
use kestrel::lexer::Lexer;
use kestrel::parser::Parser;
use kestrel::value::Value;

pub(super) fn fail(msg: impl std::fmt::Display) -> ! {
    eprintln!("{} {}", "error:".red().bold(), msg);
    std::process::exit(1)
}

/// Evaluate a command-line argument as an expression with no parameters.
/// Anything that does not lex, parse or evaluate is taken as a plain string.
pub(super) fn parse_value(text: &str, host: &Builtins) -> Value {
    let Ok(tokens) = Lexer::new(text).tokenize() else {
        return Value::str(text);
    };
    let Ok(expr) = Parser::new(tokens).parse() else {
        return Value::str(text);
    };
    Evaluator::new(host, Env::new())
        .eval_expr(&expr)
        .unwrap_or_else(|_| Value::str(text))
}

pub(super) fn build_host(defines: &[String]) -> Result<Builtins, String> {
    let mut host = Builtins::new();
    for def in defines {
        let Some((name, expr)) = def.split_once('=') else {
            return Err(format!("Invalid --define '{}': expected NAME=EXPR", def));
        };
        let name = name.trim();
        if !kestrel::lexer::is_identifier(name) {
            return Err(format!("Invalid --define name '{}'", name));
        }
        let value = parse_value(expr, &host);
        host.define(name, value);
    }
    Ok(host)
}
