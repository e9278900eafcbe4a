/// String-lambda compiler.
///
/// A source string becomes a `CompiledLambda`: an ordered parameter list and
/// an expression body. Parameters come from one of four forms, tried in order:
///
///   x, y -> x + y        explicit arrow; params left of the first `->`
///   _ + ' ' + world      placeholder; params are exactly `[_]`
///   + ' World'           point-free; a synthetic param is prepended
///   str + ' World'       implicit; free identifiers in first-occurrence order
///
/// Parsed templates are cached process-wide by exact source text.
use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use crate::ast::Expr;
use crate::eval::Evaluator;
use crate::host::Host;
use crate::lexer::{is_identifier, Lexer, LexerError, Token, TokenKind, RESERVED};
use crate::parser::{ParseError, Parser};
use crate::value::{RuntimeError, Value};

mod cache;
mod scan;

pub use cache::LambdaCache;
pub use scan::free_identifiers;

/// Name bound to the receiver in point-free bodies.
pub const POINT_FREE_PARAM: &str = "$0";

const ARROW: &str = "->";

#[derive(Debug, Clone, Error)]
pub enum CompileError {
    #[error(transparent)]
    Lex(#[from] LexerError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("lambda body is empty")]
    EmptyBody,
    #[error("invalid parameter name '{0}'")]
    InvalidParam(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Form {
    Arrow,
    Placeholder,
    PointFree,
    Implicit,
}

/// Parse result stored in the cache. For the implicit form `params` holds the
/// candidate identifiers before outer-scope names are removed.
#[derive(Debug, Clone)]
pub struct Template {
    pub form: Form,
    pub params: Vec<String>,
    pub body: Arc<Expr>,
}

#[derive(Debug, Clone)]
pub struct CompiledLambda {
    form: Form,
    params: Vec<String>,
    body: Arc<Expr>,
}

impl CompiledLambda {
    pub fn form(&self) -> Form {
        self.form
    }

    pub fn params(&self) -> &[String] {
        &self.params
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }

    pub fn body(&self) -> &Expr {
        &self.body
    }

    #[cfg(test)]
    pub(crate) fn body_arc(&self) -> Arc<Expr> {
        Arc::clone(&self.body)
    }

    /// Bind `args` positionally and evaluate the body. Surplus arguments are
    /// ignored; missing ones are `undefined`.
    pub fn call(&self, host: &dyn Host, args: &[Value]) -> Result<Value, RuntimeError> {
        let mut env = HashMap::with_capacity(self.params.len());
        for (i, name) in self.params.iter().enumerate() {
            env.insert(name.clone(), args.get(i).cloned().unwrap_or(Value::Undefined));
        }
        Evaluator::new(host, env).eval_expr(&self.body)
    }
}

/// Compile with no outer scope: every qualifying free identifier of an
/// implicit body becomes a parameter.
pub fn compile(source: &str) -> Result<CompiledLambda, CompileError> {
    let template = template(source)?;
    Ok(CompiledLambda {
        form: template.form,
        params: template.params.clone(),
        body: Arc::clone(&template.body),
    })
}

/// Compile against `host`'s outer scope. Implicit candidates the host can
/// resolve stay free instead of becoming parameters; the remaining order is
/// unchanged.
pub fn compile_with(source: &str, host: &dyn Host) -> Result<CompiledLambda, CompileError> {
    let template = template(source)?;
    let params = match template.form {
        Form::Implicit => template
            .params
            .iter()
            .filter(|name| host.global(name).is_none())
            .cloned()
            .collect(),
        _ => template.params.clone(),
    };
    Ok(CompiledLambda {
        form: template.form,
        params,
        body: Arc::clone(&template.body),
    })
}

fn template(source: &str) -> Result<Arc<Template>, CompileError> {
    if let Some(hit) = LambdaCache::get(source) {
        tracing::trace!(source, "lambda cache hit");
        return Ok(hit);
    }
    let parsed = Arc::new(parse_template(source)?);
    tracing::debug!(source, form = ?parsed.form, params = ?parsed.params, "compiled lambda");
    LambdaCache::insert(source, Arc::clone(&parsed));
    Ok(parsed)
}

fn parse_template(source: &str) -> Result<Template, CompileError> {
    if let Some((left, right)) = source.split_once(ARROW) {
        let params = parse_params(left)?;
        let body = parse_body(lex(right)?)?;
        return Ok(Template {
            form: Form::Arrow,
            params,
            body: Arc::new(body),
        });
    }

    let tokens = lex(source)?;
    let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind.clone()).collect();

    if scan::has_placeholder(&kinds) {
        return Ok(Template {
            form: Form::Placeholder,
            params: vec!["_".to_string()],
            body: Arc::new(parse_body(tokens)?),
        });
    }

    if scan::is_point_free(&kinds) {
        let mut prefixed = Vec::with_capacity(tokens.len() + 1);
        prefixed.push(Token {
            kind: TokenKind::Ident(POINT_FREE_PARAM.to_string()),
            line: tokens[0].line,
            col: tokens[0].col,
        });
        prefixed.extend(tokens);
        return Ok(Template {
            form: Form::PointFree,
            params: vec![POINT_FREE_PARAM.to_string()],
            body: Arc::new(parse_body(prefixed)?),
        });
    }

    let body = parse_body(tokens)?;
    Ok(Template {
        form: Form::Implicit,
        params: scan::free_identifiers(&body),
        body: Arc::new(body),
    })
}

fn lex(source: &str) -> Result<Vec<Token>, CompileError> {
    let tokens = Lexer::new(source).tokenize()?;
    if matches!(tokens.first().map(|t| &t.kind), None | Some(TokenKind::Eof)) {
        return Err(CompileError::EmptyBody);
    }
    Ok(tokens)
}

fn parse_body(tokens: Vec<Token>) -> Result<Expr, CompileError> {
    Ok(Parser::new(tokens).parse()?)
}

fn parse_params(left: &str) -> Result<Vec<String>, CompileError> {
    let mut list = left.trim();
    if let Some(inner) = list.strip_prefix('(').and_then(|l| l.strip_suffix(')')) {
        list = inner.trim();
    }
    if list.is_empty() {
        return Ok(Vec::new());
    }
    list.split(',')
        .map(|p| {
            let name = p.trim();
            if is_identifier(name) && !RESERVED.contains(&name) {
                Ok(name.to_string())
            } else {
                Err(CompileError::InvalidParam(name.to_string()))
            }
        })
        .collect()
}
