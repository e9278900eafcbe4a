use crate::ast::Expr;
use crate::lexer::{TokenKind, RESERVED};

/// Free identifiers of `expr` in first-occurrence order, without duplicates.
/// Member names after `.` and reserved words are skipped.
pub fn free_identifiers(expr: &Expr) -> Vec<String> {
    let mut names = Vec::new();
    collect(expr, &mut names);
    names
}

fn collect(expr: &Expr, names: &mut Vec<String>) {
    match expr {
        Expr::Literal(_) => {}
        Expr::Ident(name) => {
            if !RESERVED.contains(&name.as_str()) && !names.contains(name) {
                names.push(name.clone());
            }
        }
        Expr::Attr(obj, _) => collect(obj, names),
        Expr::MethodCall(obj, _, args) => {
            collect(obj, names);
            args.iter().for_each(|a| collect(a, names));
        }
        Expr::FnCall(callee, args) => {
            collect(callee, names);
            args.iter().for_each(|a| collect(a, names));
        }
        Expr::Index(obj, index) => {
            collect(obj, names);
            collect(index, names);
        }
        Expr::BinOp(_, left, right) => {
            collect(left, names);
            collect(right, names);
        }
        Expr::Unary(_, operand) => collect(operand, names),
        Expr::Cond(cond, then, otherwise) => {
            collect(cond, names);
            collect(then, names);
            collect(otherwise, names);
        }
        Expr::List(items) => items.iter().for_each(|i| collect(i, names)),
    }
}

/// True when `_` appears as a standalone identifier, not as a member name.
/// String literals are already single tokens, so a quoted `_` never matches.
pub fn has_placeholder(tokens: &[TokenKind]) -> bool {
    tokens.iter().enumerate().any(|(i, kind)| {
        matches!(kind, TokenKind::Ident(name) if name == "_")
            && !matches!(i.checked_sub(1).map(|p| &tokens[p]), Some(TokenKind::Dot))
    })
}

/// Point-free bodies open with a binary operator or a member access.
pub fn is_point_free(tokens: &[TokenKind]) -> bool {
    tokens
        .first()
        .map(|first| first.is_binary_operator() || *first == TokenKind::Dot)
        .unwrap_or(false)
}
