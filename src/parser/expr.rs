use super::*;

impl Parser {
    pub fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        self.parse_conditional()
    }

    pub(super) fn parse_conditional(&mut self) -> Result<Expr, ParseError> {
        let cond = self.parse_or()?;

        if self.check_exact(&TokenKind::Question) {
            self.advance();
            let then = self.parse_expr()?;
            self.expect_exact(&TokenKind::Colon)?;
            let otherwise = self.parse_expr()?;
            return Ok(Expr::Cond(
                Box::new(cond),
                Box::new(then),
                Box::new(otherwise),
            ));
        }

        Ok(cond)
    }

    pub(super) fn parse_or(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_and()?;

        while self.check_exact(&TokenKind::Or) {
            self.advance();
            let right = self.parse_and()?;
            left = Expr::BinOp(BinOp::Or, Box::new(left), Box::new(right));
        }

        Ok(left)
    }

    pub(super) fn parse_and(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_equality()?;

        while self.check_exact(&TokenKind::And) {
            self.advance();
            let right = self.parse_equality()?;
            left = Expr::BinOp(BinOp::And, Box::new(left), Box::new(right));
        }

        Ok(left)
    }

    pub(super) fn parse_equality(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_comparison()?;

        loop {
            let op = match &self.current().kind {
                TokenKind::Eq | TokenKind::StrictEq => BinOp::Eq,
                TokenKind::Neq | TokenKind::StrictNeq => BinOp::Neq,
                _ => break,
            };
            self.advance();
            let right = self.parse_comparison()?;
            left = Expr::BinOp(op, Box::new(left), Box::new(right));
        }

        Ok(left)
    }

    pub(super) fn parse_comparison(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_additive()?;

        loop {
            let op = match &self.current().kind {
                TokenKind::Lt => BinOp::Lt,
                TokenKind::Gt => BinOp::Gt,
                TokenKind::Lte => BinOp::Lte,
                TokenKind::Gte => BinOp::Gte,
                _ => break,
            };
            self.advance();
            let right = self.parse_additive()?;
            left = Expr::BinOp(op, Box::new(left), Box::new(right));
        }

        Ok(left)
    }

    pub(super) fn parse_additive(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_multiplicative()?;

        loop {
            let op = match &self.current().kind {
                TokenKind::Plus => BinOp::Add,
                TokenKind::Minus => BinOp::Sub,
                _ => break,
            };
            self.advance();
            let right = self.parse_multiplicative()?;
            left = Expr::BinOp(op, Box::new(left), Box::new(right));
        }

        Ok(left)
    }

    pub(super) fn parse_multiplicative(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_unary()?;

        loop {
            let op = match &self.current().kind {
                TokenKind::Star => BinOp::Mul,
                TokenKind::Slash => BinOp::Div,
                TokenKind::Percent => BinOp::Rem,
                _ => break,
            };
            self.advance();
            let right = self.parse_unary()?;
            left = Expr::BinOp(op, Box::new(left), Box::new(right));
        }

        Ok(left)
    }

    pub(super) fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        let op = match &self.current().kind {
            TokenKind::Minus => UnaryOp::Neg,
            TokenKind::Bang => UnaryOp::Not,
            _ => return self.parse_postfix(),
        };
        self.advance();
        let operand = self.parse_unary()?;
        Ok(Expr::Unary(op, Box::new(operand)))
    }

    pub(super) fn parse_postfix(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_atom()?;

        loop {
            match &self.current().kind {
                TokenKind::Dot => {
                    self.advance();
                    let field = self.expect_ident("Expected member name after '.'")?;
                    if self.check_exact(&TokenKind::LParen) {
                        self.advance();
                        let args = self.parse_args(&TokenKind::RParen)?;
                        expr = Expr::MethodCall(Box::new(expr), field, args);
                    } else {
                        expr = Expr::Attr(Box::new(expr), field);
                    }
                }
                TokenKind::LParen => {
                    self.advance();
                    let args = self.parse_args(&TokenKind::RParen)?;
                    expr = Expr::FnCall(Box::new(expr), args);
                }
                TokenKind::LBracket => {
                    self.advance();
                    let index = self.parse_expr()?;
                    self.expect_exact(&TokenKind::RBracket)?;
                    expr = Expr::Index(Box::new(expr), Box::new(index));
                }
                _ => break,
            }
        }

        Ok(expr)
    }

    /// Parse a comma-separated argument list up to and including `close`.
    pub(super) fn parse_args(&mut self, close: &TokenKind) -> Result<Vec<Expr>, ParseError> {
        let mut args = Vec::new();

        while !self.check_exact(close) {
            if self.is_eof() {
                return Err(self.error(format!("Expected {:?} before end of input", close)));
            }
            args.push(self.parse_expr()?);
            if self.check_exact(&TokenKind::Comma) {
                self.advance();
            } else if !self.check_exact(close) {
                return Err(self.error(format!(
                    "Expected ',' or {:?}, found {:?}",
                    close,
                    self.current().kind
                )));
            }
        }
        self.advance();

        Ok(args)
    }

    pub(super) fn parse_atom(&mut self) -> Result<Expr, ParseError> {
        let literal = match self.current().kind.clone() {
            TokenKind::Int(i) => Literal::Int(i),
            TokenKind::Float(f) => Literal::Float(f),
            TokenKind::Str(s) => Literal::Str(s),
            TokenKind::Bool(b) => Literal::Bool(b),
            TokenKind::Null => Literal::Null,
            TokenKind::Undefined => Literal::Undefined,
            TokenKind::Ident(name) => {
                self.advance();
                return Ok(Expr::Ident(name));
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expr()?;
                self.expect_exact(&TokenKind::RParen)?;
                return Ok(inner);
            }
            TokenKind::LBracket => {
                self.advance();
                let elements = self.parse_args(&TokenKind::RBracket)?;
                return Ok(Expr::List(elements));
            }
            TokenKind::Eof => return Err(self.error("Unexpected end of expression")),
            other => {
                return Err(self.error(format!("Unexpected token in expression: {:?}", other)))
            }
        };
        self.advance();
        Ok(Expr::Literal(literal))
    }
}
