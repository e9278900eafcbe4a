use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Literals
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),
    // Identifiers
    Ident(String),
    // Keywords
    Null,
    Undefined,
    // Operators
    Arrow,       // ->
    StrictEq,    // ===
    StrictNeq,   // !==
    Eq,          // ==
    Neq,         // !=
    Lte,         // <=
    Gte,         // >=
    And,         // &&
    Or,          // ||
    Bang,        // !
    Question,    // ?
    Lt,          // <
    Gt,          // >
    Plus,        // +
    Minus,       // -
    Star,        // *
    Slash,       // /
    Percent,     // %
    Dot,         // .
    Colon,       // :
    Comma,       // ,
    LParen,      // (
    RParen,      // )
    LBracket,    // [
    RBracket,    // ]
    Eof,
}

impl TokenKind {
    /// Tokens that can only appear between two operands.
    pub fn is_binary_operator(&self) -> bool {
        matches!(
            self,
            TokenKind::StrictEq
                | TokenKind::StrictNeq
                | TokenKind::Eq
                | TokenKind::Neq
                | TokenKind::Lte
                | TokenKind::Gte
                | TokenKind::And
                | TokenKind::Or
                | TokenKind::Lt
                | TokenKind::Gt
                | TokenKind::Plus
                | TokenKind::Minus
                | TokenKind::Star
                | TokenKind::Slash
                | TokenKind::Percent
        )
    }
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub line: usize,
    pub col: usize,
}

#[derive(Debug, Clone, Error)]
pub enum LexerError {
    #[error("Lexer error [{line}:{col}]: {msg}")]
    Error {
        msg: String,
        line: usize,
        col: usize,
    },
}

/// Words that are never inferred as lambda parameters.
pub const RESERVED: &[&str] = &[
    "true",
    "false",
    "null",
    "undefined",
    "this",
    "typeof",
    "new",
    "void",
    "in",
    "instanceof",
];

fn keyword(s: &str) -> Option<TokenKind> {
    match s {
        "true" => Some(TokenKind::Bool(true)),
        "false" => Some(TokenKind::Bool(false)),
        "null" => Some(TokenKind::Null),
        "undefined" => Some(TokenKind::Undefined),
        _ => None,
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// True when `s` is a single well-formed identifier.
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if is_ident_start(c) => chars.all(is_ident_continue),
        _ => false,
    }
}

pub struct Lexer {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    col: usize,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        Lexer {
            chars: source.chars().collect(),
            pos: 0,
            line: 1,
            col: 1,
        }
    }

    fn error(&self, msg: impl Into<String>) -> LexerError {
        LexerError::Error {
            msg: msg.into(),
            line: self.line,
            col: self.col,
        }
    }

    fn peek(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn current(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.chars.get(self.pos).copied()?;
        self.pos += 1;
        if ch == '\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Some(ch)
    }

    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexerError> {
        let mut tokens = Vec::new();

        while self.pos < self.chars.len() {
            self.scan_token(&mut tokens)?;
        }

        tokens.push(Token {
            kind: TokenKind::Eof,
            line: self.line,
            col: self.col,
        });

        Ok(tokens)
    }

    fn scan_token(&mut self, tokens: &mut Vec<Token>) -> Result<(), LexerError> {
        let ch = match self.current() {
            Some(c) => c,
            None => return Ok(()),
        };

        if ch.is_whitespace() {
            self.advance();
            return Ok(());
        }

        if ch == '"' || ch == '\'' {
            let tok = self.scan_string(ch)?;
            tokens.push(tok);
            return Ok(());
        }

        if ch.is_ascii_digit() {
            let tok = self.scan_number()?;
            tokens.push(tok);
            return Ok(());
        }

        if is_ident_start(ch) {
            let tok = self.scan_identifier();
            tokens.push(tok);
            return Ok(());
        }

        let tok = self.scan_operator()?;
        tokens.push(tok);
        Ok(())
    }

    fn scan_string(&mut self, quote: char) -> Result<Token, LexerError> {
        let line = self.line;
        let col = self.col;
        self.advance(); // opening quote

        let mut text = String::new();
        loop {
            match self.current() {
                None | Some('\n') => return Err(self.error("Unterminated string literal")),
                Some(c) if c == quote => {
                    self.advance();
                    break;
                }
                Some('\\') => {
                    self.advance();
                    match self.advance() {
                        Some('n') => text.push('\n'),
                        Some('t') => text.push('\t'),
                        Some('r') => text.push('\r'),
                        Some('0') => text.push('\0'),
                        Some(c) => text.push(c),
                        None => return Err(self.error("Unterminated string literal")),
                    }
                }
                Some(c) => {
                    text.push(c);
                    self.advance();
                }
            }
        }

        Ok(Token {
            kind: TokenKind::Str(text),
            line,
            col,
        })
    }

    fn scan_number(&mut self) -> Result<Token, LexerError> {
        let line = self.line;
        let col = self.col;
        let mut num_str = String::new();
        let mut is_float = false;

        while let Some(c) = self.current() {
            if c.is_ascii_digit() {
                num_str.push(c);
                self.advance();
            } else {
                break;
            }
        }

        if self.current() == Some('.') && self.peek(1).map(|c| c.is_ascii_digit()).unwrap_or(false)
        {
            is_float = true;
            num_str.push('.');
            self.advance();
            while let Some(c) = self.current() {
                if c.is_ascii_digit() {
                    num_str.push(c);
                    self.advance();
                } else {
                    break;
                }
            }
        }

        if self.current().map(is_ident_start).unwrap_or(false) {
            return Err(self.error("Identifier starts immediately after numeric literal"));
        }

        let kind = if is_float {
            TokenKind::Float(
                num_str
                    .parse()
                    .map_err(|_| self.error("Invalid floating-point number"))?,
            )
        } else {
            TokenKind::Int(
                num_str
                    .parse()
                    .map_err(|_| self.error("Invalid integer literal"))?,
            )
        };
        Ok(Token { kind, line, col })
    }

    fn scan_identifier(&mut self) -> Token {
        let line = self.line;
        let col = self.col;
        let mut ident = String::new();

        while let Some(c) = self.current() {
            if is_ident_continue(c) {
                ident.push(c);
                self.advance();
            } else {
                break;
            }
        }

        let kind = keyword(&ident).unwrap_or(TokenKind::Ident(ident));
        Token { kind, line, col }
    }

    fn scan_operator(&mut self) -> Result<Token, LexerError> {
        let line = self.line;
        let col = self.col;
        let Some(ch) = self.advance() else {
            return Err(self.error("Unexpected end of input"));
        };

        let kind = match ch {
            '-' if self.current() == Some('>') => {
                self.advance();
                TokenKind::Arrow
            }
            '=' if self.current() == Some('=') => {
                self.advance();
                if self.current() == Some('=') {
                    self.advance();
                    TokenKind::StrictEq
                } else {
                    TokenKind::Eq
                }
            }
            '!' if self.current() == Some('=') => {
                self.advance();
                if self.current() == Some('=') {
                    self.advance();
                    TokenKind::StrictNeq
                } else {
                    TokenKind::Neq
                }
            }
            '<' if self.current() == Some('=') => {
                self.advance();
                TokenKind::Lte
            }
            '>' if self.current() == Some('=') => {
                self.advance();
                TokenKind::Gte
            }
            '&' if self.current() == Some('&') => {
                self.advance();
                TokenKind::And
            }
            '|' if self.current() == Some('|') => {
                self.advance();
                TokenKind::Or
            }
            '<' => TokenKind::Lt,
            '>' => TokenKind::Gt,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '%' => TokenKind::Percent,
            '!' => TokenKind::Bang,
            '?' => TokenKind::Question,
            '.' => TokenKind::Dot,
            ':' => TokenKind::Colon,
            ',' => TokenKind::Comma,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            '=' => return Err(self.error("Assignment is not supported in lambda bodies")),
            other => return Err(self.error(format!("Unknown character: {:?}", other))),
        };

        Ok(Token { kind, line, col })
    }
}
