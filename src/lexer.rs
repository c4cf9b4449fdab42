//! Lexical analysis for Drift source code.
//!
//! The lexer is the server's only language-specific collaborator and is kept
//! behind a narrow contract: full document text in, ordered tokens plus
//! ordered lexical errors out. Tokens carry 1-based line/column positions and
//! their literal text.

mod token;

pub use token::{LexError, Token, TokenKind};

/// Lexer configuration and entry point.
#[derive(Clone, Copy, Debug)]
pub struct Lexer {
    /// Keep scanning after a lexical error instead of stopping at the first.
    pub all_errors: bool,
    /// Emit comment tokens instead of dropping them.
    pub comments: bool,
}

impl Default for Lexer {
    fn default() -> Self {
        Self {
            all_errors: false,
            comments: false,
        }
    }
}

impl Lexer {
    /// Tokenize a full document.
    ///
    /// Both returned sequences are in source order. A trailing EOF token with
    /// an empty literal closes the token stream.
    pub fn tokenize(&self, src: &str) -> (Vec<Token>, Vec<LexError>) {
        let mut scanner = Scanner::new(src, *self);
        scanner.run();
        (scanner.tokens, scanner.errors)
    }
}

struct Scanner<'src> {
    src: &'src str,
    pos: usize,
    line: u32,
    column: u32,
    config: Lexer,
    tokens: Vec<Token>,
    errors: Vec<LexError>,
}

impl<'src> Scanner<'src> {
    fn new(src: &'src str, config: Lexer) -> Self {
        Self {
            src,
            pos: 0,
            line: 1,
            column: 1,
            config,
            tokens: Vec::new(),
            errors: Vec::new(),
        }
    }

    fn remaining(&self) -> &'src str {
        &self.src[self.pos..]
    }

    /// Peek at the next character without consuming it.
    fn peek(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    /// Peek at the character after next.
    fn peek2(&self) -> Option<char> {
        let mut chars = self.remaining().chars();
        chars.next();
        chars.next()
    }

    /// Advance by one character, tracking line and column.
    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    /// Advance while a predicate is true.
    fn advance_while(&mut self, pred: impl Fn(char) -> bool) {
        while let Some(c) = self.peek() {
            if pred(c) {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn skip_whitespace(&mut self) {
        self.advance_while(|c| c == ' ' || c == '\t' || c == '\r' || c == '\n');
    }

    fn token(&self, kind: TokenKind, line: u32, column: u32, start: usize) -> Token {
        Token {
            kind,
            line,
            column,
            value: self.src[start..self.pos].to_string(),
        }
    }

    fn run(&mut self) {
        loop {
            self.skip_whitespace();

            let (line, column, start) = (self.line, self.column, self.pos);

            let Some(c) = self.peek() else {
                self.tokens.push(Token {
                    kind: TokenKind::Eof,
                    line,
                    column,
                    value: String::new(),
                });
                return;
            };

            let had_error = match c {
                '/' if self.peek2() == Some('/') => {
                    self.lex_line_comment(line, column, start);
                    false
                }
                '/' if self.peek2() == Some('*') => self.lex_block_comment(line, column, start),
                '"' => self.lex_string(line, column, start),
                c if c.is_ascii_digit() => {
                    self.lex_number(line, column, start);
                    false
                }
                c if c.is_alphabetic() || c == '_' => {
                    self.lex_ident(line, column, start);
                    false
                }
                _ => self.lex_operator(line, column, start),
            };

            if had_error && !self.config.all_errors {
                return;
            }
        }
    }

    fn lex_line_comment(&mut self, line: u32, column: u32, start: usize) {
        self.advance_while(|c| c != '\n');
        if self.config.comments {
            self.tokens
                .push(self.token(TokenKind::Comment, line, column, start));
        }
    }

    /// Returns true if the comment was unterminated.
    fn lex_block_comment(&mut self, line: u32, column: u32, start: usize) -> bool {
        self.advance(); // /
        self.advance(); // *

        let terminated = loop {
            if self.peek() == Some('*') && self.peek2() == Some('/') {
                self.advance();
                self.advance();
                break true;
            }
            if self.advance().is_none() {
                break false;
            }
        };

        let token = self.token(TokenKind::Comment, line, column, start);
        if self.config.comments {
            self.tokens.push(token.clone());
        }
        if !terminated {
            self.errors.push(LexError {
                token,
                message: "unterminated block comment".to_string(),
            });
        }
        !terminated
    }

    /// Returns true if the string literal was unterminated.
    fn lex_string(&mut self, line: u32, column: u32, start: usize) -> bool {
        self.advance(); // opening quote

        let terminated = loop {
            match self.peek() {
                Some('"') => {
                    self.advance();
                    break true;
                }
                Some('\\') => {
                    self.advance();
                    self.advance();
                }
                Some('\n') | None => break false,
                Some(_) => {
                    self.advance();
                }
            }
        };

        let token = self.token(TokenKind::StringLiteral, line, column, start);
        self.tokens.push(token.clone());
        if !terminated {
            self.errors.push(LexError {
                token,
                message: "unterminated string literal".to_string(),
            });
        }
        !terminated
    }

    fn lex_number(&mut self, line: u32, column: u32, start: usize) {
        self.advance_while(|c| c.is_ascii_digit());

        let kind = if self.peek() == Some('.') && self.peek2().is_some_and(|c| c.is_ascii_digit())
        {
            self.advance(); // .
            self.advance_while(|c| c.is_ascii_digit());
            TokenKind::FloatLiteral
        } else {
            TokenKind::IntLiteral
        };

        self.tokens.push(self.token(kind, line, column, start));
    }

    fn lex_ident(&mut self, line: u32, column: u32, start: usize) {
        self.advance_while(|c| c.is_alphanumeric() || c == '_');
        let kind = ident_kind(&self.src[start..self.pos]);
        self.tokens.push(self.token(kind, line, column, start));
    }

    /// Returns true on an unexpected character.
    fn lex_operator(&mut self, line: u32, column: u32, start: usize) -> bool {
        use TokenKind::*;

        let Some(c) = self.advance() else {
            return false;
        };

        let kind = match c {
            ':' => Colon,
            ';' => Semicolon,
            '.' => Dot,
            ',' => Comma,
            '{' => OpenBrace,
            '}' => CloseBrace,
            '[' => OpenBracket,
            ']' => CloseBracket,
            '(' => OpenParen,
            ')' => CloseParen,
            '+' => self.with_assign(Plus, PlusAssign),
            '-' => self.with_assign(Minus, MinusAssign),
            '*' => self.with_assign(Star, StarAssign),
            '/' => self.with_assign(Slash, SlashAssign),
            '^' => self.with_assign(Caret, CaretAssign),
            '!' => self.with_assign(Not, NotEq),
            '=' => self.with_assign(Assign, Eq),
            '&' => {
                if self.peek() == Some('&') {
                    self.advance();
                    self.with_assign(AmpAmp, AmpAmpAssign)
                } else {
                    self.with_assign(Amp, AmpAssign)
                }
            }
            '|' => {
                if self.peek() == Some('|') {
                    self.advance();
                    self.with_assign(PipePipe, PipePipeAssign)
                } else {
                    self.with_assign(Pipe, PipeAssign)
                }
            }
            _ => {
                self.errors.push(LexError {
                    token: self.token(Unknown, line, column, start),
                    message: format!("unexpected character {c:?}"),
                });
                return true;
            }
        };

        self.tokens.push(self.token(kind, line, column, start));
        false
    }

    /// Consume a trailing `=` and pick the compound kind if present.
    fn with_assign(&mut self, plain: TokenKind, compound: TokenKind) -> TokenKind {
        if self.peek() == Some('=') {
            self.advance();
            compound
        } else {
            plain
        }
    }
}

fn ident_kind(text: &str) -> TokenKind {
    use TokenKind::*;

    match text {
        "let" => Let,
        "fn" => Fn,
        "return" => Return,
        "import" => Import,
        "export" => Export,
        "from" => From,
        "vertex" => Vertex,
        "fragment" => Fragment,
        "bool" => Bool,
        "int" => Int,
        "float" => Float,
        "vec2" => Vec2,
        "vec3" => Vec3,
        "vec4" => Vec4,
        "ivec2" => IVec2,
        "ivec3" => IVec3,
        "ivec4" => IVec4,
        "bvec2" => BVec2,
        "bvec3" => BVec3,
        "bvec4" => BVec4,
        "true" | "false" => BoolLiteral,
        _ => Name,
    }
}
