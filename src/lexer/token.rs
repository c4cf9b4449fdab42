//! Token definitions for the Drift lexer.

use thiserror::Error;

/// A token produced by the lexer.
///
/// Positions are 1-based and counted in characters. `value` is the literal
/// source text of the token; its character length is the token's span length.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// 1-based source line.
    pub line: u32,
    /// 1-based source column.
    pub column: u32,
    /// The literal text of the token.
    pub value: String,
}

impl Token {
    /// The span length of the token, in characters.
    pub fn len(&self) -> u32 {
        self.value.chars().count() as u32
    }

    /// Whether the token's literal is empty (only EOF).
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

/// The kind of token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    /// End of input.
    Eof,
    /// A character the lexer could not place; only appears on error tokens.
    Unknown,

    // Punctuation
    /// `:`
    Colon,
    /// `;`
    Semicolon,
    /// `.`
    Dot,
    /// `,`
    Comma,
    /// `{`
    OpenBrace,
    /// `}`
    CloseBrace,
    /// `[`
    OpenBracket,
    /// `]`
    CloseBracket,
    /// `(`
    OpenParen,
    /// `)`
    CloseParen,

    // Keywords
    /// `let`
    Let,
    /// `fn`
    Fn,
    /// `return`
    Return,
    /// `import`
    Import,
    /// `export`
    Export,
    /// `from`
    From,
    /// `vertex`
    Vertex,
    /// `fragment`
    Fragment,

    // Built-in type names
    /// `bool`
    Bool,
    /// `int`
    Int,
    /// `float`
    Float,
    /// `vec2`
    Vec2,
    /// `vec3`
    Vec3,
    /// `vec4`
    Vec4,
    /// `ivec2`
    IVec2,
    /// `ivec3`
    IVec3,
    /// `ivec4`
    IVec4,
    /// `bvec2`
    BVec2,
    /// `bvec3`
    BVec3,
    /// `bvec4`
    BVec4,

    /// An identifier.
    Name,

    // Literals
    /// An integer literal.
    IntLiteral,
    /// A floating-point literal.
    FloatLiteral,
    /// `true` or `false`
    BoolLiteral,
    /// A double-quoted string literal.
    StringLiteral,

    /// A `//` or `/* */` comment.
    Comment,

    // Operators
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `==`
    Eq,
    /// `!`
    Not,
    /// `!=`
    NotEq,
    /// `^`
    Caret,
    /// `&`
    Amp,
    /// `&&`
    AmpAmp,
    /// `|`
    Pipe,
    /// `||`
    PipePipe,
    /// `=`
    Assign,
    /// `+=`
    PlusAssign,
    /// `-=`
    MinusAssign,
    /// `*=`
    StarAssign,
    /// `/=`
    SlashAssign,
    /// `^=`
    CaretAssign,
    /// `&=`
    AmpAssign,
    /// `&&=`
    AmpAmpAssign,
    /// `|=`
    PipeAssign,
    /// `||=`
    PipePipeAssign,
}

/// A lexical error, carrying the offending token.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct LexError {
    /// The token the error occurred on.
    pub token: Token,
    /// What went wrong.
    pub message: String,
}
