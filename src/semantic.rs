//! Semantic-token encoding and lexer diagnostics.
//!
//! Converts the lexer's output into the two things the client consumes: the
//! flat delta-encoded semantic-token array and the diagnostics published for
//! lexical errors.

use crate::lexer::{LexError, Token, TokenKind};
use crate::types::{
    Diagnostic, DiagnosticSeverity, Position, Range, SemanticTokens, SemanticTokensLegend,
};

/// The token types advertised in the legend, in index order.
pub const TOKEN_TYPES: [&str; 7] = [
    "keyword", "type", "variable", "number", "string", "comment", "operator",
];

/// The legend advertised with the initialize response.
pub fn legend() -> SemanticTokensLegend {
    SemanticTokensLegend {
        token_types: TOKEN_TYPES.iter().map(ToString::to_string).collect(),
        token_modifiers: Vec::new(),
    }
}

/// Map a token kind to its index in [`TOKEN_TYPES`], or `None` for kinds that
/// produce no highlighting.
///
/// The match is exhaustive on purpose: extending the lexer's kind enumeration
/// without classifying the new kind must not compile.
fn token_type_index(kind: TokenKind) -> Option<u32> {
    use TokenKind::*;

    match kind {
        // No highlighting for structural tokens.
        Eof | Unknown | Colon | Semicolon | Dot | Comma | OpenBrace | CloseBrace | OpenBracket
        | CloseBracket | OpenParen | CloseParen => None,

        Let | Fn | Return | Import | Export | From | Vertex | Fragment => Some(0),

        Bool | Int | Float | Vec2 | Vec3 | Vec4 | IVec2 | IVec3 | IVec4 | BVec2 | BVec3
        | BVec4 => Some(1),

        Name => Some(2),

        IntLiteral | FloatLiteral | BoolLiteral => Some(3),
        StringLiteral => Some(4),

        Comment => Some(5),

        Plus | Minus | Star | Slash | Eq | Not | NotEq | Caret | Amp | AmpAmp | Pipe | PipePipe
        | Assign | PlusAssign | MinusAssign | StarAssign | SlashAssign | CaretAssign
        | AmpAssign | AmpAmpAssign | PipeAssign | PipePipeAssign => Some(6),
    }
}

/// Delta-encode a token sequence into the flat LSP array.
///
/// Tokens must arrive in strictly increasing (line, column) order; the encoder
/// does not sort. Skipped kinds contribute no group and do not move the
/// previous-position baseline.
pub fn encode(tokens: &[Token]) -> SemanticTokens {
    let mut data = Vec::with_capacity(tokens.len() * 5);
    let mut prev: Option<(u32, u32)> = None;

    for token in tokens {
        let Some(type_index) = token_type_index(token.kind) else {
            continue;
        };

        let line = token.line - 1;
        let column = token.column - 1;

        // Absolute on the first group; line-relative afterwards. The column is
        // relative only while staying on the previous token's line.
        let delta_line = match prev {
            Some((prev_line, _)) => line - prev_line,
            None => line,
        };
        let delta_start = match prev {
            Some((prev_line, prev_column)) if prev_line == line => column - prev_column,
            _ => column,
        };

        data.extend_from_slice(&[delta_line, delta_start, token.len(), type_index, 0]);
        prev = Some((line, column));
    }

    SemanticTokens { data }
}

/// Convert lexical errors into diagnostics, 1:1 and in order.
///
/// Ranges are 0-based, half-open, and single-line; a multi-line error token is
/// reported on its starting line only.
pub fn diagnostics(errors: &[LexError]) -> Vec<Diagnostic> {
    errors
        .iter()
        .map(|error| {
            let line = error.token.line - 1;
            let column = error.token.column - 1;
            Diagnostic {
                range: Range::new(
                    Position::new(line, column),
                    Position::new(line, column + error.token.len()),
                ),
                severity: DiagnosticSeverity::Error,
                source: "lexer".to_string(),
                message: error.message.clone(),
            }
        })
        .collect()
}
