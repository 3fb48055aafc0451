//! Formula token classification and rendering.

use super::CellRef;

/// What a single formula token stands for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    /// A digit run or decimal point (a fragment of a number literal).
    Number,
    /// One of `+ - * /`.
    Operator,
    LeftParen,
    RightParen,
    /// An A1-style reference.
    Cell(CellRef),
    /// Anything the reference engine cannot evaluate.
    Other,
}

impl TokenKind {
    pub fn classify(token: &str) -> TokenKind {
        match token {
            "+" | "-" | "*" | "/" => TokenKind::Operator,
            "(" => TokenKind::LeftParen,
            ")" => TokenKind::RightParen,
            t if !t.is_empty() && t.chars().all(|c| c.is_ascii_digit() || c == '.') => {
                TokenKind::Number
            }
            t => CellRef::parse(t).map_or(TokenKind::Other, TokenKind::Cell),
        }
    }
}

/// Render a token list for the formula bar.
///
/// Tokens are separated by single spaces, except that adjacent number
/// fragments are glued (`["1", "2", "+", "3"]` renders as `12 + 3`).
pub fn render_formula(tokens: &[String]) -> String {
    let mut out = String::new();
    let mut prev_number = false;
    for token in tokens {
        let is_number = TokenKind::classify(token) == TokenKind::Number;
        if !out.is_empty() && !(prev_number && is_number) {
            out.push(' ');
        }
        out.push_str(token);
        prev_number = is_number;
    }
    out
}
