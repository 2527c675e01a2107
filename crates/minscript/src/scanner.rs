//! Source text to token stream.
//!
//! A single left-to-right pass without backtracking. Whitespace and `//`
//! comments are discarded, two-character operators are matched greedily
//! before single-character ones, and any byte that matches nothing becomes an
//! `Unknown` token rather than aborting the scan. The output always ends in
//! exactly one EOF token carrying the position one past the end of input;
//! tokens past [`Limits::max_tokens`] are silently dropped.

use crate::arena::Arena;
use crate::limits::{Limits, RunResult};
use crate::token::{Token, TokenKind};

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

fn is_ident_continue(b: u8) -> bool {
    is_ident_start(b) || b.is_ascii_digit()
}

/// Scans `source` into a token sequence ending in a single EOF token.
///
/// Identifier, keyword and string payloads are interned in `arena`; the only
/// hard failure is arena exhaustion.
pub fn tokenize(source: &str, arena: &mut Arena, limits: &Limits) -> RunResult<Vec<Token>> {
    Scanner {
        src: source,
        bytes: source.as_bytes(),
        pos: 0,
        line: 1,
        column: 1,
    }
    .run(arena, limits)
}

struct Scanner<'src> {
    src: &'src str,
    bytes: &'src [u8],
    pos: usize,
    line: u32,
    column: u32,
}

impl Scanner<'_> {
    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn peek_next(&self) -> Option<u8> {
        self.bytes.get(self.pos + 1).copied()
    }

    fn bump(&mut self) {
        self.pos += 1;
        self.column += 1;
    }

    fn run(mut self, arena: &mut Arena, limits: &Limits) -> RunResult<Vec<Token>> {
        let mut tokens = Vec::new();

        while let Some(b) = self.peek() {
            if tokens.len() + 1 >= limits.max_tokens {
                break;
            }

            // Whitespace: line feeds advance the line counter and reset the column.
            if matches!(b, b' ' | b'\t' | b'\r' | b'\n') {
                if b == b'\n' {
                    self.line += 1;
                    self.column = 1;
                    self.pos += 1;
                } else {
                    self.bump();
                }
                continue;
            }

            // Comments run to (but not including) the next line feed.
            if b == b'/' && self.peek_next() == Some(b'/') {
                while let Some(c) = self.peek() {
                    if c == b'\n' {
                        break;
                    }
                    self.pos += 1;
                }
                continue;
            }

            let (line, column) = (self.line, self.column);

            // Number literal: a digit run with at most one '.', no sign, no exponent.
            if b.is_ascii_digit() {
                tokens.push(Token {
                    number: Some(self.scan_number()),
                    ..Token::plain(TokenKind::Number, line, column)
                });
                continue;
            }

            // String literal: raw bytes between matching quotes, no escapes.
            // An unterminated string runs to the end of input.
            if b == b'"' || b == b'\'' {
                let quote = b;
                self.bump();
                let start = self.pos;
                while let Some(c) = self.peek() {
                    if c == quote {
                        break;
                    }
                    self.bump();
                }
                let text = arena.alloc_str(&self.src[start..self.pos])?;
                if self.peek() == Some(quote) {
                    self.bump();
                }
                tokens.push(Token {
                    text: Some(text),
                    ..Token::plain(TokenKind::Str, line, column)
                });
                continue;
            }

            // Identifier or keyword.
            if is_ident_start(b) {
                let start = self.pos;
                while self.peek().is_some_and(is_ident_continue) {
                    self.bump();
                }
                let text = &self.src[start..self.pos];
                let kind = TokenKind::keyword(text).unwrap_or(TokenKind::Identifier);
                tokens.push(Token {
                    text: Some(arena.alloc_str(text)?),
                    ..Token::plain(kind, line, column)
                });
                continue;
            }

            // Two-character operators, matched greedily.
            let two = match (b, self.peek_next()) {
                (b'=', Some(b'=')) => Some(TokenKind::EqEq),
                (b'!', Some(b'=')) => Some(TokenKind::NotEq),
                (b'<', Some(b'=')) => Some(TokenKind::LessEq),
                (b'>', Some(b'=')) => Some(TokenKind::GreaterEq),
                (b'&', Some(b'&')) => Some(TokenKind::AndAnd),
                (b'|', Some(b'|')) => Some(TokenKind::OrOr),
                _ => None,
            };
            if let Some(kind) = two {
                self.bump();
                self.bump();
                tokens.push(Token::plain(kind, line, column));
                continue;
            }

            // Single-character operators and punctuation.
            let kind = match b {
                b'=' => TokenKind::Assign,
                b'+' => TokenKind::Plus,
                b'-' => TokenKind::Minus,
                b'*' => TokenKind::Star,
                b'/' => TokenKind::Slash,
                b'%' => TokenKind::Percent,
                b'<' => TokenKind::Less,
                b'>' => TokenKind::Greater,
                b'!' => TokenKind::Bang,
                b'(' => TokenKind::LParen,
                b')' => TokenKind::RParen,
                b'{' => TokenKind::LBrace,
                b'}' => TokenKind::RBrace,
                b';' => TokenKind::Semicolon,
                b',' => TokenKind::Comma,
                b'.' => TokenKind::Dot,
                _ => TokenKind::Unknown,
            };
            self.bump();
            tokens.push(Token::plain(kind, line, column));
        }

        tokens.push(Token::plain(TokenKind::Eof, self.line, self.column));
        Ok(tokens)
    }

    /// Accumulates a decimal literal digit by digit; the fractional part is
    /// divided by 10^(digits after the point).
    fn scan_number(&mut self) -> f64 {
        let mut whole = 0f64;
        let mut fraction = 0f64;
        let mut divisor = 1f64;
        let mut has_decimal = false;

        while let Some(b) = self.peek() {
            if b.is_ascii_digit() {
                let digit = f64::from(b - b'0');
                if has_decimal {
                    divisor *= 10.0;
                    fraction = fraction * 10.0 + digit;
                } else {
                    whole = whole * 10.0 + digit;
                }
            } else if b == b'.' && !has_decimal {
                has_decimal = true;
            } else {
                break;
            }
            self.bump();
        }

        whole + fraction / divisor
    }
}
