//! Tokenizer for the query dialect
//!
//! Produces position-tagged tokens so parse errors can point at the
//! offending fragment. Keywords are not distinguished here; the parser
//! matches identifiers case-insensitively in clause positions.

use super::errors::{QueryError, QueryResult};

/// A lexical token.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Identifier or keyword
    Ident(String),
    /// Single-quoted string literal, unescaped
    Text(String),
    /// Decimal numeric literal
    Number(f64),
    Comma,
    LParen,
    RParen,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl Token {
    /// Returns the token's source-ish form for error messages.
    pub fn fragment(&self) -> String {
        match self {
            Token::Ident(s) => s.clone(),
            Token::Text(s) => format!("'{}'", s),
            Token::Number(n) => n.to_string(),
            Token::Comma => ",".into(),
            Token::LParen => "(".into(),
            Token::RParen => ")".into(),
            Token::Eq => "=".into(),
            Token::Ne => "!=".into(),
            Token::Lt => "<".into(),
            Token::Le => "<=".into(),
            Token::Gt => ">".into(),
            Token::Ge => ">=".into(),
        }
    }
}

/// A token with its byte position in the query text.
#[derive(Debug, Clone, PartialEq)]
pub struct SpannedToken {
    pub token: Token,
    pub position: usize,
}

/// Tokenizes query text.
pub fn tokenize(input: &str) -> QueryResult<Vec<SpannedToken>> {
    let bytes = input.as_bytes();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        let c = bytes[pos] as char;

        if c.is_ascii_whitespace() {
            pos += 1;
            continue;
        }

        let start = pos;
        let token = match c {
            ',' => {
                pos += 1;
                Token::Comma
            }
            '(' => {
                pos += 1;
                Token::LParen
            }
            ')' => {
                pos += 1;
                Token::RParen
            }
            '=' => {
                pos += 1;
                Token::Eq
            }
            '!' => {
                if bytes.get(pos + 1) == Some(&b'=') {
                    pos += 2;
                    Token::Ne
                } else {
                    return Err(QueryError::syntax(start, "!", "expected '!=' operator"));
                }
            }
            '<' => {
                if bytes.get(pos + 1) == Some(&b'=') {
                    pos += 2;
                    Token::Le
                } else {
                    pos += 1;
                    Token::Lt
                }
            }
            '>' => {
                if bytes.get(pos + 1) == Some(&b'=') {
                    pos += 2;
                    Token::Ge
                } else {
                    pos += 1;
                    Token::Gt
                }
            }
            '\'' => {
                let (text, next) = lex_string(input, pos)?;
                pos = next;
                Token::Text(text)
            }
            c if c.is_ascii_digit() || c == '-' => {
                let (number, next) = lex_number(input, pos)?;
                pos = next;
                Token::Number(number)
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let (ident, next) = lex_ident(input, pos);
                pos = next;
                Token::Ident(ident)
            }
            other => {
                return Err(QueryError::syntax(
                    start,
                    other.to_string(),
                    "unexpected character",
                ));
            }
        };

        tokens.push(SpannedToken {
            token,
            position: start,
        });
    }

    Ok(tokens)
}

/// Lexes a single-quoted string starting at `start`, handling backslash
/// escapes for quotes and backslashes.
fn lex_string(input: &str, start: usize) -> QueryResult<(String, usize)> {
    let bytes = input.as_bytes();
    let mut text = String::new();
    let mut pos = start + 1; // skip opening quote

    while pos < bytes.len() {
        match bytes[pos] {
            b'\'' => return Ok((text, pos + 1)),
            b'\\' if matches!(bytes.get(pos + 1), Some(&b'\'') | Some(&b'\\')) => {
                text.push(bytes[pos + 1] as char);
                pos += 2;
            }
            _ => {
                // Track full UTF-8 characters, not bytes
                let ch = input[pos..].chars().next().unwrap_or('\u{fffd}');
                text.push(ch);
                pos += ch.len_utf8();
            }
        }
    }

    Err(QueryError::syntax(
        start,
        &input[start..],
        "unterminated string literal",
    ))
}

/// Lexes a decimal number, optionally signed, optionally fractional.
fn lex_number(input: &str, start: usize) -> QueryResult<(f64, usize)> {
    let bytes = input.as_bytes();
    let mut pos = start;
    if bytes[pos] == b'-' {
        pos += 1;
    }
    while pos < bytes.len() && (bytes[pos] as char).is_ascii_digit() {
        pos += 1;
    }
    if pos < bytes.len() && bytes[pos] == b'.' {
        pos += 1;
        while pos < bytes.len() && (bytes[pos] as char).is_ascii_digit() {
            pos += 1;
        }
    }

    let text = &input[start..pos];
    text.parse::<f64>()
        .map(|n| (n, pos))
        .map_err(|_| QueryError::syntax(start, text, "malformed numeric literal"))
}

/// Lexes an identifier: `[A-Za-z_][A-Za-z0-9_]*`.
fn lex_ident(input: &str, start: usize) -> (String, usize) {
    let bytes = input.as_bytes();
    let mut pos = start;
    while pos < bytes.len() {
        let c = bytes[pos] as char;
        if c.is_ascii_alphanumeric() || c == '_' {
            pos += 1;
        } else {
            break;
        }
    }
    (input[start..pos].to_string(), pos)
}
