//! PG-Schema lexer — tokenizes declaration text.
//!
//! Keywords are not distinguished here: `TYPE`, `STRING` and friends are
//! ordinary identifiers, since they are also legal label and property names.
//! Callers match identifier text case-insensitively where a keyword is due.

use crate::{Error, Result};

/// A token from the lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    pub text: String,
}

/// Source span (byte offsets).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

/// Token kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    // Literals
    Integer, StringLiteral,

    Identifier,

    // Punctuation
    LParen, RParen, LBracket, RBracket, LBrace, RBrace,
    Comma, Colon, Semicolon,
    Arrow,      // ->
    Dash,       // -

    Eof,
}

impl Token {
    /// True if this is an identifier spelled `word` (ASCII case-insensitive).
    pub fn is_word(&self, word: &str) -> bool {
        self.kind == TokenKind::Identifier && self.text.eq_ignore_ascii_case(word)
    }
}

/// Tokenize `input`. Spans are offset by `base` so that errors point into the
/// enclosing schema text rather than the fragment.
pub fn tokenize(input: &str, base: usize) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some(&(pos, ch)) = chars.peek() {
        match ch {
            c if c.is_whitespace() => { chars.next(); }

            '\'' | '"' => {
                let quote = ch;
                chars.next(); // consume opening quote
                let start = pos;
                let mut s = String::new();
                loop {
                    match chars.next() {
                        Some((_, '\\')) => {
                            if let Some((_, escaped)) = chars.next() {
                                match escaped {
                                    'n' => s.push('\n'),
                                    't' => s.push('\t'),
                                    '\\' => s.push('\\'),
                                    c if c == quote => s.push(c),
                                    c => { s.push('\\'); s.push(c); }
                                }
                            }
                        }
                        Some((end, c)) if c == quote => {
                            tokens.push(Token {
                                kind: TokenKind::StringLiteral,
                                span: Span { start: base + start, end: base + end + 1 },
                                text: s,
                            });
                            break;
                        }
                        Some((_, c)) => s.push(c),
                        None => return Err(Error::SchemaSyntax {
                            position: base + start,
                            message: "Unterminated string literal".into(),
                        }),
                    }
                }
            }

            c if c.is_ascii_digit() => {
                let start = pos;
                let mut num = String::new();
                while let Some(&(_, c)) = chars.peek() {
                    if c.is_ascii_digit() {
                        num.push(c);
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(Token {
                    kind: TokenKind::Integer,
                    span: Span { start: base + start, end: base + start + num.len() },
                    text: num,
                });
            }

            c if c.is_alphabetic() || c == '_' => {
                let start = pos;
                let mut ident = String::new();
                while let Some(&(_, c)) = chars.peek() {
                    if c.is_alphanumeric() || c == '_' {
                        ident.push(c);
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(Token {
                    kind: TokenKind::Identifier,
                    span: Span { start: base + start, end: base + start + ident.len() },
                    text: ident,
                });
            }

            '(' => { chars.next(); tokens.push(punct(TokenKind::LParen, base + pos, "(")); }
            ')' => { chars.next(); tokens.push(punct(TokenKind::RParen, base + pos, ")")); }
            '[' => { chars.next(); tokens.push(punct(TokenKind::LBracket, base + pos, "[")); }
            ']' => { chars.next(); tokens.push(punct(TokenKind::RBracket, base + pos, "]")); }
            '{' => { chars.next(); tokens.push(punct(TokenKind::LBrace, base + pos, "{")); }
            '}' => { chars.next(); tokens.push(punct(TokenKind::RBrace, base + pos, "}")); }
            ',' => { chars.next(); tokens.push(punct(TokenKind::Comma, base + pos, ",")); }
            ':' => { chars.next(); tokens.push(punct(TokenKind::Colon, base + pos, ":")); }
            ';' => { chars.next(); tokens.push(punct(TokenKind::Semicolon, base + pos, ";")); }
            '-' => {
                chars.next();
                if matches!(chars.peek(), Some(&(_, '>'))) {
                    chars.next();
                    tokens.push(punct(TokenKind::Arrow, base + pos, "->"));
                } else {
                    tokens.push(punct(TokenKind::Dash, base + pos, "-"));
                }
            }

            other => {
                return Err(Error::SchemaSyntax {
                    position: base + pos,
                    message: format!("Unexpected character: '{other}'"),
                });
            }
        }
    }

    tokens.push(Token {
        kind: TokenKind::Eof,
        span: Span { start: base + input.len(), end: base + input.len() },
        text: String::new(),
    });

    Ok(tokens)
}

fn punct(kind: TokenKind, pos: usize, text: &str) -> Token {
    Token {
        kind,
        span: Span { start: pos, end: pos + text.len() },
        text: text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_declaration() {
        let tokens = tokenize("(PostType: Post {name STRING})", 0).unwrap();
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(kinds, vec![
            TokenKind::LParen,
            TokenKind::Identifier, // PostType
            TokenKind::Colon,
            TokenKind::Identifier, // Post
            TokenKind::LBrace,
            TokenKind::Identifier, // name
            TokenKind::Identifier, // STRING
            TokenKind::RBrace,
            TokenKind::RParen,
            TokenKind::Eof,
        ]);
    }

    #[test]
    fn test_edge_declaration() {
        let tokens = tokenize("(:A)-[R: r]->(:B)", 0).unwrap();
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(kinds, vec![
            TokenKind::LParen,
            TokenKind::Colon,
            TokenKind::Identifier, // A
            TokenKind::RParen,
            TokenKind::Dash,
            TokenKind::LBracket,
            TokenKind::Identifier, // R
            TokenKind::Colon,
            TokenKind::Identifier, // r
            TokenKind::RBracket,
            TokenKind::Arrow,
            TokenKind::LParen,
            TokenKind::Colon,
            TokenKind::Identifier, // B
            TokenKind::RParen,
            TokenKind::Eof,
        ]);
    }

    #[test]
    fn test_string_literal_escape() {
        let tokens = tokenize(r"'it\'s'", 0).unwrap();
        assert_eq!(tokens[0].kind, TokenKind::StringLiteral);
        assert_eq!(tokens[0].text, "it's");
    }

    #[test]
    fn test_base_offset_in_spans() {
        let tokens = tokenize("  abc", 10).unwrap();
        assert_eq!(tokens[0].span, Span { start: 12, end: 15 });
    }

    #[test]
    fn test_unexpected_character() {
        match tokenize("(A: B {x STRING}) @", 5) {
            Err(Error::SchemaSyntax { position, .. }) => assert_eq!(position, 23),
            other => panic!("expected syntax error, got {other:?}"),
        }
    }

    #[test]
    fn test_is_word_case_insensitive() {
        let tokens = tokenize("strict", 0).unwrap();
        assert!(tokens[0].is_word("STRICT"));
        assert!(!tokens[0].is_word("LOOSE"));
    }
}
