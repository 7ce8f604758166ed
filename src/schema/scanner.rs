//! Graph type scanner — strips the `CREATE GRAPH TYPE` header and outer
//! braces, then splits the body into declaration fragments.
//!
//! Splitting happens on top-level commas only; commas nested inside
//! `()`, `[]` or `{}` (property lists, label pairs) stay in their fragment.
//! The fragment sequence is lazy and single-pass: call [`scan`] again to
//! iterate a second time.

use std::iter::FusedIterator;

use crate::{Error, Result};
use super::lexer::{self, TokenKind};

/// Result of scanning a schema: the graph type name plus its declarations.
#[derive(Debug)]
pub struct Scan<'a> {
    pub graph_name: String,
    pub declarations: Declarations<'a>,
}

/// One trimmed declaration fragment and its byte offset in the schema text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Declaration<'a> {
    pub text: &'a str,
    pub offset: usize,
}

/// Scan `text` into a header name and a lazy fragment iterator.
///
/// Fails when the header is malformed or the outer block is missing or
/// unbalanced. Fragment shapes are not checked here.
pub fn scan(text: &str) -> Result<Scan<'_>> {
    let open = text.find('{').ok_or_else(|| Error::SchemaSyntax {
        position: text.len(),
        message: "missing '{' opening the graph type body".into(),
    })?;

    let graph_name = parse_header(&text[..open])?;
    let close = matching_close(text, open)?;

    let trailing = text[close + 1..].trim();
    if !trailing.is_empty() && trailing != ";" {
        return Err(Error::SchemaSyntax {
            position: close + 1,
            message: format!("unexpected text after graph type body: '{trailing}'"),
        });
    }

    let body = &text[open + 1..close];
    Ok(Scan {
        graph_name,
        declarations: Declarations {
            body,
            base: open + 1,
            cursor: 0,
            done: body.trim().is_empty(),
        },
    })
}

/// `CREATE GRAPH TYPE <Name> [STRICT | LOOSE]`
fn parse_header(header: &str) -> Result<String> {
    let tokens = lexer::tokenize(header, 0)?;
    let mut it = tokens.iter();

    for keyword in ["CREATE", "GRAPH", "TYPE"] {
        match it.next() {
            Some(tok) if tok.is_word(keyword) => {}
            Some(tok) if tok.kind != TokenKind::Eof => {
                return Err(Error::SchemaSyntax {
                    position: tok.span.start,
                    message: format!("expected {keyword} in graph type header, got '{}'", tok.text),
                });
            }
            _ => {
                return Err(Error::SchemaSyntax {
                    position: header.len(),
                    message: format!("graph type header ends before {keyword}"),
                });
            }
        }
    }

    let name = match it.next() {
        Some(tok) if tok.kind == TokenKind::Identifier => tok.text.clone(),
        other => {
            return Err(Error::SchemaSyntax {
                position: other.map_or(header.len(), |tok| tok.span.start),
                message: "expected graph type name after CREATE GRAPH TYPE".into(),
            });
        }
    };

    let mut next = it.next();
    if next.is_some_and(|t| t.is_word("STRICT") || t.is_word("LOOSE")) {
        next = it.next();
    }
    match next {
        Some(tok) if tok.kind == TokenKind::Eof => Ok(name),
        Some(tok) => Err(Error::SchemaSyntax {
            position: tok.span.start,
            message: format!("unexpected '{}' in graph type header", tok.text),
        }),
        None => Ok(name),
    }
}

/// Find the `}` closing the brace at `open`, checking bracket nesting on the way.
fn matching_close(text: &str, open: usize) -> Result<usize> {
    let mut stack: Vec<(char, usize)> = Vec::new();

    for (pos, ch) in text[open..].char_indices().map(|(i, c)| (open + i, c)) {
        match ch {
            '{' => stack.push(('}', pos)),
            '(' => stack.push((')', pos)),
            '[' => stack.push((']', pos)),
            '}' | ')' | ']' => match stack.pop() {
                Some((expected, _)) if expected == ch => {
                    if stack.is_empty() {
                        return Ok(pos);
                    }
                }
                Some((expected, opened_at)) => {
                    return Err(Error::SchemaSyntax {
                        position: pos,
                        message: format!(
                            "unbalanced '{ch}': expected '{expected}' to close bracket opened at {opened_at}"
                        ),
                    });
                }
                None => {
                    return Err(Error::SchemaSyntax {
                        position: pos,
                        message: format!("unbalanced '{ch}' with no open bracket"),
                    });
                }
            },
            _ => {}
        }
    }

    let (_, opened_at) = stack.last().copied().unwrap_or(('}', open));
    Err(Error::SchemaSyntax {
        position: text.len(),
        message: format!("unclosed bracket opened at {opened_at}"),
    })
}

/// Lazy iterator over the top-level fragments of a graph type body.
#[derive(Debug)]
pub struct Declarations<'a> {
    body: &'a str,
    base: usize,
    cursor: usize,
    done: bool,
}

impl<'a> Iterator for Declarations<'a> {
    type Item = Declaration<'a>;

    fn next(&mut self) -> Option<Declaration<'a>> {
        if self.done {
            return None;
        }

        let rest = &self.body[self.cursor..];
        let mut depth = 0usize;
        let mut end = rest.len();
        for (i, ch) in rest.char_indices() {
            match ch {
                '(' | '[' | '{' => depth += 1,
                ')' | ']' | '}' => depth = depth.saturating_sub(1),
                ',' if depth == 0 => {
                    end = i;
                    break;
                }
                _ => {}
            }
        }

        let raw = &rest[..end];
        let leading = raw.len() - raw.trim_start().len();
        let decl = Declaration {
            text: raw.trim(),
            offset: self.base + self.cursor + leading,
        };

        if end == rest.len() {
            self.done = true;
        } else {
            self.cursor += end + 1;
        }
        Some(decl)
    }
}

impl FusedIterator for Declarations<'_> {}
