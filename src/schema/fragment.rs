//! Declaration classification.
//!
//! Each scanned fragment goes through one recursive-descent pass that
//! produces a [`Fragment`]: a node-type declaration, an edge-type
//! declaration, or an invalid fragment with the reason it was rejected.
//!
//! ```text
//! node:  ( Internal : Display { name TYPE, ... } )
//! edge:  ( : Src ) - [ Internal : Display ] -> ( : Dst )
//! ```

use crate::Error;
use super::lexer::{self, Token, TokenKind};
use super::scanner::Declaration;

/// A classified declaration fragment.
#[derive(Debug, Clone, PartialEq)]
pub enum Fragment {
    Node(NodeFragment),
    Edge(EdgeFragment),
    Invalid(InvalidFragment),
}

/// Node-type declaration; property types are still raw tokens.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeFragment {
    pub internal_label: String,
    pub display_label: String,
    pub properties: Vec<RawProperty>,
    pub position: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawProperty {
    pub name: String,
    pub type_token: String,
    pub position: usize,
}

/// Edge-type declaration; endpoints are unresolved internal labels.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeFragment {
    pub internal_label: String,
    pub display_label: String,
    pub source_label: String,
    pub target_label: String,
    pub position: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InvalidFragment {
    pub text: String,
    pub position: usize,
    pub reason: String,
}

impl InvalidFragment {
    pub fn into_error(self) -> Error {
        Error::SchemaSyntax {
            position: self.position,
            message: format!("unrecognized declaration '{}': {}", self.text, self.reason),
        }
    }
}

/// Classify one declaration fragment.
pub fn classify(decl: Declaration<'_>) -> Fragment {
    let invalid = |position: usize, reason: String| {
        Fragment::Invalid(InvalidFragment {
            text: decl.text.to_string(),
            position,
            reason,
        })
    };

    if decl.text.is_empty() {
        return invalid(decl.offset, "empty declaration".into());
    }

    let tokens = match lexer::tokenize(decl.text, decl.offset) {
        Ok(tokens) => tokens,
        Err(Error::SchemaSyntax { position, message }) => return invalid(position, message),
        Err(other) => return invalid(decl.offset, other.to_string()),
    };

    let mut p = Parser::new(&tokens);
    let shape = match p.peek_nth(1).kind {
        TokenKind::Colon => parse_edge(&mut p).map(Fragment::Edge),
        _ => parse_node(&mut p).map(Fragment::Node),
    };

    match shape.and_then(|f| p.expect(TokenKind::Eof).map(|_| f)) {
        Ok(fragment) => fragment,
        Err(Reject { position, reason }) => invalid(position, reason),
    }
}

/// Why the parser stopped.
struct Reject {
    position: usize,
    reason: String,
}

type Parse<T> = std::result::Result<T, Reject>;

/// Parser state — wraps a token slice with cursor.
struct Parser<'t> {
    tokens: &'t [Token],
    pos: usize,
}

impl<'t> Parser<'t> {
    fn new(tokens: &'t [Token]) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> &'t Token {
        self.peek_nth(0)
    }

    fn peek_nth(&self, n: usize) -> &'t Token {
        &self.tokens[(self.pos + n).min(self.tokens.len() - 1)]
    }

    fn advance(&mut self) -> &'t Token {
        let tok = self.peek();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind) -> Parse<&'t Token> {
        if self.at(kind) {
            Ok(self.advance())
        } else {
            Err(self.reject(format!("expected {:?}, got {:?} '{}'", kind, self.peek().kind, self.peek().text)))
        }
    }

    fn expect_ident(&mut self) -> Parse<&'t Token> {
        self.expect(TokenKind::Identifier)
    }

    fn reject(&self, reason: String) -> Reject {
        Reject { position: self.peek().span.start, reason }
    }
}

/// `( Internal : Display { name TYPE, ... } )`
fn parse_node(p: &mut Parser) -> Parse<NodeFragment> {
    let open = p.expect(TokenKind::LParen)?;
    let internal = p.expect_ident()?;
    p.expect(TokenKind::Colon)?;
    let display = p.expect_ident()?;
    p.expect(TokenKind::LBrace)?;

    let mut properties = Vec::new();
    if !p.eat(TokenKind::RBrace) {
        loop {
            let name = p.expect_ident()?;
            let ty = p.expect_ident()?;
            properties.push(RawProperty {
                name: name.text.clone(),
                type_token: ty.text.clone(),
                position: name.span.start,
            });
            if p.eat(TokenKind::Comma) {
                continue;
            }
            p.expect(TokenKind::RBrace)?;
            break;
        }
    }
    p.expect(TokenKind::RParen)?;

    Ok(NodeFragment {
        internal_label: internal.text.clone(),
        display_label: display.text.clone(),
        properties,
        position: open.span.start,
    })
}

/// `( : Src ) - [ Internal : Display ] -> ( : Dst )`
fn parse_edge(p: &mut Parser) -> Parse<EdgeFragment> {
    let open = p.expect(TokenKind::LParen)?;
    p.expect(TokenKind::Colon)?;
    let source = p.expect_ident()?;
    p.expect(TokenKind::RParen)?;

    p.expect(TokenKind::Dash)?;
    p.expect(TokenKind::LBracket)?;
    let internal = p.expect_ident()?;
    p.expect(TokenKind::Colon)?;
    let display = p.expect_ident()?;
    p.expect(TokenKind::RBracket)?;
    p.expect(TokenKind::Arrow)?;

    p.expect(TokenKind::LParen)?;
    p.expect(TokenKind::Colon)?;
    let target = p.expect_ident()?;
    p.expect(TokenKind::RParen)?;

    Ok(EdgeFragment {
        internal_label: internal.text.clone(),
        display_label: display.text.clone(),
        source_label: source.text.clone(),
        target_label: target.text.clone(),
        position: open.span.start,
    })
}
