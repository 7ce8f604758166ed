//! Cypher script export — render generated instances as CREATE statements.
//!
//! ```text
//! // Nodes
//! CREATE (PersonType_0:Person {name: 'QWERTYUI', age: 412});
//! // Relationships
//! CREATE (PersonType_0)-[:knows]->(PersonType_1);
//! ```

use std::io::Write;

use crate::generate::Generated;
use crate::model::{EdgeInstance, NodeInstance, PropertyMap, Value};
use crate::schema::lexer::{self, TokenKind};
use crate::{Error, Result};

pub const NODES_HEADER: &str = "// Nodes";
pub const RELATIONSHIPS_HEADER: &str = "// Relationships";

/// A rendered script: node statements, then edge statements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Script {
    pub nodes: Vec<String>,
    pub edges: Vec<String>,
}

impl Script {
    /// All output lines, including the two section headers.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        std::iter::once(NODES_HEADER)
            .chain(self.nodes.iter().map(String::as_str))
            .chain(std::iter::once(RELATIONSHIPS_HEADER))
            .chain(self.edges.iter().map(String::as_str))
    }

    pub fn write_to(&self, writer: &mut dyn Write) -> Result<()> {
        for line in self.lines() {
            writeln!(writer, "{line}")?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// Render every generated instance, nodes first, each in generation order.
pub fn render(generated: &Generated<'_>) -> Script {
    Script {
        nodes: generated.nodes.iter().map(|n| node_statement(generated, n)).collect(),
        edges: generated.edges.iter().map(|e| edge_statement(generated, e)).collect(),
    }
}

/// `CREATE (Internal_N:Display {k: v, ...});`
pub fn node_statement(generated: &Generated<'_>, node: &NodeInstance) -> String {
    let node_type = generated.model.node_type(node.node_type);
    let var = node.variable(&node_type.internal_label);
    if node.properties.is_empty() {
        format!("CREATE ({var}:{});", node_type.display_label)
    } else {
        format!(
            "CREATE ({var}:{} {{{}}});",
            node_type.display_label,
            format_properties(&node.properties)
        )
    }
}

/// `CREATE (Src_N)-[:display]->(Dst_M);`
pub fn edge_statement(generated: &Generated<'_>, edge: &EdgeInstance) -> String {
    format!(
        "CREATE ({})-[:{}]->({});",
        generated.variable(edge.src),
        generated.edge_type(edge).display_label,
        generated.variable(edge.dst),
    )
}

/// Format a PropertyMap as Cypher property string (key: value, ...).
fn format_properties(props: &PropertyMap) -> String {
    props
        .iter()
        .map(|(key, value)| format!("{key}: {value}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Read back a rendered property block such as `{name: 'ABC', age: 7}`.
pub fn parse_property_block(block: &str) -> Result<PropertyMap> {
    let tokens = lexer::tokenize(block, 0)?;
    let err = |position: usize, message: &str| Error::SchemaSyntax {
        position,
        message: format!("property block: {message}"),
    };

    let mut props = PropertyMap::new();
    let mut it = tokens.iter().peekable();

    match it.next() {
        Some(t) if t.kind == TokenKind::LBrace => {}
        Some(t) => return Err(err(t.span.start, "expected '{'")),
        None => return Err(err(0, "empty input")),
    }

    if it.peek().is_some_and(|t| t.kind == TokenKind::RBrace) {
        it.next();
    } else {
        loop {
            let key = match it.next() {
                Some(t) if t.kind == TokenKind::Identifier => t.text.clone(),
                Some(t) => return Err(err(t.span.start, "expected property name")),
                None => return Err(err(block.len(), "unexpected end")),
            };
            match it.next() {
                Some(t) if t.kind == TokenKind::Colon => {}
                Some(t) => return Err(err(t.span.start, "expected ':'")),
                None => return Err(err(block.len(), "unexpected end")),
            }
            let value = match it.next() {
                Some(t) if t.kind == TokenKind::StringLiteral => Value::String(t.text.clone()),
                Some(t) if t.kind == TokenKind::Integer => t.text
                    .parse::<i64>()
                    .map(Value::Int)
                    .map_err(|e| err(t.span.start, &e.to_string()))?,
                Some(t) if t.kind == TokenKind::Dash => match it.next() {
                    Some(n) if n.kind == TokenKind::Integer => format!("-{}", n.text)
                        .parse::<i64>()
                        .map(Value::Int)
                        .map_err(|e| err(t.span.start, &e.to_string()))?,
                    Some(n) => return Err(err(n.span.start, "expected integer after '-'")),
                    None => return Err(err(block.len(), "unexpected end")),
                },
                Some(t) => return Err(err(t.span.start, "expected string or integer literal")),
                None => return Err(err(block.len(), "unexpected end")),
            };
            props.insert(key, value);

            match it.next() {
                Some(t) if t.kind == TokenKind::Comma => continue,
                Some(t) if t.kind == TokenKind::RBrace => break,
                Some(t) => return Err(err(t.span.start, "expected ',' or '}'")),
                None => return Err(err(block.len(), "unexpected end")),
            }
        }
    }

    match it.next() {
        Some(t) if t.kind == TokenKind::Eof => Ok(props),
        Some(t) => Err(err(t.span.start, "trailing input")),
        None => Ok(props),
    }
}
