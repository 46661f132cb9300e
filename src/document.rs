//! Pre-parsed operation documents and deterministic printing.
//!
//! Every operation the SDK exposes is backed by one immutable
//! [`OperationDocument`] living in a `static`. The printed wire text is
//! computed at most once per document for the lifetime of the process and
//! handed out as a `&'static str` thereafter.

use std::sync::OnceLock;

/// The kind of GraphQL operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Query,
    Mutation,
}

impl OperationKind {
    /// Returns the keyword used in the printed document.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Mutation => "mutation",
        }
    }
}

/// A `$name: Type` variable declaration in an operation header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariableDefinition {
    pub name: &'static str,
    pub ty: &'static str,
}

/// A selection-set node.
///
/// Generated operations only ever forward variables into field arguments,
/// so arguments are `(argument, variable)` name pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub arguments: &'static [(&'static str, &'static str)],
    pub selections: &'static [Field],
}

impl Field {
    /// A scalar field with no arguments and no sub-selection.
    pub const fn leaf(name: &'static str) -> Self {
        Self {
            name,
            arguments: &[],
            selections: &[],
        }
    }

    /// A field with arguments and a sub-selection.
    pub const fn new(
        name: &'static str,
        arguments: &'static [(&'static str, &'static str)],
        selections: &'static [Field],
    ) -> Self {
        Self {
            name,
            arguments,
            selections,
        }
    }
}

/// An immutable parsed operation document.
///
/// Constructed once in a `static` per operation and never mutated. The
/// printed form is memoized in the document itself, so repeated
/// [`to_document_string`](Self::to_document_string) calls return the same
/// allocation.
#[derive(Debug)]
pub struct OperationDocument {
    kind: OperationKind,
    name: &'static str,
    variables: &'static [VariableDefinition],
    selections: &'static [Field],
    printed: OnceLock<String>,
}

impl OperationDocument {
    pub const fn new(
        kind: OperationKind,
        name: &'static str,
        variables: &'static [VariableDefinition],
        selections: &'static [Field],
    ) -> Self {
        Self {
            kind,
            name,
            variables,
            selections,
            printed: OnceLock::new(),
        }
    }

    /// The operation name, as sent to the wrapper and the server.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The operation kind.
    pub const fn kind(&self) -> OperationKind {
        self.kind
    }

    /// Returns the printed wire text, serializing it on first use.
    pub fn to_document_string(&'static self) -> &'static str {
        self.printed.get_or_init(|| self.print())
    }

    /// Deterministic serialization into wire-format query text.
    fn print(&self) -> String {
        let mut out = String::new();
        out.push_str(self.kind.as_str());
        out.push(' ');
        out.push_str(self.name);
        if !self.variables.is_empty() {
            out.push('(');
            for (i, var) in self.variables.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                out.push('$');
                out.push_str(var.name);
                out.push_str(": ");
                out.push_str(var.ty);
            }
            out.push(')');
        }
        out.push_str(" {\n");
        for field in self.selections {
            print_field(&mut out, field, 1);
        }
        out.push('}');
        out
    }
}

const INDENT_SIZE: usize = 2;

fn print_field(out: &mut String, field: &Field, indent: usize) {
    for _ in 0..indent * INDENT_SIZE {
        out.push(' ');
    }
    out.push_str(field.name);
    if !field.arguments.is_empty() {
        out.push('(');
        for (i, (argument, variable)) in field.arguments.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push_str(argument);
            out.push_str(": $");
            out.push_str(variable);
        }
        out.push(')');
    }
    if field.selections.is_empty() {
        out.push('\n');
    } else {
        out.push_str(" {\n");
        for child in field.selections {
            print_field(out, child, indent + 1);
        }
        for _ in 0..indent * INDENT_SIZE {
            out.push(' ');
        }
        out.push_str("}\n");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static PING: OperationDocument = OperationDocument::new(
        OperationKind::Query,
        "ping",
        &[VariableDefinition {
            name: "id",
            ty: "String!",
        }],
        &[Field::new(
            "ping",
            &[("id", "id")],
            &[Field::leaf("pong")],
        )],
    );

    #[test]
    fn test_print_format() {
        assert_eq!(
            PING.to_document_string(),
            "query ping($id: String!) {\n  ping(id: $id) {\n    pong\n  }\n}"
        );
    }

    #[test]
    fn test_printed_text_is_memoized() {
        let first = PING.to_document_string();
        let second = PING.to_document_string();
        assert!(std::ptr::eq(first, second));
    }

    #[test]
    fn test_operation_kind_keyword() {
        assert_eq!(OperationKind::Query.as_str(), "query");
        assert_eq!(OperationKind::Mutation.as_str(), "mutation");
    }
}
