//! Query specifications: resource-typed templates with named parameters.
//!
//! A [`QuerySpec`] is built fresh per request and never mutated afterwards.
//! It carries both the rendered query template (logged, and usable by
//! SQL-capable stores) and a canonical [`QueryShape`] that each backend
//! translates into its native filter syntax.

use crate::models::DocType;
use serde_json::Value;

/// Canonical query forms. Every filter- and id-based shape requires a
/// cross-partition execution because `id` is not the partition key.
#[derive(Clone, Debug, PartialEq)]
pub enum QueryShape {
    /// All documents of one type.
    ScanAll { doc_type: DocType },
    /// Documents of one type whose `textSearch` contains the bound `@title` term.
    TextContains { doc_type: DocType },
    /// The single document of one type with the bound `@id`.
    ById { doc_type: DocType },
    /// Bare values of one field across all documents of one type.
    ScanValues {
        doc_type: DocType,
        field: &'static str,
    },
    /// Any document at all; connectivity probe for the health check.
    AnyDocument,
}

/// A named, positional query parameter.
#[derive(Clone, Debug, PartialEq)]
pub struct QueryParam {
    pub name: &'static str,
    pub value: Value,
}

/// Immutable query specification: template text plus ordered named parameters.
#[derive(Clone, Debug)]
pub struct QuerySpec {
    pub query: String,
    pub parameters: Vec<QueryParam>,
    pub shape: QueryShape,
}

impl QuerySpec {
    /// List query for a resource. An absent, empty, or whitespace-only filter
    /// term always resolves to the scan-all form, never an empty-result
    /// filtered query. The term is lower-cased at bind time to match the
    /// lower-cased `textSearch` values written by the create/update path.
    pub fn list(doc_type: DocType, filter: Option<&str>) -> Self {
        match filter.map(str::trim).filter(|t| !t.is_empty()) {
            None => Self::scan_all(doc_type),
            Some(term) => Self::filtered(doc_type, term),
        }
    }

    pub fn scan_all(doc_type: DocType) -> Self {
        QuerySpec {
            query: format!("SELECT * FROM root WHERE root.type = '{doc_type}'"),
            parameters: Vec::new(),
            shape: QueryShape::ScanAll { doc_type },
        }
    }

    pub fn filtered(doc_type: DocType, term: &str) -> Self {
        QuerySpec {
            query: format!(
                "SELECT * FROM root WHERE root.type = '{doc_type}' \
                 AND CONTAINS(root.textSearch, @title)"
            ),
            parameters: vec![QueryParam {
                name: "@title",
                value: Value::String(term.to_lowercase()),
            }],
            shape: QueryShape::TextContains { doc_type },
        }
    }

    pub fn by_id(doc_type: DocType, id: &str) -> Self {
        QuerySpec {
            query: format!(
                "SELECT * FROM root WHERE root.id = @id AND root.type = '{doc_type}'"
            ),
            parameters: vec![QueryParam {
                name: "@id",
                value: Value::String(id.to_string()),
            }],
            shape: QueryShape::ById { doc_type },
        }
    }

    /// Projection of a single field as a bare value list (the genre listing).
    pub fn values(doc_type: DocType, field: &'static str) -> Self {
        QuerySpec {
            query: format!("SELECT VALUE root.{field} FROM root WHERE root.type = '{doc_type}'"),
            parameters: Vec::new(),
            shape: QueryShape::ScanValues { doc_type, field },
        }
    }

    /// Trivial scan with no predicate, used as a store liveness probe.
    pub fn any_document() -> Self {
        QuerySpec {
            query: "SELECT * FROM root".to_string(),
            parameters: Vec::new(),
            shape: QueryShape::AnyDocument,
        }
    }

    /// Value bound to a named parameter, if present.
    pub fn param(&self, name: &str) -> Option<&Value> {
        self.parameters.iter().find(|p| p.name == name).map(|p| &p.value)
    }
}
