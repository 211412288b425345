//! Typed documents for the shared catalog collection.
//!
//! All three resource types live in one physical collection and are
//! discriminated by the `type` field. JSON field names are camelCase to match
//! the stored documents.

use crate::validation::{FieldKind, FieldRule};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Document type discriminator stored in the `type` field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocType {
    Actor,
    Movie,
    Genre,
}

impl DocType {
    pub fn as_str(self) -> &'static str {
        match self {
            DocType::Actor => "Actor",
            DocType::Movie => "Movie",
            DocType::Genre => "Genre",
        }
    }
}

impl fmt::Display for DocType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn actor_type() -> DocType {
    DocType::Actor
}

fn movie_type() -> DocType {
    DocType::Movie
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub actor_id: String,
    pub name: String,
    #[serde(default)]
    pub birth_year: Option<i64>,
    #[serde(default)]
    pub death_year: Option<i64>,
    #[serde(default)]
    pub profession: Vec<String>,
    /// Ids of related movie documents.
    #[serde(default)]
    pub movies: Vec<String>,
    #[serde(rename = "type", default = "actor_type")]
    pub doc_type: DocType,
    #[serde(default)]
    pub text_search: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub movie_id: String,
    pub title: String,
    #[serde(default)]
    pub year: Option<i64>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(rename = "type", default = "movie_type")]
    pub doc_type: DocType,
    #[serde(default)]
    pub text_search: String,
}

impl Actor {
    /// Field rules for create/update bodies, evaluated in order.
    pub fn rules() -> &'static [FieldRule] {
        const RULES: &[FieldRule] = &[
            FieldRule {
                field: "name",
                required: true,
                kind: FieldKind::Text { allow_empty: false },
            },
            FieldRule {
                field: "birthYear",
                required: false,
                kind: FieldKind::Integer { min: 1850, max: 2100 },
            },
            FieldRule {
                field: "deathYear",
                required: false,
                kind: FieldKind::Integer { min: 1850, max: 2100 },
            },
            FieldRule {
                field: "profession",
                required: false,
                kind: FieldKind::TextList,
            },
            FieldRule {
                field: "movies",
                required: false,
                kind: FieldKind::TextList,
            },
            FieldRule {
                field: "id",
                required: false,
                kind: FieldKind::Text { allow_empty: false },
            },
            FieldRule {
                field: "actorId",
                required: false,
                kind: FieldKind::Text { allow_empty: false },
            },
            FieldRule {
                field: "type",
                required: false,
                kind: FieldKind::Discriminator { expected: "Actor" },
            },
        ];
        RULES
    }

    /// Uphold the write-path invariants before an upsert: assign missing ids
    /// and keep `textSearch` lower-cased and name-prefixed so read-side
    /// substring filtering cannot miss matches.
    pub fn prepare(&mut self) {
        if self.id.trim().is_empty() {
            self.id = Uuid::new_v4().to_string();
        }
        if self.actor_id.trim().is_empty() {
            self.actor_id = self.id.clone();
        }
        self.doc_type = DocType::Actor;
        self.text_search = normalize_text_search(&self.name, &self.text_search, None);
    }
}

impl Movie {
    /// Field rules for create/update bodies, evaluated in order.
    pub fn rules() -> &'static [FieldRule] {
        const RULES: &[FieldRule] = &[
            FieldRule {
                field: "title",
                required: true,
                kind: FieldKind::Text { allow_empty: false },
            },
            FieldRule {
                field: "year",
                required: false,
                kind: FieldKind::Integer { min: 1874, max: 2100 },
            },
            FieldRule {
                field: "genres",
                required: false,
                kind: FieldKind::TextList,
            },
            FieldRule {
                field: "id",
                required: false,
                kind: FieldKind::Text { allow_empty: false },
            },
            FieldRule {
                field: "movieId",
                required: false,
                kind: FieldKind::Text { allow_empty: false },
            },
            FieldRule {
                field: "type",
                required: false,
                kind: FieldKind::Discriminator { expected: "Movie" },
            },
        ];
        RULES
    }

    /// Uphold the write-path invariants before an upsert. See [`Actor::prepare`].
    pub fn prepare(&mut self) {
        if self.id.trim().is_empty() {
            self.id = Uuid::new_v4().to_string();
        }
        if self.movie_id.trim().is_empty() {
            self.movie_id = self.id.clone();
        }
        self.doc_type = DocType::Movie;
        self.text_search = normalize_text_search(&self.title, &self.text_search, self.year);
    }
}

/// Lower-case a client-supplied `textSearch` and keep it only if it already
/// starts with the lower-cased lead field; otherwise rebuild it from the lead
/// (plus the year for movies). The prefix invariant is what keeps substring
/// search from matching documents of other types in the shared collection.
fn normalize_text_search(lead: &str, provided: &str, year: Option<i64>) -> String {
    let lead = lead.to_lowercase();
    let provided = provided.to_lowercase();
    if !lead.is_empty() && provided.starts_with(&lead) {
        return provided;
    }
    match year {
        Some(y) => format!("{lead} {y}"),
        None => lead,
    }
}
