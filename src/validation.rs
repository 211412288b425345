//! Declarative field validation for mutating requests.
//!
//! Rules are evaluated against the raw JSON map before deserialization so a
//! single response can enumerate every problem at once. Validation runs to
//! completion and never short-circuits on the first violated rule; it also
//! never touches the store.

use serde_json::{Map, Value};

#[derive(Clone, Copy, Debug)]
pub enum FieldKind {
    Text { allow_empty: bool },
    Integer { min: i64, max: i64 },
    TextList,
    /// The `type` discriminator: when present it must name this resource.
    Discriminator { expected: &'static str },
}

#[derive(Clone, Copy, Debug)]
pub struct FieldRule {
    pub field: &'static str,
    pub required: bool,
    pub kind: FieldKind,
}

/// Evaluate every rule and collect all violation messages.
pub fn validate(body: &Map<String, Value>, rules: &[FieldRule]) -> Vec<String> {
    let mut violations = Vec::new();
    for rule in rules {
        let value = body.get(rule.field);
        match value {
            None | Some(Value::Null) => {
                if rule.required {
                    violations.push(format!("{} is required", rule.field));
                }
            }
            Some(v) => {
                if let Some(message) = check_field(rule, v) {
                    violations.push(message);
                }
            }
        }
    }
    violations
}

fn check_field(rule: &FieldRule, value: &Value) -> Option<String> {
    match rule.kind {
        FieldKind::Text { allow_empty } => match value.as_str() {
            None => Some(format!("{} must be a string", rule.field)),
            Some(s) if !allow_empty && s.trim().is_empty() => {
                Some(format!("{} must not be empty", rule.field))
            }
            Some(_) => None,
        },
        FieldKind::Integer { min, max } => match value.as_i64() {
            None => Some(format!("{} must be an integer", rule.field)),
            Some(n) if n < min || n > max => Some(format!(
                "{} must be between {} and {}",
                rule.field, min, max
            )),
            Some(_) => None,
        },
        FieldKind::TextList => match value.as_array() {
            Some(items) if items.iter().all(Value::is_string) => None,
            _ => Some(format!("{} must be a list of strings", rule.field)),
        },
        FieldKind::Discriminator { expected } => match value.as_str() {
            Some(s) if s == expected => None,
            _ => Some(format!("type must be '{expected}'")),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Actor, Movie};
    use serde_json::json;

    fn as_map(v: Value) -> Map<String, Value> {
        v.as_object().cloned().unwrap()
    }

    #[test]
    fn valid_movie_passes() {
        let body = as_map(json!({
            "title": "Dune",
            "year": 1984,
            "genres": ["Sci-Fi"],
            "type": "Movie"
        }));
        assert!(validate(&body, Movie::rules()).is_empty());
    }

    #[test]
    fn collects_every_violation() {
        // Four independently invalid fields must produce four messages.
        let body = as_map(json!({
            "title": "",
            "year": "nineteen-eighty-four",
            "genres": "Sci-Fi",
            "type": "Actor"
        }));
        let violations = validate(&body, Movie::rules());
        assert_eq!(violations.len(), 4);
        assert!(violations.contains(&"title must not be empty".to_string()));
        assert!(violations.contains(&"year must be an integer".to_string()));
        assert!(violations.contains(&"genres must be a list of strings".to_string()));
        assert!(violations.contains(&"type must be 'Movie'".to_string()));
    }

    #[test]
    fn missing_required_field_is_reported() {
        let violations = validate(&as_map(json!({})), Movie::rules());
        assert_eq!(violations, vec!["title is required".to_string()]);
    }

    #[test]
    fn optional_fields_may_be_absent_or_null() {
        let body = as_map(json!({
            "name": "Kyle MacLachlan",
            "deathYear": null
        }));
        assert!(validate(&body, Actor::rules()).is_empty());
    }

    #[test]
    fn integer_range_is_enforced() {
        let body = as_map(json!({ "name": "Someone", "birthYear": 1500 }));
        let violations = validate(&body, Actor::rules());
        assert_eq!(
            violations,
            vec!["birthYear must be between 1850 and 2100".to_string()]
        );
    }
}
