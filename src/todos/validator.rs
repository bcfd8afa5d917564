//! # Input Validation
//!
//! Normalizes path and body input before anything reaches the store.
//!
//! Request bodies are loosely typed JSON. Each recognized field is
//! classified as absent, present-but-invalid, or present-and-valid, and the
//! update path decides what to write from that classification alone.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::errors::{ApiError, ApiResult};
use super::model::{NewTodo, TodoChanges, TodoId};

// ==================
// Path Identifier
// ==================

/// Parse a path segment into an id.
///
/// Accepts only the canonical decimal form of a positive integer: no sign,
/// no leading zeros, no fraction, no surrounding characters.
pub fn parse_todo_id(raw: &str) -> ApiResult<TodoId> {
    let id: i64 = raw.parse().map_err(|_| ApiError::InvalidIdentifier)?;
    if id.to_string() != raw {
        return Err(ApiError::InvalidIdentifier);
    }
    TodoId::new(id).ok_or(ApiError::InvalidIdentifier)
}

// ==================
// Boolean Coercion
// ==================

/// Map a loosely typed value onto a boolean.
///
/// Returns `None` for anything outside the recognized encodings; callers
/// treat that as "not provided", never as an error.
pub fn coerce_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        },
        Value::Number(n) => match n.as_f64() {
            Some(v) if v == 1.0 => Some(true),
            Some(v) if v == 0.0 => Some(false),
            _ => None,
        },
        _ => None,
    }
}

// ==================
// Body Fields
// ==================

/// Classification of one body field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field<T> {
    /// Key missing or `null`
    Absent,
    /// Key present with a value of the wrong shape
    Invalid,
    /// Key present with a usable value
    Present(T),
}

impl<T> Field<T> {
    /// Look up `key` in a JSON object and classify it with `convert`
    fn extract(body: &Value, key: &str, convert: impl FnOnce(&Value) -> Option<T>) -> Self {
        match body.get(key) {
            None | Some(Value::Null) => Field::Absent,
            Some(value) => convert(value).map_or(Field::Invalid, Field::Present),
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Field::Absent)
    }
}

fn as_string(value: &Value) -> Option<String> {
    value.as_str().map(str::to_owned)
}

/// Creation request body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTodoBody {
    pub title: Field<String>,
}

impl CreateTodoBody {
    /// Classify a raw JSON body. Non-object bodies have every field absent.
    pub fn from_json(body: &Value) -> Self {
        Self {
            title: Field::extract(body, "title", as_string),
        }
    }

    /// Require a title that is non-empty once trimmed. The stored title
    /// keeps its original whitespace.
    pub fn validate(self) -> ApiResult<NewTodo> {
        match self.title {
            Field::Present(title) if !title.trim().is_empty() => Ok(NewTodo { title }),
            _ => Err(ApiError::MissingOrInvalidTitle),
        }
    }
}

/// How partial updates treat present-but-invalid fields
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdatePolicy {
    /// Ignore unrecognized values; any string title is accepted
    #[default]
    Lenient,
    /// Reject unrecognized `completed` values and empty titles
    Strict,
}

/// Outcome of validating an update body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdatePlan {
    /// Write these columns
    Write(TodoChanges),
    /// Fields were named but none resolved; nothing to write
    Unchanged,
}

/// Partial-update request body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTodoBody {
    pub title: Field<String>,
    pub completed: Field<bool>,
}

impl UpdateTodoBody {
    /// Classify a raw JSON body. Non-object bodies have every field absent.
    pub fn from_json(body: &Value) -> Self {
        Self {
            title: Field::extract(body, "title", as_string),
            completed: Field::extract(body, "completed", coerce_bool),
        }
    }

    /// Resolve the body into the minimal set of columns to write.
    ///
    /// A body naming neither field is rejected. Under the lenient policy a
    /// body whose named fields are all unrecognized resolves to
    /// [`UpdatePlan::Unchanged`].
    pub fn plan(self, policy: UpdatePolicy) -> ApiResult<UpdatePlan> {
        if self.title.is_absent() && self.completed.is_absent() {
            return Err(ApiError::NoFieldsToUpdate);
        }

        let mut changes = TodoChanges::default();

        match self.title {
            Field::Present(title) if policy == UpdatePolicy::Strict && title.trim().is_empty() => {
                return Err(ApiError::InvalidTitle);
            }
            Field::Present(title) => changes.title = Some(title),
            Field::Invalid if policy == UpdatePolicy::Strict => {
                return Err(ApiError::InvalidTitle);
            }
            Field::Invalid | Field::Absent => {}
        }

        match self.completed {
            Field::Present(completed) => changes.completed = Some(completed),
            Field::Invalid if policy == UpdatePolicy::Strict => {
                return Err(ApiError::InvalidCompleted);
            }
            Field::Invalid | Field::Absent => {}
        }

        if changes.is_empty() {
            Ok(UpdatePlan::Unchanged)
        } else {
            Ok(UpdatePlan::Write(changes))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_canonical_ids() {
        assert_eq!(parse_todo_id("1").unwrap().get(), 1);
        assert_eq!(parse_todo_id("42").unwrap().get(), 42);
        assert_eq!(
            parse_todo_id("9223372036854775807").unwrap().get(),
            i64::MAX
        );
    }

    #[test]
    fn test_reject_malformed_ids() {
        let malformed = [
            "", "abc", "-1", "0", "00", "01", "1.5", "1.0", "1abc", "+1", " 1", "1 ", "1e3",
            "0x10", "9223372036854775808",
        ];
        for raw in malformed {
            assert_eq!(
                parse_todo_id(raw),
                Err(ApiError::InvalidIdentifier),
                "expected {raw:?} to be rejected"
            );
        }
    }

    #[test]
    fn test_coerce_recognized_values() {
        assert_eq!(coerce_bool(&json!(true)), Some(true));
        assert_eq!(coerce_bool(&json!(false)), Some(false));
        assert_eq!(coerce_bool(&json!("true")), Some(true));
        assert_eq!(coerce_bool(&json!(" TRUE ")), Some(true));
        assert_eq!(coerce_bool(&json!("False")), Some(false));
        assert_eq!(coerce_bool(&json!("1")), Some(true));
        assert_eq!(coerce_bool(&json!("0")), Some(false));
        assert_eq!(coerce_bool(&json!(1)), Some(true));
        assert_eq!(coerce_bool(&json!(0)), Some(false));
        assert_eq!(coerce_bool(&json!(1.0)), Some(true));
    }

    #[test]
    fn test_coerce_unrecognized_values() {
        let unrecognized = [
            json!(null),
            json!("yes"),
            json!("invalid"),
            json!(""),
            json!(2),
            json!(-1),
            json!(0.5),
            json!([]),
            json!({}),
            json!([true]),
        ];
        for value in unrecognized {
            assert_eq!(coerce_bool(&value), None, "expected {value} to be unrecognized");
        }
    }

    #[test]
    fn test_field_classification() {
        let body = json!({"title": "x", "completed": "maybe"});
        let parsed = UpdateTodoBody::from_json(&body);
        assert_eq!(parsed.title, Field::Present("x".to_string()));
        assert_eq!(parsed.completed, Field::Invalid);

        let body = json!({"title": null});
        let parsed = UpdateTodoBody::from_json(&body);
        assert_eq!(parsed.title, Field::Absent);
        assert_eq!(parsed.completed, Field::Absent);

        let parsed = UpdateTodoBody::from_json(&json!(["title"]));
        assert_eq!(parsed.title, Field::Absent);
    }

    #[test]
    fn test_create_validation() {
        let todo = CreateTodoBody::from_json(&json!({"title": "  spaced  "}))
            .validate()
            .unwrap();
        assert_eq!(todo.title, "  spaced  ");

        for body in [
            json!({}),
            json!({"completed": false}),
            json!({"title": ""}),
            json!({"title": "   "}),
            json!({"title": 123}),
            json!({"title": null}),
            json!("title"),
        ] {
            assert_eq!(
                CreateTodoBody::from_json(&body).validate(),
                Err(ApiError::MissingOrInvalidTitle)
            );
        }
    }

    #[test]
    fn test_plan_writes_only_resolved_fields() {
        let plan = UpdateTodoBody::from_json(&json!({"completed": true}))
            .plan(UpdatePolicy::Lenient)
            .unwrap();
        assert_eq!(
            plan,
            UpdatePlan::Write(TodoChanges {
                title: None,
                completed: Some(true)
            })
        );

        let plan = UpdateTodoBody::from_json(&json!({"title": "B", "completed": "nope"}))
            .plan(UpdatePolicy::Lenient)
            .unwrap();
        assert_eq!(
            plan,
            UpdatePlan::Write(TodoChanges {
                title: Some("B".to_string()),
                completed: None
            })
        );
    }

    #[test]
    fn test_plan_empty_body() {
        for body in [json!({}), json!({"other": 1}), json!({"completed": null})] {
            assert_eq!(
                UpdateTodoBody::from_json(&body).plan(UpdatePolicy::Lenient),
                Err(ApiError::NoFieldsToUpdate)
            );
        }
    }

    #[test]
    fn test_plan_lenient_ignores_unrecognized() {
        let plan = UpdateTodoBody::from_json(&json!({"completed": "invalid"}))
            .plan(UpdatePolicy::Lenient)
            .unwrap();
        assert_eq!(plan, UpdatePlan::Unchanged);

        let plan = UpdateTodoBody::from_json(&json!({"title": ""}))
            .plan(UpdatePolicy::Lenient)
            .unwrap();
        assert_eq!(
            plan,
            UpdatePlan::Write(TodoChanges {
                title: Some(String::new()),
                completed: None
            })
        );
    }

    #[test]
    fn test_plan_strict_rejects_unrecognized() {
        assert_eq!(
            UpdateTodoBody::from_json(&json!({"completed": "invalid"})).plan(UpdatePolicy::Strict),
            Err(ApiError::InvalidCompleted)
        );
        assert_eq!(
            UpdateTodoBody::from_json(&json!({"title": "  "})).plan(UpdatePolicy::Strict),
            Err(ApiError::InvalidTitle)
        );
        assert_eq!(
            UpdateTodoBody::from_json(&json!({"title": 5, "completed": true}))
                .plan(UpdatePolicy::Strict),
            Err(ApiError::InvalidTitle)
        );
    }
}
