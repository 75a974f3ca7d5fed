//! Input shapes accepted by the API and the checks applied to them.
//!
//! Validation is a pure function of the raw JSON body: it never consults the
//! data store. Structural problems (a missing field, a number where a string
//! belongs) are caught before deserialization so every offending field gets
//! its own [`Issue`]; content rules (email format, non-empty text) come from
//! the `validator` derives on the input structs.

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use validator::{Validate, ValidationErrors};

pub mod inputs;

pub use inputs::{CreatePostInput, SigninInput, SignupInput, UpdatePostInput};

/// Named payload shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Signup,
    Signin,
    CreatePost,
    UpdatePost,
}

impl Shape {
    pub fn name(self) -> &'static str {
        match self {
            Shape::Signup => "signup",
            Shape::Signin => "signin",
            Shape::CreatePost => "createPost",
            Shape::UpdatePost => "updatePost",
        }
    }

    /// Message returned to the client when a payload fails this shape.
    pub fn rejection_message(self) -> &'static str {
        match self {
            Shape::Signup => "Invalid input for signing up",
            Shape::Signin => "Invalid input for signing in",
            Shape::CreatePost => "Invalid input for creating a post",
            Shape::UpdatePost => "Invalid input for updating a post",
        }
    }

    /// Fields that must be present as JSON strings.
    pub fn required_fields(self) -> &'static [&'static str] {
        match self {
            Shape::Signup | Shape::Signin => &["email", "password"],
            Shape::CreatePost => &["title", "content"],
            Shape::UpdatePost => &["id", "title", "content"],
        }
    }
}

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    pub field: String,
    pub message: String,
}

impl Issue {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// An input type bound to its shape.
pub trait Input: DeserializeOwned + Validate {
    const SHAPE: Shape;
}

/// Validate `raw` against `T`'s shape, returning the typed input or every
/// issue found.
pub fn validate<T: Input>(raw: &Value) -> Result<T, Vec<Issue>> {
    let Some(object) = raw.as_object() else {
        return Err(vec![Issue::new("$", "expected a JSON object")]);
    };

    let mut issues = Vec::new();
    for field in T::SHAPE.required_fields() {
        match object.get(*field) {
            None | Some(Value::Null) => issues.push(Issue::new(*field, "is required")),
            Some(Value::String(_)) => {}
            Some(_) => issues.push(Issue::new(*field, "must be a string")),
        }
    }
    if !issues.is_empty() {
        return Err(issues);
    }

    let input: T = serde_json::from_value(raw.clone())
        .map_err(|e| vec![Issue::new("$", e.to_string())])?;

    input.validate().map_err(issues_from)?;
    Ok(input)
}

fn issues_from(errors: ValidationErrors) -> Vec<Issue> {
    let mut issues: Vec<Issue> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                Issue::new(field.to_string(), message)
            })
        })
        .collect();
    issues.sort_by(|a, b| a.field.cmp(&b.field));
    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(issues: &[Issue]) -> Vec<&str> {
        issues.iter().map(|i| i.field.as_str()).collect()
    }

    #[test]
    fn accepts_valid_signup() {
        let input: SignupInput =
            validate(&json!({"email": "ada@example.com", "password": "hunter2"})).unwrap();
        assert_eq!(input.email, "ada@example.com");
    }

    #[test]
    fn rejects_bad_email_on_signup() {
        let issues =
            validate::<SignupInput>(&json!({"email": "not-an-email", "password": "x"})).unwrap_err();
        assert_eq!(fields(&issues), vec!["email"]);
    }

    #[test]
    fn rejects_empty_password_on_signup() {
        let issues =
            validate::<SignupInput>(&json!({"email": "ada@example.com", "password": ""}))
                .unwrap_err();
        assert_eq!(fields(&issues), vec!["password"]);
    }

    #[test]
    fn signin_does_not_check_email_format() {
        let input: SigninInput = validate(&json!({"email": "ada", "password": "pw"})).unwrap();
        assert_eq!(input.email, "ada");
    }

    #[test]
    fn reports_every_missing_or_mistyped_field() {
        let issues = validate::<UpdatePostInput>(&json!({"title": 42})).unwrap_err();
        assert_eq!(fields(&issues), vec!["id", "title", "content"]);
        assert_eq!(issues[1].message, "must be a string");
    }

    #[test]
    fn null_counts_as_missing() {
        let issues =
            validate::<CreatePostInput>(&json!({"title": null, "content": "body"})).unwrap_err();
        assert_eq!(issues, vec![Issue::new("title", "is required")]);
    }

    #[test]
    fn rejects_non_object_bodies() {
        let issues = validate::<SigninInput>(&json!(["email", "password"])).unwrap_err();
        assert_eq!(fields(&issues), vec!["$"]);
    }

    #[test]
    fn rejects_empty_post_text() {
        let issues = validate::<CreatePostInput>(&json!({"title": "", "content": ""})).unwrap_err();
        assert_eq!(fields(&issues), vec!["content", "title"]);
    }

    #[test]
    fn update_requires_identifier_format() {
        let issues = validate::<UpdatePostInput>(
            &json!({"id": "42", "title": "t", "content": "c"}),
        )
        .unwrap_err();
        assert_eq!(fields(&issues), vec!["id"]);

        let id = uuid::Uuid::new_v4();
        let input: UpdatePostInput =
            validate(&json!({"id": id.to_string(), "title": "t", "content": "c"})).unwrap();
        assert_eq!(input.post_id(), Some(id));
    }

    #[test]
    fn ignores_unknown_fields() {
        let input: CreatePostInput =
            validate(&json!({"title": "t", "content": "c", "published": true})).unwrap();
        assert_eq!(input.title, "t");
    }
}
