use serde::Deserialize;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::{Input, Shape};

/// POST /user/signup body
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SignupInput {
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub password: String,
}

impl Input for SignupInput {
    const SHAPE: Shape = Shape::Signup;
}

/// POST /user/signin body
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SigninInput {
    pub email: String,
    pub password: String,
}

impl Input for SigninInput {
    const SHAPE: Shape = Shape::Signin;
}

/// POST /blog body
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePostInput {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub title: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub content: String,
}

impl Input for CreatePostInput {
    const SHAPE: Shape = Shape::CreatePost;
}

/// PUT /blog body
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdatePostInput {
    #[validate(custom(function = "validate_identifier"))]
    pub id: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub title: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub content: String,
}

impl UpdatePostInput {
    pub fn post_id(&self) -> Option<Uuid> {
        Uuid::parse_str(&self.id).ok()
    }
}

impl Input for UpdatePostInput {
    const SHAPE: Shape = Shape::UpdatePost;
}

fn validate_identifier(value: &str) -> Result<(), ValidationError> {
    match Uuid::parse_str(value) {
        Ok(_) => Ok(()),
        Err(_) => {
            let mut err = ValidationError::new("identifier");
            err.message = Some("must be a valid identifier".into());
            Err(err)
        }
    }
}
