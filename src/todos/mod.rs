//! # Todo Resource
//!
//! Validation, controller and HTTP routes for the todo item resource.

pub mod controller;
pub mod errors;
pub mod model;
pub mod routes;
pub mod validator;

pub use controller::TodoController;
pub use errors::{ApiError, ApiResult, ErrorResponse};
pub use model::{NewTodo, Todo, TodoChanges, TodoId};
pub use routes::todo_routes;
pub use validator::{coerce_bool, parse_todo_id, Field, UpdatePlan, UpdatePolicy};
