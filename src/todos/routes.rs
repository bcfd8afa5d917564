//! # Todo HTTP Routes
//!
//! - `POST   /todos`      - create
//! - `GET    /todos`      - list
//! - `GET    /todos/:id`  - fetch one
//! - `PUT    /todos/:id`  - partial update
//! - `DELETE /todos/:id`  - delete

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, FromRequestParts, Path, Request, State},
    http::{request::Parts, StatusCode},
    routing::get,
    Json, Router,
};
use serde_json::{Map, Value};

use super::controller::TodoController;
use super::errors::{ApiError, ApiResult};
use super::model::{Todo, TodoId};
use super::validator::parse_todo_id;

// ==================
// Extractors
// ==================

/// Validated `:id` path segment. Rejects before the body is read.
#[derive(Debug, Clone, Copy)]
pub struct ValidId(pub TodoId);

#[async_trait]
impl<S> FromRequestParts<S> for ValidId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::InvalidIdentifier)?;
        parse_todo_id(&raw).map(Self)
    }
}

/// JSON body whose rejections use the API error shape.
///
/// A body sent without a JSON content type reads as an empty object, so the
/// field validators decide the outcome.
#[derive(Debug, Clone)]
pub struct JsonBody(pub Value);

#[async_trait]
impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<Value>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(JsonRejection::MissingJsonContentType(_)) => Ok(Self(Value::Object(Map::new()))),
            Err(rejection) => Err(rejection.into()),
        }
    }
}

// ==================
// Todo Routes
// ==================

/// Create todo routes
pub fn todo_routes(controller: TodoController) -> Router {
    Router::new()
        .route("/todos", get(list_handler).post(create_handler))
        .route(
            "/todos/:id",
            get(get_handler).put(update_handler).delete(delete_handler),
        )
        .with_state(controller)
}

async fn create_handler(
    State(controller): State<TodoController>,
    JsonBody(body): JsonBody,
) -> ApiResult<(StatusCode, Json<Todo>)> {
    let todo = controller.create(&body).await?;
    Ok((StatusCode::CREATED, Json(todo)))
}

async fn list_handler(State(controller): State<TodoController>) -> ApiResult<Json<Vec<Todo>>> {
    Ok(Json(controller.list().await?))
}

async fn get_handler(
    State(controller): State<TodoController>,
    ValidId(id): ValidId,
) -> ApiResult<Json<Todo>> {
    Ok(Json(controller.get(id).await?))
}

async fn update_handler(
    State(controller): State<TodoController>,
    ValidId(id): ValidId,
    JsonBody(body): JsonBody,
) -> ApiResult<Json<Todo>> {
    Ok(Json(controller.update(id, &body).await?))
}

async fn delete_handler(
    State(controller): State<TodoController>,
    ValidId(id): ValidId,
) -> ApiResult<StatusCode> {
    controller.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Fallback for paths outside the todo surface
pub async fn unknown_route() -> ApiError {
    ApiError::UnknownRoute
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::header::CONTENT_TYPE;
    use tower::ServiceExt;

    use super::*;
    use crate::store::SqliteStore;

    fn app() -> Router {
        let store = SqliteStore::open_in_memory().unwrap();
        todo_routes(TodoController::new(Arc::new(store)))
    }

    #[tokio::test]
    async fn test_invalid_id_rejected_before_body() {
        let request = axum::http::Request::builder()
            .method("PUT")
            .uri("/todos/abc")
            .body(Body::from("not json"))
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    async fn error_message(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        body["error"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_non_json_create_reads_as_empty_body() {
        let bodies = [Body::from("title=x"), Body::empty()];
        for body in bodies {
            let request = axum::http::Request::builder()
                .method("POST")
                .uri("/todos")
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(body)
                .unwrap();

            let response = app().oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            assert_eq!(
                error_message(response).await,
                ApiError::MissingOrInvalidTitle.to_string()
            );
        }

        let request = axum::http::Request::builder()
            .method("POST")
            .uri("/todos")
            .body(Body::empty())
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_non_json_update_has_no_fields() {
        let router = app();
        let create = axum::http::Request::builder()
            .method("POST")
            .uri("/todos")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"title":"x"}"#))
            .unwrap();
        let response = router.clone().oneshot(create).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let request = axum::http::Request::builder()
            .method("PUT")
            .uri("/todos/1")
            .body(Body::empty())
            .unwrap();
        let response = router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            error_message(response).await,
            ApiError::NoFieldsToUpdate.to_string()
        );
    }

    #[tokio::test]
    async fn test_malformed_json() {
        let request = axum::http::Request::builder()
            .method("POST")
            .uri("/todos")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from("{\"title\":"))
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
