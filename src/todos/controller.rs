//! # Todo Controller
//!
//! Maps validated input to store calls and decides the outcome of each of
//! the five operations. Existence on update and delete is taken from the
//! store's affected-row count, never from a separate lookup.

use std::sync::Arc;

use serde_json::Value;

use super::errors::{ApiError, ApiResult};
use super::model::{Todo, TodoId};
use super::validator::{CreateTodoBody, UpdatePlan, UpdatePolicy, UpdateTodoBody};
use crate::store::{StoreError, TodoStore};

/// Todo resource controller. Cheap to clone; clones share the store handle.
#[derive(Clone)]
pub struct TodoController {
    store: Arc<dyn TodoStore>,
    policy: UpdatePolicy,
}

fn store_failure(operation: &'static str) -> impl FnOnce(StoreError) -> ApiError {
    move |err| {
        tracing::error!(operation, error = %err, "store call failed");
        ApiError::Store(err.to_string())
    }
}

impl TodoController {
    pub fn new(store: Arc<dyn TodoStore>) -> Self {
        Self {
            store,
            policy: UpdatePolicy::default(),
        }
    }

    /// Set how partial updates treat unrecognized field values
    pub fn with_policy(mut self, policy: UpdatePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Create a todo from a raw body and return it as stored
    pub async fn create(&self, body: &Value) -> ApiResult<Todo> {
        let new_todo = CreateTodoBody::from_json(body).validate()?;

        let id = self
            .store
            .insert(&new_todo)
            .await
            .map_err(store_failure("insert"))?;
        tracing::info!(%id, "todo created");

        self.store
            .select_one(id)
            .await
            .map_err(store_failure("select_one"))?
            .ok_or_else(|| {
                tracing::error!(%id, "inserted todo missing on re-read");
                ApiError::Store(format!("created to-do item {id} could not be read back"))
            })
    }

    /// All todos in id order
    pub async fn list(&self) -> ApiResult<Vec<Todo>> {
        self.store
            .select_all()
            .await
            .map_err(store_failure("select_all"))
    }

    pub async fn get(&self, id: TodoId) -> ApiResult<Todo> {
        self.store
            .select_one(id)
            .await
            .map_err(store_failure("select_one"))?
            .ok_or(ApiError::NotFound)
    }

    /// Apply a partial update and return the row as re-read after the write
    pub async fn update(&self, id: TodoId, body: &Value) -> ApiResult<Todo> {
        let changes = match UpdateTodoBody::from_json(body).plan(self.policy)? {
            UpdatePlan::Write(changes) => changes,
            UpdatePlan::Unchanged => {
                tracing::debug!(%id, "update named no recognized values; nothing written");
                return self.get(id).await;
            }
        };

        let affected = self
            .store
            .update(id, &changes)
            .await
            .map_err(store_failure("update"))?;
        if affected == 0 {
            return Err(ApiError::NotFound);
        }
        tracing::info!(%id, "todo updated");

        // A concurrent delete between the write and this read surfaces as 404.
        self.get(id).await
    }

    pub async fn delete(&self, id: TodoId) -> ApiResult<()> {
        let affected = self
            .store
            .delete(id)
            .await
            .map_err(store_failure("delete"))?;
        if affected == 0 {
            return Err(ApiError::NotFound);
        }
        tracing::info!(%id, "todo deleted");
        Ok(())
    }
}
