//! SQLite-backed [`TodoStore`].

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use rusqlite::types::ToSql;
use rusqlite::{params, Connection, OptionalExtension};
use tokio::sync::Mutex;

use super::{StoreError, StoreResult, TodoStore};
use crate::todos::model::{NewTodo, Todo, TodoChanges, TodoId};

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS todos (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        completed INTEGER NOT NULL DEFAULT 0
    );
";

/// Todo store over a single SQLite connection
#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open (or create) a database file. `:memory:` yields a private in-memory database.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "opening sqlite store");
        Self::bootstrap(Connection::open(path)?)
    }

    /// Open a fresh in-memory database
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::bootstrap(Connection::open_in_memory()?)
    }

    fn bootstrap(conn: Connection) -> StoreResult<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }
}

/// Build the SET clause and bound values for a partial update.
/// The id is always the last parameter.
fn update_statement<'a>(
    changes: &'a TodoChanges,
    id: &'a i64,
) -> Option<(String, Vec<&'a dyn ToSql>)> {
    let mut columns = Vec::new();
    let mut values: Vec<&dyn ToSql> = Vec::new();

    if let Some(title) = &changes.title {
        columns.push("title = ?");
        values.push(title);
    }
    if let Some(completed) = &changes.completed {
        columns.push("completed = ?");
        values.push(completed);
    }
    if columns.is_empty() {
        return None;
    }

    values.push(id);
    let sql = format!("UPDATE todos SET {} WHERE id = ?", columns.join(", "));
    Some((sql, values))
}

fn row_to_todo(row: &rusqlite::Row<'_>) -> rusqlite::Result<Todo> {
    Ok(Todo {
        id: TodoId(row.get(0)?),
        title: row.get(1)?,
        completed: row.get(2)?,
    })
}

#[async_trait]
impl TodoStore for SqliteStore {
    async fn insert(&self, todo: &NewTodo) -> StoreResult<TodoId> {
        let conn = self.conn.lock().await;
        conn.execute("INSERT INTO todos (title) VALUES (?1)", params![todo.title])?;
        Ok(TodoId(conn.last_insert_rowid()))
    }

    async fn select_all(&self) -> StoreResult<Vec<Todo>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare("SELECT id, title, completed FROM todos ORDER BY id ASC")?;
        let rows = stmt.query_map([], row_to_todo)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    async fn select_one(&self, id: TodoId) -> StoreResult<Option<Todo>> {
        let conn = self.conn.lock().await;
        let todo = conn
            .query_row(
                "SELECT id, title, completed FROM todos WHERE id = ?1",
                params![id.get()],
                row_to_todo,
            )
            .optional()?;
        Ok(todo)
    }

    async fn update(&self, id: TodoId, changes: &TodoChanges) -> StoreResult<usize> {
        let conn = self.conn.lock().await;
        let raw_id = id.get();
        let (sql, values) = update_statement(changes, &raw_id).ok_or(StoreError::EmptyUpdate)?;
        Ok(conn.execute(&sql, values.as_slice())?)
    }

    async fn delete(&self, id: TodoId) -> StoreResult<usize> {
        let conn = self.conn.lock().await;
        Ok(conn.execute("DELETE FROM todos WHERE id = ?1", params![id.get()])?)
    }
}
