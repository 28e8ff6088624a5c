use anyhow::Result;
use async_trait::async_trait;

use crate::models::SleepSession;

mod migrations;
mod sqlite;

pub use sqlite::SqliteStore;

/// Persistence contract consumed by the trackers.
///
/// Lookups that find nothing return `Ok(None)` / an empty list; an `Err`
/// always means the store itself failed.
#[async_trait]
pub trait SleepStore: Send + Sync {
    /// All sessions, newest first.
    async fn all_sessions(&self) -> Result<Vec<SleepSession>>;

    /// The most recently created session, if any.
    async fn latest_session(&self) -> Result<Option<SleepSession>>;

    async fn session_by_id(&self, id: i64) -> Result<Option<SleepSession>>;

    /// Inserts a new session (its `id` must be `None`) and returns the
    /// store-assigned identifier.
    async fn insert_session(&self, session: &SleepSession) -> Result<i64>;

    /// Updates an existing session in place; `session.id` must be set.
    async fn update_session(&self, session: &SleepSession) -> Result<()>;

    async fn delete_all_sessions(&self) -> Result<()>;
}
