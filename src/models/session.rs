use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Quality value for a session that has not been rated yet.
pub const QUALITY_UNRATED: i32 = -1;

/// One sleep session record.
///
/// A session is "open" (still being tracked) while `ended_at` equals
/// `started_at`; stopping the tracker moves `ended_at` forward, closing it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SleepSession {
    /// Store-assigned identifier, monotonic with creation order.
    /// `None` until the session has been inserted.
    pub id: Option<i64>,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
    pub quality: i32,
}

impl SleepSession {
    /// A fresh open session: `ended_at == started_at`, unrated.
    pub fn begin(started_at: DateTime<Utc>) -> Self {
        Self {
            id: None,
            started_at,
            ended_at: started_at,
            quality: QUALITY_UNRATED,
        }
    }

    pub fn is_open(&self) -> bool {
        self.ended_at == self.started_at
    }

    pub fn is_rated(&self) -> bool {
        self.quality != QUALITY_UNRATED
    }

    /// Zero while the session is still open.
    pub fn duration(&self) -> Duration {
        self.ended_at - self.started_at
    }
}
