mod error;
mod format;
mod models;
mod observe;
mod quality;
mod store;
mod tracker;

pub use error::{Error, Result};
pub use format::{PlainTextFormatter, SessionFormatter};
pub use models::{SleepSession, QUALITY_UNRATED};
pub use observe::StateCell;
pub use quality::QualityRecorder;
pub use store::{SleepStore, SqliteStore};
pub use tracker::SessionTracker;
