pub mod session;

pub use session::{SleepSession, QUALITY_UNRATED};
