use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// `stop_tracking` was called while no session was being tracked.
    #[error("no open session to stop")]
    NoOpenSession,

    /// The component was shut down before or during the operation.
    /// Guarantees that no observable state was published.
    #[error("component has been shut down")]
    Cancelled,

    /// The underlying store failed. Never swallowed; lookups that find
    /// nothing are `Ok(None)`, not a store failure.
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}
