use std::future::Future;
use std::sync::Arc;

use log::{info, warn};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::error::{Error, Result};
use crate::observe::StateCell;
use crate::store::SleepStore;

/// State holder for the quality-rating screen, bound to one session id for
/// its whole lifetime.
pub struct QualityRecorder {
    store: Arc<dyn SleepStore>,
    session_id: i64,
    navigate_back: StateCell<bool>,
    cancel: CancellationToken,
}

impl QualityRecorder {
    pub fn new(store: Arc<dyn SleepStore>, session_id: i64) -> Self {
        Self {
            store,
            session_id,
            navigate_back: StateCell::new(false),
            cancel: CancellationToken::new(),
        }
    }

    pub fn session_id(&self) -> i64 {
        self.session_id
    }

    /// Rates the bound session and signals the UI to navigate back.
    ///
    /// A missing session skips the persist step but still raises the signal,
    /// which the navigation flow relies on. Store failures propagate without
    /// signaling.
    pub async fn update_quality(&self, rating: i32) -> Result<()> {
        self.guarded(async {
            match self.store.session_by_id(self.session_id).await? {
                Some(mut session) => {
                    session.quality = rating;
                    self.store.update_session(&session).await?;
                    info!("Rated sleep session {} as {rating}", self.session_id);
                }
                None => {
                    warn!(
                        "No sleep session {} to rate, skipping persist",
                        self.session_id
                    );
                }
            }

            self.navigate_back.set(true);
            Ok(())
        })
        .await
    }

    /// Consumes the one-shot signal. Resets to an explicit `false`, not an
    /// absent value; the tracker screen expects that convention.
    pub fn clear_navigation(&self) {
        if self.cancel.is_cancelled() {
            return;
        }
        self.navigate_back.set(false);
    }

    /// Same teardown contract as the tracker: cancels the scope, aborts
    /// in-flight work before it publishes.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    pub fn navigate_back(&self) -> bool {
        self.navigate_back.get()
    }

    pub fn watch_navigate_back(&self) -> watch::Receiver<bool> {
        self.navigate_back.subscribe()
    }

    async fn guarded<T>(&self, work: impl Future<Output = Result<T>>) -> Result<T> {
        if self.cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }

        // Biased so that a shutdown arriving together with a store reply
        // always wins; otherwise one last publish could slip out.
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(Error::Cancelled),
            result = work => result,
        }
    }
}
