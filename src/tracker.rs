use std::future::Future;
use std::sync::Arc;

use chrono::Utc;
use log::info;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::error::{Error, Result};
use crate::format::SessionFormatter;
use crate::models::SleepSession;
use crate::observe::StateCell;
use crate::store::SleepStore;

/// State holder for the sleep-tracking screen.
///
/// Owns "the currently tracked session": the most recent session whose end
/// time still equals its start time. All operations run their store access
/// off the caller's task and publish results into the observable cells only
/// after the persisted write completed. `shutdown` cancels the component's
/// scope; afterwards no cell is ever written again.
pub struct SessionTracker {
    store: Arc<dyn SleepStore>,
    formatter: Arc<dyn SessionFormatter>,
    current: StateCell<Option<SleepSession>>,
    is_tracking: StateCell<bool>,
    sessions: StateCell<Vec<SleepSession>>,
    has_records: StateCell<bool>,
    display_text: StateCell<String>,
    navigation: StateCell<Option<SleepSession>>,
    cancel: CancellationToken,
}

impl SessionTracker {
    pub fn new(store: Arc<dyn SleepStore>, formatter: Arc<dyn SessionFormatter>) -> Self {
        Self {
            store,
            formatter,
            current: StateCell::new(None),
            is_tracking: StateCell::new(false),
            sessions: StateCell::new(Vec::new()),
            has_records: StateCell::new(false),
            display_text: StateCell::new(String::new()),
            navigation: StateCell::new(None),
            cancel: CancellationToken::new(),
        }
    }

    /// Loads tonight's session and the full history. Call once after
    /// construction, before handing the tracker to the UI.
    pub async fn initialize(&self) -> Result<()> {
        self.guarded(async {
            let tonight = self.tonight().await?;
            self.set_current(tonight);
            self.refresh_history().await
        })
        .await
    }

    /// Persists a fresh open session, then re-runs the tonight lookup so the
    /// UI only sees the new session once the write has landed.
    ///
    /// Does not check whether a session is already open; calling this twice
    /// without stopping leaves two open-looking sessions in the store.
    pub async fn start_recording(&self) -> Result<()> {
        self.guarded(async {
            let session = SleepSession::begin(Utc::now());
            let id = self.store.insert_session(&session).await?;
            info!("Started sleep session {id}");

            let tonight = self.tonight().await?;
            self.set_current(tonight);
            self.refresh_history().await
        })
        .await
    }

    /// Closes the tracked session and publishes it on the navigation signal
    /// so the UI can move to the quality screen.
    ///
    /// Returns [`Error::NoOpenSession`] when nothing is being tracked.
    pub async fn stop_tracking(&self) -> Result<()> {
        self.guarded(async {
            let mut session = self.current.get().ok_or(Error::NoOpenSession)?;
            session.ended_at = Utc::now();
            self.store.update_session(&session).await?;
            info!(
                "Stopped sleep session {:?} after {}min",
                session.id,
                session.duration().num_minutes()
            );

            self.set_current(Some(session.clone()));
            self.navigation.set(Some(session));
            self.refresh_history().await
        })
        .await
    }

    /// Deletes every stored session and empties the tracked state.
    pub async fn clear_all(&self) -> Result<()> {
        self.guarded(async {
            self.store.delete_all_sessions().await?;
            info!("Cleared all sleep sessions");
            self.set_current(None);
            self.refresh_history().await
        })
        .await
    }

    /// Consumes the one-shot navigation signal.
    pub fn clear_navigation(&self) {
        if self.cancel.is_cancelled() {
            return;
        }
        self.navigation.set(None);
    }

    /// Tears the component down. In-flight operations abort before
    /// publishing; later calls return [`Error::Cancelled`].
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    pub fn current_session(&self) -> Option<SleepSession> {
        self.current.get()
    }

    pub fn is_tracking(&self) -> bool {
        self.is_tracking.get()
    }

    pub fn sessions(&self) -> Vec<SleepSession> {
        self.sessions.get()
    }

    pub fn has_records(&self) -> bool {
        self.has_records.get()
    }

    pub fn display_text(&self) -> String {
        self.display_text.get()
    }

    pub fn navigation(&self) -> Option<SleepSession> {
        self.navigation.get()
    }

    pub fn watch_current(&self) -> watch::Receiver<Option<SleepSession>> {
        self.current.subscribe()
    }

    pub fn watch_is_tracking(&self) -> watch::Receiver<bool> {
        self.is_tracking.subscribe()
    }

    pub fn watch_sessions(&self) -> watch::Receiver<Vec<SleepSession>> {
        self.sessions.subscribe()
    }

    pub fn watch_has_records(&self) -> watch::Receiver<bool> {
        self.has_records.subscribe()
    }

    pub fn watch_display_text(&self) -> watch::Receiver<String> {
        self.display_text.subscribe()
    }

    pub fn watch_navigation(&self) -> watch::Receiver<Option<SleepSession>> {
        self.navigation.subscribe()
    }

    /// Tonight's session: the latest record if it is still open, else none.
    /// Covers both restart cases, mid-session and after a completed one.
    async fn tonight(&self) -> Result<Option<SleepSession>> {
        let latest = self.store.latest_session().await?;
        Ok(latest.filter(SleepSession::is_open))
    }

    fn set_current(&self, session: Option<SleepSession>) {
        self.is_tracking.set(session.is_some());
        self.current.set(session);
    }

    async fn refresh_history(&self) -> Result<()> {
        let sessions = self.store.all_sessions().await?;
        self.has_records.set(!sessions.is_empty());
        self.display_text.set(self.formatter.format(&sessions));
        self.sessions.set(sessions);
        Ok(())
    }

    /// Races `work` against the component's cancellation scope. When the
    /// scope wins, `work` is dropped mid-await, so nothing downstream of a
    /// pending store call can publish.
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
