use tokio::sync::watch;

/// Push-based observable value holder.
///
/// Thin wrapper over a `tokio::sync::watch` channel: the owning component
/// writes through `set`, the UI layer either polls `get` or holds a
/// `subscribe`d receiver and re-renders on change. Writes succeed with zero
/// subscribers.
#[derive(Debug)]
pub struct StateCell<T> {
    tx: watch::Sender<T>,
}

impl<T: Clone> StateCell<T> {
    pub fn new(initial: T) -> Self {
        Self {
            tx: watch::Sender::new(initial),
        }
    }

    /// Snapshot of the current value.
    pub fn get(&self) -> T {
        self.tx.borrow().clone()
    }

    pub fn set(&self, value: T) {
        self.tx.send_replace(value);
    }

    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }
}

impl<T: Clone + Default> Default for StateCell<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_without_subscribers_does_not_fail() {
        let cell = StateCell::new(0u32);
        cell.set(7);
        assert_eq!(cell.get(), 7);
    }

    #[tokio::test]
    async fn subscriber_sees_updates() {
        let cell = StateCell::new(String::new());
        let mut rx = cell.subscribe();
        cell.set("updated".to_string());
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), "updated");
    }
}
