use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};

/// Background refresh tasks, at most one per game.
#[derive(Debug, Default)]
pub struct PollRegistry {
    pollers: HashMap<String, JoinHandle<()>>,
}

impl PollRegistry {
    /// Run `action` right away and then every `every`. Any poller already
    /// running for `game_id` is aborted first, along with its in-flight
    /// action.
    pub fn start<F, Fut>(&mut self, game_id: &str, every: Duration, mut action: F)
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.stop(game_id);

        let mut ticks = interval_at(Instant::now(), every);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let handle = tokio::spawn(async move {
            loop {
                ticks.tick().await;
                action().await;
            }
        });
        self.pollers.insert(game_id.to_owned(), handle);
    }

    /// Returns whether a poller was running.
    pub fn stop(&mut self, game_id: &str) -> bool {
        match self.pollers.remove(game_id) {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }

    pub fn stop_all(&mut self) {
        for (_, handle) in self.pollers.drain() {
            handle.abort();
        }
    }

    pub fn is_polling(&self, game_id: &str) -> bool {
        self.pollers.contains_key(game_id)
    }

    pub fn len(&self) -> usize {
        self.pollers.len()
    }
}

impl Drop for PollRegistry {
    fn drop(&mut self) {
        self.stop_all();
    }
}
