use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use super::client::{LeaderboardClient, LeaderboardEntry};
use crate::error::LeaderboardError;

/// Result of a background leaderboard call
#[derive(Debug)]
pub enum ReplyKind {
    Submitted(Result<(), LeaderboardError>),
    Fetched(Result<Vec<LeaderboardEntry>, LeaderboardError>),
}

/// A finished call, tagged with the game generation that issued it
#[derive(Debug)]
pub struct LeaderboardReply {
    pub generation: u64,
    pub kind: ReplyKind,
}

/// Runs leaderboard calls off the UI task
///
/// Calls go through `spawn_blocking`; results come back on the channel
/// returned by `new`. Callers drop replies whose generation is stale.
pub struct LeaderboardTasks {
    client: Option<Arc<LeaderboardClient>>,
    replies: mpsc::UnboundedSender<LeaderboardReply>,
    in_flight: Vec<JoinHandle<()>>,
}

impl LeaderboardTasks {
    /// `client` is `None` when the leaderboard is disabled
    pub fn new(
        client: Option<LeaderboardClient>,
    ) -> (Self, mpsc::UnboundedReceiver<LeaderboardReply>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let tasks = Self {
            client: client.map(Arc::new),
            replies: tx,
            in_flight: Vec::new(),
        };
        (tasks, rx)
    }

    pub fn is_enabled(&self) -> bool {
        self.client.is_some()
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.iter().filter(|h| !h.is_finished()).count()
    }

    pub fn spawn_submit(&mut self, generation: u64, name: String, score: u32) -> bool {
        self.spawn(generation, move |client| {
            ReplyKind::Submitted(client.submit(&name, score))
        })
    }

    pub fn spawn_fetch(&mut self, generation: u64) -> bool {
        self.spawn(generation, |client| ReplyKind::Fetched(client.fetch()))
    }

    /// Abort everything still queued; running requests finish but their
    /// replies are stale by then
    pub fn cancel_all(&mut self) {
        for handle in self.in_flight.drain(..) {
            handle.abort();
        }
    }

    fn spawn<F>(&mut self, generation: u64, call: F) -> bool
    where
        F: FnOnce(&LeaderboardClient) -> ReplyKind + Send + 'static,
    {
        let Some(client) = self.client.clone() else {
            return false;
        };

        self.in_flight.retain(|h| !h.is_finished());

        let replies = self.replies.clone();
        let handle = tokio::task::spawn_blocking(move || {
            let kind = call(&*client);
            // Receiver gone means the app is shutting down
            if replies.send(LeaderboardReply { generation, kind }).is_err() {
                debug!(generation, "leaderboard reply dropped");
            }
        });
        self.in_flight.push(handle);
        true
    }
}

impl Drop for LeaderboardTasks {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_disabled_spawns_nothing() {
        let (mut tasks, mut rx) = LeaderboardTasks::new(None);

        assert!(!tasks.is_enabled());
        assert!(!tasks.spawn_fetch(1));
        assert!(!tasks.spawn_submit(1, "Alice".to_string(), 3));
        assert_eq!(tasks.in_flight(), 0);

        drop(tasks);
        assert!(rx.recv().await.is_none());
    }
}
