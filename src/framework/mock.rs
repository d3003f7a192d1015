//! # Mock Peers
//!
//! Utilities for testing one actor with its neighbours replaced.
//!
//! A [`MockPeer`] stands in for an actor: it owns an inbox, records every message
//! that lands there, and can optionally answer each one on another mailbox. When
//! the actor under test drops its mailbox the peer's task ends, and
//! [`MockPeer::finish`] hands back everything it saw, in arrival order.
//! [`MockPeer::wait_for`] lets a test pause until the actor under test has got
//! far enough, without sleeping.
//!
//! # Example
//! ```ignore
//! // A barber that instantly returns every visit it is given.
//! let (to_shop, mut shop_inbox) = framework::channel("shop", 1);
//! let barber = MockPeer::responding("barber", 8, Some(to_shop), |visit: &Visit| Some(visit.clone()));
//!
//! // ... run the shop against barber.mailbox() ...
//!
//! let seen = barber.finish().await;
//! ```

use crate::framework::{channel, Mailbox};
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// A recording stand-in for an actor.
pub struct MockPeer<M> {
    mailbox: Mailbox<M>,
    seen: watch::Receiver<usize>,
    handle: JoinHandle<Vec<M>>,
}

impl<M: Send + 'static> MockPeer<M> {
    /// A peer that records messages and never answers.
    pub fn new(actor: &'static str, capacity: usize) -> Self {
        Self::responding::<(), _>(actor, capacity, None, |_: &M| None)
    }

    /// A peer that records messages and sends `respond(&message)` to `reply_to`
    /// whenever it returns `Some`. With `reply_to` set to `None` it only records.
    ///
    /// Once `reply_to` is closed the peer keeps recording but stops answering.
    pub fn responding<R, F>(
        actor: &'static str,
        capacity: usize,
        reply_to: Option<Mailbox<R>>,
        mut respond: F,
    ) -> Self
    where
        R: Send + 'static,
        F: FnMut(&M) -> Option<R> + Send + 'static,
    {
        let (mailbox, mut inbox) = channel(actor, capacity);
        let (count, seen) = watch::channel(0);
        let mut reply_to = reply_to;
        let handle = tokio::spawn(async move {
            let mut recorded = Vec::new();
            while let Some(message) = inbox.recv().await {
                if let (Some(target), Some(reply)) = (reply_to.as_ref(), respond(&message)) {
                    if target.send(reply).await.is_err() {
                        reply_to = None;
                    }
                }
                recorded.push(message);
                count.send_replace(recorded.len());
            }
            recorded
        });
        Self { mailbox, seen, handle }
    }

    /// A mailbox that reaches this peer.
    pub fn mailbox(&self) -> Mailbox<M> {
        self.mailbox.clone()
    }

    /// Waits until at least `count` messages have been recorded.
    ///
    /// Returns early if the peer's task has ended.
    pub async fn wait_for(&self, count: usize) {
        let mut seen = self.seen.clone();
        let _ = seen.wait_for(|n| *n >= count).await;
    }

    /// Drops the peer's own mailbox, waits for every other sender to go away, and
    /// returns all recorded messages.
    ///
    /// # Panics
    ///
    /// Panics if the recording task panicked (which only a panicking responder
    /// can cause).
    pub async fn finish(self) -> Vec<M> {
        drop(self.mailbox);
        match self.handle.await {
            Ok(seen) => seen,
            Err(e) => panic!("mock peer task failed: {e}"),
        }
    }
}
