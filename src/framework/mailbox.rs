//! # Typed Mailboxes
//!
//! Thin wrappers around a Tokio `mpsc` channel. The sending half ([`Mailbox`]) is
//! what other actors hold; the receiving half ([`Inbox`]) is owned by exactly one
//! actor. Both carry the name of the owning actor so a closed channel turns into a
//! [`SimulationError::ChannelClosed`] that says *who* went away.

use crate::framework::SimulationError;
use tokio::sync::mpsc;

/// Creates a bounded mailbox for `actor` with room for `capacity` in-flight messages.
///
/// Tokio does not offer rendezvous channels, so a capacity of 1 is the closest
/// thing to a synchronous hand-off: the second send waits for the first receive.
///
/// # Panics
///
/// Panics if `capacity` is zero, like [`mpsc::channel`].
pub fn channel<M>(actor: &'static str, capacity: usize) -> (Mailbox<M>, Inbox<M>) {
    let (sender, receiver) = mpsc::channel(capacity);
    (Mailbox { actor, sender }, Inbox { actor, receiver })
}

/// The sending side of an actor's inbox.
///
/// Cheap to clone; the actor's loop ends once every clone has been dropped.
#[derive(Debug)]
pub struct Mailbox<M> {
    actor: &'static str,
    sender: mpsc::Sender<M>,
}

impl<M> Clone for Mailbox<M> {
    fn clone(&self) -> Self {
        Self {
            actor: self.actor,
            sender: self.sender.clone(),
        }
    }
}

impl<M> Mailbox<M> {
    /// Sends `message`, waiting for buffer space if the channel is full.
    pub async fn send(&self, message: M) -> Result<(), SimulationError> {
        self.sender
            .send(message)
            .await
            .map_err(|_| SimulationError::ChannelClosed { actor: self.actor })
    }
}

/// The receiving side of an actor's inbox.
#[derive(Debug)]
pub struct Inbox<M> {
    actor: &'static str,
    receiver: mpsc::Receiver<M>,
}

impl<M> Inbox<M> {
    /// Waits for the next message. `None` means every [`Mailbox`] was dropped.
    pub async fn recv(&mut self) -> Option<M> {
        self.receiver.recv().await
    }

    /// Like [`recv`](Self::recv), but a closed channel is an error.
    pub async fn expect(&mut self) -> Result<M, SimulationError> {
        self.receiver
            .recv()
            .await
            .ok_or(SimulationError::ChannelClosed { actor: self.actor })
    }
}
