//! # Barber Actor
//!
//! The barber takes customers from the shop one at a time, in the order the shop
//! admitted them, spends a trim duration on each and hands them back marked
//! `Served`. The barber never turns anyone away.
//!
//! ## Shutdown Handshake
//!
//! When [`Visit::Closing`](crate::model::Visit::Closing) reaches the front of the
//! queue every admitted customer has already been trimmed. The barber logs its
//! tally, returns `Closing` to the shop as an acknowledgement, and then waits for
//! the shop to hang up. Anything still arriving after `Closing` is a
//! [`ProtocolViolation`](crate::framework::SimulationError::ProtocolViolation).

pub mod barber;

pub use barber::*;

use crate::framework::{channel, Actor, Mailbox};
use crate::model::{DelaySource, Visit};

/// Creates a Barber actor and the mailbox the shop uses to reach it.
///
/// `queue_capacity` must leave room for every admitted customer plus the closing
/// visit; see [`CapacityPolicy::barber_queue_capacity`](crate::model::CapacityPolicy::barber_queue_capacity).
pub fn new(queue_capacity: usize, service: impl DelaySource) -> (Barber, Mailbox<Visit>) {
    let (mailbox, inbox) = channel(Barber::NAME, queue_capacity.max(1));
    (Barber::new(inbox, Box::new(service)), mailbox)
}
