//! # Shop Actor
//!
//! The shop is the bounded buffer between the world and the barber. It listens to
//! two inboxes at once (arrivals from the world, finished customers from the
//! barber) and reacts to whichever is ready first. All of its counters are plain
//! fields: only the shop's own task ever touches them.
//!
//! ## Admission
//!
//! Sends cannot be taken back, so the seat check happens *before* handing a
//! customer to the barber. The check is delegated to the configured
//! [`CapacityPolicy`]. A customer who does not fit is settled as `Rejected` and
//! goes straight back to the world without ever reaching the barber.
//!
//! ## Shutdown Handshake
//!
//! 1. `Closing` from the world is forwarded to the barber. It does not take a seat;
//!    the barber's queue always has a slot reserved for it.
//! 2. `Closing` back from the barber means the last trim is done. The shop logs
//!    its books, forwards `Closing` to the world and stops.

pub mod shop;

pub use shop::*;

use crate::framework::{channel, Actor, Mailbox};
use crate::model::{CapacityPolicy, Visit};

/// The two mailboxes that reach a shop.
#[derive(Debug, Clone)]
pub struct ShopMailboxes {
    /// Used by the world for arrivals and the closing visit.
    pub from_world: Mailbox<Visit>,
    /// Used by the barber for finished customers and its closing acknowledgement.
    pub from_barber: Mailbox<Visit>,
}

/// Creates a Shop actor and its mailboxes.
///
/// Both inbound channels hold a single visit, so every send into the shop is a
/// hand-off point.
pub fn new(seats: usize, policy: CapacityPolicy) -> (Shop, ShopMailboxes) {
    let (from_world, world_inbox) = channel(Shop::NAME, 1);
    let (from_barber, barber_inbox) = channel(Shop::NAME, 1);
    let shop = Shop::new(seats, policy, world_inbox, barber_inbox);
    (shop, ShopMailboxes { from_world, from_barber })
}
