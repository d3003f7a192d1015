//! # World Actor
//!
//! The world is both ends of the pipeline. It sends customers into the shop at
//! intervals drawn from its arrival [`DelaySource`], followed by a single
//! `Closing` visit, and at the same time collects every customer the shop sends
//! back out, served or turned away.
//!
//! The two halves run concurrently inside the world's task. When `Closing` comes
//! back out of the shop, the world checks that every customer it let in has left
//! with a final outcome and hands its [`WorldReport`](crate::model::WorldReport)
//! to whoever is waiting on the run.

pub mod world;

pub use world::*;

use crate::framework::{channel, Actor, Mailbox};
use crate::model::{DelaySource, Visit};

/// Creates a World actor that will send `customers` arrivals, and the mailbox the
/// shop uses to return settled customers.
pub fn new(customers: u32, arrival: impl DelaySource) -> (World, Mailbox<Visit>) {
    let (mailbox, inbox) = channel(World::NAME, 1);
    (World::new(customers, inbox, Box::new(arrival)), mailbox)
}
