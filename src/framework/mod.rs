//! Actor plumbing shared by the barber, the shop and the world.
//!
//! # Main Components
//!
//! - [`Actor`] - Trait every simulated process implements
//! - [`spawn`] / [`ActorHandle`] - Run an actor in its own Tokio task and collect its report
//! - [`Mailbox`] / [`Inbox`] - Named, bounded channel halves
//! - [`SimulationError`] - Errors that abort a run
//!
//! # Testing
//!
//! See [`mock`] for a recording stand-in that replaces an actor's neighbours.

pub mod actor;
pub mod error;
pub mod mailbox;
pub mod mock;

pub use actor::{spawn, Actor, ActorHandle};
pub use error::SimulationError;
pub use mailbox::{channel, Inbox, Mailbox};
