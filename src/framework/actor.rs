//! # Actor Runtime
//!
//! This module defines the [`Actor`] trait and the [`spawn`] helper that runs an actor
//! in its own Tokio task. Every actor owns its state outright and talks to its
//! neighbours only through [`Mailbox`](crate::framework::Mailbox)es, so no state is
//! ever behind a lock.
//!
//! The usage pattern mirrors the rest of the crate:
//!
//! 1. **Create**: an actor module's `new()` returns the actor plus the mailbox(es)
//!    others use to reach it. No actor needs a neighbour to be constructed.
//! 2. **Wire**: once every actor exists, its outbound mailboxes are passed as the
//!    actor's [`Context`](Actor::Context). This late binding is what lets the shop
//!    and the barber point at each other without a construction cycle.
//! 3. **Run**: [`spawn`] starts the loop and returns an [`ActorHandle`] whose
//!    [`join`](ActorHandle::join) yields the actor's final report.

use crate::framework::SimulationError;
use async_trait::async_trait;
use std::fmt::Debug;
use tokio::task::JoinHandle;
use tracing::{info, warn, Instrument};

/// A long-running process that consumes its inbox and ends with a report.
#[async_trait]
pub trait Actor: Send + Sized + 'static {
    /// Short name used in spans and error messages (e.g. `"shop"`).
    const NAME: &'static str;

    /// Outbound mailboxes (and anything else) injected when the actor starts.
    type Context: Send + 'static;

    /// The tally the actor hands back once its loop has ended.
    type Report: Send + Debug + 'static;

    /// Runs the message loop to completion.
    async fn run(self, ctx: Self::Context) -> Result<Self::Report, SimulationError>;
}

/// Handle to a spawned actor task.
#[derive(Debug)]
pub struct ActorHandle<R> {
    name: &'static str,
    handle: JoinHandle<Result<R, SimulationError>>,
}

impl<R> ActorHandle<R> {
    /// Waits for the actor to finish and returns its report.
    ///
    /// A panicked or aborted task becomes [`SimulationError::ActorPanicked`].
    pub async fn join(self) -> Result<R, SimulationError> {
        match self.handle.await {
            Ok(result) => result,
            Err(e) => Err(SimulationError::ActorPanicked {
                actor: self.name,
                reason: e.to_string(),
            }),
        }
    }
}

/// Spawns `actor` on the current Tokio runtime inside an `actor` span.
pub fn spawn<A: Actor>(actor: A, ctx: A::Context) -> ActorHandle<A::Report> {
    let span = tracing::info_span!("actor", name = A::NAME);
    let handle = tokio::spawn(
        async move {
            info!("Actor started");
            let result = actor.run(ctx).await;
            match &result {
                Ok(report) => info!(?report, "Shutdown"),
                Err(e) => warn!(error = %e, "Actor failed"),
            }
            result
        }
        .instrument(span),
    );
    ActorHandle {
        name: A::NAME,
        handle,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Countdown(u32);

    #[async_trait]
    impl Actor for Countdown {
        const NAME: &'static str = "countdown";
        type Context = u32;
        type Report = u32;

        async fn run(self, step: u32) -> Result<u32, SimulationError> {
            let mut ticks = 0;
            for _ in 0..self.0 {
                tokio::task::yield_now().await;
                ticks += step;
            }
            Ok(ticks)
        }
    }

    struct Doomed;

    #[async_trait]
    impl Actor for Doomed {
        const NAME: &'static str = "doomed";
        type Context = ();
        type Report = ();

        async fn run(self, _ctx: ()) -> Result<(), SimulationError> {
            panic!("boom");
        }
    }

    #[tokio::test]
    async fn test_join_returns_the_report() {
        let handle = spawn(Countdown(3), 2);
        assert_eq!(handle.join().await.unwrap(), 6);
    }

    #[tokio::test]
    async fn test_panicking_actor_becomes_an_error() {
        let err = spawn(Doomed, ()).join().await.unwrap_err();
        assert!(matches!(err, SimulationError::ActorPanicked { actor: "doomed", .. }));
    }
}
