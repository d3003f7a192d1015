//! # Simulation Errors
//!
//! This module defines the error type shared by every actor and by the orchestrator.
//! Turning a customer away is *not* an error: that is the `Rejected` outcome. The
//! variants here are the fault classes that abort a run.

use crate::model::CustomerId;

/// Errors that can abort a simulation run.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum SimulationError {
    /// The configuration was rejected before any actor was spawned.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A peer dropped its end of a channel while the protocol still needed it.
    #[error("Channel to {actor} closed")]
    ChannelClosed { actor: &'static str },

    /// A message arrived that the shutdown handshake forbids.
    #[error("Protocol violation: {0}")]
    ProtocolViolation(String),

    /// A customer was given a second terminal outcome.
    #[error("Outcome already settled for {0}")]
    OutcomeAlreadySettled(CustomerId),

    /// An actor task panicked or was aborted.
    #[error("Actor {actor} failed: {reason}")]
    ActorPanicked { actor: &'static str, reason: String },
}
