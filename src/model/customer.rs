//! A customer and the messages that carry one between actors.
//!
//! A [`Customer`] is created by the world, moved along the pipeline
//! (world → shop → barber → shop → world), and settled exactly once on the way.
//! The end of the day is not a customer with a magic id: it is the
//! [`Visit::Closing`] variant travelling down the same channels.
use crate::framework::SimulationError;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for customers, assigned in arrival order from 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CustomerId(pub u32);

impl From<u32> for CustomerId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for CustomerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "customer_{}", self.0)
    }
}

/// Where a customer's visit ended up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Still in flight.
    #[default]
    Pending,
    /// Trimmed by the barber.
    Served,
    /// Turned away because every seat was taken.
    Rejected,
}

impl Outcome {
    pub fn is_settled(self) -> bool {
        !matches!(self, Outcome::Pending)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    id: CustomerId,
    outcome: Outcome,
}

impl Customer {
    /// Creates a pending customer.
    pub fn new(id: impl Into<CustomerId>) -> Self {
        Self {
            id: id.into(),
            outcome: Outcome::Pending,
        }
    }

    pub fn id(&self) -> CustomerId {
        self.id
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Moves the customer from `Pending` to a terminal outcome.
    ///
    /// # Errors
    /// - [`SimulationError::OutcomeAlreadySettled`] if an outcome was already recorded.
    /// - [`SimulationError::ProtocolViolation`] if `outcome` is `Pending`.
    pub fn settle(&mut self, outcome: Outcome) -> Result<(), SimulationError> {
        if !outcome.is_settled() {
            return Err(SimulationError::ProtocolViolation(format!(
                "{} cannot be settled as pending",
                self.id
            )));
        }
        if self.outcome.is_settled() {
            return Err(SimulationError::OutcomeAlreadySettled(self.id));
        }
        self.outcome = outcome;
        Ok(())
    }
}

/// A message on any of the simulation's channels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Visit {
    /// An ordinary customer, pending or settled depending on the leg.
    Customer(Customer),
    /// No more arrivals; shut down once the current work drains.
    Closing,
}

impl Visit {
    /// A fresh arrival with the given id.
    pub fn arrival(id: impl Into<CustomerId>) -> Self {
        Visit::Customer(Customer::new(id))
    }
}

impl From<Customer> for Visit {
    fn from(customer: Customer) -> Self {
        Visit::Customer(customer)
    }
}
