//! Validated configuration for a simulation run.
use crate::framework::SimulationError;
use crate::model::{CapacityPolicy, DelayRange, DEFAULT_CAPACITY_POLICY};
use serde::{Deserialize, Serialize};

/// Upper bound on waiting seats.
///
/// The barber's queue is sized from the seat count, and `tokio::sync::mpsc::channel`
/// panics above `usize::MAX >> 3` permits. Any bound below that would do; 2^20
/// stays clear of it on 32-bit targets too.
pub const MAX_SEATS: usize = 1 << 20;

/// The four knobs of a run, plus the capacity policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Customers the world sends in.
    pub customers: usize,
    /// Waiting seats in the shop.
    pub seats: usize,
    /// Spacing between arrivals.
    pub arrival_delay: DelayRange,
    /// Time the barber spends on each customer.
    pub service_duration: DelayRange,
    pub capacity_policy: CapacityPolicy,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            customers: 20,
            seats: 4,
            arrival_delay: DelayRange { min_ms: 1, max_ms: 3 },
            service_duration: DelayRange { min_ms: 1, max_ms: 7 },
            capacity_policy: DEFAULT_CAPACITY_POLICY,
        }
    }
}

impl SimulationConfig {
    pub fn new(customers: usize, seats: usize) -> Self {
        Self {
            customers,
            seats,
            ..Self::default()
        }
    }

    pub fn with_arrival_delay(mut self, range: DelayRange) -> Self {
        self.arrival_delay = range;
        self
    }

    pub fn with_service_duration(mut self, range: DelayRange) -> Self {
        self.service_duration = range;
        self
    }

    pub fn with_capacity_policy(mut self, policy: CapacityPolicy) -> Self {
        self.capacity_policy = policy;
        self
    }

    /// Customer count as the id space the world uses.
    pub fn customer_count(&self) -> Result<u32, SimulationError> {
        u32::try_from(self.customers).map_err(|_| {
            SimulationError::InvalidConfig(format!(
                "customers must be at most {}, got {}",
                u32::MAX,
                self.customers
            ))
        })
    }

    pub fn effective_capacity(&self) -> usize {
        self.capacity_policy.effective_capacity(self.seats)
    }

    pub fn barber_queue_capacity(&self) -> usize {
        self.capacity_policy.barber_queue_capacity(self.seats)
    }

    /// Checks everything that would otherwise surface mid-run.
    pub fn validate(&self) -> Result<(), SimulationError> {
        self.customer_count()?;
        if self.seats > MAX_SEATS {
            return Err(SimulationError::InvalidConfig(format!(
                "seats must be at most {MAX_SEATS}, got {}",
                self.seats
            )));
        }
        self.arrival_delay.validate()?;
        self.service_duration.validate()?;
        Ok(())
    }
}
