//! Seat-capacity policy for the shop.
//!
//! The classic formulation admits a customer while `seats_filled <= seats`, which lets
//! `seats + 1` customers be inside at once (the one in the chair is still counted).
//! Both readings are kept as an explicit policy rather than a silent choice.
use serde::{Deserialize, Serialize};

/// How many customers the shop holds for a given number of waiting seats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CapacityPolicy {
    /// At most `seats` customers inside, the one being trimmed included.
    Strict,
    /// At most `seats + 1` customers inside: every seat plus the barber's chair.
    Permissive,
}

/// The policy used when none is configured.
pub const DEFAULT_CAPACITY_POLICY: CapacityPolicy = CapacityPolicy::Permissive;

impl Default for CapacityPolicy {
    fn default() -> Self {
        DEFAULT_CAPACITY_POLICY
    }
}

impl CapacityPolicy {
    /// Maximum number of admitted customers not yet returned by the barber.
    pub fn effective_capacity(self, seats: usize) -> usize {
        match self {
            CapacityPolicy::Strict => seats,
            CapacityPolicy::Permissive => seats.saturating_add(1),
        }
    }

    /// Whether one more customer fits when `seats_filled` are already inside.
    pub fn admits(self, seats_filled: usize, seats: usize) -> bool {
        seats_filled < self.effective_capacity(seats)
    }

    /// Buffer size of the shop → barber channel.
    ///
    /// Every admitted customer may still be queued when the closing visit is sent,
    /// so one slot beyond the effective capacity is reserved for it. The shop
    /// therefore never blocks on the barber.
    pub fn barber_queue_capacity(self, seats: usize) -> usize {
        self.effective_capacity(seats).saturating_add(1)
    }
}
