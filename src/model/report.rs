//! End-of-day tallies returned by each actor and by the whole run.
use crate::model::{CustomerId, Outcome};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// What the barber did before knocking off.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarberReport {
    pub trimmed: usize,
    /// Customers in the order they sat in the chair.
    pub service_order: Vec<CustomerId>,
}

/// The shop's own books.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopReport {
    pub trimmed: usize,
    pub turned_away: usize,
    /// Highest number of admitted customers inside at once.
    pub peak_seats_filled: usize,
    /// The effective capacity the shop enforced.
    pub capacity: usize,
}

/// What the world saw come in and go out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldReport {
    pub served: usize,
    pub rejected: usize,
    /// Ids in the order they entered the shop.
    pub entered: Vec<CustomerId>,
    /// Final outcome per customer.
    pub outcomes: BTreeMap<CustomerId, Outcome>,
}

/// Everything a finished run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub world: WorldReport,
    pub shop: ShopReport,
    pub barber: BarberReport,
}

impl SimulationReport {
    pub fn served(&self) -> usize {
        self.world.served
    }

    pub fn rejected(&self) -> usize {
        self.world.rejected
    }

    pub fn total(&self) -> usize {
        self.world.served + self.world.rejected
    }
}
