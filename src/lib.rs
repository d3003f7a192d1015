//! # Sleeping Barber
//!
//! > **The classic sleeping-barber problem, modelled with message-passing actors on Tokio.**
//!
//! A shop with a fixed number of waiting seats and one barber receives customers from
//! the outside world at random intervals. The barber trims one customer at a time;
//! customers who find every seat taken are turned away. There are no locks and no
//! shared counters: three actors own their state and talk only through channels.
//!
//! ## Module Tour
//!
//! ### 1. The Engine ([`framework`])
//! - **Role**: the [`Actor`](framework::Actor) trait, [`spawn`](framework::spawn),
//!   named bounded [`Mailbox`](framework::Mailbox)es, and
//!   [`SimulationError`](framework::SimulationError).
//!
//! ### 2. The Data ([`model`])
//! - **Role**: [`Customer`](model::Customer) and its [`Outcome`](model::Outcome), the
//!   [`Visit`](model::Visit) message (`Customer` or `Closing`), the
//!   [`CapacityPolicy`](model::CapacityPolicy), reports, and injectable
//!   [`DelaySource`](model::DelaySource)s.
//!
//! ### 3. The Actors ([`world_actor`], [`shop_actor`], [`barber_actor`])
//! - **Role**: world → shop → barber → shop → world, each in its own task.
//!
//! ### 4. The Orchestrator ([`lifecycle`])
//! - **Role**: configuration, wiring, running to completion, tracing setup.
//! - **Key items**: [`BarberShopSystem`](lifecycle::BarberShopSystem),
//!   [`run_simulation`](lifecycle::run_simulation).
//!
//! ## Quick Start
//!
//! ```bash
//! cargo run -- --customers 20 --seats 4 --arrival-delay 1..3 --service-duration 1..7
//! ```
//!
//! ```rust
//! use sleeping_barber::lifecycle::{run_simulation_with, SimulationConfig};
//! use sleeping_barber::model::FixedDelay;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = SimulationConfig::new(10, 3);
//!     let report = run_simulation_with(&config, FixedDelay::zero(), FixedDelay::zero())
//!         .await
//!         .unwrap();
//!     assert_eq!(report.served() + report.rejected(), 10);
//! }
//! ```

pub mod barber_actor;
pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod shop_actor;
pub mod world_actor;
