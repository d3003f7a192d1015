//! # Simulation Lifecycle & Orchestration
//!
//! Individual actors are simple; wiring them together is where the care goes. This
//! module is the conductor for one run.
//!
//! **Key Responsibilities:**
//! 1. **Configuration** - [`SimulationConfig`] holds the four run parameters and the
//!    capacity policy, and rejects bad values before anything is spawned
//! 2. **Actor Creation & Wiring** - [`BarberShopSystem::start`] creates the channels,
//!    sizes the barber's queue so `Closing` always fits, and injects each actor's
//!    outbound mailboxes
//! 3. **Termination** - [`BarberShopSystem::run_to_completion`] waits for the world
//!    to see `Closing` come back, then collects every actor's report
//! 4. **Observability Setup** - [`setup_tracing`]
//!
//! ## Shutdown
//!
//! There is no out-of-band stop. The day ends by `Closing` cascading
//! world → shop → barber → shop → world:
//!
//! ```text
//! world ──Closing──▶ shop ──Closing──▶ barber
//!                     ▲                  │ (after the last trim)
//! world ◀──Closing─── shop ◀──Closing────┘
//! ```
//!
//! Each actor drops its outbound mailboxes when its loop returns, which is how the
//! next actor downstream learns that nothing more is coming.

pub mod config;
pub mod shop_system;
pub mod tracing;

pub use self::config::*;
pub use self::shop_system::*;
pub use self::tracing::*;
