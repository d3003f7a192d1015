//! Plain data that flows between the actors, plus the delay sources injected into them.

pub mod capacity;
pub mod customer;
pub mod delay;
pub mod report;

pub use capacity::*;
pub use customer::*;
pub use delay::*;
pub use report::*;
