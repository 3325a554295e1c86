//! Shared infrastructure for the agent bus services.

pub mod clock;

pub use clock::{Clock, MockClock, SystemClock};
