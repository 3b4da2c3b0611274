//! `rollcall-events` — live broadcast channel for attendance updates.
//!
//! Transport-agnostic pub/sub: the attendance service publishes, connected
//! observers (dashboards, kiosks) subscribe. Delivery is best-effort and
//! at-most-once; an observer that connects after a publish never sees it.

pub mod bus;
pub mod in_memory_bus;

pub use bus::{EventBus, Subscription};
pub use in_memory_bus::{InMemoryBusError, InMemoryEventBus};
