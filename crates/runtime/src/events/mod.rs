//! Event bus for battle lifecycle notifications.

mod bus;

pub use bus::{EventBus, SessionEvent};
