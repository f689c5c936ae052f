//! The `shutdown` module ends a tracking session: it waits for an operating
//! system signal, unsubscribes, disconnects and tells the main flow it may exit.

pub mod coordinator;
pub mod signal;

pub use coordinator::{DISCONNECT_TIMEOUT, ShutdownCoordinator, ShutdownState};
pub use signal::termination_signal;
