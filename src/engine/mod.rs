//! Timer engine module for the Pomodoro Timer.
//!
//! - `timer`: the state machine, countdown task and transition rule
//! - `store`: observable containers the engine emits through

pub mod store;
pub mod timer;

pub use store::{Signal, StateStore, Subscription, SubscriptionId};
pub use timer::{next_session, TimerEngine, TICK_INTERVAL};
