//! Actor+Relay primitives
//!
//! - **[`Relay`]** carries events from browser callbacks and UI handlers
//! - **[`Actor`]** owns one piece of state and the loop that updates it
//!
//! Relays follow the `{source}_{event}_relay` naming pattern. State is read
//! through signals only.

pub mod actor;
pub mod relay;

pub use actor::Actor;
pub use relay::{Relay, relay};
