//! Outbound Adapters - GameHost implementations
//!
//! These implement the host port from autorepair-usecase.

pub mod bridge;
pub mod simulated;
mod wire;
