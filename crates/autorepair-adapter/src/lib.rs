//! # Auto-repair Adapter Layer
//!
//! Implementations of the [`GameHost`](autorepair_usecase::GameHost) port.
//!
//! ## Structure
//!
//! - `gateway/bridge` - Live binding over the host's scripting bridge (stdio)
//! - `gateway/simulated` - In-memory game world for dry runs and tests

pub mod gateway;

pub use gateway::bridge::{BridgeHost, BridgeSpec};
pub use gateway::simulated::{SimulatedHost, SimulatedWorld};
