//! # Auto-repair Use Case Layer
//!
//! Application-specific flow of the repair agent.
//! This layer reads the game host through the [`GameHost`] port, hands the
//! snapshots to the domain services and carries out their decisions.
//!
//! ```text
//! LoopSupervisor ──► DurabilityCheck ──► (worn) RepairStrategy
//!                                             │
//!                                             ├─► MovementController
//!                                             └─► GameHost::execute
//! ```

pub mod error;
pub mod movement;
pub mod port;
pub mod sensor;
pub mod settings;
pub mod strategy;
pub mod supervisor;

#[cfg(test)]
mod test_support;

pub use autorepair_domain;

pub use error::RepairError;
pub use movement::{MoveOutcome, MovementController};
pub use port::host::{GameCommand, GameHost, HostError};
pub use sensor::{DurabilityCheck, WornReport};
pub use settings::{ConsumableSpec, MovementSettings, RepairSettings};
pub use strategy::{RepairOutcome, RepairStrategy};
pub use supervisor::{CycleReport, LoopStatus, LoopSupervisor};
