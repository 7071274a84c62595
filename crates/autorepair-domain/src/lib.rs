//! # Auto-repair Domain Layer
//!
//! Pure decision logic for keeping equipped gear repaired.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Domain Layer (This Crate)                     │
//! │  ┌─────────────────────────────────────────────────────────────┐│
//! │  │  model/   - Snapshots of host state & value objects         ││
//! │  │  service/ - Durability sensing, repair planning             ││
//! │  └─────────────────────────────────────────────────────────────┘│
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing here performs I/O or waits. The host is read by the use case
//! layer, which hands the snapshots to these services and acts on their
//! decisions.

pub mod model;
pub mod service;

// Re-export commonly used types
pub use model::{
    inventory::{Durability, InventorySlot, InventorySnapshot, ItemId},
    player::{PlayerState, ZoneId},
    position::Position,
    site::RepairSite,
    threshold::{DomainError, RepairThreshold},
};

pub use service::{
    durability::{DurabilitySensor, WornItem},
    repair_planner::{NpcStep, RepairPlanner, RepairState},
};
