//! Domain Services - Decisions over snapshots
//!
//! Services take host snapshots and return what should happen.
//! They never perform the action themselves.

pub mod durability;
pub mod repair_planner;
