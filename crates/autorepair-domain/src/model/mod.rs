//! Domain Models - The vocabulary of the repair agent
//!
//! Everything the host owns reaches the domain as a read-only snapshot.
//! None of these types outlive a single polling cycle, except the
//! constant configuration values (threshold, repair site).

pub mod inventory;
pub mod player;
pub mod position;
pub mod site;
pub mod threshold;
