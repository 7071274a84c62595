//! Ports - What the agent needs from the outside world
//!
//! ```text
//! Use Case Layer        │  Adapter Layer
//! ──────────────────────┼────────────────────────
//! trait GameHost        │  BridgeHost (live game)
//!   fn inventory()      │  SimulatedHost
//!   fn execute()        │
//! ```

pub mod host;
