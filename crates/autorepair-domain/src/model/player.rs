//! PlayerState - What the host tells us about the character
//!
//! Read-only. The probe accessors below are the only way the rest of the
//! agent inspects location and targeting.

use super::position::Position;

/// Identifier of a territory (zone) in the game world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ZoneId(u32);

impl ZoneId {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    pub const fn value(&self) -> u32 {
        self.0
    }
}

impl core::fmt::Display for ZoneId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Host-owned view of the local player
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerState {
    pub position: Position,
    pub zone: ZoneId,
    /// Name of the current target, if any
    pub target: Option<String>,
    /// Character is mid-interaction (talking to an NPC, in a menu, ...)
    pub occupied: bool,
}

impl PlayerState {
    pub fn new(position: Position, zone: ZoneId) -> Self {
        Self {
            position,
            zone,
            target: None,
            occupied: false,
        }
    }

    /// Builder: set target
    pub fn with_target(mut self, name: impl Into<String>) -> Self {
        self.target = Some(name.into());
        self
    }

    /// Builder: set occupied
    pub fn with_occupied(mut self, occupied: bool) -> Self {
        self.occupied = occupied;
        self
    }

    // ========== Probe ==========

    pub fn in_zone(&self, zone: ZoneId) -> bool {
        self.zone == zone
    }

    pub fn has_target(&self) -> bool {
        self.target.is_some()
    }

    pub fn target_name(&self) -> Option<&str> {
        self.target.as_deref()
    }

    /// True when the current target is exactly `name`
    pub fn is_targeting(&self, name: &str) -> bool {
        self.target_name() == Some(name)
    }

    pub fn distance_to(&self, point: &Position) -> f32 {
        self.position.distance_to(point)
    }
}
