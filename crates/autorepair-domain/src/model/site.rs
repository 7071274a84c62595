//! RepairSite - Where repairs happen
//!
//! A fixed destination: the zone the agent teleports to, and the mender
//! NPC standing in it. Constant for the lifetime of the agent.

use super::player::ZoneId;
use super::position::Position;

#[derive(Debug, Clone, PartialEq)]
pub struct RepairSite {
    pub zone: ZoneId,
    /// Teleport destination name for the zone
    pub zone_name: String,
    pub npc_name: String,
    pub npc_position: Position,
}

impl RepairSite {
    pub fn new(
        zone: ZoneId,
        zone_name: impl Into<String>,
        npc_name: impl Into<String>,
        npc_position: Position,
    ) -> Self {
        Self {
            zone,
            zone_name: zone_name.into(),
            npc_name: npc_name.into(),
            npc_position,
        }
    }

    /// Alistair, Limsa Lominsa Lower Decks
    pub fn limsa_lower_decks() -> Self {
        Self::new(
            ZoneId::new(129),
            "Limsa Lominsa Lower Decks",
            "Alistair",
            Position::new(-246.87, 16.19, 49.83),
        )
    }
}

impl Default for RepairSite {
    fn default() -> Self {
        Self::limsa_lower_decks()
    }
}
