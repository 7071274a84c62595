//! Repair Planner - Which repair path applies right now
//!
//! The planner is a small state machine over two snapshots:
//!
//! ```text
//!            zone != repair zone
//!   ┌──────────────────────────────► NotInRepairZone      (teleport)
//!   │
//!   │  in zone, consumable count > 0
//!   ├──────────────────────────────► InZoneWithConsumable (use item)
//!   │
//!   │  in zone, no consumable
//!   └──────────────────────────────► InZoneNeedsNpc       (npc_step)
//! ```
//!
//! For the NPC path, `npc_step` decides between walking over and
//! engaging (target, then interact unless the character is busy).

use crate::model::inventory::{InventorySnapshot, ItemId};
use crate::model::player::PlayerState;
use crate::model::site::RepairSite;

/// Where the character stands relative to the repair options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepairState {
    NotInRepairZone,
    InZoneWithConsumable { count: u32 },
    InZoneNeedsNpc,
}

/// Next step of the NPC repair procedure
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NpcStep {
    /// Too far away; walk to the NPC first
    Approach { distance: f32 },
    /// Close enough to talk
    Engage {
        /// Current target is not the NPC
        retarget: bool,
        /// False while the character is mid-interaction
        interact: bool,
    },
}

#[derive(Debug, Clone)]
pub struct RepairPlanner {
    site: RepairSite,
    consumable: ItemId,
    arrival_radius: f32,
}

impl RepairPlanner {
    pub fn new(site: RepairSite, consumable: ItemId, arrival_radius: f32) -> Self {
        Self {
            site,
            consumable,
            arrival_radius,
        }
    }

    pub fn site(&self) -> &RepairSite {
        &self.site
    }

    /// Classify the current situation
    pub fn assess(&self, player: &PlayerState, inventory: &InventorySnapshot) -> RepairState {
        if !player.in_zone(self.site.zone) {
            return RepairState::NotInRepairZone;
        }

        match inventory.item_count(self.consumable) {
            0 => RepairState::InZoneNeedsNpc,
            count => RepairState::InZoneWithConsumable { count },
        }
    }

    pub fn npc_step(&self, player: &PlayerState) -> NpcStep {
        let distance = player.distance_to(&self.site.npc_position);
        if distance > self.arrival_radius {
            return NpcStep::Approach { distance };
        }

        NpcStep::Engage {
            retarget: !player.is_targeting(&self.site.npc_name),
            interact: !player.occupied,
        }
    }
}
