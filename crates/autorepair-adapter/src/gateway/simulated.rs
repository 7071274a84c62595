//! SimulatedHost - An in-memory game world
//!
//! Behaves like a small slice of the game: gear wears down a little every
//! time the inventory is read, teleports move the character between known
//! zones, an active path advances one step per position poll, and the
//! mender restores every piece of gear when interacted with in range.
//!
//! Thread-safe implementation using RwLock.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use tracing::debug;

use autorepair_domain::{
    Durability, InventorySlot, InventorySnapshot, ItemId, PlayerState, Position, RepairSite, ZoneId,
};
use autorepair_usecase::{GameCommand, GameHost, HostError};

/// A named NPC standing somewhere in the world
#[derive(Debug, Clone, PartialEq)]
pub struct Npc {
    pub name: String,
    pub zone: ZoneId,
    pub position: Position,
    /// Talking to this NPC restores gear
    pub mender: bool,
}

/// Everything the simulated host knows
#[derive(Debug, Clone)]
pub struct SimulatedWorld {
    pub player: PlayerState,
    pub slots: Vec<InventorySlot>,
    /// Teleport destinations by name: zone and arrival point
    pub destinations: HashMap<String, (ZoneId, Position)>,
    pub npcs: Vec<Npc>,
    /// Units walked per position poll
    pub walk_speed: f32,
    /// Durability lost per inventory read
    pub wear_per_read: u32,
    /// Maximum distance for targeting and interacting
    pub interact_range: f32,
    path: Option<Position>,
    chat_log: Vec<String>,
}

impl SimulatedWorld {
    pub fn new(player: PlayerState) -> Self {
        Self {
            player,
            slots: Vec::new(),
            destinations: HashMap::new(),
            npcs: Vec::new(),
            walk_speed: 6.0,
            wear_per_read: 0,
            interact_range: 5.0,
            path: None,
            chat_log: Vec::new(),
        }
    }

    /// A character in New Gridania with worn gear and no Dark Matter,
    /// one teleport away from the mender of `site`. Teleporting to the
    /// repair zone lands 40 units from the mender.
    pub fn for_site(site: &RepairSite) -> Self {
        let gridania = ZoneId::new(132);
        let spawn = Position::new(32.0, -8.0, 24.0);
        let aetheryte = Position::new(
            site.npc_position.x + 40.0,
            site.npc_position.y,
            site.npc_position.z,
        );

        let mut world = Self::new(PlayerState::new(spawn, gridania));
        world.slots = vec![
            InventorySlot::equipment(ItemId::new(2634), "Weathered Daggers", Durability::new(13_500, 30_000)),
            InventorySlot::equipment(ItemId::new(3065), "Hempen Shirt", Durability::new(26_000, 30_000)),
            InventorySlot::stack(ItemId::new(4551), "Potion", 12),
        ];
        world
            .destinations
            .insert(site.zone_name.clone(), (site.zone, aetheryte));
        world
            .destinations
            .insert("New Gridania".to_string(), (gridania, spawn));
        world.npcs.push(Npc {
            name: site.npc_name.clone(),
            zone: site.zone,
            position: site.npc_position,
            mender: true,
        });
        world
    }

    pub fn limsa_lower_decks() -> Self {
        Self::for_site(&RepairSite::limsa_lower_decks())
    }

    /// Builder: replace the inventory
    pub fn with_slots(mut self, slots: Vec<InventorySlot>) -> Self {
        self.slots = slots;
        self
    }

    /// Builder: wear per inventory read
    pub fn with_wear(mut self, wear_per_read: u32) -> Self {
        self.wear_per_read = wear_per_read;
        self
    }

    /// Chat commands received, in order
    pub fn chat_log(&self) -> &[String] {
        &self.chat_log
    }

    pub fn is_path_running(&self) -> bool {
        self.path.is_some()
    }

    fn npc_in_range(&self, name: &str) -> Option<&Npc> {
        self.npcs.iter().find(|npc| {
            npc.name == name
                && npc.zone == self.player.zone
                && npc.position.distance_to(&self.player.position) <= self.interact_range
        })
    }

    fn restore_gear(&mut self) {
        for slot in &mut self.slots {
            if let Some(durability) = slot.durability {
                slot.durability = Some(durability.restored());
            }
        }
    }

    fn wear(&mut self) {
        let wear = self.wear_per_read;
        for slot in &mut self.slots {
            if let Some(durability) = slot.durability.as_mut() {
                durability.current = durability.current.saturating_sub(wear);
            }
        }
    }

    fn walk(&mut self) {
        if let Some(target) = self.path {
            self.player.position = self.player.position.step_toward(&target, self.walk_speed);
            if self.player.position == target {
                self.path = None;
            }
        }
    }

    fn consume(&mut self, item_id: ItemId) -> bool {
        let Some(index) = self
            .slots
            .iter()
            .position(|slot| slot.item_id == item_id && slot.quantity > 0)
        else {
            return false;
        };

        self.slots[index].quantity -= 1;
        if self.slots[index].quantity == 0 {
            self.slots.remove(index);
        }
        true
    }

    fn apply(&mut self, command: &GameCommand) -> Result<(), HostError> {
        let rejected = |reason: &str| HostError::Rejected {
            command: command.to_chat(),
            reason: reason.to_string(),
        };

        match command {
            GameCommand::Teleport { destination } => {
                let (zone, arrival) = *self
                    .destinations
                    .get(destination)
                    .ok_or_else(|| rejected("unknown destination"))?;
                self.player.zone = zone;
                self.player.position = arrival;
                self.player.target = None;
                self.path = None;
            }
            GameCommand::Target { name } => {
                if self.npc_in_range(name).is_none() {
                    return Err(rejected("no such target nearby"));
                }
                self.player.target = Some(name.clone());
            }
            GameCommand::Interact => {
                let target = self
                    .player
                    .target
                    .clone()
                    .ok_or_else(|| rejected("no target"))?;
                let mender = self
                    .npc_in_range(&target)
                    .map(|npc| npc.mender)
                    .ok_or_else(|| rejected("target out of range"))?;
                if mender {
                    self.restore_gear();
                }
            }
            GameCommand::UseItem { item_id, .. } => {
                if !self.consume(*item_id) {
                    return Err(rejected("item not in inventory"));
                }
                self.restore_gear();
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct SimulatedHost {
    world: Arc<RwLock<SimulatedWorld>>,
}

impl SimulatedHost {
    pub fn new(world: SimulatedWorld) -> Self {
        Self {
            world: Arc::new(RwLock::new(world)),
        }
    }

    /// Copy of the current world
    pub fn world(&self) -> Result<SimulatedWorld, HostError> {
        Ok(self.read()?.clone())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, SimulatedWorld>, HostError> {
        self.world
            .read()
            .map_err(|_| HostError::Unavailable("Failed to acquire read lock".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, SimulatedWorld>, HostError> {
        self.world
            .write()
            .map_err(|_| HostError::Unavailable("Failed to acquire write lock".to_string()))
    }
}

impl Default for SimulatedHost {
    fn default() -> Self {
        Self::new(SimulatedWorld::limsa_lower_decks())
    }
}

#[async_trait]
impl GameHost for SimulatedHost {
    async fn inventory(&self) -> Result<InventorySnapshot, HostError> {
        let mut world = self.write()?;
        world.wear();
        Ok(InventorySnapshot::new(world.slots.clone()))
    }

    async fn player_state(&self) -> Result<PlayerState, HostError> {
        let mut world = self.write()?;
        world.walk();
        Ok(world.player.clone())
    }

    async fn is_path_running(&self) -> Result<bool, HostError> {
        Ok(self.read()?.is_path_running())
    }

    async fn path_to(&self, destination: Position) -> Result<(), HostError> {
        let mut world = self.write()?;
        debug!(%destination, from = %world.player.position, "Simulated path started");
        world.path = Some(destination);
        Ok(())
    }

    async fn execute(&self, command: &GameCommand) -> Result<(), HostError> {
        let mut world = self.write()?;
        world.chat_log.push(command.to_chat());
        debug!(command = %command, "Simulated command");
        world.apply(command)
    }
}
