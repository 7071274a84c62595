//! Repair Strategy - Carry out one repair attempt
//!
//! Asks the [`RepairPlanner`] which path applies and issues the matching
//! host commands. One call is one step: after a teleport or a walk the
//! cycle ends and the next trigger continues from wherever the character
//! ended up. In particular the zone is not checked again after teleporting.

use std::sync::Arc;

use tracing::{info, warn};

use autorepair_domain::{NpcStep, PlayerState, RepairPlanner, RepairState};

use crate::error::Result;
use crate::movement::{MoveOutcome, MovementController};
use crate::port::host::{GameCommand, GameHost};
use crate::settings::{ConsumableSpec, RepairSettings};

/// What a repair attempt did
#[derive(Debug, Clone, PartialEq)]
pub enum RepairOutcome {
    /// Teleport requested; repair continues on a later cycle
    Teleported { destination: String },
    /// Consumable used, `available` of them were on hand
    ConsumableUsed { available: u32 },
    /// Walked to the mender; interaction happens on a later cycle
    ApproachedNpc { attempts: u32 },
    /// Could not get within range of the mender
    NpcUnreachable { remaining: f32 },
    /// Interaction with the mender started
    Interacted { retargeted: bool },
    /// In range, but the character is busy with another interaction
    AwaitingInteraction { retargeted: bool },
}

pub struct RepairStrategy {
    host: Arc<dyn GameHost>,
    planner: RepairPlanner,
    consumable: ConsumableSpec,
    movement: MovementController,
}

impl RepairStrategy {
    pub fn new(host: Arc<dyn GameHost>, settings: &RepairSettings) -> Self {
        let planner = RepairPlanner::new(
            settings.site.clone(),
            settings.consumable.item_id,
            settings.arrival_radius,
        );
        let movement =
            MovementController::new(host.clone(), settings.arrival_radius, settings.movement);

        Self {
            host,
            planner,
            consumable: settings.consumable.clone(),
            movement,
        }
    }

    pub async fn repair(&self) -> Result<RepairOutcome> {
        let player = self.host.player_state().await?;
        let inventory = self.host.inventory().await?;
        let site = self.planner.site();

        match self.planner.assess(&player, &inventory) {
            RepairState::NotInRepairZone => {
                info!(
                    zone_id = %player.zone,
                    "Not in {}, teleporting...",
                    site.zone_name
                );
                self.host
                    .execute(&GameCommand::Teleport {
                        destination: site.zone_name.clone(),
                    })
                    .await?;
                Ok(RepairOutcome::Teleported {
                    destination: site.zone_name.clone(),
                })
            }
            RepairState::InZoneWithConsumable { count } => {
                info!(available = count, "Using {} for repair.", self.consumable.name);
                self.host
                    .execute(&GameCommand::UseItem {
                        item_id: self.consumable.item_id,
                        name: self.consumable.name.clone(),
                    })
                    .await?;
                tokio::time::sleep(self.consumable.settle).await;
                Ok(RepairOutcome::ConsumableUsed { available: count })
            }
            RepairState::InZoneNeedsNpc => {
                info!(
                    "No {} available, attempting repair at {}.",
                    self.consumable.name, site.npc_name
                );
                self.repair_at_npc(&player).await
            }
        }
    }

    async fn repair_at_npc(&self, player: &PlayerState) -> Result<RepairOutcome> {
        let site = self.planner.site();

        match self.planner.npc_step(player) {
            NpcStep::Approach { distance } => {
                info!(distance, "Moving to {}", site.npc_name);
                match self.movement.move_to(site.npc_position).await? {
                    MoveOutcome::Arrived { attempts } => {
                        Ok(RepairOutcome::ApproachedNpc { attempts })
                    }
                    MoveOutcome::GaveUp { remaining, .. } => {
                        warn!(remaining, "{} is unreachable", site.npc_name);
                        Ok(RepairOutcome::NpcUnreachable { remaining })
                    }
                }
            }
            NpcStep::Engage { retarget, interact } => {
                if retarget {
                    self.host
                        .execute(&GameCommand::Target {
                            name: site.npc_name.clone(),
                        })
                        .await?;
                }

                if !interact {
                    info!("Character is busy, not interacting with {}", site.npc_name);
                    return Ok(RepairOutcome::AwaitingInteraction {
                        retargeted: retarget,
                    });
                }

                self.host.execute(&GameCommand::Interact).await?;
                Ok(RepairOutcome::Interacted {
                    retargeted: retarget,
                })
            }
        }
    }
}
