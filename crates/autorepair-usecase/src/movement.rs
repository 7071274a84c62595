//! Movement Controller - Walk the character to a point
//!
//! Polls the player position every `retry_interval`. A new pathfinding
//! request is only issued while no path is running, so a long walk costs
//! one request, not one per poll. The attempt budget turns an unreachable
//! target into `MoveOutcome::GaveUp` instead of an endless loop.

use std::sync::Arc;

use tracing::{debug, warn};

use autorepair_domain::Position;

use crate::port::host::{GameHost, HostError};
use crate::settings::MovementSettings;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoveOutcome {
    /// Within the arrival radius after `attempts` polls
    Arrived { attempts: u32 },
    /// Budget exhausted `remaining` units away
    GaveUp { attempts: u32, remaining: f32 },
}

pub struct MovementController {
    host: Arc<dyn GameHost>,
    arrival_radius: f32,
    settings: MovementSettings,
}

impl MovementController {
    pub fn new(host: Arc<dyn GameHost>, arrival_radius: f32, settings: MovementSettings) -> Self {
        Self {
            host,
            arrival_radius,
            settings,
        }
    }

    pub async fn move_to(&self, destination: Position) -> Result<MoveOutcome, HostError> {
        let mut attempts = 0u32;

        loop {
            let distance = self.host.player_state().await?.distance_to(&destination);
            if distance <= self.arrival_radius {
                debug!(attempts, %destination, "Arrived");
                return Ok(MoveOutcome::Arrived { attempts });
            }

            if let Some(max) = self.settings.max_attempts {
                if attempts >= max {
                    warn!(
                        attempts,
                        remaining = distance,
                        %destination,
                        "Giving up on movement, target looks unreachable"
                    );
                    return Ok(MoveOutcome::GaveUp {
                        attempts,
                        remaining: distance,
                    });
                }
            }

            if !self.host.is_path_running().await? {
                debug!(remaining = distance, %destination, "Requesting path");
                self.host.path_to(destination).await?;
            }

            attempts += 1;
            tokio::time::sleep(self.settings.retry_interval).await;
        }
    }
}
