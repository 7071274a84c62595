//! Game Host - The capability interface over the running game client
//!
//! Every call is a single query or a single command. Commands are
//! fire-and-forget: `Ok(())` means the host accepted the request, not that
//! the game finished acting on it. Callers observe the effect by querying
//! state again later.

use async_trait::async_trait;
use thiserror::Error;

use autorepair_domain::{InventorySnapshot, ItemId, PlayerState, Position};

/// Failures talking to the host
#[derive(Debug, Error)]
pub enum HostError {
    /// Host state could not be read right now (loading screen, logged out, ...)
    #[error("Host unavailable: {0}")]
    Unavailable(String),

    #[error("Host rejected '{command}': {reason}")]
    Rejected { command: String, reason: String },

    #[error("Host protocol error: {0}")]
    Protocol(String),

    #[error("Host I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A command the agent can ask the host to run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameCommand {
    Teleport { destination: String },
    Target { name: String },
    Interact,
    UseItem { item_id: ItemId, name: String },
}

impl GameCommand {
    /// The chat command the host's scripting bridge runs for this request
    pub fn to_chat(&self) -> String {
        match self {
            GameCommand::Teleport { destination } => format!("/teleport {}", destination),
            GameCommand::Target { name } => format!("/target {}", name),
            GameCommand::Interact => "/interact".to_string(),
            GameCommand::UseItem { name, .. } => format!("/item {}", name),
        }
    }
}

impl core::fmt::Display for GameCommand {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.to_chat())
    }
}

/// Host capabilities used by the agent
#[async_trait]
pub trait GameHost: Send + Sync {
    /// Current inventory, in host order
    async fn inventory(&self) -> Result<InventorySnapshot, HostError>;

    async fn player_state(&self) -> Result<PlayerState, HostError>;

    /// Whether a pathfinding request is still being computed or walked
    async fn is_path_running(&self) -> Result<bool, HostError>;

    /// Start pathfinding and moving toward `destination`
    async fn path_to(&self, destination: Position) -> Result<(), HostError>;

    async fn execute(&self, command: &GameCommand) -> Result<(), HostError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_rendering() {
        let teleport = GameCommand::Teleport {
            destination: "Limsa Lominsa Lower Decks".to_string(),
        };
        assert_eq!(teleport.to_chat(), "/teleport Limsa Lominsa Lower Decks");
        assert_eq!(
            GameCommand::Target {
                name: "Alistair".to_string()
            }
            .to_string(),
            "/target Alistair"
        );
        assert_eq!(GameCommand::Interact.to_chat(), "/interact");
        assert_eq!(
            GameCommand::UseItem {
                item_id: ItemId::new(33917),
                name: "Grade 8 Dark Matter".to_string()
            }
            .to_chat(),
            "/item Grade 8 Dark Matter"
        );
    }
}
