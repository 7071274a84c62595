//! Configuration types for the auto-repair agent
//!
//! Every field has a default, so an empty file (`{}`) is a valid config
//! describing the Limsa Lominsa Lower Decks setup.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::error::{AutoRepairError, InvalidConfigError};

/// Zone the agent teleports to for repairs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ZoneConfig {
    pub id: u32,
    /// Teleport destination name
    pub name: String,
}

impl Default for ZoneConfig {
    fn default() -> Self {
        Self {
            id: 129,
            name: "Limsa Lominsa Lower Decks".to_string(),
        }
    }
}

/// Repair NPC and where it stands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NpcConfig {
    pub name: String,
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Default for NpcConfig {
    fn default() -> Self {
        Self {
            name: "Alistair".to_string(),
            x: -246.87,
            y: 16.19,
            z: 49.83,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MovementConfig {
    pub retry_interval_ms: u64,
    /// `null` walks until arrival, however long that takes
    pub max_attempts: Option<u32>,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            retry_interval_ms: 500,
            max_attempts: Some(120),
        }
    }
}

/// Repair consumable (Dark Matter)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConsumableConfig {
    pub item_id: u32,
    pub name: String,
    /// Pause after using the item
    pub settle_ms: u64,
}

impl Default for ConsumableConfig {
    fn default() -> Self {
        Self {
            item_id: 33917,
            name: "Grade 8 Dark Matter".to_string(),
            settle_ms: 1000,
        }
    }
}

/// How to launch the host's scripting bridge process
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgeConfig {
    /// Command to execute
    pub command: String,

    /// Command line arguments
    #[serde(default)]
    pub args: Vec<String>,

    /// Environment variables
    #[serde(default)]
    pub env: HashMap<String, String>,

    /// Longest wait for one bridge reply before the bridge is restarted
    #[serde(default = "default_bridge_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_bridge_timeout_ms() -> u64 {
    5000
}

/// Agent configuration file (autorepair.json / autorepair.yaml)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AgentConfig {
    /// Durability percentage below which gear gets repaired
    pub repair_threshold: u8,
    pub poll_interval_ms: u64,
    pub repair_zone: ZoneConfig,
    pub repair_npc: NpcConfig,
    pub arrival_radius: f32,
    pub movement: MovementConfig,
    pub consumable: ConsumableConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bridge: Option<BridgeConfig>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            repair_threshold: 50,
            poll_interval_ms: 5000,
            repair_zone: ZoneConfig::default(),
            repair_npc: NpcConfig::default(),
            arrival_radius: 5.0,
            movement: MovementConfig::default(),
            consumable: ConsumableConfig::default(),
            bridge: None,
        }
    }
}

impl AgentConfig {
    /// Load configuration from a JSON or YAML file (by extension)
    pub fn from_file(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;

        let config: Self = match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)?,
            _ => serde_json::from_str(&content)?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Write the configuration as pretty JSON
    pub fn write_json(&self, path: &Path) -> crate::Result<()> {
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn validate(&self) -> crate::Result<()> {
        let invalid = |field: &str, reason: &str| -> AutoRepairError {
            InvalidConfigError {
                field: field.to_string(),
                reason: reason.to_string(),
            }
            .into()
        };

        if self.repair_threshold > 100 {
            return Err(invalid("repairThreshold", "must be between 0 and 100"));
        }
        if self.poll_interval_ms == 0 {
            return Err(invalid("pollIntervalMs", "must be greater than 0"));
        }
        if self.arrival_radius.is_nan() || self.arrival_radius <= 0.0 {
            return Err(invalid("arrivalRadius", "must be a positive distance"));
        }
        if self.movement.retry_interval_ms == 0 {
            return Err(invalid("movement.retryIntervalMs", "must be greater than 0"));
        }
        if self.repair_zone.name.trim().is_empty() {
            return Err(invalid("repairZone.name", "must not be empty"));
        }
        if self.repair_npc.name.trim().is_empty() {
            return Err(invalid("repairNpc.name", "must not be empty"));
        }
        if let Some(bridge) = &self.bridge {
            if bridge.command.trim().is_empty() {
                return Err(invalid("bridge.command", "must not be empty"));
            }
            if bridge.timeout_ms == 0 {
                return Err(invalid("bridge.timeoutMs", "must be greater than 0"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: AgentConfig = serde_json::from_str("{}").unwrap();

        assert_eq!(config, AgentConfig::default());
        assert_eq!(config.repair_zone.id, 129);
        assert_eq!(config.consumable.item_id, 33917);
        assert_eq!(config.movement.max_attempts, Some(120));
    }

    #[test]
    fn test_config_parse() {
        let json = r#"{
            "repairThreshold": 30,
            "repairNpc": { "name": "Mender" },
            "movement": { "maxAttempts": null },
            "bridge": {
                "command": "python3",
                "args": ["bridge.py", "--port", "stdio"]
            }
        }"#;

        let config: AgentConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.repair_threshold, 30);
        assert_eq!(config.repair_npc.name, "Mender");
        assert_eq!(config.repair_npc.x, -246.87);
        assert_eq!(config.movement.max_attempts, None);
        assert_eq!(config.movement.retry_interval_ms, 500);
        let bridge = config.bridge.unwrap();
        assert_eq!(bridge.args.len(), 3);
        assert_eq!(bridge.timeout_ms, 5000);
    }

    #[test]
    fn test_yaml_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "repairThreshold: 75\npollIntervalMs: 1000").unwrap();

        let config = AgentConfig::from_file(file.path()).unwrap();

        assert_eq!(config.repair_threshold, 75);
        assert_eq!(config.poll_interval_ms, 1000);
    }

    #[test]
    fn test_json_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("autorepair.json");

        AgentConfig::default().write_json(&path).unwrap();

        assert_eq!(AgentConfig::from_file(&path).unwrap(), AgentConfig::default());
    }

    #[test]
    fn test_rejects_out_of_range_values() {
        let config = AgentConfig {
            repair_threshold: 120,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(AutoRepairError::InvalidConfig(e)) if e.field == "repairThreshold"
        ));

        let config = AgentConfig {
            arrival_radius: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = AgentConfig {
            poll_interval_ms: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bridge_timeout() {
        let json = r#"{"bridge": {"command": "bridge", "timeoutMs": 250}}"#;
        let config: AgentConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.bridge.as_ref().unwrap().timeout_ms, 250);

        let json = r#"{"bridge": {"command": "bridge", "timeoutMs": 0}}"#;
        let config: AgentConfig = serde_json::from_str(json).unwrap();
        assert!(matches!(
            config.validate(),
            Err(AutoRepairError::InvalidConfig(e)) if e.field == "bridge.timeoutMs"
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            AgentConfig::from_file(Path::new("/nonexistent/autorepair.json")),
            Err(AutoRepairError::Io(_))
        ));
    }
}
