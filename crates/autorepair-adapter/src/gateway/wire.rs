//! JSON lines spoken with the scripting bridge
//!
//! One request line out, one response line back:
//!
//! ```text
//! → {"op":"inventory"}
//! ← {"ok":true,"data":[{"itemId":1,"name":"Sword","durability":40,"maxDurability":100}]}
//! → {"op":"command","text":"/interact"}
//! ← {"ok":false,"error":"Target out of range"}
//! ```

use serde::{Deserialize, Serialize};

use autorepair_domain::{Durability, InventorySlot, ItemId, PlayerState, Position, ZoneId};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub(crate) enum Request {
    Inventory,
    PlayerState,
    PathRunning,
    PathTo { x: f32, y: f32, z: f32 },
    Command { text: String },
}

impl Request {
    /// Short label used in error messages
    pub(crate) fn label(&self) -> String {
        match self {
            Request::Inventory => "inventory".to_string(),
            Request::PlayerState => "player_state".to_string(),
            Request::PathRunning => "path_running".to_string(),
            Request::PathTo { x, y, z } => format!("path_to ({}, {}, {})", x, y, z),
            Request::Command { text } => text.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Response {
    pub ok: bool,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    #[serde(default)]
    pub error: Option<String>,
}

fn one() -> u32 {
    1
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SlotDto {
    pub item_id: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default = "one")]
    pub quantity: u32,
    #[serde(default)]
    pub durability: Option<u32>,
    #[serde(default)]
    pub max_durability: Option<u32>,
}

impl From<SlotDto> for InventorySlot {
    fn from(dto: SlotDto) -> Self {
        // Durability only counts when the host reports both halves
        let durability = match (dto.durability, dto.max_durability) {
            (Some(current), Some(max)) => Some(Durability::new(current, max)),
            _ => None,
        };

        InventorySlot {
            item_id: ItemId::new(dto.item_id),
            name: dto.name,
            quantity: dto.quantity,
            durability,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PlayerDto {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub zone_id: u32,
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub occupied: bool,
}

impl From<PlayerDto> for PlayerState {
    fn from(dto: PlayerDto) -> Self {
        PlayerState {
            position: Position::new(dto.x, dto.y, dto.z),
            zone: ZoneId::new(dto.zone_id),
            target: dto.target,
            occupied: dto.occupied,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_encoding() {
        assert_eq!(
            serde_json::to_string(&Request::Inventory).unwrap(),
            r#"{"op":"inventory"}"#
        );
        assert_eq!(
            serde_json::to_string(&Request::Command {
                text: "/interact".to_string()
            })
            .unwrap(),
            r#"{"op":"command","text":"/interact"}"#
        );
        assert_eq!(
            serde_json::to_string(&Request::PathRunning).unwrap(),
            r#"{"op":"path_running"}"#
        );
    }

    #[test]
    fn test_slot_without_durability() {
        let json = r#"[
            {"itemId": 1, "name": "Sword", "durability": 40, "maxDurability": 100},
            {"itemId": 33917, "name": "Grade 8 Dark Matter", "quantity": 12},
            {"itemId": 7, "durability": null, "maxDurability": 100}
        ]"#;

        let slots: Vec<InventorySlot> = serde_json::from_str::<Vec<SlotDto>>(json)
            .unwrap()
            .into_iter()
            .map(InventorySlot::from)
            .collect();

        assert_eq!(slots[0].durability, Some(Durability::new(40, 100)));
        assert_eq!(slots[1].quantity, 12);
        assert!(!slots[1].is_equipment());
        assert!(!slots[2].is_equipment());
        assert_eq!(slots[2].quantity, 1);
    }

    #[test]
    fn test_player_defaults() {
        let json = r#"{"x": 1.0, "y": 2.0, "z": 3.0, "zoneId": 129}"#;

        let player: PlayerState = serde_json::from_str::<PlayerDto>(json).unwrap().into();

        assert_eq!(player.zone, ZoneId::new(129));
        assert_eq!(player.target, None);
        assert!(!player.occupied);
    }
}
