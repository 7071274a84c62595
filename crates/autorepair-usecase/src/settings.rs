//! Settings the use cases are built from
//!
//! Values are fixed at construction. The app layer maps its configuration
//! file onto these types.

use std::time::Duration;

use autorepair_domain::{ItemId, RepairSite, RepairThreshold};

/// The repair consumable (Dark Matter)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsumableSpec {
    pub item_id: ItemId,
    pub name: String,
    /// Wait after using the item before the cycle ends
    pub settle: Duration,
}

impl Default for ConsumableSpec {
    fn default() -> Self {
        Self {
            item_id: ItemId::new(33917),
            name: "Grade 8 Dark Matter".to_string(),
            settle: Duration::from_secs(1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovementSettings {
    /// Pause between distance checks
    pub retry_interval: Duration,
    /// Distance checks before giving up; `None` keeps walking forever
    pub max_attempts: Option<u32>,
}

impl Default for MovementSettings {
    fn default() -> Self {
        Self {
            retry_interval: Duration::from_millis(500),
            max_attempts: Some(120),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RepairSettings {
    pub threshold: RepairThreshold,
    pub site: RepairSite,
    pub consumable: ConsumableSpec,
    pub arrival_radius: f32,
    /// Pause between the end of one check and the start of the next
    pub poll_interval: Duration,
    pub movement: MovementSettings,
}

impl Default for RepairSettings {
    fn default() -> Self {
        Self {
            threshold: RepairThreshold::default(),
            site: RepairSite::default(),
            consumable: ConsumableSpec::default(),
            arrival_radius: 5.0,
            poll_interval: Duration::from_secs(5),
            movement: MovementSettings::default(),
        }
    }
}
