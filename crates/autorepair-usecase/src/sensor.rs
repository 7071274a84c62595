//! Durability check against the live inventory

use std::sync::Arc;

use tracing::{debug, info};

use autorepair_domain::{DurabilitySensor, ItemId, RepairThreshold};

use crate::port::host::{GameHost, HostError};

/// Owned description of the slot that triggered a repair
#[derive(Debug, Clone, PartialEq)]
pub struct WornReport {
    pub item_id: ItemId,
    pub name: String,
    pub percent: f32,
}

/// Fetches a fresh snapshot on every call; nothing is cached.
pub struct DurabilityCheck {
    host: Arc<dyn GameHost>,
    sensor: DurabilitySensor,
}

impl DurabilityCheck {
    pub fn new(host: Arc<dyn GameHost>, threshold: RepairThreshold) -> Self {
        Self {
            host,
            sensor: DurabilitySensor::new(threshold),
        }
    }

    pub fn threshold(&self) -> RepairThreshold {
        self.sensor.threshold()
    }

    /// First worn slot, if any
    pub async fn check(&self) -> Result<Option<WornReport>, HostError> {
        let snapshot = self.host.inventory().await?;

        let Some(worn) = self.sensor.first_worn(&snapshot) else {
            debug!(
                slots = snapshot.slots().len(),
                threshold = %self.sensor.threshold(),
                "No gear below repair threshold"
            );
            return Ok(None);
        };

        info!(
            item_id = %worn.slot.item_id,
            percent = worn.percent,
            "Item {} needs repair (Durability: {:.0}%).",
            worn.slot.name,
            worn.percent
        );

        Ok(Some(WornReport {
            item_id: worn.slot.item_id,
            name: worn.slot.name.clone(),
            percent: worn.percent,
        }))
    }

    pub async fn needs_repair(&self) -> Result<bool, HostError> {
        Ok(self.check().await?.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{LogBuffer, ScriptedHost};
    use autorepair_domain::{Durability, InventorySlot, InventorySnapshot, PlayerState, Position, ZoneId};

    fn host_with(slots: Vec<InventorySlot>) -> Arc<ScriptedHost> {
        Arc::new(ScriptedHost::new(
            PlayerState::new(Position::default(), ZoneId::new(129)),
            InventorySnapshot::new(slots),
        ))
    }

    #[tokio::test]
    async fn test_reports_item_at_forty_percent() {
        let host = host_with(vec![InventorySlot::equipment(
            ItemId::new(1),
            "Item 1",
            Durability::new(40, 100),
        )]);
        let check = DurabilityCheck::new(host, RepairThreshold::new(50).unwrap());

        let report = check.check().await.unwrap().unwrap();
        assert_eq!(report.item_id, ItemId::new(1));
        assert_eq!(report.percent, 40.0);
        assert!(check.needs_repair().await.unwrap());
    }

    #[tokio::test]
    async fn test_logs_worn_item_and_percentage() {
        let logs = LogBuffer::default();
        let _guard = logs.capture();
        let host = host_with(vec![InventorySlot::equipment(
            ItemId::new(1),
            "Item 1",
            Durability::new(40, 100),
        )]);
        let check = DurabilityCheck::new(host, RepairThreshold::new(50).unwrap());

        check.check().await.unwrap();

        let output = logs.contents();
        assert!(output.contains("Item Item 1 needs repair (Durability: 40%)."), "{}", output);
        assert!(output.contains("item_id=1"), "{}", output);
    }

    #[tokio::test]
    async fn test_healthy_gear() {
        let host = host_with(vec![
            InventorySlot::equipment(ItemId::new(1), "Helm", Durability::new(60, 100)),
            InventorySlot::stack(ItemId::new(33917), "Grade 8 Dark Matter", 2),
        ]);
        let check = DurabilityCheck::new(host, RepairThreshold::default());

        assert!(!check.needs_repair().await.unwrap());
    }

    #[tokio::test]
    async fn test_reads_fresh_snapshot_each_time() {
        let host = host_with(vec![InventorySlot::equipment(
            ItemId::new(1),
            "Helm",
            Durability::new(90, 100),
        )]);
        let check = DurabilityCheck::new(host.clone(), RepairThreshold::default());

        assert!(!check.needs_repair().await.unwrap());

        host.set_inventory(InventorySnapshot::new(vec![InventorySlot::equipment(
            ItemId::new(1),
            "Helm",
            Durability::new(10, 100),
        )]));
        assert!(check.needs_repair().await.unwrap());
        assert_eq!(host.inventory_calls(), 2);
    }

    #[tokio::test]
    async fn test_host_failure_propagates() {
        let host = host_with(vec![]);
        host.set_fail_inventory(true);
        let check = DurabilityCheck::new(host, RepairThreshold::default());

        assert!(matches!(
            check.needs_repair().await,
            Err(HostError::Unavailable(_))
        ));
    }
}
