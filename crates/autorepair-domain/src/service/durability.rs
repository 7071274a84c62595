//! Durability Sensor - Does any equipped gear need repair?
//!
//! Walks the snapshot in host order and stops at the first slot whose
//! durability is below the threshold. Which slot gets reported when
//! several are worn is therefore "first in iteration order", nothing more.

use crate::model::inventory::{InventorySlot, InventorySnapshot};
use crate::model::threshold::RepairThreshold;

/// A slot found below the threshold
#[derive(Debug, Clone, PartialEq)]
pub struct WornItem<'a> {
    pub slot: &'a InventorySlot,
    pub percent: f32,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DurabilitySensor {
    threshold: RepairThreshold,
}

impl DurabilitySensor {
    pub fn new(threshold: RepairThreshold) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> RepairThreshold {
        self.threshold
    }

    /// First slot below the threshold, if any.
    ///
    /// Slots without durability (or with a zero max) are skipped rather
    /// than counted as worn.
    pub fn first_worn<'a>(&self, snapshot: &'a InventorySnapshot) -> Option<WornItem<'a>> {
        snapshot.slots().iter().find_map(|slot| {
            let percent = slot.durability?.percent()?;
            self.threshold
                .is_breached_by(percent)
                .then_some(WornItem { slot, percent })
        })
    }

    pub fn needs_repair(&self, snapshot: &InventorySnapshot) -> bool {
        self.first_worn(snapshot).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::inventory::{Durability, ItemId};

    fn gear(id: u32, current: u32, max: u32) -> InventorySlot {
        InventorySlot::equipment(ItemId::new(id), format!("Item {}", id), Durability::new(current, max))
    }

    fn sensor(percent: u8) -> DurabilitySensor {
        DurabilitySensor::new(RepairThreshold::new(percent).unwrap())
    }

    #[test]
    fn test_single_worn_item() {
        let snapshot = InventorySnapshot::new(vec![gear(1, 40, 100)]);

        let worn = sensor(50).first_worn(&snapshot).unwrap();
        assert_eq!(worn.slot.item_id, ItemId::new(1));
        assert_eq!(worn.percent, 40.0);
    }

    #[test]
    fn test_nothing_below_threshold() {
        let snapshot = InventorySnapshot::new(vec![gear(1, 50, 100), gear(2, 100, 100), gear(3, 7, 10)]);

        assert!(!sensor(50).needs_repair(&snapshot));
    }

    #[test]
    fn test_empty_snapshot() {
        assert!(!sensor(50).needs_repair(&InventorySnapshot::default()));
        assert!(!sensor(100).needs_repair(&InventorySnapshot::default()));
    }

    #[test]
    fn test_unknown_durability_is_skipped() {
        let snapshot = InventorySnapshot::new(vec![
            InventorySlot::stack(ItemId::new(33917), "Grade 8 Dark Matter", 0),
            gear(2, 0, 0),
            gear(3, 90, 100),
        ]);

        assert!(!sensor(50).needs_repair(&snapshot));
    }

    #[test]
    fn test_reports_first_in_order() {
        let snapshot = InventorySnapshot::new(vec![gear(1, 90, 100), gear(2, 20, 100), gear(3, 10, 100)]);

        let worn = sensor(50).first_worn(&snapshot).unwrap();
        assert_eq!(worn.slot.item_id, ItemId::new(2));
    }

    #[test]
    fn test_lowering_threshold_never_creates_a_repair() {
        let snapshots = [
            InventorySnapshot::new(vec![gear(1, 40, 100)]),
            InventorySnapshot::new(vec![gear(1, 75, 100), gear(2, 12, 60)]),
            InventorySnapshot::new(vec![gear(1, 0, 100)]),
            InventorySnapshot::new(vec![gear(1, 100, 100)]),
        ];

        for snapshot in &snapshots {
            let mut previous = sensor(100).needs_repair(snapshot);
            for percent in (0..100u8).rev() {
                let current = sensor(percent).needs_repair(snapshot);
                assert!(previous || !current, "false turned true at {}%", percent);
                previous = current;
            }
        }
    }
}
