//! Inventory - A fresh read of the character's items
//!
//! An `InventorySnapshot` is fetched from the host on every check and
//! dropped afterwards. Slot order is the host's order, which matters:
//! durability sensing reports the first worn slot it meets.

/// Identifier of an item kind (not an individual item)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(u32);

impl ItemId {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    pub const fn value(&self) -> u32 {
        self.0
    }
}

impl core::fmt::Display for ItemId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Remaining usability of a piece of gear
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Durability {
    pub current: u32,
    pub max: u32,
}

impl Durability {
    pub const fn new(current: u32, max: u32) -> Self {
        Self { current, max }
    }

    /// Current durability as a percentage of max.
    ///
    /// Returns `None` when max is zero: the ratio is meaningless and the
    /// slot is treated like one with unknown durability.
    pub fn percent(&self) -> Option<f32> {
        if self.max == 0 {
            return None;
        }
        Some(self.current as f32 / self.max as f32 * 100.0)
    }

    /// Same max, full current
    pub fn restored(&self) -> Self {
        Self {
            current: self.max,
            max: self.max,
        }
    }
}

/// One slot of the inventory
#[derive(Debug, Clone, PartialEq)]
pub struct InventorySlot {
    pub item_id: ItemId,
    pub name: String,
    pub quantity: u32,
    /// `None` for anything that is not equipment
    pub durability: Option<Durability>,
}

impl InventorySlot {
    /// A piece of gear with durability
    pub fn equipment(item_id: ItemId, name: impl Into<String>, durability: Durability) -> Self {
        Self {
            item_id,
            name: name.into(),
            quantity: 1,
            durability: Some(durability),
        }
    }

    /// A stack of items without durability
    pub fn stack(item_id: ItemId, name: impl Into<String>, quantity: u32) -> Self {
        Self {
            item_id,
            name: name.into(),
            quantity,
            durability: None,
        }
    }

    pub fn is_equipment(&self) -> bool {
        self.durability.is_some()
    }
}

/// Ordered view of the inventory at one point in time
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InventorySnapshot {
    slots: Vec<InventorySlot>,
}

impl InventorySnapshot {
    pub fn new(slots: Vec<InventorySlot>) -> Self {
        Self { slots }
    }

    pub fn slots(&self) -> &[InventorySlot] {
        &self.slots
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Total quantity of `item_id` across all slots
    pub fn item_count(&self, item_id: ItemId) -> u32 {
        self.slots
            .iter()
            .filter(|slot| slot.item_id == item_id)
            .map(|slot| slot.quantity)
            .sum()
    }
}

impl FromIterator<InventorySlot> for InventorySnapshot {
    fn from_iter<T: IntoIterator<Item = InventorySlot>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
