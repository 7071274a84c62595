//! RepairThreshold - The durability percentage that triggers a repair

/// Errors raised when building domain values
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    InvalidThreshold { percent: u8 },
}

impl core::fmt::Display for DomainError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DomainError::InvalidThreshold { percent } => {
                write!(f, "Repair threshold must be between 0 and 100, got {}", percent)
            }
        }
    }
}

impl std::error::Error for DomainError {}

/// Percentage in `0..=100`. Gear strictly below it needs repair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RepairThreshold(u8);

impl RepairThreshold {
    pub const DEFAULT_PERCENT: u8 = 50;

    pub fn new(percent: u8) -> Result<Self, DomainError> {
        if percent > 100 {
            return Err(DomainError::InvalidThreshold { percent });
        }
        Ok(Self(percent))
    }

    pub fn percent(&self) -> u8 {
        self.0
    }

    /// True when `durability_percent` is below the threshold
    pub fn is_breached_by(&self, durability_percent: f32) -> bool {
        durability_percent < f32::from(self.0)
    }
}

impl Default for RepairThreshold {
    fn default() -> Self {
        Self(Self::DEFAULT_PERCENT)
    }
}

impl core::fmt::Display for RepairThreshold {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_bounds() {
        assert!(RepairThreshold::new(0).is_ok());
        assert!(RepairThreshold::new(100).is_ok());
        assert_eq!(
            RepairThreshold::new(101),
            Err(DomainError::InvalidThreshold { percent: 101 })
        );
        assert_eq!(RepairThreshold::default().percent(), 50);
    }

    #[test]
    fn test_breach_is_strict() {
        let threshold = RepairThreshold::default();

        assert!(threshold.is_breached_by(49.9));
        assert!(!threshold.is_breached_by(50.0));
    }
}
