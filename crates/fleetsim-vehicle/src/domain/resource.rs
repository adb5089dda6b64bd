//! Fuel and battery arithmetic shared by every variant.

use serde::{Deserialize, Serialize};

/// Fraction of capacity a factory-fresh tank or battery starts with.
pub const FACTORY_FILL_FRACTION: f64 = 0.8;

/// Unit of a vehicle's energy reserve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourceUnit {
    /// Litres of fuel.
    Liters,
    /// Kilowatt-hours of battery charge.
    KilowattHours,
}

/// An energy reserve whose level never leaves `[0, capacity]`.
///
/// All movement goes through [`drain`](Self::drain) and
/// [`replenish`](Self::replenish), which clamp and report the quantity
/// actually moved. Deltas are deterministic functions of the requested
/// amount and the current level.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceTank {
    level: f64,
    capacity: f64,
    unit: ResourceUnit,
}

impl ResourceTank {
    /// Creates a tank at the factory fill level (80 % of capacity).
    #[must_use]
    pub(crate) fn factory_fill(capacity: f64, unit: ResourceUnit) -> Self {
        Self {
            level: capacity * FACTORY_FILL_FRACTION,
            capacity,
            unit,
        }
    }

    /// Current level, in this tank's unit.
    #[must_use]
    pub fn level(&self) -> f64 {
        self.level
    }

    /// Capacity, in this tank's unit.
    #[must_use]
    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    /// The unit this reserve is measured in.
    #[must_use]
    pub fn unit(&self) -> ResourceUnit {
        self.unit
    }

    /// Whether the reserve is exhausted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.level <= 0.0
    }

    /// Removes up to `amount`, clamping at empty. Returns the quantity
    /// actually drained. Non-finite or non-positive requests drain
    /// nothing.
    pub(crate) fn drain(&mut self, amount: f64) -> f64 {
        if !amount.is_finite() || amount <= 0.0 {
            return 0.0;
        }
        let drained = amount.min(self.level);
        self.level -= drained;
        drained
    }

    /// Adds up to `amount`, clamping at capacity. Returns the quantity
    /// actually added. Non-finite or non-positive requests add nothing.
    pub(crate) fn replenish(&mut self, amount: f64) -> f64 {
        if !amount.is_finite() || amount <= 0.0 {
            return 0.0;
        }
        let added = amount.min(self.capacity - self.level);
        self.level += added;
        added
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_fill_starts_at_eighty_percent() {
        let tank = ResourceTank::factory_fill(60.0, ResourceUnit::Liters);

        assert_eq!(tank.level(), 48.0);
        assert_eq!(tank.capacity(), 60.0);
        assert!(!tank.is_empty());
    }

    #[test]
    fn test_drain_clamps_at_empty() {
        let mut tank = ResourceTank::factory_fill(20.0, ResourceUnit::Liters);

        let drained = tank.drain(100.0);

        assert_eq!(drained, 16.0);
        assert_eq!(tank.level(), 0.0);
        assert!(tank.is_empty());
    }

    #[test]
    fn test_replenish_clamps_at_capacity() {
        let mut tank = ResourceTank::factory_fill(60.0, ResourceUnit::Liters);

        let added = tank.replenish(100.0);

        assert_eq!(added, 12.0);
        assert_eq!(tank.level(), 60.0);
    }

    #[test]
    fn test_negative_and_non_finite_requests_move_nothing() {
        let mut tank = ResourceTank::factory_fill(60.0, ResourceUnit::Liters);

        assert_eq!(tank.drain(-5.0), 0.0);
        assert_eq!(tank.replenish(-5.0), 0.0);
        assert_eq!(tank.drain(f64::NAN), 0.0);
        assert_eq!(tank.replenish(f64::INFINITY), 0.0);
        assert_eq!(tank.level(), 48.0);
    }

    #[test]
    fn test_level_stays_in_range_under_arbitrary_sequences() {
        let mut tank = ResourceTank::factory_fill(75.0, ResourceUnit::KilowattHours);

        for step in 0..200 {
            if step % 3 == 0 {
                tank.replenish(f64::from(step) * 0.7);
            } else {
                tank.drain(f64::from(step) * 0.9);
            }
            assert!(tank.level() >= 0.0);
            assert!(tank.level() <= tank.capacity());
        }
    }
}
