//! The closed set of vehicle variants and their extension state.

use std::fmt;
use std::str::FromStr;

use fleetsim_core::error::DomainError;
use serde::{Deserialize, Serialize};

use super::policy::TRAILER_CAPACITY_MULTIPLIER;

/// Discriminant tag for the four supported vehicle kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VehicleVariant {
    /// A passenger car with a manual or automatic gearbox.
    Standard,
    /// A motorcycle, optionally with a sidecar.
    Motorcycle,
    /// A cargo truck, optionally towing a trailer.
    Truck,
    /// A battery-electric car with regenerative braking.
    Electric,
}

impl VehicleVariant {
    /// Every supported variant, in declaration order.
    pub const ALL: [Self; 4] = [Self::Standard, Self::Motorcycle, Self::Truck, Self::Electric];

    /// Returns the canonical display name for the tag.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Motorcycle => "motorcycle",
            Self::Truck => "truck",
            Self::Electric => "electric",
        }
    }
}

impl fmt::Display for VehicleVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VehicleVariant {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "motorcycle" => Ok(Self::Motorcycle),
            "truck" => Ok(Self::Truck),
            "electric" => Ok(Self::Electric),
            other => Err(DomainError::UnsupportedVariant(other.to_owned())),
        }
    }
}

/// Body style of a motorcycle. Sport bikes get a top-speed bonus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MotorcycleStyle {
    /// Track-oriented geometry.
    Sport,
    /// Relaxed long-haul geometry.
    Cruiser,
    /// Luggage-carrying long-distance geometry.
    Touring,
}

/// Charging connector fitted to an electric vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChargingPort {
    /// IEC 62196 Type 2 (Mennekes).
    Type2,
    /// Combined Charging System.
    Ccs,
    /// CHAdeMO.
    Chademo,
}

/// Extension state for the Standard variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandardState {
    /// Door count; more than two doors implies an automatic gearbox.
    pub doors: u8,
}

impl StandardState {
    /// Whether the gearbox shifts itself.
    #[must_use]
    pub fn automatic_transmission(&self) -> bool {
        self.doors > 2
    }
}

/// Extension state for the Motorcycle variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MotorcycleState {
    /// Whether a sidecar is fitted (rules out wheelies).
    pub sidecar: bool,
    /// Engine displacement in cubic centimetres.
    pub engine_size_cc: u32,
    /// Body style.
    pub style: MotorcycleStyle,
}

/// Extension state for the Truck variant.
#[derive(Debug, Clone, PartialEq)]
pub struct TruckState {
    /// Cargo capacity in tonnes without a trailer. The effective
    /// capacity is derived from this so that detaching a trailer
    /// restores it exactly.
    pub base_cargo_capacity: f64,
    /// Cargo currently loaded, in tonnes.
    pub current_cargo: f64,
    /// Whether a trailer is attached.
    pub trailer_attached: bool,
    /// Axle count.
    pub axles: u8,
}

impl TruckState {
    /// Effective cargo capacity in tonnes, trailer included.
    #[must_use]
    pub fn cargo_capacity(&self) -> f64 {
        if self.trailer_attached {
            self.base_cargo_capacity * TRAILER_CAPACITY_MULTIPLIER
        } else {
            self.base_cargo_capacity
        }
    }

    /// Fraction of effective capacity currently in use, in `[0, 1]`
    /// whenever the cargo invariant holds.
    #[must_use]
    pub fn load_factor(&self) -> f64 {
        self.current_cargo / self.cargo_capacity()
    }
}

/// Extension state for the Electric variant.
#[derive(Debug, Clone, PartialEq)]
pub struct ElectricState {
    /// Whether eco mode caps speed and consumption.
    pub eco_mode: bool,
    /// Charging connector fitted.
    pub charging_port: ChargingPort,
    /// Range efficiency in km per kWh.
    pub efficiency_km_per_kwh: f64,
}

/// Per-variant extension state carried inside the vehicle aggregate.
///
/// Behavior divergence lives in the policy table's exhaustive matches
/// over this closed union, not in virtual dispatch.
#[derive(Debug, Clone, PartialEq)]
pub enum VariantState {
    /// Standard passenger car.
    Standard(StandardState),
    /// Motorcycle.
    Motorcycle(MotorcycleState),
    /// Cargo truck.
    Truck(TruckState),
    /// Battery-electric car.
    Electric(ElectricState),
}

impl VariantState {
    /// Returns the discriminant tag.
    #[must_use]
    pub fn tag(&self) -> VehicleVariant {
        match self {
            Self::Standard(_) => VehicleVariant::Standard,
            Self::Motorcycle(_) => VehicleVariant::Motorcycle,
            Self::Truck(_) => VehicleVariant::Truck,
            Self::Electric(_) => VehicleVariant::Electric,
        }
    }

    /// Whether gear selection is out of the driver's hands.
    #[must_use]
    pub fn automatic_transmission(&self) -> bool {
        match self {
            Self::Standard(state) => state.automatic_transmission(),
            Self::Electric(_) => true,
            Self::Motorcycle(_) | Self::Truck(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_tag_parses_case_insensitively() {
        assert_eq!("Truck".parse::<VehicleVariant>().unwrap(), VehicleVariant::Truck);
        assert_eq!(
            " electric ".parse::<VehicleVariant>().unwrap(),
            VehicleVariant::Electric
        );
    }

    #[test]
    fn test_unknown_variant_tag_is_rejected() {
        let err = "hovercraft".parse::<VehicleVariant>().unwrap_err();
        match err {
            DomainError::UnsupportedVariant(tag) => assert_eq!(tag, "hovercraft"),
            other => panic!("expected UnsupportedVariant, got {other:?}"),
        }
    }

    #[test]
    fn test_two_door_standard_is_manual() {
        let state = StandardState { doors: 2 };
        assert!(!state.automatic_transmission());
    }

    #[test]
    fn test_four_door_standard_is_automatic() {
        let state = StandardState { doors: 4 };
        assert!(state.automatic_transmission());
    }

    #[test]
    fn test_trailer_scales_effective_capacity() {
        let mut truck = TruckState {
            base_cargo_capacity: 10.0,
            current_cargo: 0.0,
            trailer_attached: false,
            axles: 3,
        };
        assert_eq!(truck.cargo_capacity(), 10.0);

        truck.trailer_attached = true;
        assert_eq!(truck.cargo_capacity(), 15.0);

        truck.trailer_attached = false;
        assert_eq!(truck.cargo_capacity(), 10.0);
    }
}
