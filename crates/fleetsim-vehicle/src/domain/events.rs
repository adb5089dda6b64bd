//! Domain events for the vehicle bounded context.
//!
//! Every successful mutation returns exactly one of these instead of
//! narrating to the console; the reporting collaborator decides how
//! (or whether) to render them.

use fleetsim_core::event::{DomainEvent, EventMetadata};
use serde::{Deserialize, Serialize};

/// Event payload variants, one per mutation of the vehicle aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum VehicleEventKind {
    /// The engine (or motor) came on.
    Started,
    /// The vehicle shut down; speed and gear were zeroed.
    Stopped,
    /// One acceleration step was applied.
    Accelerated {
        /// Speed after the step, in km/h.
        speed: u32,
        /// Energy reserve after the step.
        resource_level: f64,
    },
    /// One brake step was applied.
    Braked {
        /// Speed after the step, in km/h.
        speed: u32,
        /// Energy recovered by regenerative braking; `None` on
        /// non-electric variants.
        energy_recovered: Option<f64>,
    },
    /// A manual gearbox moved to a new gear.
    GearChanged {
        /// The selected gear.
        gear: u8,
    },
    /// Fuel was added to the tank.
    Refueled {
        /// Litres actually added after clamping at capacity.
        liters_added: f64,
        /// Fuel level after the top-up.
        resource_level: f64,
    },
    /// The battery was charged for some time.
    Charged {
        /// Hours spent on the charger.
        hours: f64,
        /// Energy actually added after clamping at capacity, in kWh.
        energy_added: f64,
        /// Battery level after charging, in kWh.
        resource_level: f64,
    },
    /// The variant checklist was run and the service counter reset.
    MaintenancePerformed {
        /// The inspection items that were run.
        checklist: Vec<String>,
    },
    /// Cargo was loaded onto a truck.
    CargoLoaded {
        /// Tonnes loaded by this call.
        weight: f64,
        /// Cargo on board afterwards.
        current_cargo: f64,
    },
    /// Cargo was unloaded from a truck.
    CargoUnloaded {
        /// Tonnes unloaded by this call.
        weight: f64,
        /// Cargo on board afterwards.
        current_cargo: f64,
    },
    /// A trailer was attached; capacity scaled up.
    TrailerAttached {
        /// Effective cargo capacity with the trailer.
        cargo_capacity: f64,
    },
    /// A trailer was detached; capacity restored exactly.
    TrailerDetached {
        /// Effective cargo capacity without the trailer.
        cargo_capacity: f64,
        /// True when the remaining cargo now exceeds capacity. The
        /// cargo is not forcibly unloaded; this flag is the warning.
        cargo_overloaded: bool,
    },
    /// Eco mode was toggled on an electric vehicle.
    EcoModeToggled {
        /// The new eco mode flag.
        eco_mode: bool,
        /// Efficiency after the adjustment, in km per kWh.
        efficiency_km_per_kwh: f64,
    },
    /// A motorcycle lifted its front wheel.
    WheeliePerformed {
        /// Speed during the stunt, in km/h.
        speed: u32,
    },
}

impl VehicleEventKind {
    /// The event type name (used for serialization routing).
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Started => "vehicle.started",
            Self::Stopped => "vehicle.stopped",
            Self::Accelerated { .. } => "vehicle.accelerated",
            Self::Braked { .. } => "vehicle.braked",
            Self::GearChanged { .. } => "vehicle.gear_changed",
            Self::Refueled { .. } => "vehicle.refueled",
            Self::Charged { .. } => "vehicle.charged",
            Self::MaintenancePerformed { .. } => "vehicle.maintenance_performed",
            Self::CargoLoaded { .. } => "vehicle.cargo_loaded",
            Self::CargoUnloaded { .. } => "vehicle.cargo_unloaded",
            Self::TrailerAttached { .. } => "vehicle.trailer_attached",
            Self::TrailerDetached { .. } => "vehicle.trailer_detached",
            Self::EcoModeToggled { .. } => "vehicle.eco_mode_toggled",
            Self::WheeliePerformed { .. } => "vehicle.wheelie_performed",
        }
    }
}

/// Domain event envelope for the vehicle bounded context.
#[derive(Debug, Clone)]
pub struct VehicleEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: VehicleEventKind,
}

impl DomainEvent for VehicleEvent {
    fn event_type(&self) -> &'static str {
        self.kind.type_name()
    }

    fn to_payload(&self) -> serde_json::Value {
        // Serialization of derived Serialize types to Value is infallible.
        serde_json::to_value(&self.kind).expect("VehicleEventKind serialization is infallible")
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_name_matches_kind() {
        assert_eq!(VehicleEventKind::Started.type_name(), "vehicle.started");
        assert_eq!(
            VehicleEventKind::TrailerDetached {
                cargo_capacity: 10.0,
                cargo_overloaded: false,
            }
            .type_name(),
            "vehicle.trailer_detached"
        );
    }

    #[test]
    fn test_payload_round_trips_through_json() {
        let kind = VehicleEventKind::Accelerated {
            speed: 20,
            resource_level: 47.0,
        };
        let value = serde_json::to_value(&kind).unwrap();
        let back: VehicleEventKind = serde_json::from_value(value).unwrap();

        assert_eq!(back, kind);
    }
}
