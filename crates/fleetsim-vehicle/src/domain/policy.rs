//! Per-variant numeric policy consulted by the vehicle aggregate.
//!
//! Pure functions over the variant state. Nothing here mutates; the
//! aggregate applies whatever magnitudes this table hands back.

use super::variant::{MotorcycleStyle, VariantState};

/// Distance between services, in kilometres.
pub const SERVICE_INTERVAL_KM: u32 = 10_000;

/// Effective cargo capacity multiplier while a trailer is attached.
pub const TRAILER_CAPACITY_MULTIPLIER: f64 = 1.5;

/// Fast-charge rate applied when an electric vehicle replenishes,
/// in kWh per hour of charging.
pub const CHARGING_RATE_KWH_PER_HOUR: f64 = 50.0;

/// Energy recovered per km/h shed under regenerative braking, in kWh.
pub const REGEN_KWH_PER_KMH: f64 = 0.01;

/// Eco mode adjusts range efficiency by this much, in km per kWh.
pub const ECO_MODE_EFFICIENCY_DELTA: f64 = 1.0;

/// Highest selectable gear on manual variants.
pub const TOP_GEAR: u8 = 6;

/// Minimum speed in km/h before a motorcycle can lift the front wheel.
pub const WHEELIE_MIN_SPEED_KMH: u32 = 30;

/// One acceleration step: speed gained and energy spent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccelStep {
    /// Speed gained, in km/h.
    pub speed_gain: u32,
    /// Energy spent, in the vehicle's resource unit.
    pub resource_cost: f64,
}

/// Top speed in km/h for the given variant state.
///
/// Trucks lose up to 30 % of their base top speed as the load factor
/// approaches 1; the result is floored to a whole km/h.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn max_speed(variant: &VariantState) -> u32 {
    match variant {
        VariantState::Standard(state) => {
            if state.automatic_transmission() {
                180
            } else {
                160
            }
        }
        VariantState::Motorcycle(state) => {
            let bonus = if state.style == MotorcycleStyle::Sport {
                50
            } else {
                0
            };
            (state.engine_size_cc / 5 + bonus).min(300)
        }
        VariantState::Truck(state) => {
            let base: u32 = if state.trailer_attached { 90 } else { 120 };
            (f64::from(base) * (1.0 - 0.3 * state.load_factor())).floor() as u32
        }
        VariantState::Electric(state) => {
            if state.eco_mode {
                120
            } else {
                200
            }
        }
    }
}

/// Speed gained and energy spent by one acceleration call.
///
/// Trucks accelerate slower and burn more the heavier they are loaded,
/// never gaining less than 2 km/h per call.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn accel_step(variant: &VariantState) -> AccelStep {
    match variant {
        VariantState::Standard(_) => AccelStep {
            speed_gain: 10,
            resource_cost: 0.5,
        },
        VariantState::Motorcycle(_) => AccelStep {
            speed_gain: 15,
            resource_cost: 0.3,
        },
        VariantState::Truck(state) => {
            let load_factor = state.load_factor();
            let gain = (5.0 * (1.0 - 0.5 * load_factor)).floor() as u32;
            AccelStep {
                speed_gain: gain.max(2),
                resource_cost: 1.0 + 0.5 * load_factor,
            }
        }
        VariantState::Electric(state) => {
            if state.eco_mode {
                AccelStep {
                    speed_gain: 8,
                    resource_cost: 0.15,
                }
            } else {
                AccelStep {
                    speed_gain: 12,
                    resource_cost: 0.25,
                }
            }
        }
    }
}

/// Speed shed by one brake call, in km/h.
#[must_use]
pub fn brake_step(variant: &VariantState) -> u32 {
    match variant {
        VariantState::Standard(_) | VariantState::Motorcycle(_) | VariantState::Truck(_) => 10,
        VariantState::Electric(_) => 12,
    }
}

/// The ordered inspection checklist run during maintenance.
///
/// The text is informational; completing maintenance always resets the
/// service counter regardless of checklist content.
#[must_use]
pub fn maintenance_checklist(variant: &VariantState) -> Vec<String> {
    match variant {
        VariantState::Standard(_) => vec![
            "Changing engine oil".to_owned(),
            "Replacing air filter".to_owned(),
            "Checking fluid levels".to_owned(),
        ],
        VariantState::Motorcycle(_) => vec![
            "Checking chain tension".to_owned(),
            "Inspecting tire wear".to_owned(),
            "Checking brake pads".to_owned(),
        ],
        VariantState::Truck(state) => {
            let mut checklist = vec![
                "Checking hydraulic systems".to_owned(),
                "Inspecting cargo area".to_owned(),
                format!("Checking {} axles", state.axles),
            ];
            if state.trailer_attached {
                checklist.push("Inspecting trailer connection".to_owned());
            }
            checklist
        }
        VariantState::Electric(_) => vec![
            "Checking battery health".to_owned(),
            "Testing electric motor".to_owned(),
            "Inspecting charging port".to_owned(),
            "Updating software".to_owned(),
        ],
    }
}
