//! The vehicle aggregate: a state machine over running/speed/gear,
//! the energy reserve, and the service odometer.
//!
//! Operations validate preconditions, pull magnitudes from the policy
//! table, mutate, and hand back a discriminated outcome. Mutations are
//! all-or-nothing; a failed or no-op call leaves every field untouched.

use fleetsim_core::clock::Clock;
use fleetsim_core::error::DomainError;
use fleetsim_core::event::EventMetadata;
use uuid::Uuid;

use super::events::{VehicleEvent, VehicleEventKind};
use super::policy;
use super::resource::{ResourceTank, ResourceUnit};
use super::variant::{VariantState, VehicleVariant};

/// Why an operation left the vehicle untouched.
///
/// A no-op is not a failure: the preconditions were simply unmet, and
/// the caller may observe the unchanged state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoOpReason {
    /// `start` on a vehicle that is already running.
    AlreadyRunning,
    /// `stop` on a vehicle that is already stopped.
    AlreadyStopped,
    /// The operation requires a running vehicle.
    NotRunning,
    /// The operation requires energy and the reserve is empty.
    ResourceDepleted,
    /// `brake` with nothing to slow down.
    Stationary,
    /// Gear selection on a self-shifting variant.
    AutomaticTransmission,
    /// The requested gear is outside `[0, 6]`.
    GearOutOfRange,
    /// The operation does not apply to this variant.
    VariantMismatch,
    /// `attach_trailer` with a trailer already attached.
    TrailerAlreadyAttached,
    /// `detach_trailer` with no trailer attached.
    NoTrailerAttached,
    /// A wheelie is impossible with a sidecar fitted.
    SidecarAttached,
    /// Too slow (or not moving at all) for a wheelie.
    TooSlow,
    /// The requested quantity was zero, negative, or not a number.
    NothingRequested,
}

/// Result of a mutator: either exactly one event was applied, or the
/// preconditions were unmet and the state is unchanged.
#[derive(Debug)]
pub enum OperationOutcome {
    /// The operation changed state; the event describes what happened.
    Applied(VehicleEvent),
    /// Preconditions were not met; nothing changed.
    NoOp(NoOpReason),
}

/// The aggregate root for a vehicle.
#[derive(Debug, Clone)]
pub struct Vehicle {
    /// Aggregate identifier.
    pub id: Uuid,
    /// Number of events applied; stamps event sequence numbers.
    version: i64,
    brand: String,
    model: String,
    year: u16,
    running: bool,
    speed: u32,
    gear: u8,
    tank: ResourceTank,
    odometer: u32,
    distance_since_service: u32,
    variant: VariantState,
}

impl Vehicle {
    /// Creates a vehicle at rest. Only the factory constructs these,
    /// after validating the blueprint.
    pub(crate) fn new(
        brand: String,
        model: String,
        year: u16,
        tank: ResourceTank,
        variant: VariantState,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            version: 0,
            brand,
            model,
            year,
            running: false,
            speed: 0,
            gear: 0,
            tank,
            odometer: 0,
            distance_since_service: 0,
            variant,
        }
    }

    fn emit(&mut self, kind: VehicleEventKind, clock: &dyn Clock) -> VehicleEvent {
        self.version += 1;
        VehicleEvent {
            metadata: EventMetadata {
                event_id: Uuid::new_v4(),
                event_type: kind.type_name().to_owned(),
                vehicle_id: self.id,
                sequence_number: self.version,
                occurred_at: clock.now(),
            },
            kind,
        }
    }

    /// Attempts the Stopped→Running transition.
    ///
    /// Idempotent when already running.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InsufficientResource` when the tank or
    /// battery is empty; the vehicle stays stopped.
    pub fn start(&mut self, clock: &dyn Clock) -> Result<OperationOutcome, DomainError> {
        if self.running {
            return Ok(OperationOutcome::NoOp(NoOpReason::AlreadyRunning));
        }
        if self.tank.is_empty() {
            return Err(DomainError::InsufficientResource);
        }
        self.running = true;
        Ok(OperationOutcome::Applied(
            self.emit(VehicleEventKind::Started, clock),
        ))
    }

    /// Shuts the vehicle down, zeroing speed and gear.
    pub fn stop(&mut self, clock: &dyn Clock) -> OperationOutcome {
        if !self.running {
            return OperationOutcome::NoOp(NoOpReason::AlreadyStopped);
        }
        self.running = false;
        self.speed = 0;
        self.gear = 0;
        OperationOutcome::Applied(self.emit(VehicleEventKind::Stopped, clock))
    }

    /// Applies one variant-specific acceleration step and advances the
    /// odometer by one kilometre.
    pub fn accelerate(&mut self, clock: &dyn Clock) -> OperationOutcome {
        if !self.running {
            return OperationOutcome::NoOp(NoOpReason::NotRunning);
        }
        if self.tank.is_empty() {
            return OperationOutcome::NoOp(NoOpReason::ResourceDepleted);
        }
        let step = policy::accel_step(&self.variant);
        self.speed += step.speed_gain;
        self.tank.drain(step.resource_cost);
        self.odometer += 1;
        self.distance_since_service += 1;
        let kind = VehicleEventKind::Accelerated {
            speed: self.speed,
            resource_level: self.tank.level(),
        };
        OperationOutcome::Applied(self.emit(kind, clock))
    }

    /// Applies one brake step, flooring speed at zero. Electric
    /// vehicles recover energy in proportion to the speed shed, capped
    /// at battery capacity.
    pub fn brake(&mut self, clock: &dyn Clock) -> OperationOutcome {
        if self.speed == 0 {
            return OperationOutcome::NoOp(NoOpReason::Stationary);
        }
        let old_speed = self.speed;
        self.speed = self.speed.saturating_sub(policy::brake_step(&self.variant));
        let energy_recovered = match &self.variant {
            VariantState::Electric(_) => {
                let shed = old_speed - self.speed;
                Some(
                    self.tank
                        .replenish(f64::from(shed) * policy::REGEN_KWH_PER_KMH),
                )
            }
            _ => None,
        };
        let kind = VehicleEventKind::Braked {
            speed: self.speed,
            energy_recovered,
        };
        OperationOutcome::Applied(self.emit(kind, clock))
    }

    /// Selects a gear on manually-geared variants. Self-shifting
    /// variants report a no-op and keep their gear at the sentinel.
    pub fn change_gear(&mut self, gear: u8, clock: &dyn Clock) -> OperationOutcome {
        if self.variant.automatic_transmission() {
            return OperationOutcome::NoOp(NoOpReason::AutomaticTransmission);
        }
        if !self.running {
            return OperationOutcome::NoOp(NoOpReason::NotRunning);
        }
        if gear > policy::TOP_GEAR {
            return OperationOutcome::NoOp(NoOpReason::GearOutOfRange);
        }
        self.gear = gear;
        OperationOutcome::Applied(self.emit(VehicleEventKind::GearChanged { gear }, clock))
    }

    /// Adds energy to the reserve, clamping at capacity.
    ///
    /// On fuel variants `amount` is litres; on the Electric variant it
    /// is hours on the charger, converted at the fixed charging rate.
    pub fn replenish(&mut self, amount: f64, clock: &dyn Clock) -> OperationOutcome {
        if !amount.is_finite() || amount <= 0.0 {
            return OperationOutcome::NoOp(NoOpReason::NothingRequested);
        }
        let kind = match self.tank.unit() {
            ResourceUnit::Liters => {
                let liters_added = self.tank.replenish(amount);
                VehicleEventKind::Refueled {
                    liters_added,
                    resource_level: self.tank.level(),
                }
            }
            ResourceUnit::KilowattHours => {
                let energy_added = self
                    .tank
                    .replenish(amount * policy::CHARGING_RATE_KWH_PER_HOUR);
                VehicleEventKind::Charged {
                    hours: amount,
                    energy_added,
                    resource_level: self.tank.level(),
                }
            }
        };
        OperationOutcome::Applied(self.emit(kind, clock))
    }

    /// Runs the variant checklist and resets the service counter.
    /// Always succeeds; physical state is untouched.
    pub fn perform_maintenance(&mut self, clock: &dyn Clock) -> OperationOutcome {
        let checklist = policy::maintenance_checklist(&self.variant);
        self.distance_since_service = 0;
        OperationOutcome::Applied(self.emit(VehicleEventKind::MaintenancePerformed { checklist }, clock))
    }

    /// Whether the vehicle is overdue for a service.
    #[must_use]
    pub fn needs_service(&self) -> bool {
        self.distance_since_service > policy::SERVICE_INTERVAL_KM
    }

    /// Loads cargo onto a truck. Other variants report a no-op.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::OverCapacity`, without mutating, when the
    /// load would exceed the effective capacity.
    pub fn load_cargo(
        &mut self,
        weight: f64,
        clock: &dyn Clock,
    ) -> Result<OperationOutcome, DomainError> {
        if !weight.is_finite() || weight <= 0.0 {
            return Ok(OperationOutcome::NoOp(NoOpReason::NothingRequested));
        }
        let current_cargo = {
            let VariantState::Truck(truck) = &mut self.variant else {
                return Ok(OperationOutcome::NoOp(NoOpReason::VariantMismatch));
            };
            let capacity = truck.cargo_capacity();
            if truck.current_cargo + weight > capacity {
                return Err(DomainError::OverCapacity {
                    requested: weight,
                    available: capacity - truck.current_cargo,
                });
            }
            truck.current_cargo += weight;
            truck.current_cargo
        };
        let kind = VehicleEventKind::CargoLoaded {
            weight,
            current_cargo,
        };
        Ok(OperationOutcome::Applied(self.emit(kind, clock)))
    }

    /// Unloads cargo from a truck. Other variants report a no-op.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InsufficientCargo`, without mutating, when
    /// more is requested than is on board.
    pub fn unload_cargo(
        &mut self,
        weight: f64,
        clock: &dyn Clock,
    ) -> Result<OperationOutcome, DomainError> {
        if !weight.is_finite() || weight <= 0.0 {
            return Ok(OperationOutcome::NoOp(NoOpReason::NothingRequested));
        }
        let current_cargo = {
            let VariantState::Truck(truck) = &mut self.variant else {
                return Ok(OperationOutcome::NoOp(NoOpReason::VariantMismatch));
            };
            if weight > truck.current_cargo {
                return Err(DomainError::InsufficientCargo {
                    requested: weight,
                    loaded: truck.current_cargo,
                });
            }
            truck.current_cargo -= weight;
            truck.current_cargo
        };
        let kind = VehicleEventKind::CargoUnloaded {
            weight,
            current_cargo,
        };
        Ok(OperationOutcome::Applied(self.emit(kind, clock)))
    }

    /// Attaches a trailer, scaling effective capacity by 1.5.
    pub fn attach_trailer(&mut self, clock: &dyn Clock) -> OperationOutcome {
        let cargo_capacity = {
            let VariantState::Truck(truck) = &mut self.variant else {
                return OperationOutcome::NoOp(NoOpReason::VariantMismatch);
            };
            if truck.trailer_attached {
                return OperationOutcome::NoOp(NoOpReason::TrailerAlreadyAttached);
            }
            truck.trailer_attached = true;
            truck.cargo_capacity()
        };
        OperationOutcome::Applied(self.emit(VehicleEventKind::TrailerAttached { cargo_capacity }, clock))
    }

    /// Detaches the trailer, restoring the base capacity exactly. If
    /// the remaining cargo now exceeds capacity the event flags the
    /// overload; nothing is forcibly unloaded.
    pub fn detach_trailer(&mut self, clock: &dyn Clock) -> OperationOutcome {
        let (cargo_capacity, cargo_overloaded) = {
            let VariantState::Truck(truck) = &mut self.variant else {
                return OperationOutcome::NoOp(NoOpReason::VariantMismatch);
            };
            if !truck.trailer_attached {
                return OperationOutcome::NoOp(NoOpReason::NoTrailerAttached);
            }
            truck.trailer_attached = false;
            let capacity = truck.cargo_capacity();
            (capacity, truck.current_cargo > capacity)
        };
        let kind = VehicleEventKind::TrailerDetached {
            cargo_capacity,
            cargo_overloaded,
        };
        OperationOutcome::Applied(self.emit(kind, clock))
    }

    /// Flips eco mode on an electric vehicle, adjusting efficiency by
    /// ±1 km/kWh. Other variants report a no-op.
    pub fn toggle_eco_mode(&mut self, clock: &dyn Clock) -> OperationOutcome {
        let (eco_mode, efficiency_km_per_kwh) = {
            let VariantState::Electric(electric) = &mut self.variant else {
                return OperationOutcome::NoOp(NoOpReason::VariantMismatch);
            };
            electric.eco_mode = !electric.eco_mode;
            if electric.eco_mode {
                electric.efficiency_km_per_kwh += policy::ECO_MODE_EFFICIENCY_DELTA;
            } else {
                electric.efficiency_km_per_kwh -= policy::ECO_MODE_EFFICIENCY_DELTA;
            }
            (electric.eco_mode, electric.efficiency_km_per_kwh)
        };
        let kind = VehicleEventKind::EcoModeToggled {
            eco_mode,
            efficiency_km_per_kwh,
        };
        OperationOutcome::Applied(self.emit(kind, clock))
    }

    /// Lifts the front wheel, motorcycles only: requires motion above
    /// the stunt threshold and no sidecar. Pure showmanship; no state
    /// changes beyond the event record.
    pub fn wheelie(&mut self, clock: &dyn Clock) -> OperationOutcome {
        let VariantState::Motorcycle(moto) = &self.variant else {
            return OperationOutcome::NoOp(NoOpReason::VariantMismatch);
        };
        if moto.sidecar {
            return OperationOutcome::NoOp(NoOpReason::SidecarAttached);
        }
        if !self.running || self.speed <= policy::WHEELIE_MIN_SPEED_KMH {
            return OperationOutcome::NoOp(NoOpReason::TooSlow);
        }
        let kind = VehicleEventKind::WheeliePerformed { speed: self.speed };
        OperationOutcome::Applied(self.emit(kind, clock))
    }

    /// Estimated remaining range in km; `None` for non-electric
    /// variants.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn estimated_range(&self) -> Option<u32> {
        match &self.variant {
            VariantState::Electric(electric) => {
                Some((self.tank.level() * electric.efficiency_km_per_kwh).floor() as u32)
            }
            _ => None,
        }
    }

    /// Top speed under the current variant state.
    #[must_use]
    pub fn max_speed(&self) -> u32 {
        policy::max_speed(&self.variant)
    }

    /// Manufacturer brand.
    #[must_use]
    pub fn brand(&self) -> &str {
        &self.brand
    }

    /// Model name.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Model year.
    #[must_use]
    pub fn year(&self) -> u16 {
        self.year
    }

    /// The variant tag, for display and filtering.
    #[must_use]
    pub fn variant(&self) -> VehicleVariant {
        self.variant.tag()
    }

    /// The full variant extension state.
    #[must_use]
    pub fn variant_state(&self) -> &VariantState {
        &self.variant
    }

    /// Whether the engine or motor is on.
    #[must_use]
    pub fn running(&self) -> bool {
        self.running
    }

    /// Current speed in km/h.
    #[must_use]
    pub fn speed(&self) -> u32 {
        self.speed
    }

    /// Current gear; 0 both when stopped and on self-shifting variants.
    #[must_use]
    pub fn gear(&self) -> u8 {
        self.gear
    }

    /// Energy reserve level (litres or kWh by variant).
    #[must_use]
    pub fn resource_level(&self) -> f64 {
        self.tank.level()
    }

    /// Energy reserve capacity (litres or kWh by variant).
    #[must_use]
    pub fn resource_capacity(&self) -> f64 {
        self.tank.capacity()
    }

    /// The unit the reserve is measured in.
    #[must_use]
    pub fn resource_unit(&self) -> ResourceUnit {
        self.tank.unit()
    }

    /// Lifetime distance in km.
    #[must_use]
    pub fn odometer(&self) -> u32 {
        self.odometer
    }

    /// Distance since the last service in km.
    #[must_use]
    pub fn distance_since_service(&self) -> u32 {
        self.distance_since_service
    }

    /// Number of events applied to this vehicle.
    #[must_use]
    pub fn version(&self) -> i64 {
        self.version
    }
}
