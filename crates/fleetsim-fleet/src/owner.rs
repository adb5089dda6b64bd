//! The owner aggregate: a named collection of vehicles.

use fleetsim_core::clock::Clock;
use fleetsim_core::error::DomainError;
use fleetsim_vehicle::domain::aggregates::{OperationOutcome, Vehicle};
use fleetsim_vehicle::domain::events::VehicleEvent;
use fleetsim_vehicle::domain::variant::VehicleVariant;
use tracing::debug;
use uuid::Uuid;

/// A vehicle owner. Owns its vehicles by value; the core prescribes no
/// vehicle-side ownership tracking.
#[derive(Debug)]
pub struct Owner {
    /// Owner identifier.
    pub id: Uuid,
    name: String,
    vehicles: Vec<Vehicle>,
}

impl Owner {
    /// Creates an owner with an empty collection.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidConstructionParameter` when the
    /// name is blank.
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::InvalidConstructionParameter {
                field: "name",
                reason: "must not be blank".to_owned(),
            });
        }
        Ok(Self {
            id: Uuid::new_v4(),
            name,
            vehicles: Vec::new(),
        })
    }

    /// The owner's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Takes ownership of a vehicle.
    pub fn add_vehicle(&mut self, vehicle: Vehicle) {
        debug!(
            owner = %self.name,
            vehicle_id = %vehicle.id,
            variant = %vehicle.variant(),
            "vehicle added to fleet"
        );
        self.vehicles.push(vehicle);
    }

    /// Removes and returns a vehicle by id, if present.
    pub fn remove_vehicle(&mut self, vehicle_id: Uuid) -> Option<Vehicle> {
        let index = self.vehicles.iter().position(|v| v.id == vehicle_id)?;
        let vehicle = self.vehicles.remove(index);
        debug!(owner = %self.name, vehicle_id = %vehicle_id, "vehicle removed from fleet");
        Some(vehicle)
    }

    /// Read-only access to a vehicle by id.
    #[must_use]
    pub fn vehicle(&self, vehicle_id: Uuid) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.id == vehicle_id)
    }

    /// Mutable access to a vehicle by id, for driving it.
    pub fn vehicle_mut(&mut self, vehicle_id: Uuid) -> Option<&mut Vehicle> {
        self.vehicles.iter_mut().find(|v| v.id == vehicle_id)
    }

    /// All vehicles, in insertion order.
    #[must_use]
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    /// Number of vehicles owned.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    /// Whether the collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    /// Vehicles of the given variant, in insertion order.
    #[must_use]
    pub fn by_variant(&self, variant: VehicleVariant) -> Vec<&Vehicle> {
        self.vehicles
            .iter()
            .filter(|v| v.variant() == variant)
            .collect()
    }

    /// The vehicle with the highest top speed under its current state,
    /// if any are owned.
    #[must_use]
    pub fn fastest(&self) -> Option<&Vehicle> {
        self.vehicles.iter().max_by_key(|v| v.max_speed())
    }

    /// Vehicles currently overdue for a service.
    #[must_use]
    pub fn needing_service(&self) -> Vec<&Vehicle> {
        self.vehicles.iter().filter(|v| v.needs_service()).collect()
    }

    /// Performs maintenance on every service-due vehicle and returns
    /// the emitted events. Vehicles that are not due are untouched.
    pub fn service_all(&mut self, clock: &dyn Clock) -> Vec<VehicleEvent> {
        let mut events = Vec::new();
        for vehicle in &mut self.vehicles {
            if !vehicle.needs_service() {
                continue;
            }
            debug!(owner = %self.name, vehicle_id = %vehicle.id, "servicing vehicle");
            if let OperationOutcome::Applied(event) = vehicle.perform_maintenance(clock) {
                events.push(event);
            }
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use fleetsim_test_support::FixedClock;
    use fleetsim_vehicle::domain::factory::{self, VariantConfig, VehicleBlueprint};

    fn fixed_clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap())
    }

    fn vehicle(variant: VehicleVariant) -> Vehicle {
        factory::create(VehicleBlueprint {
            brand: "Honda".to_owned(),
            model: "Model B".to_owned(),
            year: 2021,
            config: VariantConfig::defaults_for(variant),
        })
        .unwrap()
    }

    /// Drives until the service counter crosses the interval, topping
    /// the tank up along the way.
    fn drive_until_service_due(vehicle: &mut Vehicle, clock: &FixedClock) {
        vehicle.start(clock).unwrap();
        while !vehicle.needs_service() {
            vehicle.accelerate(clock);
            vehicle.replenish(1.0, clock);
        }
        vehicle.stop(clock);
    }

    #[test]
    fn test_blank_owner_name_is_rejected() {
        let result = Owner::new("   ");

        match result.unwrap_err() {
            DomainError::InvalidConstructionParameter { field, .. } => {
                assert_eq!(field, "name");
            }
            other => panic!("expected InvalidConstructionParameter, got {other:?}"),
        }
    }

    #[test]
    fn test_add_and_remove_round_trip() {
        let mut owner = Owner::new("Dana").unwrap();
        let car = vehicle(VehicleVariant::Standard);
        let car_id = car.id;

        owner.add_vehicle(car);
        assert_eq!(owner.len(), 1);
        assert!(owner.vehicle(car_id).is_some());

        let removed = owner.remove_vehicle(car_id).unwrap();
        assert_eq!(removed.id, car_id);
        assert!(owner.is_empty());
        assert!(owner.remove_vehicle(car_id).is_none());
    }

    #[test]
    fn test_by_variant_filters_in_insertion_order() {
        let mut owner = Owner::new("Dana").unwrap();
        owner.add_vehicle(vehicle(VehicleVariant::Truck));
        owner.add_vehicle(vehicle(VehicleVariant::Electric));
        owner.add_vehicle(vehicle(VehicleVariant::Truck));

        let trucks = owner.by_variant(VehicleVariant::Truck);

        assert_eq!(trucks.len(), 2);
        assert!(trucks.iter().all(|v| v.variant() == VehicleVariant::Truck));
        assert_eq!(owner.by_variant(VehicleVariant::Motorcycle).len(), 0);
    }

    #[test]
    fn test_fastest_agrees_with_the_policy_table() {
        let mut owner = Owner::new("Dana").unwrap();
        // Default standard is automatic: 180. Default electric out of
        // eco mode: 200. Default truck unloaded: 120.
        owner.add_vehicle(vehicle(VehicleVariant::Standard));
        owner.add_vehicle(vehicle(VehicleVariant::Truck));
        owner.add_vehicle(vehicle(VehicleVariant::Electric));

        let fastest = owner.fastest().unwrap();

        assert_eq!(fastest.variant(), VehicleVariant::Electric);
        assert_eq!(fastest.max_speed(), 200);
    }

    #[test]
    fn test_fastest_on_empty_fleet_is_none() {
        let owner = Owner::new("Dana").unwrap();

        assert!(owner.fastest().is_none());
    }

    #[test]
    fn test_service_all_resets_exactly_the_due_vehicles() {
        let clock = fixed_clock();
        let mut owner = Owner::new("Dana").unwrap();

        let mut worn = vehicle(VehicleVariant::Standard);
        drive_until_service_due(&mut worn, &clock);
        let worn_id = worn.id;
        let fresh = vehicle(VehicleVariant::Electric);
        let fresh_id = fresh.id;

        owner.add_vehicle(worn);
        owner.add_vehicle(fresh);
        assert_eq!(owner.needing_service().len(), 1);

        let events = owner.service_all(&clock);

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].metadata.vehicle_id, worn_id);
        assert_eq!(
            owner.vehicle(worn_id).unwrap().distance_since_service(),
            0
        );
        assert_eq!(
            owner.vehicle(fresh_id).unwrap().distance_since_service(),
            0
        );
        assert!(owner.needing_service().is_empty());
    }
}
