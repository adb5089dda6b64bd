//! Demonstration driver: builds a small mixed fleet and narrates a
//! test drive. All domain behavior lives in the core crates; this
//! binary only sequences calls and renders the returned events.

use std::error::Error;

use fleetsim_core::clock::{Clock, SystemClock};
use fleetsim_core::event::DomainEvent;
use fleetsim_core::random::SeededRandom;
use fleetsim_fleet::owner::Owner;
use fleetsim_vehicle::domain::aggregates::{OperationOutcome, Vehicle};
use fleetsim_vehicle::domain::factory::{self, VariantConfig, VehicleBlueprint};
use fleetsim_vehicle::domain::variant::{MotorcycleStyle, VehicleVariant};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn narrate(vehicle: &Vehicle, outcome: &OperationOutcome) {
    match outcome {
        OperationOutcome::Applied(event) => info!(
            vehicle = %format!("{} {}", vehicle.brand(), vehicle.model()),
            event = event.event_type(),
            payload = %event.to_payload(),
            "applied"
        ),
        OperationOutcome::NoOp(reason) => info!(
            vehicle = %format!("{} {}", vehicle.brand(), vehicle.model()),
            reason = ?reason,
            "no-op"
        ),
    }
}

fn test_drive(vehicle: &mut Vehicle, clock: &dyn Clock) {
    match vehicle.start(clock) {
        Ok(outcome) => narrate(vehicle, &outcome),
        Err(err) => {
            warn!(vehicle = %vehicle.brand(), error = %err, "start failed");
            return;
        }
    }
    for _ in 0..3 {
        let outcome = vehicle.accelerate(clock);
        narrate(vehicle, &outcome);
    }
    let outcome = vehicle.change_gear(3, clock);
    narrate(vehicle, &outcome);
    let outcome = vehicle.wheelie(clock);
    narrate(vehicle, &outcome);
    let outcome = vehicle.brake(clock);
    narrate(vehicle, &outcome);
    let outcome = vehicle.stop(clock);
    narrate(vehicle, &outcome);
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let clock = SystemClock;

    // FLEETSIM_SEED makes a run reproducible end to end.
    let mut random = match std::env::var("FLEETSIM_SEED") {
        Ok(seed) => SeededRandom::from_seed(seed.parse()?),
        Err(_) => SeededRandom::from_entropy(),
    };

    let mut owner = Owner::new("Jordan")?;

    owner.add_vehicle(factory::create(VehicleBlueprint {
        brand: "Toyota".to_owned(),
        model: "Camry".to_owned(),
        year: 2022,
        config: VariantConfig::Standard { doors: Some(4) },
    })?);
    owner.add_vehicle(factory::create(VehicleBlueprint {
        brand: "Honda".to_owned(),
        model: "Fireblade".to_owned(),
        year: 2023,
        config: VariantConfig::Motorcycle {
            sidecar: Some(false),
            engine_size_cc: Some(1000),
            style: Some(MotorcycleStyle::Sport),
        },
    })?);
    owner.add_vehicle(factory::create(VehicleBlueprint {
        brand: "Volvo".to_owned(),
        model: "FH16".to_owned(),
        year: 2023,
        config: VariantConfig::Truck {
            cargo_capacity: Some(20.0),
            axles: Some(4),
        },
    })?);
    owner.add_vehicle(factory::create(VehicleBlueprint {
        brand: "Tesla".to_owned(),
        model: "Model 3".to_owned(),
        year: 2024,
        config: VariantConfig::Electric {
            battery_capacity: Some(75.0),
            charging_port: None,
        },
    })?);
    owner.add_vehicle(factory::create_random(&mut random)?);

    info!(fleet_size = owner.len(), "fleet assembled");

    for vehicle in owner.vehicles() {
        info!(
            vehicle = %format!("{} {} ({})", vehicle.brand(), vehicle.model(), vehicle.year()),
            variant = %vehicle.variant(),
            max_speed = vehicle.max_speed(),
            "roster entry"
        );
    }

    // Drive everything through the shared lifecycle.
    let ids: Vec<_> = owner.vehicles().iter().map(|v| v.id).collect();
    for id in &ids {
        if let Some(vehicle) = owner.vehicle_mut(*id) {
            test_drive(vehicle, &clock);
        }
    }

    // Truck-specific: cargo and trailer work.
    let truck_id = owner.by_variant(VehicleVariant::Truck).first().map(|v| v.id);
    if let Some(truck) = truck_id.and_then(|id| owner.vehicle_mut(id)) {
        let outcome = truck.attach_trailer(&clock);
        narrate(truck, &outcome);
        match truck.load_cargo(25.0, &clock) {
            Ok(outcome) => narrate(truck, &outcome),
            Err(err) => warn!(error = %err, "load rejected"),
        }
        let outcome = truck.detach_trailer(&clock);
        narrate(truck, &outcome);
    }

    // Electric-specific: eco mode and charging.
    let ev_id = owner.by_variant(VehicleVariant::Electric).first().map(|v| v.id);
    if let Some(ev) = ev_id.and_then(|id| owner.vehicle_mut(id)) {
        let outcome = ev.toggle_eco_mode(&clock);
        narrate(ev, &outcome);
        let outcome = ev.replenish(0.5, &clock);
        narrate(ev, &outcome);
        if let Some(range) = ev.estimated_range() {
            info!(range_km = range, "estimated range");
        }
    }

    if let Some(fastest) = owner.fastest() {
        info!(
            vehicle = %format!("{} {}", fastest.brand(), fastest.model()),
            max_speed = fastest.max_speed(),
            "fastest in fleet"
        );
    }

    let serviced = owner.service_all(&clock);
    info!(serviced = serviced.len(), "maintenance sweep complete");

    Ok(())
}
