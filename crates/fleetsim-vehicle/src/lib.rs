//! Fleetsim — vehicle simulation bounded context.
//!
//! The vehicle state machine (running/speed/gear/energy/odometer), the
//! per-variant policy table it consults, and the factory that
//! constructs vehicles polymorphically from typed blueprints.

pub mod domain;
