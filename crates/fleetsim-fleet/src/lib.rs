//! Fleetsim — fleet ownership collaborator.
//!
//! A thin aggregate over the vehicle core: it holds vehicles, filters
//! and iterates them, and sweeps maintenance over the ones that are
//! due. All vehicle semantics stay in `fleetsim-vehicle`.

pub mod owner;
