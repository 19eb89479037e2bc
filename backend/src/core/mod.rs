//! Simulation time primitives

pub mod time;
