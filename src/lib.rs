//! Tank Tactics - grid pathfinding and per-tick decision policies for tank AI

pub mod arena;
pub mod core;
pub mod pathfinding;
pub mod spatial;
pub mod tactics;
