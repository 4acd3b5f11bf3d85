//! Reference level and skirmish loop for exercising the decision engine

pub mod level;
pub mod skirmish;

pub use level::Arena;
pub use skirmish::{Skirmish, SkirmishReport, SkirmishSettings};
