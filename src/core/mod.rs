pub mod config;
pub mod error;
pub mod types;

pub use config::TacticsConfig;
pub use error::{Result, TacticsError};
