//! Utility modules

pub mod decimal;
pub mod memory_provider;
pub mod validation;

pub use decimal::*;
pub use memory_provider::*;
pub use validation::*;
