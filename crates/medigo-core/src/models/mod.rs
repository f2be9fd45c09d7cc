//! Domain models for the MediGo system.

mod medication;
mod operations;
mod pharmacy;
mod search;

pub use medication::*;
pub use operations::*;
pub use pharmacy::*;
pub use search::*;
