//! Core data types for the dealwatch service.

pub mod deal;
pub mod filter;
pub mod seen;

pub use deal::*;
pub use filter::*;
pub use seen::*;
