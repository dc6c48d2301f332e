//! Domain models for field monitoring dashboards

mod farm;
mod field;
mod forecast;
mod requests;
mod sensor;

pub use farm::*;
pub use field::*;
pub use forecast::*;
pub use requests::*;
pub use sensor::*;
