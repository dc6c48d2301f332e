//! Chart specifications for the field forecast views

pub mod builder;
pub mod model;

pub use builder::*;
pub use model::*;
