//! Concert domain entities.

pub mod model;

pub use model::Concert;
