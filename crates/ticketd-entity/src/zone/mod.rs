//! Zone domain entities.

pub mod model;

pub use model::Zone;
