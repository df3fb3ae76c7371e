//! API handlers module

pub mod figures;
pub mod health;
pub mod stats;
