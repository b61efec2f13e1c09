// src/regions/mod.rs
#![allow(clippy::module_name_repetitions)]

pub mod coverer;
pub mod region;

pub use coverer::{cover_polygon, CoveredCell, Covering, RegionCoverer};
pub use region::Region;
