// src/math/mod.rs
#![allow(clippy::module_name_repetitions)] // Common in math modules

pub mod predicates;
pub mod vec3d;
