//! Domain types shared by the hospital API and storage crates.

pub mod errors;
pub mod models;
