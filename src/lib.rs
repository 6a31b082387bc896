//! Delivery analytics: load, validate, filter and aggregate delivery records.
//!
//! The egui front end lives in the binary; this library holds everything
//! that does not need a window.

pub mod config;
pub mod data;
