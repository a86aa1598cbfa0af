//! Core domain types and screening logic.

pub mod price;
pub mod returns;
pub mod ranking;
pub mod selection;
pub mod indicator;
pub mod technical;
pub mod fundamental;
pub mod gate;
pub mod aggregate;
pub mod pipeline;
pub mod universe;
pub mod config_validation;
pub mod error;
