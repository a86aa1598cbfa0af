//! Port traits: the seams between the screening pipeline and its collaborators.

pub mod config_port;
pub mod data_port;
pub mod fundamentals_port;
pub mod report_port;
pub mod universe_port;
