//! `lvr-analytics` library crate.
//!
//! Cleans Taiwan actual-price registration (實價登錄) sales records and
//! answers market questions over them. The binary (`lvr`) is a thin wrapper
//! around this library so the cleaning rules and analytics are testable
//! without spawning processes or touching the network.

pub mod analysis;
pub mod app;
pub mod clean;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod logging;
pub mod report;
