//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - request configuration (`AnalysisConfig`, `Season`, `SubjectFilter`)
//! - record stages (`RawRecord`, `NormalizedRecord`, `CleanRecord`)
//! - analytics outputs (`Interval`, `TrendPoint`)

pub mod types;

pub use types::*;
