//! Input/output helpers.
//!
//! - season archive extraction + CSV parsing (`archive`)
//! - clean-set CSV export (`export`)
//! - analysis summary JSON (`summary`)

pub mod archive;
pub mod export;
pub mod summary;

pub use archive::*;
pub use export::*;
pub use summary::*;
