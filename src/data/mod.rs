//! Upstream data: portal download client, archive cache, jurisdiction table.

pub mod cache;
pub mod jurisdiction;
pub mod lvr;

pub use cache::ArchiveCache;
pub use jurisdiction::{JURISDICTIONS, Jurisdiction};
pub use lvr::{ArchiveSource, LvrClient};
