//! Core data models for match statistics.

mod assets;
mod match_record;
mod metric;
mod replay;
mod stats;

pub use assets::*;
pub use match_record::*;
pub use metric::*;
pub use replay::*;
pub use stats::*;
