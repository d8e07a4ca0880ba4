pub mod extract;
pub mod usage;

pub use usage::{FileUsage, UsageIndex};
