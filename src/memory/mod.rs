/*!
 * Memory Module
 * Contiguous partition allocation over an abstract address space
 */

pub mod manager;
pub mod strategy;
pub mod traits;
pub mod types;

// Re-export for convenience
pub use manager::PartitionManager;
pub use strategy::{FitStrategy, ParseStrategyError};
pub use traits::*;
pub use types::*;
