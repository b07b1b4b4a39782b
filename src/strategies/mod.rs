pub mod optimized;
pub mod sequential;
pub mod strategy;

pub use optimized::{OptimizedStrategy, DEFAULT_LOAD_THRESHOLD};
pub use sequential::SequentialStrategy;
pub use strategy::SelectionStrategy;
