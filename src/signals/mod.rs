//! Signal evaluation: preprocessing, classification and the engine facade.

pub mod classifier;
pub mod engine;
pub mod error;
pub mod preprocess;

pub use classifier::*;
pub use engine::*;
pub use error::EvaluationError;
pub use preprocess::*;
