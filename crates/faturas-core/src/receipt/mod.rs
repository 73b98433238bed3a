//! Receipt field resolution.

mod resolver;
pub mod rules;

pub use resolver::{ExtractionResult, FieldResolver};
pub use rules::amounts::TotalSource;
