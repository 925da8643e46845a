//! Contract field extraction module.

mod builder;
pub mod rules;

pub use builder::{RecordBuilder, DEFAULT_PREVIEW_LINES};
pub use rules::{Candidate, FieldExtractor};
