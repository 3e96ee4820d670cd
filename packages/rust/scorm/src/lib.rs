//! SCORM lesson handling for coursechef.
//!
//! Expands staged SCORM archives and turns each one into a prepared,
//! self-contained lesson directory ready for packaging.

pub mod extract;
pub mod prepare;

#[cfg(test)]
pub(crate) mod test_support;

pub use extract::{UnpackSummary, unpack_all};
pub use prepare::prepare_lesson_directory;
