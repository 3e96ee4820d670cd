//! Deterministic lesson packaging for coursechef.
//!
//! [`create_predictable_zip`] turns a prepared lesson directory into a
//! reproducible archive; [`sha256_file`] provides the checksums used to
//! verify that reproducibility.

pub mod checksum;
pub mod pack;

pub use checksum::sha256_file;
pub use pack::create_predictable_zip;
