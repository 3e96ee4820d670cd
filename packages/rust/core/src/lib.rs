//! Core pipeline orchestration and domain logic for coursechef.
//!
//! This crate ties together archive staging, SCORM unpacking, lesson
//! packaging, channel tree assembly, and publishing into the end-to-end
//! `run` workflow.

pub mod assembler;
pub mod pipeline;
pub mod publisher;
