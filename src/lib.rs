//! Streaming parser for git's unified diff output.
//!
//! [`diff::parse`] and friends turn a byte stream into a [`diff::Diff`]:
//! files, hunks, and classified lines with old/new line numbers. Size limits
//! in [`diff::ParseOptions`] bound the work done on huge inputs; hitting one
//! marks the result incomplete instead of failing.

pub mod config;
pub mod diff;
pub mod report;
