//! Markdown format tests
//!
//! Tests for Markdown ↔ Document conversion.

mod export;
mod import;
mod roundtrip;
