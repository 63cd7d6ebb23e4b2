//! Document model tests: edits, snapshots and merging.

mod edits;
mod merge;
