//! HTML presentation tests

mod export;
