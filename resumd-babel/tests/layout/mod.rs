//! Layout engine tests against the real Helvetica metrics and custom measures.

mod pagination;
mod wrap;
