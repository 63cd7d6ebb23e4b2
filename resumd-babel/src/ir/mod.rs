//! Content tree: the format-agnostic presentation of a document.
//!
//! The model keeps item bodies as raw Markdown; this module turns the visible
//! part of a document into typed blocks and inlines that the layout engine and
//! the HTML serializer both consume.

pub mod from_model;
pub mod inline;
pub mod nodes;

pub use from_model::from_model;
pub use nodes::{ContentNode, ContentTree};
