//! Helpers shared by the model, the presentation mapping and the formats.

pub mod links;
