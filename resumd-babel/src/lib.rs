//! Resume documents: model, Markdown dialect, layout and export
//!
//!     This crate is the library behind the `resumd` CLI. It is shell agnostic: nothing here
//!     prints, reads environment variables for configuration, or exits the process. The one
//!     exception is locating a Chrome binary for the rasterized PDF fallback.
//!
//! Architecture
//!
//!     Markdown ──parse──▶ Document (immutable snapshots, edit ops) ──serialize──▶ Markdown
//!                              │
//!                      ir::from_model
//!                              ▼
//!                        ContentTree ──layout──▶ Layout (draw commands) ──render──▶ PDF
//!                              │
//!                         HTML format ──screenshot──▶ RasterImage ──raster_pdf──▶ PDF (fallback)
//!
//!     The file structure :
//!     .
//!     ├── common/links.rs         # [text](url) span parser
//!     ├── model/                  # Document, Section, Item, ids, edits, merge
//!     ├── ir/                     # ContentTree and the model → tree mapping
//!     ├── layout/                 # measuring, wrapping, pagination
//!     ├── export.rs               # PDF export with rasterized fallback
//!     ├── raster.rs               # RGB screenshots
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── publish.rs              # format + file output in one call
//!     └── formats
//!         ├── markdown            # the resume dialect (parse + serialize)
//!         ├── json                # lossless save format
//!         ├── html                # presentation
//!         ├── pdf                 # structured renderer and raster embedding
//!         └── png                 # headless Chrome screenshots
//!
//! Testing
//!     tests
//!     ├── lib.rs                  # mounts the directories below
//!     └── <area>
//!         ├── mod.rs
//!         └── <testname>.rs
//!
//!     Rust does not discover tests in subdirectories by default, so each area is mounted
//!     from tests/lib.rs.
//!
//! Lossiness
//!
//!     Markdown export writes visible content only; hidden sections and items are dropped.
//!     The JSON format keeps everything, including ids and visibility.

pub mod common;
pub mod error;
pub mod export;
pub mod format;
pub mod formats;
pub mod ir;
pub mod layout;
pub mod model;
pub mod publish;
pub mod raster;
pub mod registry;

pub use error::{ExportError, FormatError, LayoutError};
pub use export::{export_pdf, DocumentPresentation, ExportOutcome, Presentation};
pub use format::{Format, SerializedDocument};
pub use model::{Document, Id, Item, Section};
pub use registry::FormatRegistry;
