//! datview - Content Rendering for DAT Binary Tables
//!
//! Paints decoded DAT columns as syntax-colored text, one row per line.
//! The binary container is decoded elsewhere; this crate consumes the
//! decoder through the [`dat::DatTable`] and [`dat::FieldReader`] traits.
//!
//! # Design Principles
//!
//! 1. **Dispatch once** - formatter selection happens before the row loop
//! 2. **Explicit theme** - colors come from a [`RenderConfig`], never
//!    global state
//! 3. **Fail fast on contract violations** - bad descriptors are rejected
//!    before anything is painted
//!
//! # Quick Start
//!
//! ```
//! use datview::dat::{ColumnDescriptor, ColumnType, MemoryTable};
//! use datview::render::{ContentRenderer, RecordingSurface, Reference};
//! use datview::RenderConfig;
//!
//! let text = ColumnDescriptor::new(0, ColumnType::string());
//! let words = MemoryTable::new(8, 8).with_column(text.clone(), vec!["Ash".into(), "Oak".into()]);
//!
//! let word = ColumnDescriptor::new(0, ColumnType::key_foreign());
//! let mods = MemoryTable::new(16, 8).with_column(word.clone(), vec![Some(1_usize).into(), None::<usize>.into()]);
//!
//! let mut surface = RecordingSurface::new();
//! ContentRenderer::new(&RenderConfig::default())
//!     .render_cell_content(&mut surface, &word, &mods, &[0, 1], Some(Reference::new(&text, &words)))
//!     .unwrap();
//! assert_eq!(surface.texts(), ["Oak", "<null>"]);
//! ```

#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
// Allow common test patterns
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::cast_possible_truncation,
        clippy::cast_possible_wrap,
        clippy::cast_precision_loss,
        clippy::float_cmp,
        clippy::unreadable_literal
    )
)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::module_name_repetitions)]

/// CLI module for command-line interface
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod dat;
pub mod error;
pub mod render;

pub use config::RenderConfig;
pub use error::{Error, Result};
pub use render::{ContentRenderer, Reference};
