//! Foundation types for the indexer.
//!
//! This module provides the primitives used throughout the crate:
//! - [`LanguageId`] - Source language tags used to pick a front-end
//! - [`FileId`] - Compact document identifiers inside one compilation
//! - [`LineCol`], [`LineIndex`] - Byte offset to line/column conversion
//! - [`TextRange`], [`TextSize`] - Source ranges (byte offsets)
//!
//! This module has NO dependencies on other modules of the crate.

mod language;
mod position;

pub use language::{FileId, LanguageId};
pub use position::{LineCol, LineIndex};

// Re-export text-size types for convenience
pub use text_size::{TextRange, TextSize};
