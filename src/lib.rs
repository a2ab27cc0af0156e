//! SearchPad - Reusable search-screen core
//!
//! The two hard parts of a search screen, decoupled from any UI toolkit:
//!
//! - **Tag flow layout**: auto-wrapping, variable-width placement of
//!   tappable tag labels with per-style sizing rules
//! - **Search history**: a bounded, de-duplicated, most-recent-first
//!   store of past queries, persisted to disk after every mutation
//!
//! A headless [`SearchScreen`] controller ties them together for the
//! rendering glue; embedders feed it text and selections and pull
//! geometry and ordered history back out.
//!
//! # Example
//!
//! ```
//! use searchpad::{FlowLayout, Tag, TagStyle};
//!
//! fn main() -> searchpad::Result<()> {
//!     let tags: Vec<Tag> = ["rust", "flow layout", "search history"]
//!         .iter()
//!         .map(|t| Tag::new(*t).with_style(TagStyle::Border))
//!         .collect();
//!
//!     let engine = FlowLayout::new();
//!     let result = engine.layout(&tags, 320.0)?;
//!
//!     for placed in &result.placed {
//!         println!(
//!             "row {}: '{}' at ({}, {})",
//!             placed.row, placed.display_text, placed.frame.x, placed.frame.y
//!         );
//!     }
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod history;
pub mod layout;
pub mod logging;
pub mod measure;
pub mod screen;
pub mod style;

// Re-export main types
pub use error::{Result, SearchPadError};
pub use history::{
    HistoryUpdate, SearchHistoryStore, WhitespacePolicy, DEFAULT_CAPACITY,
};
pub use layout::{FlowLayout, LayoutParams, LayoutResult, Margins, PlacedTag, Rect, Tag};
pub use measure::{CellMeasurer, FontMetrics, Size, WidthMeasurer};
pub use screen::{SearchEvents, SearchScreen};
pub use style::{rank_color, ColorPool, HistoryRenderStyle, TagMetrics, TagStyle, RANK_COLORS};

use std::path::PathBuf;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default history blob filename, relative to the working directory
pub const DEFAULT_HISTORY_FILE: &str = "searchpad_history.json";

/// Screen-level configuration
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Maximum retained history entries
    pub capacity: usize,
    /// Whitespace normalization applied before recording
    pub whitespace: WhitespacePolicy,
    /// Path of the persisted history blob
    pub storage_path: PathBuf,
    /// Style for popular-search tags
    pub tag_style: TagStyle,
    /// How history is presented (list rows or tags)
    pub history_style: HistoryRenderStyle,
    /// Spacing and margins for the flow layout
    pub params: LayoutParams,
    /// Show the popular-search section
    pub show_popular: bool,
    /// Show (and cache) search history
    pub show_history: bool,
    /// Render history above popular searches
    pub swap_popular_with_history: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            whitespace: WhitespacePolicy::default(),
            storage_path: PathBuf::from(DEFAULT_HISTORY_FILE),
            tag_style: TagStyle::default(),
            history_style: HistoryRenderStyle::default(),
            params: LayoutParams::default(),
            show_popular: true,
            show_history: true,
            swap_popular_with_history: false,
        }
    }
}
