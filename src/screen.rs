//! Search Screen Controller (headless)
//!
//! Orchestrates the core pieces on behalf of the rendering glue: it owns
//! the history store, the popular-search strings and the caller-supplied
//! suggestion list, runs the flow engine over them, and dispatches
//! confirmed queries to the configured callbacks. It never holds a
//! reference back to its caller; the glue pulls geometry and ordered
//! history out and pushes text and selections in.

use crate::error::Result;
use crate::history::{HistoryUpdate, SearchHistoryStore};
use crate::layout::{FlowLayout, LayoutResult, Tag};
use crate::measure::WidthMeasurer;
use crate::style::TagStyle;
use crate::SearchConfig;

// ============================================================================
// Events
// ============================================================================

/// Callbacks fired when the user confirms or picks a query.
///
/// All fields are optional and resolved once at construction; there is no
/// runtime capability probing. Precedence: a specific selection callback
/// (`on_select_popular`, `on_select_history`, `on_select_suggestion`),
/// when present, suppresses the generic `on_search` for that interaction.
/// `on_search` alone receives every interaction.
#[derive(Default)]
pub struct SearchEvents {
    /// A query was confirmed (search bar submit, or any selection that
    /// has no specific callback)
    pub on_search: Option<Box<dyn FnMut(&str)>>,
    /// A popular-search tag was picked: (index, text)
    pub on_select_popular: Option<Box<dyn FnMut(usize, &str)>>,
    /// A history entry was picked: (index, text)
    pub on_select_history: Option<Box<dyn FnMut(usize, &str)>>,
    /// A suggestion row was picked: (index, text)
    pub on_select_suggestion: Option<Box<dyn FnMut(usize, &str)>>,
}

impl std::fmt::Debug for SearchEvents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchEvents")
            .field("on_search", &self.on_search.is_some())
            .field("on_select_popular", &self.on_select_popular.is_some())
            .field("on_select_history", &self.on_select_history.is_some())
            .field("on_select_suggestion", &self.on_select_suggestion.is_some())
            .finish()
    }
}

// ============================================================================
// Screen
// ============================================================================

/// Headless search screen: config + history store + popular searches +
/// suggestions + layout engine.
pub struct SearchScreen {
    config: SearchConfig,
    store: SearchHistoryStore,
    engine: FlowLayout,
    popular: Vec<String>,
    suggestions: Vec<String>,
    events: SearchEvents,
}

impl SearchScreen {
    /// Create a screen from a config and the popular-search strings
    pub fn new(config: SearchConfig, popular: Vec<String>) -> Result<Self> {
        let store = SearchHistoryStore::open(
            config.storage_path.clone(),
            config.capacity,
            config.whitespace,
        )?;
        let engine = FlowLayout::new().with_params(config.params);
        Ok(Self {
            config,
            store,
            engine,
            popular,
            suggestions: Vec::new(),
            events: SearchEvents::default(),
        })
    }

    /// Attach event callbacks
    pub fn with_events(mut self, events: SearchEvents) -> Self {
        self.events = events;
        self
    }

    /// Replace the width measurer with a platform-supplied one
    pub fn with_measurer(mut self, measurer: impl WidthMeasurer + Send + Sync + 'static) -> Self {
        self.engine = std::mem::take(&mut self.engine).with_measurer(measurer);
        self
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    // ------------------------------------------------------------------
    // Queries in
    // ------------------------------------------------------------------

    /// Confirm a typed query.
    ///
    /// Normalizes per the configured whitespace policy, records it in
    /// history (unless history display is disabled, which also disables
    /// caching) and fires `on_search`. An empty-after-normalization
    /// query does nothing.
    pub fn submit(&mut self, text: &str) -> Option<HistoryUpdate> {
        let normalized = self.config.whitespace.normalize(text);
        if normalized.is_empty() {
            return None;
        }
        let update = self.record(&normalized);
        if let Some(cb) = self.events.on_search.as_mut() {
            cb(&normalized);
        }
        update
    }

    /// A popular-search tag was tapped
    pub fn select_popular(&mut self, index: usize) -> Option<HistoryUpdate> {
        let text = self.popular.get(index)?.clone();
        let update = self.record(&text);
        if let Some(cb) = self.events.on_select_popular.as_mut() {
            cb(index, &text);
        } else if let Some(cb) = self.events.on_search.as_mut() {
            cb(&text);
        }
        update
    }

    /// A history tag or row was tapped
    pub fn select_history(&mut self, index: usize) -> Option<HistoryUpdate> {
        let text = self.store.current_history().get(index)?.clone();
        let update = self.record(&text);
        if let Some(cb) = self.events.on_select_history.as_mut() {
            cb(index, &text);
        } else if let Some(cb) = self.events.on_search.as_mut() {
            cb(&text);
        }
        update
    }

    /// A suggestion row was tapped
    pub fn select_suggestion(&mut self, index: usize) -> Option<HistoryUpdate> {
        let text = self.suggestions.get(index)?.clone();
        let update = self.record(&text);
        if let Some(cb) = self.events.on_select_suggestion.as_mut() {
            cb(index, &text);
        } else if let Some(cb) = self.events.on_search.as_mut() {
            cb(&text);
        }
        update
    }

    fn record(&mut self, text: &str) -> Option<HistoryUpdate> {
        if !self.config.show_history {
            return None;
        }
        Some(self.store.record_query(text))
    }

    // ------------------------------------------------------------------
    // History out
    // ------------------------------------------------------------------

    /// Ordered history snapshot, most recent first
    pub fn history(&self) -> &[String] {
        self.store.current_history()
    }

    /// Delete a single history entry
    pub fn remove_history(&mut self, text: &str) -> HistoryUpdate {
        self.store.remove_query(text)
    }

    /// Empty the history (the "empty records" button)
    pub fn clear_history(&mut self) -> HistoryUpdate {
        self.store.clear()
    }

    // ------------------------------------------------------------------
    // Suggestions
    // ------------------------------------------------------------------

    /// Replace the suggestion list. The caller supplies ranked strings;
    /// they are stored verbatim.
    pub fn set_suggestions(&mut self, suggestions: Vec<String>) {
        self.suggestions = suggestions;
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    /// Most recent query, for search-bar prefill
    pub fn recent_query(&self) -> Option<&str> {
        self.store.current_history().first().map(|s| s.as_str())
    }

    // ------------------------------------------------------------------
    // Popular searches
    // ------------------------------------------------------------------

    pub fn popular(&self) -> &[String] {
        &self.popular
    }

    pub fn set_popular(&mut self, popular: Vec<String>) {
        self.popular = popular;
    }

    // ------------------------------------------------------------------
    // Geometry out
    // ------------------------------------------------------------------

    /// Lay out the popular-search tags for the given container width.
    /// Disabled popular search yields an empty result.
    pub fn popular_layout(&self, container_width: f32) -> Result<LayoutResult> {
        if !self.config.show_popular {
            return self.engine.layout(&[], container_width);
        }
        let style = self.config.tag_style;
        let tags: Vec<Tag> = self
            .popular
            .iter()
            .enumerate()
            .map(|(i, text)| {
                let tag = Tag::new(text.clone()).with_style(style);
                if style == TagStyle::Rank {
                    tag.with_rank(i as u32 + 1)
                } else {
                    tag
                }
            })
            .collect();
        self.engine.layout(&tags, container_width)
    }

    /// Lay out the history tags for the given container width.
    ///
    /// With `HistoryRenderStyle::Cell` the glue renders plain list rows
    /// from [`SearchScreen::history`] instead; this method then falls
    /// back to the default tag style so callers always get geometry.
    pub fn history_layout(&self, container_width: f32) -> Result<LayoutResult> {
        if !self.config.show_history {
            return self.engine.layout(&[], container_width);
        }
        let style = self.config.history_style.tag_style().unwrap_or_default();
        let tags: Vec<Tag> = self
            .store
            .current_history()
            .iter()
            .map(|text| Tag::new(text.clone()).with_style(style))
            .collect();
        self.engine.layout(&tags, container_width)
    }

    /// Whether the glue should render history above popular searches
    pub fn swap_popular_with_history(&self) -> bool {
        self.config.swap_popular_with_history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::WhitespacePolicy;
    use crate::style::HistoryRenderStyle;
    use std::cell::RefCell;
    use std::rc::Rc;
    use tempfile::tempdir;

    fn config_in(dir: &tempfile::TempDir) -> SearchConfig {
        SearchConfig {
            storage_path: dir.path().join("history.json"),
            whitespace: WhitespacePolicy::TrimEdges,
            ..SearchConfig::default()
        }
    }

    fn popular() -> Vec<String> {
        ["rust", "flow layout", "serde", "unicode"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn test_submit_records_and_fires_on_search() {
        let dir = tempdir().unwrap();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let mut screen = SearchScreen::new(config_in(&dir), popular())
            .unwrap()
            .with_events(SearchEvents {
                on_search: Some(Box::new(move |text| sink.borrow_mut().push(text.to_string()))),
                ..SearchEvents::default()
            });

        screen.submit("  hello  ");
        assert_eq!(*seen.borrow(), ["hello"]);
        assert_eq!(screen.history(), ["hello"]);
    }

    #[test]
    fn test_empty_submit_is_noop() {
        let dir = tempdir().unwrap();
        let mut screen = SearchScreen::new(config_in(&dir), popular()).unwrap();
        assert!(screen.submit("   ").is_none());
        assert!(screen.history().is_empty());
    }

    #[test]
    fn test_specific_callback_suppresses_generic() {
        let dir = tempdir().unwrap();
        let generic = Rc::new(RefCell::new(0usize));
        let specific = Rc::new(RefCell::new(Vec::new()));
        let g = generic.clone();
        let s = specific.clone();
        let mut screen = SearchScreen::new(config_in(&dir), popular())
            .unwrap()
            .with_events(SearchEvents {
                on_search: Some(Box::new(move |_| *g.borrow_mut() += 1)),
                on_select_popular: Some(Box::new(move |i, text| {
                    s.borrow_mut().push((i, text.to_string()))
                })),
                ..SearchEvents::default()
            });

        screen.select_popular(1);
        assert_eq!(*generic.borrow(), 0);
        assert_eq!(*specific.borrow(), [(1, "flow layout".to_string())]);
    }

    #[test]
    fn test_selection_falls_back_to_generic_callback() {
        let dir = tempdir().unwrap();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let mut screen = SearchScreen::new(config_in(&dir), popular())
            .unwrap()
            .with_events(SearchEvents {
                on_search: Some(Box::new(move |text| sink.borrow_mut().push(text.to_string()))),
                ..SearchEvents::default()
            });

        screen.select_popular(0);
        assert_eq!(*seen.borrow(), ["rust"]);
        assert_eq!(screen.history(), ["rust"]);
    }

    #[test]
    fn test_select_out_of_range_is_noop() {
        let dir = tempdir().unwrap();
        let mut screen = SearchScreen::new(config_in(&dir), popular()).unwrap();
        assert!(screen.select_popular(99).is_none());
        assert!(screen.select_history(0).is_none());
        assert!(screen.select_suggestion(0).is_none());
    }

    #[test]
    fn test_select_history_re_records_to_front() {
        let dir = tempdir().unwrap();
        let mut screen = SearchScreen::new(config_in(&dir), popular()).unwrap();
        screen.submit("first");
        screen.submit("second");
        screen.select_history(1); // "first"
        assert_eq!(screen.history(), ["first", "second"]);
    }

    #[test]
    fn test_suggestions_stored_verbatim_and_selectable() {
        let dir = tempdir().unwrap();
        let mut screen = SearchScreen::new(config_in(&dir), popular()).unwrap();
        screen.set_suggestions(vec!["rustup".into(), "rustls".into()]);
        assert_eq!(screen.suggestions(), ["rustup", "rustls"]);

        screen.select_suggestion(1);
        assert_eq!(screen.history(), ["rustls"]);
        assert_eq!(screen.recent_query(), Some("rustls"));
    }

    #[test]
    fn test_history_disabled_skips_caching() {
        let dir = tempdir().unwrap();
        let config = SearchConfig {
            show_history: false,
            ..config_in(&dir)
        };
        let seen = Rc::new(RefCell::new(0usize));
        let sink = seen.clone();
        let mut screen = SearchScreen::new(config, popular())
            .unwrap()
            .with_events(SearchEvents {
                on_search: Some(Box::new(move |_| *sink.borrow_mut() += 1)),
                ..SearchEvents::default()
            });

        assert!(screen.submit("query").is_none());
        assert_eq!(*seen.borrow(), 1);
        assert!(screen.history().is_empty());
    }

    #[test]
    fn test_popular_layout_assigns_ranks_for_rank_style() {
        let dir = tempdir().unwrap();
        let config = SearchConfig {
            tag_style: TagStyle::Rank,
            ..config_in(&dir)
        };
        let screen = SearchScreen::new(config, popular()).unwrap();
        let result = screen.popular_layout(400.0).unwrap();
        let ranks: Vec<Option<u32>> = result.placed.iter().map(|p| p.tag.rank).collect();
        assert_eq!(ranks, [Some(1), Some(2), Some(3), Some(4)]);
    }

    #[test]
    fn test_history_layout_uses_configured_tag_style() {
        let dir = tempdir().unwrap();
        let config = SearchConfig {
            history_style: HistoryRenderStyle::BorderTag,
            ..config_in(&dir)
        };
        let mut screen = SearchScreen::new(config, popular()).unwrap();
        screen.submit("query");
        let result = screen.history_layout(400.0).unwrap();
        assert_eq!(result.placed.len(), 1);
        assert_eq!(result.placed[0].tag.style, TagStyle::Border);
    }

    #[test]
    fn test_disabled_sections_yield_empty_geometry() {
        let dir = tempdir().unwrap();
        let config = SearchConfig {
            show_popular: false,
            show_history: false,
            ..config_in(&dir)
        };
        let screen = SearchScreen::new(config, popular()).unwrap();
        assert!(screen.popular_layout(300.0).unwrap().is_empty());
        assert!(screen.history_layout(300.0).unwrap().is_empty());
    }

    #[test]
    fn test_remove_and_clear_history() {
        let dir = tempdir().unwrap();
        let mut screen = SearchScreen::new(config_in(&dir), popular()).unwrap();
        screen.submit("a");
        screen.submit("b");
        screen.remove_history("a");
        assert_eq!(screen.history(), ["b"]);
        screen.clear_history();
        assert!(screen.history().is_empty());
    }

    #[test]
    fn test_history_survives_screen_restart() {
        let dir = tempdir().unwrap();
        {
            let mut screen = SearchScreen::new(config_in(&dir), popular()).unwrap();
            screen.submit("persisted");
        }
        let screen = SearchScreen::new(config_in(&dir), popular()).unwrap();
        assert_eq!(screen.history(), ["persisted"]);
    }
}
