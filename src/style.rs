//! Tag Styles
//!
//! Closed set of tag rendering variants. A style resolves to a
//! `TagMetrics` record consumed by the layout engine's sizing step;
//! placement itself never branches on the variant. Decoration-only
//! details (fill colors, rank palette) live here as well so the
//! rendering glue can stay dumb.

use serde::{Deserialize, Serialize};

// ============================================================================
// Tag Style
// ============================================================================

/// Rendering variant for popular-search and history tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TagStyle {
    /// Plain filled tag without border
    #[default]
    Normal,
    /// Filled tag, background picked from a color pool
    Colorful,
    /// Bordered tag with clear background
    Border,
    /// Bordered tag whose border is drawn with an arc animation
    AnimatedBorder,
    /// Numbered tag with a leading rank badge
    Rank,
    /// Square-cornered bordered tag
    Rectangle,
}

impl TagStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            TagStyle::Normal => "normal",
            TagStyle::Colorful => "colorful",
            TagStyle::Border => "border",
            TagStyle::AnimatedBorder => "animated-border",
            TagStyle::Rank => "rank",
            TagStyle::Rectangle => "rectangle",
        }
    }

    /// Layout metrics for this variant
    pub fn metrics(&self) -> TagMetrics {
        match self {
            TagStyle::Normal | TagStyle::Colorful => TagMetrics {
                padding_h: 10.0,
                padding_v: 5.0,
                border_width: 0.0,
                badge_width: 0.0,
                ..TagMetrics::BASE
            },
            TagStyle::Border | TagStyle::AnimatedBorder => TagMetrics {
                padding_h: 10.0,
                padding_v: 5.0,
                border_width: 1.0,
                badge_width: 0.0,
                ..TagMetrics::BASE
            },
            TagStyle::Rank => TagMetrics {
                padding_h: 10.0,
                padding_v: 5.0,
                border_width: 0.0,
                badge_width: 22.0,
                ..TagMetrics::BASE
            },
            TagStyle::Rectangle => TagMetrics {
                padding_h: 8.0,
                padding_v: 6.0,
                border_width: 1.0,
                badge_width: 0.0,
                ..TagMetrics::BASE
            },
        }
    }

    /// Corner radius for a tag of the given height.
    /// Pill rounding everywhere except the rectangle variant.
    pub fn corner_radius(&self, height: f32) -> f32 {
        match self {
            TagStyle::Rectangle => 0.0,
            _ => height * 0.5,
        }
    }
}

impl std::str::FromStr for TagStyle {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "normal" => Ok(TagStyle::Normal),
            "colorful" => Ok(TagStyle::Colorful),
            "border" => Ok(TagStyle::Border),
            "animated-border" => Ok(TagStyle::AnimatedBorder),
            "rank" => Ok(TagStyle::Rank),
            "rectangle" => Ok(TagStyle::Rectangle),
            other => Err(format!("unknown tag style '{}'", other)),
        }
    }
}

// ============================================================================
// Tag Metrics
// ============================================================================

/// Sizing rules a style feeds into the layout engine
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TagMetrics {
    /// Horizontal text padding on each side
    pub padding_h: f32,
    /// Vertical text padding above and below
    pub padding_v: f32,
    /// Border stroke width (0 for filled variants)
    pub border_width: f32,
    /// Fixed leading badge width (rank variant only)
    pub badge_width: f32,
    /// Minimum box width, applies even to empty text
    pub min_width: f32,
    /// Maximum box width before the text is truncated with an ellipsis
    pub max_width: f32,
}

impl TagMetrics {
    const BASE: TagMetrics = TagMetrics {
        padding_h: 10.0,
        padding_v: 5.0,
        border_width: 0.0,
        badge_width: 0.0,
        min_width: 28.0,
        max_width: 280.0,
    };
}

// ============================================================================
// Colors
// ============================================================================

/// Background color pool for the colorful variant.
///
/// The pick is a hash of the tag text rather than a random draw, so
/// repeated renders of the same tag keep the same color and geometry is
/// never affected.
#[derive(Debug, Clone)]
pub struct ColorPool {
    colors: Vec<String>,
}

impl Default for ColorPool {
    fn default() -> Self {
        Self {
            colors: [
                "#ff9999", "#99ccff", "#99ffcc", "#ffcc99", "#cc99ff", "#ffff99",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

impl ColorPool {
    /// Create a pool from custom hex color strings
    pub fn new(colors: Vec<String>) -> Self {
        if colors.is_empty() {
            return Self::default();
        }
        Self { colors }
    }

    /// Pick a color for the given tag text
    pub fn color_for(&self, text: &str) -> &str {
        let idx = fnv1a(text) as usize % self.colors.len();
        &self.colors[idx]
    }
}

/// Background palette for rank badges: one color per podium place,
/// the last entry covers every rank past the top three.
pub const RANK_COLORS: [&str; 4] = ["#f24f44", "#ff8375", "#ffb460", "#d8d8d8"];

/// Badge background for a 1-based rank
pub fn rank_color(rank: u32) -> &'static str {
    let idx = (rank.saturating_sub(1) as usize).min(RANK_COLORS.len() - 1);
    RANK_COLORS[idx]
}

fn fnv1a(text: &str) -> u64 {
    let mut hash: u64 = 0xcbf29ce484222325;
    for byte in text.as_bytes() {
        hash ^= *byte as u64;
        hash = hash.wrapping_mul(0x100000001b3);
    }
    hash
}

// ============================================================================
// History Render Style
// ============================================================================

/// How the rendering glue presents search history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HistoryRenderStyle {
    /// Plain list rows; bypasses the flow layout engine
    #[default]
    Cell,
    NormalTag,
    ColorfulTag,
    BorderTag,
    AnimatedBorderTag,
}

impl HistoryRenderStyle {
    /// Tag style to lay history out with, if history renders as tags
    pub fn tag_style(&self) -> Option<TagStyle> {
        match self {
            HistoryRenderStyle::Cell => None,
            HistoryRenderStyle::NormalTag => Some(TagStyle::Normal),
            HistoryRenderStyle::ColorfulTag => Some(TagStyle::Colorful),
            HistoryRenderStyle::BorderTag => Some(TagStyle::Border),
            HistoryRenderStyle::AnimatedBorderTag => Some(TagStyle::AnimatedBorder),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_badge_reserved_only_for_rank_style() {
        assert!(TagStyle::Rank.metrics().badge_width > 0.0);
        for style in [
            TagStyle::Normal,
            TagStyle::Colorful,
            TagStyle::Border,
            TagStyle::AnimatedBorder,
            TagStyle::Rectangle,
        ] {
            assert_eq!(style.metrics().badge_width, 0.0, "{:?}", style);
        }
    }

    #[test]
    fn test_rectangle_has_square_corners() {
        assert_eq!(TagStyle::Rectangle.corner_radius(28.0), 0.0);
        assert_eq!(TagStyle::Normal.corner_radius(28.0), 14.0);
    }

    #[test]
    fn test_color_pick_is_stable() {
        let pool = ColorPool::default();
        assert_eq!(pool.color_for("rust"), pool.color_for("rust"));
    }

    #[test]
    fn test_rank_palette_saturates() {
        assert_eq!(rank_color(1), RANK_COLORS[0]);
        assert_eq!(rank_color(3), RANK_COLORS[2]);
        assert_eq!(rank_color(4), RANK_COLORS[3]);
        assert_eq!(rank_color(99), RANK_COLORS[3]);
    }

    #[test]
    fn test_style_parse_round_trip() {
        for style in [
            TagStyle::Normal,
            TagStyle::Colorful,
            TagStyle::Border,
            TagStyle::AnimatedBorder,
            TagStyle::Rank,
            TagStyle::Rectangle,
        ] {
            assert_eq!(style.as_str().parse::<TagStyle>().unwrap(), style);
        }
        assert!("bogus".parse::<TagStyle>().is_err());
    }

    #[test]
    fn test_cell_history_style_has_no_tag_style() {
        assert_eq!(HistoryRenderStyle::Cell.tag_style(), None);
        assert_eq!(
            HistoryRenderStyle::BorderTag.tag_style(),
            Some(TagStyle::Border)
        );
    }
}
