//! Tag Flow Layout Engine
//!
//! Greedy left-to-right row packing of variable-width tag boxes into a
//! fixed-width container. The engine is a pure transformer: it holds no
//! mutable state, so one instance can serve any number of independent
//! layout passes. Styles only change box sizing and decoration; the
//! placement loop is identical for every variant.

use crate::error::{Result, SearchPadError};
use crate::measure::{CellMeasurer, FontMetrics, Size, WidthMeasurer};
use crate::style::TagStyle;

/// Tolerance for the wrap comparison, absorbs accumulated float noise
const WRAP_EPSILON: f32 = 1e-3;

const ELLIPSIS: &str = "…";

// ============================================================================
// Tag
// ============================================================================

/// A single tappable label to be placed by the engine.
/// Immutable once constructed for a layout pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    /// Label text
    pub text: String,
    /// Rendering variant
    pub style: TagStyle,
    /// 1-based rank shown in the leading badge (rank variant)
    pub rank: Option<u32>,
}

impl Tag {
    /// Create a tag with the default style
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: TagStyle::default(),
            rank: None,
        }
    }

    /// Set the rendering variant
    pub fn with_style(mut self, style: TagStyle) -> Self {
        self.style = style;
        self
    }

    /// Set the badge rank
    pub fn with_rank(mut self, rank: u32) -> Self {
        self.rank = Some(rank);
        self
    }
}

// ============================================================================
// Geometry
// ============================================================================

/// Container-relative rectangle, top-left origin
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// True if the two rectangles overlap with positive area
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// Outer margins between the container edge and the tag area
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub top: f32,
    pub left: f32,
    pub bottom: f32,
    pub right: f32,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 10.0,
            left: 10.0,
            bottom: 10.0,
            right: 10.0,
        }
    }
}

impl Margins {
    /// Uniform margin on all four sides
    pub fn uniform(m: f32) -> Self {
        Self {
            top: m,
            left: m,
            bottom: m,
            right: m,
        }
    }
}

/// Spacing and margin parameters for a layout pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    /// Horizontal gap between tags in a row
    pub h_spacing: f32,
    /// Vertical gap between rows
    pub v_spacing: f32,
    /// Outer margins
    pub margins: Margins,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            h_spacing: 10.0,
            v_spacing: 10.0,
            margins: Margins::default(),
        }
    }
}

// ============================================================================
// Layout Result
// ============================================================================

/// One placed tag: its frame and the row it landed on
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedTag {
    /// The input tag
    pub tag: Tag,
    /// Text to render, truncated with an ellipsis if the original
    /// exceeded the style's maximum tag width
    pub display_text: String,
    /// Frame inside the container, top-left origin
    pub frame: Rect,
    /// 0-based row index
    pub row: usize,
}

/// Output of a layout pass, in input order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LayoutResult {
    /// Placed tags, same order as the input sequence
    pub placed: Vec<PlacedTag>,
    /// Height of each row
    pub row_heights: Vec<f32>,
    /// Content height: row heights plus inter-row spacing, excluding
    /// the outer margins. 0 for an empty input sequence.
    pub total_height: f32,
}

impl LayoutResult {
    pub fn is_empty(&self) -> bool {
        self.placed.is_empty()
    }

    pub fn row_count(&self) -> usize {
        self.row_heights.len()
    }
}

// ============================================================================
// Flow Layout
// ============================================================================

/// The flow layout engine.
///
/// Configured once with spacing parameters, font metrics and a width
/// measurer, then invoked per pass via [`FlowLayout::layout`].
pub struct FlowLayout {
    params: LayoutParams,
    font: FontMetrics,
    measurer: Box<dyn WidthMeasurer + Send + Sync>,
}

impl Default for FlowLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl FlowLayout {
    /// Create an engine with default parameters and the cell measurer
    pub fn new() -> Self {
        Self {
            params: LayoutParams::default(),
            font: FontMetrics::default(),
            measurer: Box::new(CellMeasurer),
        }
    }

    /// Configure spacing and margins
    pub fn with_params(mut self, params: LayoutParams) -> Self {
        self.params = params;
        self
    }

    /// Configure font metrics
    pub fn with_font(mut self, font: FontMetrics) -> Self {
        self.font = font;
        self
    }

    /// Replace the width measurer with a platform-supplied one
    pub fn with_measurer(mut self, measurer: impl WidthMeasurer + Send + Sync + 'static) -> Self {
        self.measurer = Box::new(measurer);
        self
    }

    pub fn params(&self) -> &LayoutParams {
        &self.params
    }

    /// Arrange `tags` into rows inside a container of `container_width`.
    ///
    /// Greedy packing: the cursor starts at the top-left margin, each tag
    /// is placed at the cursor unless it would cross the right margin and
    /// the row already holds a tag, in which case the cursor wraps to the
    /// next row. Output is deterministic and order-preserving.
    pub fn layout(&self, tags: &[Tag], container_width: f32) -> Result<LayoutResult> {
        if !container_width.is_finite() || container_width <= 0.0 {
            return Err(SearchPadError::InvalidContainerWidth(container_width));
        }
        let m = self.params.margins;
        let avail = container_width - m.left - m.right;
        if avail <= 0.0 {
            return Err(SearchPadError::ContainerTooNarrow {
                width: container_width,
                left: m.left,
                right: m.right,
            });
        }

        let mut placed = Vec::with_capacity(tags.len());
        let mut row_heights = Vec::new();
        let mut x = m.left;
        let mut y = m.top;
        let mut row = 0;
        let mut row_max_height = 0.0f32;
        let mut row_has_tag = false;

        for tag in tags {
            let (display_text, size) = self.size_tag(tag, avail);

            if row_has_tag && x + size.width > container_width - m.right + WRAP_EPSILON {
                row_heights.push(row_max_height);
                x = m.left;
                y += row_max_height + self.params.v_spacing;
                row += 1;
                row_max_height = 0.0;
            }

            placed.push(PlacedTag {
                tag: tag.clone(),
                display_text,
                frame: Rect::new(x, y, size.width, size.height),
                row,
            });
            x += size.width + self.params.h_spacing;
            row_max_height = row_max_height.max(size.height);
            row_has_tag = true;
        }

        if row_has_tag {
            row_heights.push(row_max_height);
        }

        let total_height = if row_heights.is_empty() {
            0.0
        } else {
            row_heights.iter().sum::<f32>()
                + self.params.v_spacing * (row_heights.len() as f32 - 1.0)
        };

        Ok(LayoutResult {
            placed,
            row_heights,
            total_height,
        })
    }

    /// Resolve a tag's display text and box size.
    ///
    /// The rank badge width is reserved before the text budget is computed,
    /// so every rank tag loses the same amount of text room. A box never
    /// exceeds the smaller of the style's maximum width and the usable
    /// container width, and never shrinks below the style's minimum.
    fn size_tag(&self, tag: &Tag, avail: f32) -> (String, Size) {
        let metrics = tag.style.metrics();
        let chrome = 2.0 * (metrics.padding_h + metrics.border_width) + metrics.badge_width;
        let max_box = metrics.max_width.min(avail);
        let text_budget = (max_box - chrome).max(0.0);

        let measured = self.measurer.measure(&tag.text, &self.font);
        let text_width = sanitize(measured.width);

        let (display_text, text_width) = if text_width > text_budget + WRAP_EPSILON {
            self.truncate(&tag.text, text_budget)
        } else {
            (tag.text.clone(), text_width)
        };

        let width = (text_width + chrome).clamp(metrics.min_width.min(max_box), max_box);
        let line_height = sanitize(measured.height).max(self.font.line_height);
        let height = line_height + 2.0 * (metrics.padding_v + metrics.border_width);

        (display_text, Size::new(width, height))
    }

    /// Longest prefix that fits `budget` together with a trailing ellipsis
    fn truncate(&self, text: &str, budget: f32) -> (String, f32) {
        let ellipsis_width = sanitize(self.measurer.measure(ELLIPSIS, &self.font).width);
        if budget < ellipsis_width {
            return (String::new(), 0.0);
        }

        let mut out = String::new();
        let mut width = 0.0f32;
        let mut buf = [0u8; 4];
        for ch in text.chars() {
            let ch_width = sanitize(self.measurer.measure(ch.encode_utf8(&mut buf), &self.font).width);
            if width + ch_width + ellipsis_width > budget + WRAP_EPSILON {
                break;
            }
            out.push(ch);
            width += ch_width;
        }
        out.push_str(ELLIPSIS);
        (out, width + ellipsis_width)
    }
}

/// Guard against a misbehaving measurer; the style minimum takes over
fn sanitize(value: f32) -> f32 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}
