//! Edge-aware placement of floating panels
//!
//! The panel goes on the requested side of its anchor when it fits inside the
//! viewport (shrunk by the collision padding). Otherwise it flips to the
//! opposite side, or to whichever side has more room when neither fits.
//! It then shifts along the cross axis to stay inside the viewport. A panel
//! larger than the padded viewport is clamped and reported as clipped.

use crate::core::{columns_for_width, measure_text, wrap_label, Rect, Side, Size, LINE_HEIGHT};

/// Where a panel ended up
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Side actually used
    pub side: Side,
    /// Final panel rectangle in viewport coordinates
    pub rect: Rect,
    /// The preferred side was abandoned for the opposite one
    pub flipped: bool,
    /// The panel had to shrink to fit the padded viewport
    pub clipped: bool,
}

/// Inputs to [`compute_placement`] besides the rectangles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementOptions {
    pub side: Side,
    pub side_offset: f64,
    pub collision_padding: f64,
}

fn place_on(side: Side, anchor: &Rect, content: Size, offset: f64) -> Rect {
    let center = anchor.center();
    match side {
        Side::Top => Rect::new(
            center.x - content.width / 2.0,
            anchor.y - offset - content.height,
            content.width,
            content.height,
        ),
        Side::Bottom => Rect::new(
            center.x - content.width / 2.0,
            anchor.bottom() + offset,
            content.width,
            content.height,
        ),
        Side::Left => Rect::new(
            anchor.x - offset - content.width,
            center.y - content.height / 2.0,
            content.width,
            content.height,
        ),
        Side::Right => Rect::new(
            anchor.right() + offset,
            center.y - content.height / 2.0,
            content.width,
            content.height,
        ),
    }
}

/// Room between the anchor (plus offset) and the padded viewport edge on `side`
fn available_space(side: Side, anchor: &Rect, bounds: &Rect, offset: f64) -> f64 {
    match side {
        Side::Top => anchor.y - offset - bounds.y,
        Side::Bottom => bounds.bottom() - anchor.bottom() - offset,
        Side::Left => anchor.x - offset - bounds.x,
        Side::Right => bounds.right() - anchor.right() - offset,
    }
}

fn main_extent(side: Side, content: Size) -> f64 {
    if side.is_vertical() {
        content.height
    } else {
        content.width
    }
}

// Keep [start, start + len) inside [lo, hi); shrink when it cannot fit.
fn clamp_span(start: f64, len: f64, lo: f64, hi: f64) -> (f64, f64) {
    let room = (hi - lo).max(0.0);
    if len >= room {
        return (lo, room);
    }
    (start.max(lo).min(hi - len), len)
}

/// Compute where a panel of size `content` goes relative to `anchor`
pub fn compute_placement(
    anchor: Rect,
    content: Size,
    viewport: Rect,
    options: PlacementOptions,
) -> Placement {
    let bounds = viewport.inset(options.collision_padding.max(0.0));
    let offset = options.side_offset;
    let preferred = options.side;
    let opposite = preferred.opposite();
    let needed = main_extent(preferred, content);

    let preferred_room = available_space(preferred, &anchor, &bounds, offset);
    let opposite_room = available_space(opposite, &anchor, &bounds, offset);

    let side = if preferred_room >= needed {
        preferred
    } else if opposite_room >= needed || opposite_room > preferred_room {
        opposite
    } else {
        preferred
    };

    let raw = place_on(side, &anchor, content, offset);
    let (x, width) = clamp_span(raw.x, raw.width, bounds.x, bounds.right());
    let (y, height) = clamp_span(raw.y, raw.height, bounds.y, bounds.bottom());

    Placement {
        side,
        rect: Rect::new(x, y, width, height),
        flipped: side != preferred,
        clipped: width < content.width || height < content.height,
    }
}

/// Estimate the panel size needed for plain-text content
///
/// Text wraps at `max_width` minus padding; the width shrinks to the widest
/// wrapped line.
pub fn estimate_panel_size(text: &str, font_size: f64, max_width: f64, padding: f64) -> Size {
    let lines = panel_lines(text, font_size, max_width, padding);
    let widest = lines
        .iter()
        .map(|line| measure_text(line, font_size))
        .fold(0.0_f64, f64::max);
    Size::new(
        widest + 2.0 * padding,
        lines.len() as f64 * font_size * LINE_HEIGHT + 2.0 * padding,
    )
}

/// Wrapped lines of plain-text panel content
pub fn panel_lines(text: &str, font_size: f64, max_width: f64, padding: f64) -> Vec<String> {
    let columns = columns_for_width(max_width - 2.0 * padding, font_size).max(1);
    text.lines()
        .flat_map(|paragraph| wrap_label(paragraph, columns))
        .collect()
}
