//! Sequence diagram SVG renderer
//!
//! Draws the positioned layout: one marker per message variant, actor header
//! boxes, lifelines, then one group per message. Messages and actors with a
//! tooltip are focusable and carry their text in a `<title>`; the one named
//! as open additionally gets a floating panel placed with the tooltip
//! positioning rules against the diagram bounds.

use anyhow::Result;
use tracing::{debug, warn};

use super::database::{ArrowHead, MessageVariant, SequenceDatabase};
use super::layout::{
    MessageGeometry, PositionedActor, PositionedMessage, SequenceConfig, SequenceLayout,
    SequenceLayoutAlgorithm,
};
use crate::core::{fmt_num, DiagramError, Element, Rect, Renderer, LINE_HEIGHT};
use crate::primitives::tooltip::{
    compute_placement, estimate_panel_size, panel_lines, TooltipConfig,
};

const SVG_NS: &str = "http://www.w3.org/2000/svg";
const LIFELINE_COLOR: &str = "#cbd5e1";
const LABEL_COLOR: &str = "#0f172a";
const PANEL_PADDING: f64 = 8.0;
const PANEL_FILL: &str = "#0f172a";
const PANEL_TEXT: &str = "#f8fafc";

/// Sequence diagram renderer
#[derive(Debug, Clone, Default)]
pub struct SequenceRenderer {
    config: SequenceConfig,
    tooltip: TooltipConfig,
    open_message: Option<String>,
}

impl SequenceRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SequenceConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn with_tooltip_config(mut self, tooltip: TooltipConfig) -> Self {
        self.tooltip = tooltip;
        self
    }

    /// Draw the tooltip panel of message `id`, or of actor `id` when no
    /// message has that id
    pub fn with_open_message(mut self, id: Option<impl Into<String>>) -> Self {
        self.open_message = id.map(Into::into);
        self
    }

    /// Lay out and render the database
    pub fn render(&self, database: &SequenceDatabase) -> Result<Element> {
        let layout = SequenceLayoutAlgorithm::with_config(self.config).layout(database)?;
        self.render_layout(&layout)
    }

    /// Render an already positioned layout
    pub fn render_layout(&self, layout: &SequenceLayout) -> Result<Element> {
        let open = match self.open_message.as_deref() {
            Some(id) => Some(open_target(layout, id)?),
            None => None,
        };
        let mut svg = Element::new("svg")
            .attr("xmlns", SVG_NS)
            .num("width", layout.width)
            .num("height", layout.height)
            .attr(
                "viewBox",
                format!("0 0 {} {}", fmt_num(layout.width), fmt_num(layout.height)),
            )
            .attr("class", "sequence-diagram")
            .attr("role", "img")
            .attr("font-size", fmt_num(layout.font_size))
            .child(render_markers());

        let mut actors = Element::new("g").attr("class", "actors");
        let mut lifelines = Element::new("g").attr("class", "lifelines");
        for actor in &layout.actors {
            let actor_open = open == Some(OpenTarget::Actor(actor));
            actors.push(render_actor(actor, layout.font_size, actor_open));
            lifelines.push(
                Element::new("line")
                    .attr("class", "lifeline")
                    .attr("data-actor-id", actor.id.clone())
                    .num("x1", actor.x)
                    .num("y1", layout.lifeline_top())
                    .num("x2", actor.x)
                    .num("y2", layout.height)
                    .attr("stroke", LIFELINE_COLOR)
                    .attr("stroke-dasharray", "4 4"),
            );
        }
        svg.push(actors);
        svg.push(lifelines);

        let mut messages = Element::new("g").attr("class", "messages");
        for message in &layout.messages {
            let message_open = open == Some(OpenTarget::Message(message));
            messages.push(render_message(message, message_open));
        }
        svg.push(messages);

        let panel = open.and_then(|target| {
            let (id, text, anchor) = match target {
                OpenTarget::Message(m) => (message_panel_id(&m.id), &m.tooltip, m.hit_rect),
                OpenTarget::Actor(a) => (actor_panel_id(&a.id), &a.tooltip, a.header),
            };
            text.as_deref().map(|text| self.render_panel(id, text, anchor, layout))
        });
        if let Some(panel) = panel {
            svg.push(panel);
        }
        let open_id = open.map(OpenTarget::id);

        debug!(
            actors = layout.actors.len(),
            messages = layout.messages.len(),
            open = ?open_id,
            "Rendered sequence diagram"
        );
        Ok(svg)
    }

    /// Floating tooltip panel beside `anchor`
    fn render_panel(
        &self,
        id: String,
        text: &str,
        anchor: Rect,
        layout: &SequenceLayout,
    ) -> Element {
        let font_size = (layout.font_size - 1.0).max(1.0);
        let size = estimate_panel_size(text, font_size, self.tooltip.max_width, PANEL_PADDING);
        let placement = compute_placement(
            anchor,
            size,
            layout.bounds(),
            self.tooltip.placement_options(),
        );
        let rect = placement.rect;

        let mut label = Element::new("text")
            .attr("class", "tooltip-panel__text")
            .attr("fill", PANEL_TEXT)
            .num("font-size", font_size);
        let line_height = font_size * LINE_HEIGHT;
        for (i, line) in panel_lines(text, font_size, self.tooltip.max_width, PANEL_PADDING)
            .into_iter()
            .enumerate()
        {
            let baseline = rect.y + PANEL_PADDING + font_size + i as f64 * line_height;
            // Lines below a clipped panel's edge are dropped
            if baseline > rect.bottom() {
                break;
            }
            label.push(
                Element::new("tspan")
                    .num("x", rect.x + PANEL_PADDING)
                    .num("y", baseline)
                    .text(line),
            );
        }

        Element::new("g")
            .attr("class", "tooltip-panel")
            .attr("role", "tooltip")
            .attr("id", id)
            .attr("data-side", placement.side)
            .attr_opt("data-clipped", placement.clipped.then_some("true"))
            .child(
                Element::new("rect")
                    .num("x", rect.x)
                    .num("y", rect.y)
                    .num("width", rect.width)
                    .num("height", rect.height)
                    .attr("rx", 4)
                    .attr("fill", PANEL_FILL),
            )
            .child(label)
    }
}

/// Element whose tooltip panel is drawn open
#[derive(Debug, Clone, Copy, PartialEq)]
enum OpenTarget<'a> {
    Message(&'a PositionedMessage),
    Actor(&'a PositionedActor),
}

impl<'a> OpenTarget<'a> {
    fn id(self) -> &'a str {
        match self {
            OpenTarget::Message(m) => &m.id,
            OpenTarget::Actor(a) => &a.id,
        }
    }
}

/// Messages win over actors that share the same id
fn open_target<'a>(layout: &'a SequenceLayout, id: &str) -> Result<OpenTarget<'a>> {
    if let Some(message) = layout.message(id) {
        return Ok(OpenTarget::Message(message));
    }
    if let Some(actor) = layout.actor(id) {
        return Ok(OpenTarget::Actor(actor));
    }
    warn!(id, "Open tooltip is not part of the diagram");
    Err(DiagramError::render_error(format!(
        "open message '{}' does not name a message or actor",
        id
    ))
    .into())
}

fn message_panel_id(message_id: &str) -> String {
    format!("{}-tooltip", message_id)
}

fn actor_panel_id(actor_id: &str) -> String {
    format!("{}-actor-tooltip", actor_id)
}

fn render_markers() -> Element {
    let mut defs = Element::new("defs");
    for variant in MessageVariant::ALL {
        let style = variant.style();
        let head = match style.head {
            ArrowHead::Filled => Element::new("polygon")
                .attr("points", "0 0, 10 3.5, 0 7")
                .attr("fill", style.color),
            ArrowHead::Open => Element::new("polyline")
                .attr("points", "0 0, 10 3.5, 0 7")
                .attr("fill", "none")
                .attr("stroke", style.color)
                .attr("stroke-width", 1),
        };
        defs.push(
            Element::new("marker")
                .attr("id", variant.marker_id())
                .attr("markerWidth", 10)
                .attr("markerHeight", 7)
                .attr("refX", 9)
                .attr("refY", 3.5)
                .attr("orient", "auto")
                .child(head),
        );
    }
    defs
}

fn render_actor(actor: &PositionedActor, font_size: f64, open: bool) -> Element {
    let style = actor.kind.style();
    let header = actor.header;
    let interactive = actor.tooltip.is_some();
    let mut group = Element::new("g")
        .attr("class", format!("actor actor--{}", actor.kind))
        .attr("data-actor-id", actor.id.clone())
        .attr_opt("role", interactive.then_some("button"))
        .attr_opt("tabindex", interactive.then_some(0))
        .attr_opt("aria-expanded", interactive.then_some(open))
        .attr_opt(
            "aria-describedby",
            (interactive && open).then(|| actor_panel_id(&actor.id)),
        )
        .child(
            Element::new("rect")
                .num("x", header.x)
                .num("y", header.y)
                .num("width", header.width)
                .num("height", header.height)
                .attr("rx", 6)
                .attr("fill", style.fill)
                .attr("stroke", style.border),
        )
        .child(
            Element::new("text")
                .attr("class", "actor-label")
                .num("x", actor.x)
                .num("y", header.center().y + font_size * 0.35)
                .attr("text-anchor", "middle")
                .attr("fill", style.text)
                .text(actor.label.clone()),
        );
    if let Some(tooltip) = &actor.tooltip {
        group.push(Element::new("title").text(tooltip.clone()));
    }
    group
}

fn render_message(message: &PositionedMessage, open: bool) -> Element {
    let style = message.variant.style();
    let marker = format!("url(#{})", message.variant.marker_id());
    let y = message.line_y;

    let line = match message.geometry {
        MessageGeometry::Arrow { from_x, to_x, .. } => Element::new("line")
            .attr("class", "message-arrow")
            .num("x1", from_x)
            .num("y1", y)
            .num("x2", to_x)
            .num("y2", y),
        MessageGeometry::SelfLoop { x, width, height } => {
            Element::new("path").attr("class", "self-loop").attr(
                "d",
                format!(
                    "M {} {} H {} V {} H {}",
                    fmt_num(x),
                    fmt_num(y),
                    fmt_num(x + width),
                    fmt_num(y + height),
                    fmt_num(x)
                ),
            )
        }
    };
    let line = line
        .attr("fill", "none")
        .attr("stroke", style.color)
        .attr("stroke-width", 1.5)
        .attr_opt("stroke-dasharray", style.dashed.then_some("6 4"))
        .attr("marker-end", marker);

    let hit = message.hit_rect;
    let mut hit_region = Element::new("rect")
        .attr("class", "message-hit")
        .num("x", hit.x)
        .num("y", hit.y)
        .num("width", hit.width)
        .num("height", hit.height)
        .attr("fill", "transparent");
    if let Some(tooltip) = &message.tooltip {
        hit_region.push(Element::new("title").text(tooltip.clone()));
    }

    let interactive = message.tooltip.is_some();
    let mut group = Element::new("g")
        .attr("class", format!("message message--{}", message.variant))
        .attr("data-message-id", message.id.clone())
        .attr("data-index", message.index)
        .attr_opt("role", interactive.then_some("button"))
        .attr_opt("tabindex", interactive.then_some(0))
        .attr_opt("aria-expanded", interactive.then_some(open))
        .attr_opt(
            "aria-describedby",
            (interactive && open).then(|| message_panel_id(&message.id)),
        )
        .child(line);
    if !message.label.is_empty() {
        group.push(
            Element::new("text")
                .attr("class", "message-label")
                .num("x", message.label_at.x)
                .num("y", message.label_at.y)
                .attr("text-anchor", message.label_anchor)
                .attr("fill", LABEL_COLOR)
                .text(message.label.clone()),
        );
    }
    group.push(hit_region);
    group
}

impl Renderer<SequenceDatabase> for SequenceRenderer {
    fn render(&self, database: &SequenceDatabase) -> Result<Element> {
        SequenceRenderer::render(self, database)
    }

    fn name(&self) -> &'static str {
        "svg"
    }

    fn version(&self) -> &'static str {
        "0.1.0"
    }

    fn format(&self) -> &'static str {
        "svg"
    }
}
