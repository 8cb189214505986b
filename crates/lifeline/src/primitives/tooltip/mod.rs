//! Accessible popovers attached to a trigger element
//!
//! Click and keyboard activation always work; hover is an extra path with a
//! delay. Placement, state and cross-tooltip coordination live in the
//! submodules; this module ties them to a renderable component.

mod group;
mod position;
mod state;

pub use group::TooltipGroup;
pub use position::{
    compute_placement, estimate_panel_size, panel_lines, Placement, PlacementOptions,
};
pub use state::{
    OpenChangeHandler, OpenReason, TooltipController, TooltipEvent, TooltipState,
};

use std::rc::Rc;

use crate::core::{fmt_num, Component, Element, Node, Rect, Side, Size};

/// Tunables for tooltip behaviour and placement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TooltipConfig {
    /// Preferred side of the trigger
    pub side: Side,
    /// Gap between trigger and panel in pixels
    pub side_offset: f64,
    /// Hover delay before opening, in milliseconds
    pub delay_duration: u64,
    /// Margin kept between the panel and the viewport edge
    pub collision_padding: f64,
    /// Panel width at which content wraps
    pub max_width: f64,
}

impl Default for TooltipConfig {
    fn default() -> Self {
        Self {
            side: Side::Top,
            side_offset: 4.0,
            delay_duration: 300,
            collision_padding: 8.0,
            max_width: 280.0,
        }
    }
}

impl TooltipConfig {
    pub fn placement_options(&self) -> PlacementOptions {
        PlacementOptions {
            side: self.side,
            side_offset: self.side_offset,
            collision_padding: self.collision_padding,
        }
    }
}

/// A trigger element with a popover
#[derive(Debug, Clone)]
pub struct Tooltip {
    id: String,
    trigger: Node,
    content: Vec<Node>,
    config: TooltipConfig,
    controller: TooltipController,
}

impl Tooltip {
    pub fn new(id: impl Into<String>, trigger: impl Into<Node>) -> Self {
        Self {
            id: id.into(),
            trigger: trigger.into(),
            content: Vec::new(),
            config: TooltipConfig::default(),
            controller: TooltipController::new(),
        }
    }

    pub fn content(mut self, content: impl Into<Node>) -> Self {
        self.content.push(content.into());
        self
    }

    pub fn side(mut self, side: Side) -> Self {
        self.config.side = side;
        self
    }

    pub fn side_offset(mut self, offset: f64) -> Self {
        self.config.side_offset = offset;
        self
    }

    pub fn delay_duration(mut self, millis: u64) -> Self {
        self.config.delay_duration = millis;
        self
    }

    pub fn collision_padding(mut self, padding: f64) -> Self {
        self.config.collision_padding = padding;
        self
    }

    pub fn config(mut self, config: TooltipConfig) -> Self {
        self.config = config;
        self
    }

    /// Controlled open flag; `None` returns to internal state
    pub fn open(mut self, open: Option<bool>) -> Self {
        self.controller.set_open(open);
        self
    }

    pub fn on_open_change(mut self, handler: impl Fn(bool) + 'static) -> Self {
        self.controller.set_on_open_change(Some(Rc::new(handler)));
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn settings(&self) -> &TooltipConfig {
        &self.config
    }

    pub fn content_id(&self) -> String {
        format!("{}-content", self.id)
    }

    pub fn state(&self) -> TooltipState {
        self.controller.state()
    }

    pub fn is_open(&self) -> bool {
        self.controller.is_open()
    }

    /// Feed an interaction event; see [`TooltipController::dispatch`]
    pub fn dispatch(&mut self, event: TooltipEvent) -> Option<bool> {
        self.controller.dispatch(event)
    }

    pub fn set_open(&mut self, open: Option<bool>) {
        self.controller.set_open(open);
    }

    /// Placement of a panel of `content` size for a trigger at `anchor`
    pub fn placement(&self, anchor: Rect, content: Size, viewport: Rect) -> Placement {
        compute_placement(anchor, content, viewport, self.config.placement_options())
    }

    fn render_trigger(&self, open: bool) -> Element {
        Element::new("span")
            .attr("class", "tooltip__trigger")
            .attr("tabindex", 0)
            .attr("aria-expanded", open)
            .attr_opt("aria-describedby", open.then(|| self.content_id()))
            .attr("data-delay", self.config.delay_duration)
            .child(self.trigger.clone())
    }

    fn render_panel(&self, side: Side) -> Element {
        Element::new("div")
            .attr("class", "tooltip__content")
            .attr("role", "tooltip")
            .attr("id", self.content_id())
            .attr("data-side", side)
            .attr("data-side-offset", fmt_num(self.config.side_offset))
            .children(self.content.iter().cloned())
    }

    fn render_with(&self, panel: Option<Element>) -> Element {
        let open = panel.is_some();
        let mut root = Element::new("span")
            .attr("class", "tooltip")
            .attr("data-tooltip-id", self.id.clone())
            .attr("data-state", if open { "open" } else { "closed" })
            .attr("style", "position:relative;display:inline-block")
            .child(self.render_trigger(open));
        if let Some(panel) = panel {
            root = root.child(panel);
        }
        root
    }

    /// Render with absolute panel coordinates computed against `viewport`
    ///
    /// `anchor` and `viewport` share one coordinate space; the panel's
    /// position is emitted relative to the anchor's top-left corner.
    pub fn render_positioned(&self, anchor: Rect, content: Size, viewport: Rect) -> Element {
        if !self.is_open() {
            return self.render_with(None);
        }
        let placement = self.placement(anchor, content, viewport);
        let rect = placement.rect;
        let mut style = format!(
            "position:absolute;left:{}px;top:{}px;max-width:{}px",
            fmt_num(rect.x - anchor.x),
            fmt_num(rect.y - anchor.y),
            fmt_num(rect.width)
        );
        if placement.clipped {
            style.push_str(&format!(";max-height:{}px;overflow:hidden", fmt_num(rect.height)));
        }
        let panel = self
            .render_panel(placement.side)
            .attr("style", style)
            .attr_opt("data-clipped", placement.clipped.then_some("true"));
        self.render_with(Some(panel))
    }
}

impl Component for Tooltip {
    /// Render with the preferred side; final placement is left to the host
    fn render(&self) -> Element {
        let panel = self.is_open().then(|| {
            self.render_panel(self.config.side).attr(
                "style",
                format!("position:absolute;max-width:{}px", fmt_num(self.config.max_width)),
            )
        });
        self.render_with(panel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Key;
    use std::cell::Cell;

    fn tip() -> Tooltip {
        Tooltip::new("slot", "replication slot").content("Tracks the WAL position")
    }

    #[test]
    fn test_closed_by_default() {
        let el = tip().render();
        assert_eq!(el.get_attr("data-state"), Some("closed"));
        assert_eq!(el.find_by_class("tooltip__content").count(), 0);
        let trigger = el.find_by_class("tooltip__trigger").next().unwrap();
        assert_eq!(trigger.get_attr("tabindex"), Some("0"));
        assert_eq!(trigger.get_attr("aria-describedby"), None);
    }

    #[test]
    fn test_click_opens_one_panel_linked_to_trigger() {
        let mut tooltip = tip();
        assert_eq!(tooltip.dispatch(TooltipEvent::TriggerClick), Some(true));
        let el = tooltip.render();
        let panels: Vec<_> = el.find_by_class("tooltip__content").collect();
        assert_eq!(panels.len(), 1);
        assert_eq!(panels[0].get_attr("role"), Some("tooltip"));
        assert_eq!(panels[0].get_attr("id"), Some("slot-content"));
        assert_eq!(panels[0].text_content(), "Tracks the WAL position");
        let trigger = el.find_by_class("tooltip__trigger").next().unwrap();
        assert_eq!(trigger.get_attr("aria-describedby"), Some("slot-content"));
        assert_eq!(trigger.get_attr("aria-expanded"), Some("true"));
    }

    #[test]
    fn test_escape_closes() {
        let mut tooltip = tip();
        tooltip.dispatch(TooltipEvent::TriggerKey(Key::Enter));
        assert!(tooltip.is_open());
        tooltip.dispatch(TooltipEvent::TriggerKey(Key::Escape));
        assert!(!tooltip.is_open());
    }

    #[test]
    fn test_controlled_open_renders_panel() {
        let changes = Rc::new(Cell::new(0));
        let counter = Rc::clone(&changes);
        let mut tooltip = tip()
            .open(Some(true))
            .on_open_change(move |_| counter.set(counter.get() + 1));
        assert!(tooltip.is_open());
        tooltip.dispatch(TooltipEvent::OutsideClick);
        assert!(tooltip.is_open());
        assert_eq!(changes.get(), 1);
    }

    #[test]
    fn test_render_positioned_flips() {
        let mut tooltip = tip().side(Side::Top);
        tooltip.dispatch(TooltipEvent::TriggerClick);
        let anchor = Rect::new(100.0, 5.0, 40.0, 20.0);
        let el = tooltip.render_positioned(
            anchor,
            Size::new(120.0, 30.0),
            Rect::new(0.0, 0.0, 400.0, 300.0),
        );
        let panel = el.find_by_class("tooltip__content").next().unwrap();
        assert_eq!(panel.get_attr("data-side"), Some("bottom"));
        assert!(panel.get_attr("style").unwrap().contains("top:24px"));
    }

    #[test]
    fn test_render_positioned_closed_has_no_panel() {
        let el = tip().render_positioned(
            Rect::new(0.0, 0.0, 10.0, 10.0),
            Size::new(10.0, 10.0),
            Rect::new(0.0, 0.0, 100.0, 100.0),
        );
        assert_eq!(el.find_by_class("tooltip__content").count(), 0);
    }
}
