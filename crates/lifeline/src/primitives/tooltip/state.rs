//! Open/closed state machine for tooltips
//!
//! There is exactly one transition function. A [`TooltipController`] feeds it
//! the effective current state, which is either its own stored state
//! (uncontrolled) or the state implied by the caller's `open` prop
//! (controlled), and reports open/close requests through `on_open_change`.

use std::fmt;
use std::rc::Rc;

use crate::core::Key;

/// Why a tooltip is open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpenReason {
    /// Pointer activation; stays until dismissed
    Click,
    /// Enter/Space on the trigger; stays until dismissed
    Keyboard,
    /// Hover delay elapsed; closes on pointer leave
    Hover,
    /// Trigger received focus; closes on blur
    Focus,
    /// Opened by the caller's `open` prop
    Controlled,
}

impl OpenReason {
    /// Pinned tooltips survive pointer leave and blur
    pub fn is_pinned(&self) -> bool {
        matches!(
            self,
            OpenReason::Click | OpenReason::Keyboard | OpenReason::Controlled
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TooltipState {
    #[default]
    Closed,
    /// Pointer is over the trigger and the hover delay is running
    Pending,
    Open(OpenReason),
}

/// Input events that drive [`TooltipState::transition`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TooltipEvent {
    TriggerClick,
    TriggerKey(Key),
    PointerEnter,
    PointerLeave,
    FocusIn,
    FocusOut,
    DelayElapsed,
    Escape,
    OutsideClick,
}

impl TooltipState {
    pub fn is_open(&self) -> bool {
        matches!(self, TooltipState::Open(_))
    }

    fn activate(self, reason: OpenReason) -> TooltipState {
        match self {
            TooltipState::Open(current) if current.is_pinned() => TooltipState::Closed,
            _ => TooltipState::Open(reason),
        }
    }

    /// Next state after `event`
    pub fn transition(self, event: TooltipEvent) -> TooltipState {
        use TooltipEvent::*;

        match event {
            TriggerClick => self.activate(OpenReason::Click),
            TriggerKey(key) if key.is_activation() => self.activate(OpenReason::Keyboard),
            TriggerKey(Key::Escape) | Escape | OutsideClick => TooltipState::Closed,
            TriggerKey(_) => self,
            PointerEnter => match self {
                TooltipState::Closed => TooltipState::Pending,
                other => other,
            },
            DelayElapsed => match self {
                TooltipState::Pending => TooltipState::Open(OpenReason::Hover),
                other => other,
            },
            PointerLeave => match self {
                TooltipState::Pending | TooltipState::Open(OpenReason::Hover) => {
                    TooltipState::Closed
                }
                other => other,
            },
            FocusIn => match self {
                TooltipState::Closed | TooltipState::Pending => {
                    TooltipState::Open(OpenReason::Focus)
                }
                other => other,
            },
            FocusOut => match self {
                TooltipState::Pending | TooltipState::Open(OpenReason::Focus) => {
                    TooltipState::Closed
                }
                other => other,
            },
        }
    }
}

/// Callback receiving the requested open value
pub type OpenChangeHandler = Rc<dyn Fn(bool)>;

/// Holds tooltip state, optionally deferring the open flag to the caller
#[derive(Clone, Default)]
pub struct TooltipController {
    internal: TooltipState,
    open: Option<bool>,
    on_open_change: Option<OpenChangeHandler>,
}

impl fmt::Debug for TooltipController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TooltipController")
            .field("internal", &self.internal)
            .field("open", &self.open)
            .field("has_on_open_change", &self.on_open_change.is_some())
            .finish()
    }
}

impl TooltipController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Controlled mode: the caller owns the open flag
    pub fn controlled(open: bool) -> Self {
        Self {
            open: Some(open),
            ..Self::default()
        }
    }

    pub fn set_open(&mut self, open: Option<bool>) {
        self.open = open;
    }

    pub fn set_on_open_change(&mut self, handler: Option<OpenChangeHandler>) {
        self.on_open_change = handler;
    }

    pub fn is_controlled(&self) -> bool {
        self.open.is_some()
    }

    /// Effective state, reconciling the stored state with the `open` prop
    pub fn state(&self) -> TooltipState {
        match self.open {
            None => self.internal,
            Some(true) if self.internal.is_open() => self.internal,
            Some(true) => TooltipState::Open(OpenReason::Controlled),
            Some(false) if self.internal.is_open() => TooltipState::Closed,
            Some(false) => self.internal,
        }
    }

    pub fn is_open(&self) -> bool {
        self.state().is_open()
    }

    /// Apply `event`; returns `Some(open)` when the open flag was asked to change
    pub fn dispatch(&mut self, event: TooltipEvent) -> Option<bool> {
        let current = self.state();
        let next = current.transition(event);
        self.internal = next;

        if next.is_open() == current.is_open() {
            return None;
        }
        let requested = next.is_open();
        tracing::trace!(
            ?event,
            requested,
            controlled = self.is_controlled(),
            "Tooltip open change"
        );
        if let Some(handler) = &self.on_open_change {
            handler(requested);
        }
        Some(requested)
    }
}
