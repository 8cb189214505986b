//! Single-open coordination across several tooltips
//!
//! Tooltips are independent by default. A `TooltipGroup` drives its members
//! in controlled mode and grants the open flag to at most one of them:
//! opening a member closes whichever member was open before.

use std::collections::HashMap;

use super::state::{TooltipController, TooltipEvent, TooltipState};

#[derive(Debug, Clone, Default)]
pub struct TooltipGroup {
    members: HashMap<String, TooltipController>,
    open: Option<String>,
}

impl TooltipGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of the open member, if any
    pub fn open_id(&self) -> Option<&str> {
        self.open.as_deref()
    }

    pub fn is_open(&self, id: &str) -> bool {
        self.open.as_deref() == Some(id)
    }

    /// Effective state of one member
    pub fn state(&self, id: &str) -> TooltipState {
        self.members
            .get(id)
            .map(TooltipController::state)
            .unwrap_or_default()
    }

    /// Route `event` to member `id`, then reconcile every member's open flag
    pub fn dispatch(&mut self, id: &str, event: TooltipEvent) -> Option<&str> {
        let granted = self.is_open(id);
        let member = self
            .members
            .entry(id.to_string())
            .or_insert_with(|| TooltipController::controlled(false));
        member.set_open(Some(granted));

        match member.dispatch(event) {
            Some(true) => self.open = Some(id.to_string()),
            Some(false) if granted => self.open = None,
            _ => {}
        }
        self.sync();
        self.open_id()
    }

    /// Close whichever member is open (e.g. on Escape at the diagram level)
    pub fn dismiss(&mut self) {
        if let Some(id) = self.open.clone() {
            self.dispatch(&id, TooltipEvent::Escape);
        }
    }

    fn sync(&mut self) {
        for (id, member) in self.members.iter_mut() {
            member.set_open(Some(self.open.as_deref() == Some(id.as_str())));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Key;

    #[test]
    fn test_second_trigger_replaces_first() {
        let mut group = TooltipGroup::new();
        assert_eq!(group.dispatch("m1", TooltipEvent::TriggerClick), Some("m1"));
        assert_eq!(group.dispatch("m2", TooltipEvent::TriggerClick), Some("m2"));
        assert!(!group.state("m1").is_open());
        assert!(group.state("m2").is_open());
    }

    #[test]
    fn test_reactivation_closes() {
        let mut group = TooltipGroup::new();
        group.dispatch("m1", TooltipEvent::TriggerKey(Key::Enter));
        assert_eq!(group.dispatch("m1", TooltipEvent::TriggerKey(Key::Space)), None);
    }

    #[test]
    fn test_closing_non_open_member_keeps_other_open() {
        let mut group = TooltipGroup::new();
        group.dispatch("m1", TooltipEvent::TriggerClick);
        group.dispatch("m2", TooltipEvent::PointerEnter);
        group.dispatch("m2", TooltipEvent::PointerLeave);
        assert_eq!(group.open_id(), Some("m1"));
    }

    #[test]
    fn test_dismiss() {
        let mut group = TooltipGroup::new();
        group.dispatch("m1", TooltipEvent::TriggerClick);
        group.dismiss();
        assert_eq!(group.open_id(), None);
        assert!(!group.state("m1").is_open());
    }

    #[test]
    fn test_hover_then_delay_opens() {
        let mut group = TooltipGroup::new();
        group.dispatch("m3", TooltipEvent::PointerEnter);
        assert_eq!(group.open_id(), None);
        assert_eq!(group.dispatch("m3", TooltipEvent::DelayElapsed), Some("m3"));
    }
}
