//! Write and event seams between the fill logic and the page.
//!
//! Controls are addressed by their index in the `FormSnapshot`. The service
//! records everything into a `FillPlan`, which the content script replays
//! against the live document in order.

use serde::{Deserialize, Serialize};

/// Writes `.value` / `.checked` on a page control.
pub trait ControlWriter {
    fn set_value(&mut self, index: usize, value: &str);
    fn set_checked(&mut self, index: usize, checked: bool);
}

/// Dispatches bubbling `input` / `change` events so page listeners observe writes.
pub trait EventSink {
    fn notify_input(&mut self, index: usize);
    fn notify_change(&mut self, index: usize);
}

/// Anything that can both write controls and dispatch events.
pub trait FillSink: ControlWriter + EventSink {}

impl<T: ControlWriter + EventSink + ?Sized> FillSink for T {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FillAction {
    SetValue { index: usize, value: String },
    SetChecked { index: usize, checked: bool },
    DispatchInput { index: usize },
    DispatchChange { index: usize },
}

/// Ordered record of every write and event of a fill pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FillPlan {
    actions: Vec<FillAction>,
}

impl FillPlan {
    pub fn into_actions(self) -> Vec<FillAction> {
        self.actions
    }
}

#[cfg(test)]
impl FillPlan {
    pub fn actions(&self) -> &[FillAction] {
        &self.actions
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Number of `input` events queued for control `index`.
    pub fn input_events(&self, index: usize) -> usize {
        self.actions
            .iter()
            .filter(|a| matches!(a, FillAction::DispatchInput { index: i } if *i == index))
            .count()
    }

    /// Number of `change` events queued for control `index`.
    pub fn change_events(&self, index: usize) -> usize {
        self.actions
            .iter()
            .filter(|a| matches!(a, FillAction::DispatchChange { index: i } if *i == index))
            .count()
    }
}

impl ControlWriter for FillPlan {
    fn set_value(&mut self, index: usize, value: &str) {
        self.actions.push(FillAction::SetValue {
            index,
            value: value.to_string(),
        });
    }

    fn set_checked(&mut self, index: usize, checked: bool) {
        self.actions.push(FillAction::SetChecked { index, checked });
    }
}

impl EventSink for FillPlan {
    fn notify_input(&mut self, index: usize) {
        self.actions.push(FillAction::DispatchInput { index });
    }

    fn notify_change(&mut self, index: usize) {
        self.actions.push(FillAction::DispatchChange { index });
    }
}
