//! Explicit selection state passed down to the aggregation calls.

use serde::{Deserialize, Serialize};

use crate::calculate::TimeWindow;

/// The currently selected player and time range.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    account_id: Option<u32>,
    window: TimeWindow,
}

impl Selection {
    pub fn new(account_id: Option<u32>, window: TimeWindow) -> Self {
        Self { account_id, window }
    }

    pub fn account_id(&self) -> Option<u32> {
        self.account_id
    }

    pub fn set_account_id(&mut self, account_id: u32) {
        self.account_id = Some(account_id);
    }

    pub fn clear_account(&mut self) {
        self.account_id = None;
    }

    pub fn window(&self) -> TimeWindow {
        self.window
    }

    pub fn set_window(&mut self, window: TimeWindow) {
        self.window = window;
    }

    pub fn with_window(mut self, window: TimeWindow) -> Self {
        self.window = window;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_selection() {
        let selection = Selection::default();
        assert_eq!(selection.account_id(), None);
        assert_eq!(selection.window(), TimeWindow::Month);
    }

    #[test]
    fn test_setters() {
        let mut selection = Selection::default();
        selection.set_account_id(42);
        selection.set_window(TimeWindow::AllTime);

        assert_eq!(selection.account_id(), Some(42));
        assert_eq!(selection.window(), TimeWindow::AllTime);

        selection.clear_account();
        assert_eq!(selection.account_id(), None);
    }

    #[test]
    fn test_selection_serialization() {
        let selection = Selection::new(Some(7), TimeWindow::Week);
        let json = serde_json::to_string(&selection).unwrap();
        let parsed: Selection = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, selection);
    }
}
