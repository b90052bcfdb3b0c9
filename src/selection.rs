/// Single source of truth for which panel, if any, is selected.
///
/// Constructed once per session and closed at teardown; using a closed
/// registry is a programming error and panics rather than being silently
/// ignored. At most one id is ever selected.
pub struct SelectionRegistry {
    selected: Option<String>,
    open: bool,
}

/// Result of a mutation, handed back so the caller can emit events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionChange {
    pub previous: Option<String>,
    pub current: Option<String>,
}

impl SelectionChange {
    pub fn is_noop(&self) -> bool {
        self.previous == self.current
    }
}

impl SelectionRegistry {
    pub fn new() -> Self {
        Self { selected: None, open: true }
    }

    /// Toggle semantics: selecting the current id clears the selection,
    /// anything else atomically replaces it.
    pub fn select(&mut self, id: &str) -> SelectionChange {
        self.assert_open();
        let previous = self.selected.take();
        if previous.as_deref() != Some(id) {
            self.selected = Some(id.to_string());
        }
        SelectionChange { previous, current: self.selected.clone() }
    }

    pub fn deselect(&mut self) -> SelectionChange {
        self.assert_open();
        let previous = self.selected.take();
        SelectionChange { previous, current: None }
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.assert_open();
        self.selected.as_deref() == Some(id)
    }

    pub fn selected(&self) -> Option<&str> {
        self.assert_open();
        self.selected.as_deref()
    }

    /// Ends the session. Every later operation panics.
    pub fn close(&mut self) {
        self.selected = None;
        self.open = false;
    }

    fn assert_open(&self) {
        assert!(self.open, "SelectionRegistry used outside an active session");
    }
}

impl Default for SelectionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
