//! Keyboard model produced by the keyboard builder

use crate::domain::navigation::NavAction;

/// Rendering surface of a keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyboardMode {
    /// Persistent bottom keyboard, dispatched by label text
    Root,
    /// Inline keyboard under a message, dispatched by callback token
    Nested,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub text: String,
    /// Present on every nested-mode button, absent in root mode
    pub action: Option<NavAction>,
}

impl Button {
    pub fn label(text: impl Into<String>) -> Self {
        Self { text: text.into(), action: None }
    }

    pub fn callback(text: impl Into<String>, action: NavAction) -> Self {
        Self { text: text.into(), action: Some(action) }
    }

    pub fn token(&self) -> Option<String> {
        self.action.map(|a| a.encode())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyboard {
    pub mode: KeyboardMode,
    pub rows: Vec<Vec<Button>>,
    /// Page actually rendered, after clamping
    pub page: u32,
    pub total_pages: u32,
}

impl Keyboard {
    pub fn buttons(&self) -> impl Iterator<Item = &Button> {
        self.rows.iter().flatten()
    }

    pub fn button_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

}

#[cfg(test)]
impl Keyboard {
    pub fn tokens(&self) -> Vec<String> {
        self.buttons().filter_map(Button::token).collect()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.buttons().map(|b| b.text.as_str()).collect()
    }
}
