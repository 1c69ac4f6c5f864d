//! Dispatcher output: what to show on the chat surface

use crate::domain::keyboard::Keyboard;

/// Whether a reply goes out as a new message or replaces the message the
/// interaction came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Send,
    Edit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Text with a keyboard attached
    Keyboard {
        text: String,
        keyboard: Keyboard,
        delivery: Delivery,
    },
    /// Leaf content; an edit keeps whatever keyboard the message already has
    Content {
        text: String,
        image_ref: Option<String>,
        delivery: Delivery,
    },
    /// Acknowledge without visible change
    Acknowledge,
}

impl Reply {
    pub fn keyboard(&self) -> Option<&Keyboard> {
        match self {
            Reply::Keyboard { keyboard, .. } => Some(keyboard),
            _ => None,
        }
    }
}
