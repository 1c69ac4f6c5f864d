//! Viewer identity, built per interaction

use std::fmt;

use uuid::Uuid;

/// Who is looking at the menu: a concrete role or an unauthenticated guest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Viewer {
    Guest,
    Role(Uuid),
}

impl Viewer {
    pub fn role_id(&self) -> Option<&Uuid> {
        match self {
            Viewer::Guest => None,
            Viewer::Role(id) => Some(id),
        }
    }

    pub fn is_guest(&self) -> bool {
        matches!(self, Viewer::Guest)
    }
}

impl fmt::Display for Viewer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Viewer::Guest => f.write_str("guest"),
            Viewer::Role(id) => write!(f, "role:{}", id),
        }
    }
}
