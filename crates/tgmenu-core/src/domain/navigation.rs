// ============================================================================
// TgMenu Core - Navigation Token
// File: crates/tgmenu-core/src/domain/navigation.rs
// Description: Self-describing callback token carried by inline buttons
// ============================================================================
//! Wire grammar (fields separated by `_`):
//!
//! ```text
//! open_<id>            open a folder
//! select_<id>          show a leaf
//! page_<n>_<parent>    page of a folder; empty <parent> is the root level
//! back_<id>            up one level from folder <id>
//! noop                 ignored
//! ```
//!
//! `<id>` is the lowercase hyphenated UUID form, `<n>` an unsigned base-10
//! integer. Decoding fails closed: anything outside the grammar is `Noop`.

use std::fmt;

use tgmenu_shared::constants::{
    BACK_PREFIX, NOOP_TOKEN, OPEN_PREFIX, PAGE_PREFIX, SELECT_PREFIX, TOKEN_SEPARATOR,
};
use uuid::Uuid;

const UUID_HYPHENATED_LEN: usize = 36;

/// What tapping an inline button means. Every variant is a complete render
/// instruction; nothing is looked up in server-side state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavAction {
    Open(Uuid),
    Select(Uuid),
    Page { page: u32, parent: Option<Uuid> },
    Back(Uuid),
    Noop,
}

impl NavAction {
    pub fn encode(&self) -> String {
        match self {
            NavAction::Open(id) => format!("{}{}{}", OPEN_PREFIX, TOKEN_SEPARATOR, id),
            NavAction::Select(id) => format!("{}{}{}", SELECT_PREFIX, TOKEN_SEPARATOR, id),
            NavAction::Back(id) => format!("{}{}{}", BACK_PREFIX, TOKEN_SEPARATOR, id),
            NavAction::Page { page, parent } => {
                let parent = parent.map(|p| p.to_string()).unwrap_or_default();
                format!("{}{sep}{}{sep}{}", PAGE_PREFIX, page, parent, sep = TOKEN_SEPARATOR)
            }
            NavAction::Noop => NOOP_TOKEN.to_string(),
        }
    }

    pub fn decode(token: &str) -> Self {
        Self::parse(token).unwrap_or(NavAction::Noop)
    }

    fn parse(token: &str) -> Option<Self> {
        if token == NOOP_TOKEN {
            return Some(NavAction::Noop);
        }

        let (prefix, payload) = token.split_once(TOKEN_SEPARATOR)?;
        match prefix {
            OPEN_PREFIX => parse_id(payload).map(NavAction::Open),
            SELECT_PREFIX => parse_id(payload).map(NavAction::Select),
            BACK_PREFIX => parse_id(payload).map(NavAction::Back),
            PAGE_PREFIX => {
                let (page, parent) = payload.split_once(TOKEN_SEPARATOR)?;
                let page = parse_page(page)?;
                let parent = if parent.is_empty() {
                    None
                } else {
                    Some(parse_id(parent)?)
                };
                Some(NavAction::Page { page, parent })
            }
            _ => None,
        }
    }
}

fn parse_id(s: &str) -> Option<Uuid> {
    if s.len() != UUID_HYPHENATED_LEN || s.bytes().any(|b| b.is_ascii_uppercase()) {
        return None;
    }
    Uuid::parse_str(s).ok()
}

fn parse_page(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

impl fmt::Display for NavAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}
