// ============================================================================
// TgMenu Core - Keyboard Builder
// File: crates/tgmenu-core/src/services/keyboard_builder.rs
// ============================================================================
//! Composes visibility, paging and navigation tokens into a button grid.

use std::sync::Arc;

use tgmenu_shared::config::MenuSettings;
use tgmenu_shared::constants::{BACK_NAV_TEXT, BACK_TEXT, FORWARD_NAV_TEXT, NO_ITEMS_TEXT};
use tracing::debug;
use uuid::Uuid;

use crate::domain::{Button, Keyboard, KeyboardMode, MenuNode, NavAction, Viewer};
use crate::error::DomainError;
use crate::repositories::MenuRepository;
use crate::services::paginator::paginate;
use crate::services::visibility;

pub struct KeyboardBuilder<M: MenuRepository + ?Sized> {
    menu_repo: Arc<M>,
    settings: MenuSettings,
}

impl<M: MenuRepository + ?Sized> KeyboardBuilder<M> {
    pub fn new(menu_repo: Arc<M>, settings: MenuSettings) -> Self {
        Self { menu_repo, settings }
    }

    pub fn settings(&self) -> &MenuSettings {
        &self.settings
    }

    /// Render the children of `parent_id` (root level for `None`) visible to
    /// `viewer`, at `page`. Never returns an empty keyboard.
    pub async fn build(
        &self,
        viewer: &Viewer,
        parent_id: Option<Uuid>,
        page: u32,
        mode: KeyboardMode,
    ) -> Result<Keyboard, DomainError> {
        let children = self.menu_repo.get_children(parent_id).await?;
        let fetched = children.len();

        let mut items = visibility::visible(children, viewer);
        visibility::sort_for_display(&mut items);

        let visible = items.len();
        let keyboard = layout(items, parent_id, page, mode, &self.settings);

        debug!(
            "Built {:?} keyboard: parent={:?} page={}/{} viewer={} visible={}/{} buttons={}",
            mode,
            parent_id,
            keyboard.page,
            keyboard.total_pages,
            viewer,
            visible,
            fetched,
            keyboard.button_count()
        );

        Ok(keyboard)
    }

    /// The "no items" view, used when the requested folder is gone or hidden.
    pub fn placeholder(&self, parent_id: Option<Uuid>, mode: KeyboardMode) -> Keyboard {
        layout(Vec::new(), parent_id, self.settings.initial_page, mode, &self.settings)
    }
}

/// Lay out already filtered and ordered `items` as a keyboard grid.
pub fn layout(
    items: Vec<MenuNode>,
    parent_id: Option<Uuid>,
    page: u32,
    mode: KeyboardMode,
    settings: &MenuSettings,
) -> Keyboard {
    let page = paginate(items, page, settings.items_per_page);
    let per_row = settings.buttons_per_row.max(1) as usize;

    let mut rows: Vec<Vec<Button>> = if page.items.is_empty() {
        vec![vec![button(NO_ITEMS_TEXT, NavAction::Noop, mode)]]
    } else {
        page.items
            .chunks(per_row)
            .map(|chunk| chunk.iter().map(|node| item_button(node, mode)).collect())
            .collect()
    };

    if page.total_pages > 1 {
        let mut nav = Vec::with_capacity(2);
        if page.has_previous() {
            let action = NavAction::Page { page: page.page - 1, parent: parent_id };
            nav.push(button(BACK_NAV_TEXT, action, mode));
        }
        if page.has_next() {
            let action = NavAction::Page { page: page.page + 1, parent: parent_id };
            nav.push(button(FORWARD_NAV_TEXT, action, mode));
        }
        rows.push(nav);
    }

    if let Some(parent) = parent_id {
        rows.push(vec![button(BACK_TEXT, NavAction::Back(parent), mode)]);
    }

    Keyboard {
        mode,
        rows,
        page: page.page,
        total_pages: page.total_pages,
    }
}

fn item_button(node: &MenuNode, mode: KeyboardMode) -> Button {
    let action = if node.is_folder {
        NavAction::Open(node.id)
    } else {
        NavAction::Select(node.id)
    };
    button(&node.title, action, mode)
}

fn button(text: &str, action: NavAction, mode: KeyboardMode) -> Button {
    match mode {
        KeyboardMode::Root => Button::label(text),
        KeyboardMode::Nested => Button::callback(text, action),
    }
}
