// ============================================================================
// TgMenu Core - Interaction Dispatcher
// File: crates/tgmenu-core/src/services/dispatcher.rs
// ============================================================================
//! Per-interaction entry points: label text from the persistent root
//! keyboard and callback tokens from inline keyboards.
//!
//! Nothing is remembered between interactions. Every reply is re-derived
//! from the label or token plus the current store contents.

use std::sync::Arc;
use uuid::Uuid;
use tracing::{debug, info, warn};

use tgmenu_shared::constants::{
    BACK_NAV_TEXT, BACK_TEXT, FORWARD_NAV_TEXT, GUEST_GREETING_TEXT, MEMBER_GREETING_TEXT,
    MENU_TEXT, NO_CONTENT_TEXT, START_COMMAND, UNKNOWN_LABEL_TEXT,
};

use crate::domain::{Delivery, Keyboard, KeyboardMode, MenuNode, NavAction, Reply, Viewer};
use crate::error::DomainError;
use crate::repositories::MenuRepository;
use crate::services::keyboard_builder::KeyboardBuilder;
use crate::services::visibility;

/// Turns one incoming interaction into the next render.
pub struct InteractionDispatcher<M: MenuRepository + ?Sized> {
    menu_repo: Arc<M>,
    keyboards: KeyboardBuilder<M>,
}

impl<M: MenuRepository + ?Sized> InteractionDispatcher<M> {
    pub fn new(menu_repo: Arc<M>, keyboards: KeyboardBuilder<M>) -> Self {
        Self { menu_repo, keyboards }
    }

    fn initial_page(&self) -> u32 {
        self.keyboards.settings().initial_page
    }

    /// Greet the viewer and attach the persistent root keyboard.
    pub async fn handle_start(&self, viewer: &Viewer) -> Result<Reply, DomainError> {
        info!("Start requested by {}", viewer);

        let text = if viewer.is_guest() {
            GUEST_GREETING_TEXT
        } else {
            MEMBER_GREETING_TEXT
        };
        self.root_reply(viewer, text).await
    }

    /// Dispatch a tap on the persistent root keyboard (or any typed text).
    pub async fn handle_label(&self, viewer: &Viewer, label: &str) -> Result<Reply, DomainError> {
        let label = label.trim();
        debug!("Label {:?} from {}", label, viewer);

        // Reserved labels win over a root node with the same title
        match label {
            START_COMMAND => self.handle_start(viewer).await,
            FORWARD_NAV_TEXT => {
                // The persistent keyboard always shows the first page; later
                // root pages continue inline so the page travels in the token.
                let page = self.initial_page().saturating_add(1);
                let keyboard = self.keyboards.build(viewer, None, page, KeyboardMode::Nested).await?;
                Ok(keyboard_reply(MENU_TEXT, keyboard, Delivery::Send))
            }
            BACK_NAV_TEXT | BACK_TEXT => self.root_reply(viewer, MENU_TEXT).await,
            _ => match self.find_root_node(viewer, label).await? {
                Some(node) if node.is_folder => {
                    let keyboard = self
                        .keyboards
                        .build(viewer, Some(node.id), self.initial_page(), KeyboardMode::Nested)
                        .await?;
                    Ok(keyboard_reply(&node.title, keyboard, Delivery::Send))
                }
                Some(node) => Ok(content_reply(Some(&node), Delivery::Send)),
                None => {
                    debug!("Label {:?} matches no visible root node", label);
                    self.root_reply(viewer, UNKNOWN_LABEL_TEXT).await
                }
            },
        }
    }

    /// Dispatch a tap on an inline keyboard.
    pub async fn handle_callback(&self, viewer: &Viewer, token: &str) -> Result<Reply, DomainError> {
        let action = NavAction::decode(token);
        debug!("Callback {:?} decoded as {:?} for {}", token, action, viewer);

        match action {
            NavAction::Noop => Ok(Reply::Acknowledge),
            NavAction::Open(id) => self.folder_reply(viewer, id, self.initial_page()).await,
            NavAction::Page { page, parent: Some(id) } => self.folder_reply(viewer, id, page).await,
            NavAction::Page { page, parent: None } => self.root_nested_reply(viewer, page).await,
            NavAction::Select(id) => self.select_reply(viewer, id).await,
            NavAction::Back(id) => self.back_reply(viewer, id).await,
        }
    }

    async fn root_reply(&self, viewer: &Viewer, text: &str) -> Result<Reply, DomainError> {
        let keyboard = self
            .keyboards
            .build(viewer, None, self.initial_page(), KeyboardMode::Root)
            .await?;
        Ok(keyboard_reply(text, keyboard, Delivery::Send))
    }

    async fn root_nested_reply(&self, viewer: &Viewer, page: u32) -> Result<Reply, DomainError> {
        let keyboard = self.keyboards.build(viewer, None, page, KeyboardMode::Nested).await?;
        Ok(keyboard_reply(MENU_TEXT, keyboard, Delivery::Edit))
    }

    async fn folder_reply(&self, viewer: &Viewer, id: Uuid, page: u32) -> Result<Reply, DomainError> {
        match self.reachable_node(viewer, id).await? {
            Some(folder) if folder.is_folder => {
                let keyboard = self
                    .keyboards
                    .build(viewer, Some(folder.id), page, KeyboardMode::Nested)
                    .await?;
                Ok(keyboard_reply(&folder.title, keyboard, Delivery::Edit))
            }
            found => {
                if found.is_some() {
                    warn!("Node {} is not a folder, cannot open it", id);
                }
                let keyboard = self.keyboards.placeholder(Some(id), KeyboardMode::Nested);
                Ok(keyboard_reply(MENU_TEXT, keyboard, Delivery::Edit))
            }
        }
    }

    async fn select_reply(&self, viewer: &Viewer, id: Uuid) -> Result<Reply, DomainError> {
        let node = self.reachable_node(viewer, id).await?.filter(|node| {
            if node.is_folder {
                warn!("Node {} is a folder, it has no content to select", node.id);
            }
            !node.is_folder
        });
        Ok(content_reply(node.as_ref(), Delivery::Edit))
    }

    async fn back_reply(&self, viewer: &Viewer, id: Uuid) -> Result<Reply, DomainError> {
        let parent = match self.menu_repo.get_node(&id).await? {
            Some(node) => node.parent_id,
            None => {
                warn!("Back from missing node {}, returning to root", id);
                None
            }
        };

        match parent {
            Some(parent_id) => self.folder_reply(viewer, parent_id, self.initial_page()).await,
            None => self.root_nested_reply(viewer, self.initial_page()).await,
        }
    }

    /// The node, if it exists and the viewer can reach it from the root.
    async fn reachable_node(&self, viewer: &Viewer, id: Uuid) -> Result<Option<MenuNode>, DomainError> {
        let Some(node) = self.menu_repo.get_node(&id).await? else {
            warn!("Stale reference to missing node {}", id);
            return Ok(None);
        };

        if !visibility::is_reachable(self.menu_repo.as_ref(), &node, viewer).await? {
            warn!("Node {} is not reachable for {}", id, viewer);
            return Ok(None);
        }

        Ok(Some(node))
    }

    async fn find_root_node(&self, viewer: &Viewer, title: &str) -> Result<Option<MenuNode>, DomainError> {
        let roots = self.menu_repo.get_children(None).await?;
        Ok(visibility::visible(roots, viewer)
            .into_iter()
            .find(|node| node.title == title))
    }
}

fn keyboard_reply(text: &str, keyboard: Keyboard, delivery: Delivery) -> Reply {
    Reply::Keyboard {
        text: text.to_string(),
        keyboard,
        delivery,
    }
}

/// Leaf content, or the "no content" placeholder for a missing or hidden
/// leaf and for one with neither text nor image. An image-only leaf keeps
/// an empty caption.
fn content_reply(node: Option<&MenuNode>, delivery: Delivery) -> Reply {
    let image_ref = node
        .and_then(|n| n.image_ref.as_deref())
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(str::to_string);
    let text = match (node.and_then(MenuNode::display_content), &image_ref) {
        (Some(content), _) => content.to_string(),
        (None, Some(_)) => String::new(),
        (None, None) => NO_CONTENT_TEXT.to_string(),
    };

    Reply::Content { text, image_ref, delivery }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::{InMemoryMenuStore, MockMenuRepository};
    use tgmenu_shared::config::MenuSettings;
    use tgmenu_shared::constants::NO_ITEMS_TEXT;

    fn dispatcher(store: InMemoryMenuStore) -> InteractionDispatcher<InMemoryMenuStore> {
        let store = Arc::new(store);
        let keyboards = KeyboardBuilder::new(store.clone(), MenuSettings::default());
        InteractionDispatcher::new(store, keyboards)
    }

    struct Fixture {
        role: Uuid,
        a: MenuNode,
        b: MenuNode,
        store: InMemoryMenuStore,
    }

    /// Root: A (guest folder, empty) and B (leaf for role R1, empty content).
    fn fixture() -> Fixture {
        let role = Uuid::new_v4();
        let a = MenuNode::folder("A", None).unwrap().with_guest_access();
        let b = MenuNode::leaf("B", None, "").unwrap().with_role(role);
        let store = InMemoryMenuStore::from_parts(vec![a.clone(), b.clone()], vec![], vec![]);
        Fixture { role, a, b, store }
    }

    fn expect_keyboard(reply: Reply) -> (String, Keyboard, Delivery) {
        match reply {
            Reply::Keyboard { text, keyboard, delivery } => (text, keyboard, delivery),
            other => panic!("expected keyboard reply, got {:?}", other),
        }
    }

    fn expect_content(reply: Reply) -> (String, Option<String>, Delivery) {
        match reply {
            Reply::Content { text, image_ref, delivery } => (text, image_ref, delivery),
            other => panic!("expected content reply, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_start_greets_by_viewer_kind() {
        let fx = fixture();
        let d = dispatcher(fx.store);

        let (text, kb, delivery) = expect_keyboard(d.handle_start(&Viewer::Guest).await.unwrap());
        assert_eq!(text, GUEST_GREETING_TEXT);
        assert_eq!(kb.mode, KeyboardMode::Root);
        assert_eq!(kb.labels(), vec!["A"]);
        assert_eq!(delivery, Delivery::Send);

        let (text, kb, _) = expect_keyboard(d.handle_start(&Viewer::Role(fx.role)).await.unwrap());
        assert_eq!(text, MEMBER_GREETING_TEXT);
        assert_eq!(kb.labels(), vec!["A", "B"]);
    }

    #[tokio::test]
    async fn test_open_empty_folder_shows_placeholder_and_up_row() {
        let fx = fixture();
        let a_id = fx.a.id;
        let d = dispatcher(fx.store);

        let reply = d.handle_callback(&Viewer::Guest, &format!("open_{}", a_id)).await.unwrap();
        let (text, kb, delivery) = expect_keyboard(reply);
        assert_eq!(text, "A");
        assert_eq!(delivery, Delivery::Edit);
        assert_eq!(kb.labels(), vec![NO_ITEMS_TEXT, BACK_TEXT]);
        assert_eq!(kb.tokens(), vec!["noop".to_string(), format!("back_{}", a_id)]);
    }

    #[tokio::test]
    async fn test_select_empty_leaf_yields_no_content() {
        let fx = fixture();
        let b_id = fx.b.id;
        let viewer = Viewer::Role(fx.role);
        let d = dispatcher(fx.store);

        let reply = d.handle_callback(&viewer, &format!("select_{}", b_id)).await.unwrap();
        let (text, image, delivery) = expect_content(reply);
        assert_eq!(text, NO_CONTENT_TEXT);
        assert_eq!(image, None);
        assert_eq!(delivery, Delivery::Edit);
    }

    #[tokio::test]
    async fn test_select_returns_content_and_image() {
        let leaf = MenuNode::leaf("Контакты", None, " Телефон: 123 ")
            .unwrap()
            .with_guest_access()
            .with_image("contacts.png");
        let id = leaf.id;
        let d = dispatcher(InMemoryMenuStore::from_parts(vec![leaf], vec![], vec![]));

        let reply = d.handle_callback(&Viewer::Guest, &format!("select_{}", id)).await.unwrap();
        let (text, image, _) = expect_content(reply);
        assert_eq!(text, "Телефон: 123");
        assert_eq!(image.as_deref(), Some("contacts.png"));
    }

    #[tokio::test]
    async fn test_image_only_leaf_has_empty_caption() {
        let leaf = MenuNode::leaf("Схема", None, "")
            .unwrap()
            .with_guest_access()
            .with_image("map.png");
        let id = leaf.id;
        let d = dispatcher(InMemoryMenuStore::from_parts(vec![leaf], vec![], vec![]));

        let reply = d.handle_callback(&Viewer::Guest, &format!("select_{}", id)).await.unwrap();
        let (text, image, _) = expect_content(reply);
        assert_eq!(text, "");
        assert_eq!(image.as_deref(), Some("map.png"));
    }

    #[tokio::test]
    async fn test_select_of_folder_yields_no_content() {
        let mut folder = MenuNode::folder("Отдел", None).unwrap().with_guest_access();
        folder.content = Some("Старый текст пункта".to_string());
        let id = folder.id;
        let d = dispatcher(InMemoryMenuStore::from_parts(vec![folder], vec![], vec![]));

        let reply = d.handle_callback(&Viewer::Guest, &format!("select_{}", id)).await.unwrap();
        let (text, image, _) = expect_content(reply);
        assert_eq!(text, NO_CONTENT_TEXT);
        assert!(image.is_none());
    }

    #[tokio::test]
    async fn test_open_of_leaf_degrades_to_placeholder() {
        let leaf = MenuNode::leaf("Новости", None, "Всё спокойно").unwrap().with_guest_access();
        let id = leaf.id;
        let d = dispatcher(InMemoryMenuStore::from_parts(vec![leaf], vec![], vec![]));

        let (text, kb, delivery) = expect_keyboard(
            d.handle_callback(&Viewer::Guest, &format!("open_{}", id)).await.unwrap(),
        );
        assert_eq!(text, MENU_TEXT);
        assert_eq!(delivery, Delivery::Edit);
        assert_eq!(kb.labels(), vec![NO_ITEMS_TEXT, BACK_TEXT]);
        assert_eq!(kb.tokens(), vec!["noop".to_string(), format!("back_{}", id)]);
    }

    #[tokio::test]
    async fn test_forged_select_of_hidden_leaf_reveals_nothing() {
        let fx = fixture();
        let b_id = fx.b.id;
        let d = dispatcher(fx.store);

        let reply = d.handle_callback(&Viewer::Guest, &format!("select_{}", b_id)).await.unwrap();
        let (text, image, _) = expect_content(reply);
        assert_eq!(text, NO_CONTENT_TEXT);
        assert!(image.is_none());
    }

    #[tokio::test]
    async fn test_select_under_hidden_folder_is_unreachable() {
        let role = Uuid::new_v4();
        let secret = MenuNode::folder("Секрет", None).unwrap().with_role(role);
        let leaf = MenuNode::leaf("Пароль", Some(secret.id), "qwerty").unwrap().with_guest_access();
        let leaf_id = leaf.id;
        let d = dispatcher(InMemoryMenuStore::from_parts(vec![secret, leaf], vec![], vec![]));

        let (text, _, _) = expect_content(
            d.handle_callback(&Viewer::Guest, &format!("select_{}", leaf_id)).await.unwrap(),
        );
        assert_eq!(text, NO_CONTENT_TEXT);

        let (text, _, _) = expect_content(
            d.handle_callback(&Viewer::Role(role), &format!("select_{}", leaf_id)).await.unwrap(),
        );
        assert_eq!(text, "qwerty");
    }

    #[tokio::test]
    async fn test_stale_open_degrades_to_placeholder() {
        let d = dispatcher(InMemoryMenuStore::new());
        let gone = Uuid::new_v4();

        let (_, kb, _) = expect_keyboard(
            d.handle_callback(&Viewer::Guest, &format!("open_{}", gone)).await.unwrap(),
        );
        assert_eq!(kb.labels(), vec![NO_ITEMS_TEXT, BACK_TEXT]);
    }

    #[tokio::test]
    async fn test_malformed_and_noop_tokens_are_acknowledged() {
        let d = dispatcher(fixture().store);
        for token in ["noop", "", "menu_page_2_None", "open_1"] {
            let reply = d.handle_callback(&Viewer::Guest, token).await.unwrap();
            assert_eq!(reply, Reply::Acknowledge, "token {:?}", token);
        }
    }

    #[tokio::test]
    async fn test_page_token_renders_requested_page() {
        let parent = MenuNode::folder("Каталог", None).unwrap().with_guest_access();
        let mut store = InMemoryMenuStore::new();
        store.insert_node(parent.clone());
        for i in 0..25 {
            store.insert_node(
                MenuNode::leaf(&format!("Пункт {:02}", i + 1), Some(parent.id), "x")
                    .unwrap()
                    .with_guest_access(),
            );
        }
        let d = dispatcher(store);

        let reply = d
            .handle_callback(&Viewer::Guest, &format!("page_2_{}", parent.id))
            .await
            .unwrap();
        let (_, kb, delivery) = expect_keyboard(reply);
        assert_eq!(delivery, Delivery::Edit);
        assert_eq!(kb.page, 2);
        assert_eq!(kb.labels()[0], "Пункт 11");
    }

    #[tokio::test]
    async fn test_back_renders_parent_of_target() {
        let top = MenuNode::folder("Верх", None).unwrap().with_guest_access();
        let inner = MenuNode::folder("Низ", Some(top.id)).unwrap().with_guest_access();
        let inner_id = inner.id;
        let top_id = top.id;
        let d = dispatcher(InMemoryMenuStore::from_parts(vec![top, inner], vec![], vec![]));

        let (text, kb, _) = expect_keyboard(
            d.handle_callback(&Viewer::Guest, &format!("back_{}", inner_id)).await.unwrap(),
        );
        assert_eq!(text, "Верх");
        assert!(kb.tokens().contains(&format!("open_{}", inner_id)));

        let (text, kb, _) = expect_keyboard(
            d.handle_callback(&Viewer::Guest, &format!("back_{}", top_id)).await.unwrap(),
        );
        assert_eq!(text, MENU_TEXT);
        assert_eq!(kb.mode, KeyboardMode::Nested);
        assert_eq!(kb.tokens(), vec![format!("open_{}", top_id)]);
    }

    #[tokio::test]
    async fn test_back_from_missing_node_returns_to_root() {
        let fx = fixture();
        let d = dispatcher(fx.store);

        let (text, kb, _) = expect_keyboard(
            d.handle_callback(&Viewer::Guest, &format!("back_{}", Uuid::new_v4())).await.unwrap(),
        );
        assert_eq!(text, MENU_TEXT);
        assert_eq!(kb.labels(), vec!["A"]);
    }

    #[tokio::test]
    async fn test_label_opens_root_folder_and_leaf() {
        let folder = MenuNode::folder("Кадры", None).unwrap().with_guest_access();
        let leaf = MenuNode::leaf("Новости", None, "Всё спокойно").unwrap().with_guest_access();
        let d = dispatcher(InMemoryMenuStore::from_parts(vec![folder.clone(), leaf], vec![], vec![]));

        let (text, kb, delivery) = expect_keyboard(d.handle_label(&Viewer::Guest, "Кадры").await.unwrap());
        assert_eq!(text, "Кадры");
        assert_eq!(kb.mode, KeyboardMode::Nested);
        assert_eq!(delivery, Delivery::Send);
        assert_eq!(kb.tokens(), vec!["noop".to_string(), format!("back_{}", folder.id)]);

        let (text, _, delivery) = expect_content(d.handle_label(&Viewer::Guest, "Новости").await.unwrap());
        assert_eq!(text, "Всё спокойно");
        assert_eq!(delivery, Delivery::Send);
    }

    #[tokio::test]
    async fn test_label_of_hidden_node_is_unknown() {
        let fx = fixture();
        let d = dispatcher(fx.store);

        let (text, kb, _) = expect_keyboard(d.handle_label(&Viewer::Guest, "B").await.unwrap());
        assert_eq!(text, UNKNOWN_LABEL_TEXT);
        assert_eq!(kb.mode, KeyboardMode::Root);
    }

    #[tokio::test]
    async fn test_reserved_labels() {
        let mut store = InMemoryMenuStore::new();
        for i in 0..12 {
            store.insert_node(
                MenuNode::leaf(&format!("{:02}", i), None, "x").unwrap().with_guest_access(),
            );
        }
        let d = dispatcher(store);

        let (_, kb, _) = expect_keyboard(d.handle_label(&Viewer::Guest, FORWARD_NAV_TEXT).await.unwrap());
        assert_eq!(kb.mode, KeyboardMode::Nested);
        assert_eq!(kb.page, 2);
        assert_eq!(kb.labels()[0], "10");
        assert!(kb.tokens().contains(&"page_1_".to_string()));

        for label in [BACK_NAV_TEXT, BACK_TEXT] {
            let (text, kb, _) = expect_keyboard(d.handle_label(&Viewer::Guest, label).await.unwrap());
            assert_eq!(text, MENU_TEXT);
            assert_eq!(kb.mode, KeyboardMode::Root);
            assert_eq!(kb.page, 1);
        }
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let mut repo = MockMenuRepository::new();
        repo.expect_get_children()
            .returning(|_| Err(DomainError::DatabaseError("connection refused".to_string())));

        let repo = Arc::new(repo);
        let keyboards = KeyboardBuilder::new(repo.clone(), MenuSettings::default());
        let d = InteractionDispatcher::new(repo, keyboards);

        let result = d.handle_start(&Viewer::Guest).await;
        assert!(matches!(result, Err(DomainError::DatabaseError(_))));
    }
}
