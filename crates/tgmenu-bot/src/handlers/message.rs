//! Text messages: `/start` and taps on the persistent root keyboard

use teloxide::types::Message;
use tracing::debug;

use tgmenu_shared::constants::START_COMMAND;

use crate::error::BotError;
use crate::handlers::render::render;
use crate::handlers::viewer_of;
use crate::state::BotState;

pub async fn handle_message(state: &BotState, message: Message) -> Result<(), BotError> {
    let Some(text) = message.text() else {
        debug!("Ignoring non-text message {} in chat {}", message.id.0, message.chat.id.0);
        return Ok(());
    };

    let viewer = viewer_of(state, message.from.as_ref()).await?;

    let reply = if is_start_command(text) {
        state.dispatcher.handle_start(&viewer).await?
    } else {
        state.dispatcher.handle_label(&viewer, text).await?
    };

    render(state, message.chat.id, reply, None).await
}

/// `/start`, optionally with a deep-link payload or a `@botname` suffix.
fn is_start_command(text: &str) -> bool {
    let command = text.split_whitespace().next().unwrap_or_default();
    command == START_COMMAND
        || command
            .strip_prefix(START_COMMAND)
            .is_some_and(|rest| rest.starts_with('@'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::{photo_message, state, text_message, CHAT};
    use crate::telegram::MockChatSurface;
    use teloxide::types::{ChatId, InlineKeyboardButtonKind, ReplyMarkup};
    use tgmenu_core::domain::{MenuNode, Role, TelegramUser};
    use tgmenu_core::repositories::InMemoryMenuStore;
    use tgmenu_shared::constants::{GUEST_GREETING_TEXT, MEMBER_GREETING_TEXT};

    fn root_labels(markup: &Option<ReplyMarkup>) -> Vec<String> {
        match markup {
            Some(ReplyMarkup::Keyboard(kb)) => kb.keyboard.iter().flatten().map(|b| b.text.clone()).collect(),
            _ => Vec::new(),
        }
    }

    #[test]
    fn test_start_command_forms() {
        assert!(is_start_command("/start"));
        assert!(is_start_command("/start ref-123"));
        assert!(is_start_command("/start@menu_bot"));
        assert!(!is_start_command("/started"));
        assert!(!is_start_command("start"));
    }

    #[tokio::test]
    async fn test_start_sends_guest_root_keyboard() {
        let mut store = InMemoryMenuStore::new();
        store.insert_node(MenuNode::folder("О компании", None).unwrap().with_guest_access());
        store.insert_node(MenuNode::folder("Для своих", None).unwrap().with_role(uuid::Uuid::new_v4()));

        let mut surface = MockChatSurface::new();
        surface
            .expect_send_message()
            .withf(|chat_id: &ChatId, text: &str, markup: &Option<ReplyMarkup>| {
                *chat_id == ChatId(CHAT)
                    && text == GUEST_GREETING_TEXT
                    && root_labels(markup) == vec!["О компании".to_string()]
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        let state = state(store, surface, None);
        handle_message(&state, text_message("/start")).await.unwrap();
    }

    #[tokio::test]
    async fn test_start_greets_member_with_role_items() {
        let role = Role::new("Сотрудник".to_string(), false).unwrap();
        let mut user = TelegramUser::new(CHAT, None);
        user.role_id = Some(role.id);

        let mut store = InMemoryMenuStore::new();
        store.insert_node(MenuNode::folder("Для своих", None).unwrap().with_role(role.id));
        store.insert_role(role);
        store.insert_user(user);

        let mut surface = MockChatSurface::new();
        surface
            .expect_send_message()
            .withf(|_: &ChatId, text: &str, markup: &Option<ReplyMarkup>| {
                text == MEMBER_GREETING_TEXT && root_labels(markup) == vec!["Для своих".to_string()]
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        let state = state(store, surface, None);
        handle_message(&state, text_message("/start")).await.unwrap();
    }

    #[tokio::test]
    async fn test_root_folder_label_sends_inline_keyboard() {
        let folder = MenuNode::folder("Кадры", None).unwrap().with_guest_access();
        let back = format!("back_{}", folder.id);
        let store = InMemoryMenuStore::from_parts(vec![folder], vec![], vec![]);

        let mut surface = MockChatSurface::new();
        surface
            .expect_send_message()
            .withf(move |_: &ChatId, text: &str, markup: &Option<ReplyMarkup>| {
                let Some(ReplyMarkup::InlineKeyboard(kb)) = markup else {
                    return false;
                };
                let last = kb.inline_keyboard.last().and_then(|row| row.first());
                text == "Кадры"
                    && last.is_some_and(|b| b.kind == InlineKeyboardButtonKind::CallbackData(back.clone()))
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        let state = state(store, surface, None);
        handle_message(&state, text_message("Кадры")).await.unwrap();
    }

    #[tokio::test]
    async fn test_root_leaf_with_image_sends_photo() {
        let leaf = MenuNode::leaf("Схема проезда", None, "Офис на 3 этаже")
            .unwrap()
            .with_guest_access()
            .with_image("maps/office.png");
        let store = InMemoryMenuStore::from_parts(vec![leaf], vec![], vec![]);

        let mut surface = MockChatSurface::new();
        surface
            .expect_send_photo()
            .withf(|chat_id: &ChatId, photo: &str, caption: &str| {
                *chat_id == ChatId(CHAT)
                    && photo == "https://static.example.org/maps/office.png"
                    && caption == "Офис на 3 этаже"
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        let state = state(store, surface, Some("https://static.example.org"));
        handle_message(&state, text_message("Схема проезда")).await.unwrap();
    }

    #[tokio::test]
    async fn test_non_text_message_is_ignored() {
        let surface = MockChatSurface::new();
        let state = state(InMemoryMenuStore::new(), surface, None);

        handle_message(&state, photo_message()).await.unwrap();
    }
}
