//! Core keyboards to Telegram reply markup

use teloxide::types::{
    InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton, KeyboardMarkup, ReplyMarkup,
};
use tgmenu_core::domain::{Keyboard, KeyboardMode, NavAction};

/// Root keyboards become the persistent bottom keyboard, nested ones an
/// inline keyboard under the message.
pub fn reply_markup(keyboard: &Keyboard) -> ReplyMarkup {
    match keyboard.mode {
        KeyboardMode::Root => {
            let rows = keyboard
                .rows
                .iter()
                .map(|row| row.iter().map(|b| KeyboardButton::new(b.text.clone())).collect::<Vec<_>>());
            ReplyMarkup::Keyboard(KeyboardMarkup::new(rows).resize_keyboard().persistent())
        }
        KeyboardMode::Nested => ReplyMarkup::InlineKeyboard(inline_markup(keyboard)),
    }
}

pub fn inline_markup(keyboard: &Keyboard) -> InlineKeyboardMarkup {
    let rows = keyboard.rows.iter().map(|row| {
        row.iter()
            .map(|b| {
                // Telegram rejects inline buttons without an action
                let data = b.token().unwrap_or_else(|| NavAction::Noop.encode());
                InlineKeyboardButton::callback(b.text.clone(), data)
            })
            .collect::<Vec<_>>()
    });
    InlineKeyboardMarkup::new(rows)
}
