//! Application-wide constants

// Reserved navigation labels. The persistent root keyboard dispatches on
// these exact strings, so they double as part of the wire contract.
pub const BACK_TEXT: &str = "⬅ Назад";
pub const BACK_NAV_TEXT: &str = "« Назад";
pub const FORWARD_NAV_TEXT: &str = "Вперед »";

pub const NO_ITEMS_TEXT: &str = "Элементов нет";
pub const NO_CONTENT_TEXT: &str = "Информация отсутствует";
pub const MENU_TEXT: &str = "Меню";
pub const UNKNOWN_LABEL_TEXT: &str = "Выберите пункт меню";
pub const GUEST_GREETING_TEXT: &str = "Привет! Вот ваше меню (гостевой доступ):";
pub const MEMBER_GREETING_TEXT: &str = "С возвращением! Вот ваше меню:";

pub const START_COMMAND: &str = "/start";

/// Root keyboard input dispatched before any title lookup
pub const RESERVED_LABELS: [&str; 4] = [START_COMMAND, FORWARD_NAV_TEXT, BACK_NAV_TEXT, BACK_TEXT];

// Navigation token prefixes
pub const OPEN_PREFIX: &str = "open";
pub const SELECT_PREFIX: &str = "select";
pub const PAGE_PREFIX: &str = "page";
pub const BACK_PREFIX: &str = "back";
pub const NOOP_TOKEN: &str = "noop";
pub const TOKEN_SEPARATOR: char = '_';

// Pagination defaults
pub const DEFAULT_ITEMS_PER_PAGE: u32 = 10;
pub const DEFAULT_BUTTONS_PER_ROW: u32 = 2;
pub const DEFAULT_INITIAL_PAGE: u32 = 1;

// Telegram platform limits
pub const CALLBACK_DATA_MAX_BYTES: usize = 64;
pub const MESSAGE_TEXT_MAX_CHARS: usize = 4096;
pub const CAPTION_MAX_CHARS: usize = 1024;

// Parent-chain walks stop here; only a cycle can reach it
pub const MAX_TREE_DEPTH: usize = 64;
