//! Image reference resolution

use tgmenu_shared::utils::is_absolute_url;

/// What to pass as `photo` for a stored image reference: absolute URLs as
/// they are, relative paths joined onto `base_url`, anything else as a
/// Telegram `file_id`.
pub fn resolve_image(image_ref: &str, base_url: Option<&str>) -> String {
    let image_ref = image_ref.trim();
    if is_absolute_url(image_ref) {
        return image_ref.to_string();
    }
    match base_url {
        Some(base) => format!(
            "{}/{}",
            base.trim_end_matches('/'),
            image_ref.trim_start_matches('/')
        ),
        None => image_ref.to_string(),
    }
}
