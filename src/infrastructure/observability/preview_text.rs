const MAX_VISIBLE_LENGTH: usize = 100;

/// Truncates model output for logging without splitting a multi-byte
/// character.
pub fn preview_text(text: &str) -> String {
    let trimmed = text.trim();

    if trimmed.is_empty() {
        return String::from("[EMPTY]");
    }

    let total = trimmed.chars().count();
    if total <= MAX_VISIBLE_LENGTH {
        return trimmed.to_string();
    }

    let visible: String = trimmed.chars().take(MAX_VISIBLE_LENGTH).collect();
    format!("{}... ({} chars total)", visible, total)
}
