pub const PREVIEW_ELLIPSIS: &str = "...";
pub const DEFAULT_PREVIEW_CHARS: usize = 1000;

/// Caps `markdown` at `max_chars` characters for display, appending an ellipsis when cut.
pub fn preview(markdown: &str, max_chars: usize) -> String {
    match markdown.char_indices().nth(max_chars) {
        None => markdown.to_string(),
        Some((end, _)) => format!("{}{PREVIEW_ELLIPSIS}", markdown[..end].trim_end()),
    }
}
