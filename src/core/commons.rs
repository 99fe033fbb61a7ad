use dialoguer::console::measure_text_width;

/// Pads `text` with spaces up to `width` visible columns.
///
/// Text wider than `width` is returned unchanged so names are never cut.
pub fn pad_right(text: &str, width: usize) -> String {
    let visible = measure_text_width(text);
    format!("{}{}", text, " ".repeat(width.saturating_sub(visible)))
}
