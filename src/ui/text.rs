//! Text layout helpers

/// Approximate advance of one character, as a fraction of font size
const CHAR_WIDTH: f32 = 0.55;

/// Approximate rendered width of `text`
pub fn text_width(text: &str, font_size: f32) -> f32 {
    text.chars().count() as f32 * font_size * CHAR_WIDTH
}

/// Wrap text to fit within a given pixel width.
/// Explicit newlines start a new paragraph; a word longer than the width gets
/// its own line.
pub fn wrap_text(text: &str, font_size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current_line = String::new();

        for word in paragraph.split_whitespace() {
            let test_line = if current_line.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", current_line, word)
            };

            if text_width(&test_line, font_size) <= max_width || current_line.is_empty() {
                current_line = test_line;
            } else {
                lines.push(current_line);
                current_line = word.to_string();
            }
        }

        lines.push(current_line);
    }

    lines
}
