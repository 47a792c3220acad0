use crossterm::style::ContentStyle;

/// Draw styled segments into exactly `width` cells: text past the edge is cut, and the
/// rest of the row is filled with spaces in `fill`.
pub fn paint(segments: &[(String, ContentStyle)], width: usize, fill: ContentStyle) -> String {
    let mut out = String::new();
    let mut used = 0;
    for (text, style) in segments {
        if used >= width {
            break;
        }
        let part: String = text.chars().take(width - used).collect();
        if part.is_empty() {
            continue;
        }
        used += part.chars().count();
        out.push_str(&style.apply(part).to_string());
    }
    if used < width {
        out.push_str(&fill.apply(" ".repeat(width - used)).to_string());
    }
    out
}

/// Cells needed to draw `s`.
pub fn cells(s: &str) -> usize {
    s.chars().count()
}
