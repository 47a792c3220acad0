use crossterm::style::Stylize;

use crate::ui::model::Model;
use crate::ui::render::util::{cells, paint};

/// The prompt string followed by the visible part of the input text, selection in
/// reverse video. In password mode only the prompt is drawn.
pub fn render_input(m: &Model) -> String {
    let normal = m.palette.normal.text();
    let mut segments = Vec::new();
    if let Some(prompt) = m.session.prompt.as_deref().filter(|p| !p.is_empty()) {
        segments.push((format!("{prompt} "), normal));
    }
    if !m.session.password {
        let text = m.text();
        let start = text
            .char_indices()
            .nth(m.input_scroll())
            .map(|(i, _)| i)
            .unwrap_or(text.len());
        let (lo, hi) = m.buffer.selection_range();
        let (lo, hi) = (lo.max(start), hi.max(start));
        segments.push((text[start..lo].to_string(), normal));
        segments.push((text[lo..hi].to_string(), normal.reverse()));
        segments.push((text[hi..].to_string(), normal));
    }
    paint(&segments, m.screen_width, normal)
}

/// Terminal column of the text cursor on the input row.
pub fn cursor_column(m: &Model) -> usize {
    let col = if m.session.password {
        m.prompt_width()
    } else {
        m.prompt_width() + cells(&m.text()[..m.buffer.cursor]) - m.input_scroll()
    };
    col.min(m.screen_width.saturating_sub(1))
}
