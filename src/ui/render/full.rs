use crate::ui::model::Model;
use crate::ui::render::input::render_input;
use crate::ui::render::list::render_list;

/// The whole prompt: input row, then the separator and the dropdown while completing.
/// Every row is exactly the screen width.
pub fn render_full(m: &Model) -> String {
    let mut lines = vec![render_input(m)];
    if m.is_completing() {
        let rule = "─".repeat(m.screen_width);
        lines.push(m.palette.separator().apply(rule).to_string());
        lines.extend(render_list(m));
    }
    if m.screen_height > 0 {
        lines.truncate(m.screen_height);
    }
    lines.join("\n")
}
