use crate::ui::model::Model;
use crate::ui::render::styles::Shade;
use crate::ui::render::util::{cells, paint};

// descriptions start no further left than this, nor than 1/7 of the width
const MIN_DESCRIPTION_COLUMN: usize = 20;
const DESCRIPTION_PART: usize = 7;

/// Left margin of dropdown rows: under the input text when indenting, else one cell.
pub fn item_indent(m: &Model) -> usize {
    if m.session.indent {
        m.prompt_width()
    } else {
        1
    }
}

/// One row per visible candidate. The selected row wins over the hovered one.
pub fn render_list(m: &Model) -> Vec<String> {
    let Some(c) = &m.completion else {
        return Vec::new();
    };
    let window = m.window();
    let indent = item_indent(m);
    let desc_min = (m.screen_width / DESCRIPTION_PART).max(MIN_DESCRIPTION_COLUMN);

    c.visible(window)
        .iter()
        .enumerate()
        .map(|(row, &id)| {
            let idx = c.first_visible + row;
            let shade: &Shade = if idx == c.selected {
                &m.palette.selected
            } else if m.hovered == Some(idx) {
                &m.palette.hover
            } else {
                &m.palette.normal
            };
            let item = c.items(&m.tree).get(id);

            let mut segments = vec![(" ".repeat(indent), shade.text())];
            match (&item.description, m.session.descriptions) {
                (Some(desc), true) => segments.push((desc.clone(), shade.text())),
                (desc, _) => {
                    segments.push((item.text.clone(), shade.text()));
                    if let Some(desc) = desc {
                        let col = (indent + cells(&item.text) + 2).max(desc_min);
                        let gap = col - indent - cells(&item.text);
                        segments.push((" ".repeat(gap), shade.text()));
                        segments.push((desc.clone(), shade.description()));
                    }
                }
            }
            paint(&segments, m.screen_width, shade.text())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Session;
    use crate::history::HistoryLog;
    use crate::item::read_items;
    use crate::keymap::Ctrl;
    use crate::ui::{Msg, initial_model};
    use regex::Regex;

    fn strip_ansi(s: &str) -> String {
        let re = Regex::new(r"\x1b\[[0-9;?]*[ -/]*[@-~]").unwrap();
        re.replace_all(s, "").to_string()
    }

    fn model(input: &str, session: Session) -> Model {
        let tree = read_items(input.as_bytes()).unwrap();
        let mut m = initial_model(session, tree, HistoryLog::default());
        m.update(Msg::WindowSize { width: 70, height: 20 });
        m
    }

    #[test]
    fn idle_prompt_has_no_rows() {
        let m = model("a\n", Session::default());
        assert!(render_list(&m).is_empty());
    }

    #[test]
    fn descriptions_line_up_in_a_column() {
        let mut m = model("ls\tlist files\ngit\tvcs\nmake\n", Session::default());
        m.update(Msg::Op(Ctrl::Next));
        let rows: Vec<String> = render_list(&m).iter().map(|r| strip_ansi(r)).collect();
        assert_eq!(rows.len(), 3);
        assert!(rows[0].starts_with(" ls "));
        assert_eq!(rows[0].find("list files"), Some(MIN_DESCRIPTION_COLUMN));
        assert_eq!(rows[1].find("vcs"), Some(MIN_DESCRIPTION_COLUMN));
        assert_eq!(rows[2].trim_end(), " make");
        for r in &rows {
            assert_eq!(r.chars().count(), 70);
        }
    }

    #[test]
    fn description_mode_shows_descriptions_only() {
        let session = Session {
            descriptions: true,
            ..Session::default()
        };
        let mut m = model("ff\tfirefox\nvi\n", session);
        m.update(Msg::Op(Ctrl::Next));
        let rows: Vec<String> = render_list(&m).iter().map(|r| strip_ansi(r)).collect();
        assert_eq!(rows[0].trim_end(), " firefox");
        assert_eq!(rows[1].trim_end(), " vi");
    }

    #[test]
    fn indent_follows_prompt() {
        let session = Session {
            indent: true,
            prompt: Some("run:".into()),
            ..Session::default()
        };
        let mut m = model("a\n", session);
        m.update(Msg::Op(Ctrl::Next));
        let rows: Vec<String> = render_list(&m).iter().map(|r| strip_ansi(r)).collect();
        assert!(rows[0].starts_with("     a"));
    }

    #[test]
    fn selected_and_hovered_rows_use_their_colors() {
        let mut m = model("a\nb\nc\n", Session::default());
        m.update(Msg::Op(Ctrl::Next));
        m.hovered = Some(1);
        let rows = render_list(&m);
        let p = m.palette;
        let sel = format!("{}", p.selected.text().apply("a"));
        let hover = format!("{}", p.hover.text().apply("b"));
        let normal = format!("{}", p.normal.text().apply("c"));
        assert!(rows[0].contains(&sel));
        assert!(rows[1].contains(&hover));
        assert!(rows[2].contains(&normal));
    }
}
