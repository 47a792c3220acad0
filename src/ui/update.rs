use crate::buffer::{Direction, next_rune, word_edge};
use crate::clipboard::Selection;
use crate::files;
use crate::keymap::Ctrl;
use crate::matcher::{build_match_list, current_word, resolve_subtree};
use crate::ui::model::{Completion, DOUBLE_CLICK_MS, Effect, INPUT_ROW, LIST_FIRST_ROW, Model, Source};
use crate::ui::{Msg, Outcome};

pub fn handle_update(m: &mut Model, msg: Msg) -> Outcome {
    match msg {
        Msg::WindowSize { width, height } => handle_window_size(m, width, height),
        Msg::Op(op) => handle_operation(m, op, None),
        Msg::Rune(c) => handle_operation(m, Ctrl::Insert, Some(c)),
        Msg::Paste(text) => handle_paste(m, &text),
        Msg::Press { column, row, time_ms } => handle_press(m, column, row, time_ms),
        Msg::Drag { column, row } => handle_drag(m, column, row),
        Msg::Release => handle_release(m),
        Msg::Hover { column: _, row } => handle_hover(m, row),
        Msg::MiddleClick => handle_middle_click(m),
        Msg::Scroll(dir) => handle_scroll(m, dir),
    }
}

fn handle_window_size(m: &mut Model, width: usize, height: usize) -> Outcome {
    m.screen_width = width;
    m.screen_height = height;
    let window = m.window();
    if let Some(c) = m.completion.as_mut() {
        c.first_visible = c.selected / window * window;
    }
    Outcome::DrawPrompt
}

fn handle_operation(m: &mut Model, op: Ctrl, rune: Option<char>) -> Outcome {
    // snapshot the live text before the first undo after typing, and before every new
    // run of the same editing operation
    if op.is_undo() && m.prev_op.is_editing() {
        m.undo.record(m.buffer.text(), false);
    }
    if op.is_editing() && op != m.prev_op {
        m.undo.record(m.buffer.text(), true);
    }
    m.prev_op = op;

    let delims = m.session.delimiters.clone();
    let b = &mut m.buffer;
    match op {
        Ctrl::Paste => {
            m.effects.push(Effect::RequestPaste(Selection::Clipboard));
            return Outcome::Nop;
        }
        Ctrl::Copy => {
            if let Some(text) = b.selected_text() {
                m.effects.push(Effect::Copy(Selection::Clipboard, text.to_string()));
            }
            return Outcome::Nop;
        }
        Ctrl::Cancel => {
            if m.session.single_shot || m.completion.is_none() || b.is_empty() {
                return Outcome::Exit(None);
            }
            m.clear_completion();
        }
        Ctrl::Enter => {
            let completing = m.completion.is_some();
            if completing {
                insert_selected(m);
            }
            if m.session.single_shot || !completing {
                return Outcome::Exit(Some(m.text().to_string()));
            }
            m.clear_completion();
        }
        Ctrl::Prev | Ctrl::Next => return handle_complete(m, op),
        Ctrl::PgUp | Ctrl::PgDown => {
            let window = m.window();
            let Some(c) = m.completion.as_mut() else {
                return Outcome::Nop;
            };
            if op == Ctrl::PgUp {
                c.page_up(window);
            } else {
                c.page_down(window);
            }
            m.hovered = None;
            return Outcome::DrawPrompt;
        }
        Ctrl::Bol | Ctrl::SelBol => b.move_line(Direction::Backward),
        Ctrl::Eol | Ctrl::SelEol => b.move_line(Direction::Forward),
        Ctrl::Up | Ctrl::Down => {
            if m.history.is_empty() {
                return Outcome::Nop;
            }
            let dir = if op == Ctrl::Up {
                Direction::Backward
            } else {
                Direction::Forward
            };
            if let Some(entry) = m.history.navigate(dir) {
                m.buffer.set_text(entry);
            }
            m.clear_completion();
        }
        Ctrl::Left | Ctrl::SelLeft => {
            if !b.move_char(Direction::Backward) {
                return Outcome::Nop;
            }
        }
        Ctrl::Right | Ctrl::SelRight => {
            if !b.move_char(Direction::Forward) {
                return Outcome::Nop;
            }
        }
        Ctrl::WLeft | Ctrl::SelWLeft => b.move_word(Direction::Backward, &delims),
        Ctrl::WRight | Ctrl::SelWRight => b.move_word(Direction::Forward, &delims),
        Ctrl::DelBol => {
            let n = b.cursor;
            b.delete_back(n);
        }
        Ctrl::DelEol => b.truncate_at_cursor(),
        Ctrl::DelLeft | Ctrl::DelRight => {
            if b.has_selection() {
                b.delete_selection();
            } else {
                if op == Ctrl::DelRight && !b.move_char(Direction::Forward) {
                    return Outcome::Nop;
                }
                if b.cursor == 0 {
                    return Outcome::Nop;
                }
                let prev = next_rune(b.text(), b.cursor, Direction::Backward);
                let n = b.cursor - prev;
                b.delete_back(n);
            }
        }
        Ctrl::DelWord => b.delete_word(&delims),
        Ctrl::Undo => {
            m.undo.undo(&mut m.buffer);
        }
        Ctrl::Redo => {
            m.undo.redo(&mut m.buffer);
        }
        Ctrl::Nothing => return Outcome::Nop,
        Ctrl::Insert => {
            let Some(c) = rune.filter(|c| !c.is_control()) else {
                return Outcome::Nop;
            };
            b.delete_selection();
            b.insert(c.encode_utf8(&mut [0; 4]));
        }
    }

    if op.is_motion() {
        m.buffer.select = m.buffer.cursor;
        m.clear_completion();
        return Outcome::DrawPrompt;
    }
    if op.is_selection() {
        if let Some(text) = m.buffer.selected_text() {
            m.effects.push(Effect::Copy(Selection::Primary, text.to_string()));
        }
        return Outcome::DrawInput;
    }
    if op.is_editing() || op.is_undo() {
        if m.completion.is_none() {
            return Outcome::DrawInput;
        }
        rematch(m);
    }
    Outcome::DrawPrompt
}

/// Candidates for the text before the cursor: the item subtree the finished words lead
/// to, or file names when the tree offers nothing and file completion is on.
fn find_candidates(m: &mut Model) -> Option<Completion> {
    let session = &m.session;
    let text = m.buffer.text();
    let cursor = m.buffer.cursor;
    let word = current_word(text, cursor, &session.delimiters);

    if let Some(head) = resolve_subtree(&m.tree, text, cursor, session) {
        let matches = build_match_list(&m.tree, Some(head), word, session);
        if let Some(c) = Completion::new(Source::Tree, matches) {
            return Some(c);
        }
    }
    if !session.file_completion {
        return None;
    }
    let found = files::complete(&mut m.buffer)?;
    let session = &m.session;
    let word = current_word(m.buffer.text(), m.buffer.cursor, &session.delimiters);
    let matches = build_match_list(&found, found.root(), word, session);
    Completion::new(Source::Files(found), matches)
}

fn handle_complete(m: &mut Model, op: Ctrl) -> Outcome {
    let window = m.window();
    if let Some(c) = m.completion.as_mut() {
        if op == Ctrl::Next {
            c.select_next(window);
        } else {
            c.select_prev(window);
        }
        return Outcome::DrawPrompt;
    }

    let Some(mut c) = find_candidates(m) else {
        m.clear_completion();
        return Outcome::Nop;
    };
    if op == Ctrl::Prev {
        c.select_last(window);
    }
    m.set_completion(Some(c));
    Outcome::DrawPrompt
}

/// Recompute the candidates after the text changed during a completion; an empty result
/// ends the completion.
fn rematch(m: &mut Model) {
    let c = find_candidates(m);
    m.set_completion(c);
}

/// Put the selected candidate into the text. A partial word before the cursor is
/// replaced; a file name replaces the whole path token it was found for.
fn insert_selected(m: &mut Model) {
    let Some(c) = m.completion.as_ref() else {
        return;
    };
    let text = c.items(&m.tree).get(c.selected_id()).text.clone();
    let is_files = c.is_files();
    let delims = &m.session.delimiters;

    m.undo.record(m.buffer.text(), true);
    let b = &mut m.buffer;
    let mid_word = b.text()[..b.cursor]
        .chars()
        .next_back()
        .is_some_and(|c| !delims.contains(c));
    if mid_word {
        b.delete_word(delims);
    }
    if is_files {
        let anchor = b.file_anchor.unwrap_or(b.cursor).min(b.cursor);
        let n = b.cursor - anchor;
        b.delete_back(n);
    }
    b.insert(&text);
    m.undo.record(m.buffer.text(), false);
    tracing::trace!(item = %text, "inserted candidate");
}

fn handle_paste(m: &mut Model, text: &str) -> Outcome {
    let line = text.split(['\n', '\r']).next().unwrap_or("");
    m.undo.record(m.buffer.text(), true);
    m.prev_op = Ctrl::Paste;
    m.buffer.delete_selection();
    if !m.buffer.insert(line) {
        tracing::debug!(len = line.len(), "paste does not fit");
    }
    m.undo.record(m.buffer.text(), false);
    if m.completion.is_some() {
        rematch(m);
        return Outcome::DrawPrompt;
    }
    Outcome::DrawInput
}

fn handle_press(m: &mut Model, column: usize, row: usize, time_ms: u64) -> Outcome {
    if row == INPUT_ROW {
        let pos = m.column_to_offset(column);
        let quick = m
            .clicks
            .last_ms
            .is_some_and(|last| time_ms.saturating_sub(last) < DOUBLE_CLICK_MS);
        let b = &mut m.buffer;
        if quick && m.clicks.word {
            b.cursor = 0;
            b.select = b.len();
            m.clicks.word = false;
        } else if quick {
            let delims = &m.session.delimiters;
            b.cursor = word_edge(b.text(), pos, Direction::Backward, delims);
            b.select = word_edge(b.text(), pos, Direction::Forward, delims);
            m.clicks.word = true;
        } else {
            b.cursor = pos;
            b.select = pos;
            m.clicks.word = false;
        }
        m.clicks.last_ms = Some(time_ms);
        return Outcome::DrawInput;
    }

    let window = m.window();
    let Some(idx) = row
        .checked_sub(LIST_FIRST_ROW)
        .and_then(|r| m.completion.as_ref()?.index_at_row(r, window))
    else {
        return Outcome::Nop;
    };
    if let Some(c) = m.completion.as_mut() {
        c.selected = idx;
    }
    insert_selected(m);
    if m.session.single_shot {
        return Outcome::Exit(Some(m.text().to_string()));
    }
    m.clear_completion();
    Outcome::DrawPrompt
}

fn handle_drag(m: &mut Model, column: usize, row: usize) -> Outcome {
    let before = (m.buffer.cursor, m.buffer.select);
    if row == INPUT_ROW {
        m.buffer.select = m.column_to_offset(column);
    } else if m.buffer.cursor < m.buffer.len() {
        // below the input row the drag runs to the end of the text
        m.buffer.cursor = m.buffer.len();
    }
    if (m.buffer.cursor, m.buffer.select) == before {
        Outcome::Nop
    } else {
        Outcome::DrawInput
    }
}

fn handle_release(m: &mut Model) -> Outcome {
    if let Some(text) = m.buffer.selected_text() {
        m.effects.push(Effect::Copy(Selection::Primary, text.to_string()));
    }
    Outcome::Nop
}

fn handle_hover(m: &mut Model, row: usize) -> Outcome {
    let window = m.window();
    let hovered = row
        .checked_sub(LIST_FIRST_ROW)
        .and_then(|r| m.completion.as_ref()?.index_at_row(r, window));
    if hovered == m.hovered {
        return Outcome::Nop;
    }
    m.hovered = hovered;
    Outcome::DrawPrompt
}

fn handle_middle_click(m: &mut Model) -> Outcome {
    m.buffer.delete_selection();
    m.effects.push(Effect::RequestPaste(Selection::Primary));
    Outcome::DrawInput
}

fn handle_scroll(m: &mut Model, dir: Direction) -> Outcome {
    let window = m.window();
    let Some(c) = m.completion.as_mut() else {
        return Outcome::Nop;
    };
    match dir {
        Direction::Forward => c.select_next(window),
        Direction::Backward => c.select_prev(window),
    }
    Outcome::DrawPrompt
}
