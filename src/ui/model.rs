use crate::buffer::EditBuffer;
use crate::clipboard::Selection;
use crate::config::Session;
use crate::history::HistoryLog;
use crate::item::{ItemId, ItemTree};
use crate::keymap::Ctrl;
use crate::ui::render::styles::Palette;
use crate::undo::UndoLog;

// screen layout: input line, separator, then the dropdown rows
pub const INPUT_ROW: usize = 0;
pub const SEPARATOR_ROW: usize = 1;
pub const LIST_FIRST_ROW: usize = 2;
pub const DEFAULT_WIDTH: usize = 80;
pub const DOUBLE_CLICK_MS: u64 = 250;

/// Where the candidates of a completion come from.
#[derive(Clone, Debug)]
pub enum Source {
    Tree,
    /// File names found for the token under the cursor; dropped with the completion.
    Files(ItemTree),
}

/// An active completion: the filtered candidates plus the window shown of them.
///
/// Windows start at multiples of the window size, and `selected` always lies inside the
/// current window.
#[derive(Clone, Debug)]
pub struct Completion {
    pub source: Source,
    pub matches: Vec<ItemId>,
    pub first_visible: usize,
    pub selected: usize,
}

impl Completion {
    /// `None` when there is nothing to select.
    pub fn new(source: Source, matches: Vec<ItemId>) -> Option<Self> {
        if matches.is_empty() {
            return None;
        }
        Some(Completion {
            source,
            matches,
            first_visible: 0,
            selected: 0,
        })
    }

    pub fn items<'a>(&'a self, tree: &'a ItemTree) -> &'a ItemTree {
        match &self.source {
            Source::Tree => tree,
            Source::Files(files) => files,
        }
    }

    pub fn is_files(&self) -> bool {
        matches!(self.source, Source::Files(_))
    }

    pub fn selected_id(&self) -> ItemId {
        self.matches[self.selected]
    }

    pub fn visible(&self, window: usize) -> &[ItemId] {
        let end = (self.first_visible + window).min(self.matches.len());
        &self.matches[self.first_visible..end]
    }

    /// Match index shown on dropdown row `row`, counting from 0.
    pub fn index_at_row(&self, row: usize, window: usize) -> Option<usize> {
        (row < self.visible(window).len()).then_some(self.first_visible + row)
    }

    pub fn select_next(&mut self, window: usize) {
        if self.selected + 1 < self.matches.len() {
            self.selected += 1;
            if self.selected >= self.first_visible + window {
                self.first_visible = self.selected;
            }
        }
    }

    pub fn select_prev(&mut self, window: usize) {
        if self.selected > 0 {
            self.selected -= 1;
            if self.selected < self.first_visible {
                self.first_visible = self.first_visible.saturating_sub(window);
            }
        }
    }

    pub fn select_last(&mut self, window: usize) {
        self.selected = self.matches.len() - 1;
        self.first_visible = self.selected / window * window;
    }

    pub fn page_down(&mut self, window: usize) {
        self.selected = (self.selected + window).min(self.matches.len() - 1);
        self.first_visible = self.selected / window * window;
    }

    pub fn page_up(&mut self, window: usize) {
        self.selected = self.selected.saturating_sub(window);
        self.first_visible = self.selected / window * window;
    }
}

/// Side effects queued by an update for the host to carry out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    Copy(Selection, String),
    RequestPaste(Selection),
}

#[derive(Clone, Debug, Default)]
pub struct ClickState {
    pub last_ms: Option<u64>,
    /// The previous click selected a word.
    pub word: bool,
}

#[derive(Clone, Debug)]
pub struct Model {
    pub session: Session,
    pub palette: Palette,
    pub tree: ItemTree,
    pub buffer: EditBuffer,
    pub undo: UndoLog,
    pub history: HistoryLog,
    pub completion: Option<Completion>,
    /// Match index under the pointer.
    pub hovered: Option<usize>,
    pub prev_op: Ctrl,
    pub clicks: ClickState,
    pub screen_width: usize,
    pub screen_height: usize,
    pub effects: Vec<Effect>,
}

pub fn initial_model(session: Session, tree: ItemTree, history: HistoryLog) -> Model {
    Model {
        session,
        palette: Palette::default(),
        tree,
        buffer: EditBuffer::default(),
        undo: UndoLog::new(),
        history,
        completion: None,
        hovered: None,
        prev_op: Ctrl::Nothing,
        clicks: ClickState::default(),
        screen_width: DEFAULT_WIDTH,
        screen_height: 0,
        effects: Vec::new(),
    }
}

impl Model {
    pub fn update(&mut self, msg: crate::ui::Msg) -> crate::ui::Outcome {
        crate::ui::update::handle_update(self, msg)
    }

    pub fn text(&self) -> &str {
        self.buffer.text()
    }

    /// Dropdown rows per page, limited by the terminal height once it is known.
    pub fn window(&self) -> usize {
        if self.screen_height == 0 {
            return self.session.number_items;
        }
        self.session
            .number_items
            .min(self.screen_height.saturating_sub(LIST_FIRST_ROW))
            .max(1)
    }

    pub fn is_completing(&self) -> bool {
        self.completion.is_some()
    }

    /// Back to idle: forget the candidates, the hover, and the file token anchor.
    pub fn clear_completion(&mut self) {
        if self.completion.take().is_some() {
            tracing::trace!("completion closed");
        }
        self.hovered = None;
        self.buffer.file_anchor = None;
    }

    pub fn set_completion(&mut self, completion: Option<Completion>) {
        self.hovered = None;
        match completion {
            Some(c) => {
                tracing::trace!(matches = c.matches.len(), files = c.is_files(), "completion opened");
                self.completion = Some(c);
            }
            None => self.clear_completion(),
        }
    }

    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    /// Cells taken by the prompt string and the space after it.
    pub fn prompt_width(&self) -> usize {
        match &self.session.prompt {
            Some(p) if !p.is_empty() => p.chars().count() + 1,
            _ => 0,
        }
    }

    /// Characters of the text scrolled off to the left so the cursor stays visible.
    pub fn input_scroll(&self) -> usize {
        if self.session.password {
            return 0;
        }
        let avail = self.screen_width.saturating_sub(self.prompt_width());
        if avail == 0 {
            return 0;
        }
        let cursor_col = self.text()[..self.buffer.cursor].chars().count();
        if cursor_col >= avail {
            cursor_col + 1 - avail
        } else {
            0
        }
    }

    /// Byte offset of the character drawn at `column` of the input row, or the text end.
    pub fn column_to_offset(&self, column: usize) -> usize {
        if self.session.password {
            return self.buffer.len();
        }
        let Some(rel) = column.checked_sub(self.prompt_width()) else {
            return 0;
        };
        self.text()
            .char_indices()
            .nth(rel + self.input_scroll())
            .map(|(i, _)| i)
            .unwrap_or(self.buffer.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn completion(n: usize) -> Completion {
        let tree = ItemTree::flat((0..n).map(|i| format!("item{i}")));
        let matches = tree.preorder();
        Completion::new(Source::Tree, matches).unwrap()
    }

    #[test]
    fn empty_match_list_is_not_a_completion() {
        assert!(Completion::new(Source::Tree, vec![]).is_none());
    }

    #[test]
    fn next_slides_window_when_leaving_it() {
        let mut c = completion(20);
        for _ in 0..7 {
            c.select_next(8);
        }
        assert_eq!((c.selected, c.first_visible), (7, 0));
        c.select_next(8);
        assert_eq!((c.selected, c.first_visible), (8, 8));
        assert_eq!(c.visible(8).len(), 8);
        for _ in 0..20 {
            c.select_next(8);
        }
        assert_eq!((c.selected, c.first_visible), (19, 16));
        assert_eq!(c.visible(8).len(), 4);
    }

    #[test]
    fn prev_slides_window_back() {
        let mut c = completion(20);
        c.select_last(8);
        assert_eq!((c.selected, c.first_visible), (19, 16));
        for _ in 0..3 {
            c.select_prev(8);
        }
        assert_eq!((c.selected, c.first_visible), (16, 16));
        c.select_prev(8);
        assert_eq!((c.selected, c.first_visible), (15, 8));
        for _ in 0..30 {
            c.select_prev(8);
        }
        assert_eq!((c.selected, c.first_visible), (0, 0));
    }

    #[test]
    fn selection_stays_in_window() {
        let mut c = completion(13);
        let steps: [fn(&mut Completion, usize); 5] = [
            Completion::select_next,
            Completion::page_down,
            Completion::select_prev,
            Completion::page_up,
            Completion::select_last,
        ];
        for round in 0..40 {
            steps[round % steps.len()](&mut c, 4);
            assert!(c.selected >= c.first_visible);
            assert!(c.selected < c.first_visible + 4);
            assert!(c.visible(4).contains(&c.selected_id()));
        }
    }

    #[test]
    fn paging_moves_a_window() {
        let mut c = completion(20);
        c.select_next(8);
        c.page_down(8);
        assert_eq!((c.selected, c.first_visible), (9, 8));
        c.page_down(8);
        assert_eq!((c.selected, c.first_visible), (17, 16));
        c.page_down(8);
        assert_eq!((c.selected, c.first_visible), (19, 16));
        c.page_up(8);
        assert_eq!((c.selected, c.first_visible), (11, 8));
        c.page_up(8);
        c.page_up(8);
        assert_eq!((c.selected, c.first_visible), (0, 0));
    }

    #[test]
    fn rows_map_to_match_indices() {
        let mut c = completion(10);
        c.page_down(8);
        assert_eq!(c.index_at_row(0, 8), Some(8));
        assert_eq!(c.index_at_row(1, 8), Some(9));
        assert_eq!(c.index_at_row(2, 8), None);
    }

    #[test]
    fn click_column_maps_to_byte_offset() {
        let session = Session {
            prompt: Some("run".into()),
            ..Session::default()
        };
        let mut m = initial_model(session, ItemTree::new(), HistoryLog::default());
        m.buffer.insert("aé b");
        assert_eq!(m.prompt_width(), 4);
        assert_eq!(m.column_to_offset(0), 0);
        assert_eq!(m.column_to_offset(4), 0);
        assert_eq!(m.column_to_offset(5), 1);
        assert_eq!(m.column_to_offset(6), 3);
        assert_eq!(m.column_to_offset(50), m.buffer.len());
    }

    #[test]
    fn window_shrinks_to_terminal_height() {
        let mut m = initial_model(Session::default(), ItemTree::new(), HistoryLog::default());
        assert_eq!(m.window(), m.session.number_items);
        m.screen_height = 5;
        assert_eq!(m.window(), 3);
        m.screen_height = 2;
        assert_eq!(m.window(), 1);
        m.screen_height = 40;
        assert_eq!(m.window(), m.session.number_items);
    }

    #[test]
    fn long_input_scrolls_to_keep_cursor_visible() {
        let mut m = initial_model(Session::default(), ItemTree::new(), HistoryLog::default());
        m.screen_width = 10;
        m.buffer.insert("0123456789abc");
        assert_eq!(m.input_scroll(), 4);
        assert_eq!(m.column_to_offset(0), 4);
        m.buffer.cursor = 2;
        assert_eq!(m.input_scroll(), 0);
    }
}
