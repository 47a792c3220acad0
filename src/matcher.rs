//! Contextual completion: find the sibling list that the word under the cursor completes
//! against, then filter it.
//!
//! Descent is word by word. Every word before the one under the cursor has to prefix-match
//! an item of the current list; the first such item's children become the current list.
//! Matching is byte based.

use crate::buffer::{Delimiters, Direction, skip_run};
use crate::config::Session;
use crate::item::{ItemId, ItemTree};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CaseMode {
    #[default]
    Sensitive,
    Insensitive,
}

impl CaseMode {
    /// Whether `hay` begins with `needle`.
    pub fn starts_with(self, hay: &[u8], needle: &[u8]) -> bool {
        if hay.len() < needle.len() {
            return false;
        }
        let head = &hay[..needle.len()];
        match self {
            CaseMode::Sensitive => head == needle,
            CaseMode::Insensitive => head.eq_ignore_ascii_case(needle),
        }
    }
}

/// Byte offset where the word ending at `cursor` begins.
pub fn word_start(text: &str, cursor: usize, delims: &Delimiters) -> usize {
    skip_run(text, cursor.min(text.len()), Direction::Backward, delims, false)
}

/// The partially typed word under the cursor.
pub fn current_word<'a>(text: &'a str, cursor: usize, delims: &Delimiters) -> &'a str {
    let cursor = cursor.min(text.len());
    &text[word_start(text, cursor, delims)..cursor]
}

/// Head of the sibling list the word under the cursor completes against.
///
/// `None` means there is nothing to complete: the tree is empty, a finished word matched
/// nothing, or descent reached a leaf.
pub fn resolve_subtree(tree: &ItemTree, text: &str, cursor: usize, session: &Session) -> Option<ItemId> {
    let root = tree.root()?;
    let text = text.get(..cursor.min(text.len()))?;
    let delims = &session.delimiters;

    let mut curr = Some(root);
    let mut end = 0;
    while end < text.len() {
        let beg = skip_run(text, end, Direction::Forward, delims, true);
        end = skip_run(text, beg, Direction::Forward, delims, false);
        if end == text.len() {
            // the word under the cursor is what gets completed
            break;
        }

        let word = text[beg..end].as_bytes();
        let found = tree.siblings(curr).find(|(_, it)| {
            session
                .case
                .starts_with(it.display_text(session.descriptions).as_bytes(), word)
        });
        let (_, item) = found?;
        if session.keep_args && item.child.is_none() && curr != Some(root) {
            return curr;
        }
        curr = item.child;
    }
    curr
}

/// Whether `word` matches `text` at the start of one of its words or, with `anywhere`,
/// at any byte offset.
pub fn item_matches(text: &str, word: &str, anywhere: bool, session: &Session) -> bool {
    let hay = text.as_bytes();
    let word = word.as_bytes();
    let delims = &session.delimiters;
    let mut s = 0;
    while s < hay.len() {
        if session.case.starts_with(&hay[s..], word) {
            return true;
        }
        if anywhere {
            s += 1;
        } else {
            s = skip_run(text, s, Direction::Forward, delims, false);
            s = skip_run(text, s, Direction::Forward, delims, true);
        }
    }
    false
}

/// Filter the list at `head` by `word`. Items matching at a word start come first, then
/// items matching only somewhere inside; each group keeps sibling order.
pub fn build_match_list(tree: &ItemTree, head: Option<ItemId>, word: &str, session: &Session) -> Vec<ItemId> {
    let text_of = |id: ItemId| tree.get(id).display_text(session.descriptions);

    let mut matches: Vec<ItemId> = tree
        .siblings(head)
        .filter(|(id, _)| item_matches(text_of(*id), word, false, session))
        .map(|(id, _)| id)
        .collect();
    let inner: Vec<ItemId> = tree
        .siblings(head)
        .filter(|(id, _)| {
            !item_matches(text_of(*id), word, false, session) && item_matches(text_of(*id), word, true, session)
        })
        .map(|(id, _)| id)
        .collect();
    matches.extend(inner);
    tracing::trace!(word, matches = matches.len(), "rebuilt match list");
    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::read_items;

    fn session() -> Session {
        Session {
            delimiters: Delimiters::new(" "),
            ..Session::default()
        }
    }

    fn names(tree: &ItemTree, ids: &[ItemId]) -> Vec<String> {
        ids.iter().map(|&id| tree.get(id).text.clone()).collect()
    }

    fn list_for(tree: &ItemTree, text: &str, s: &Session) -> Option<Vec<String>> {
        let head = resolve_subtree(tree, text, text.len(), s)?;
        let word = current_word(text, text.len(), &s.delimiters);
        Some(names(tree, &build_match_list(tree, Some(head), word, s)))
    }

    #[test]
    fn word_start_matches_prefix_before_substring() {
        let tree = ItemTree::flat(["apple", "pineapple", "banana"]);
        let got = build_match_list(&tree, tree.root(), "app", &session());
        assert_eq!(names(&tree, &got), vec!["apple", "pineapple"]);
    }

    #[test]
    fn token_matches_rank_before_inner_matches_regardless_of_order() {
        let tree = ItemTree::flat(["xbar", "foo bar", "bar", "baz"]);
        let got = build_match_list(&tree, tree.root(), "bar", &session());
        assert_eq!(names(&tree, &got), vec!["foo bar", "bar", "xbar"]);
    }

    #[test]
    fn empty_word_matches_every_sibling() {
        let tree = ItemTree::flat(["a", "b", "c"]);
        let got = build_match_list(&tree, tree.root(), "", &session());
        assert_eq!(names(&tree, &got), vec!["a", "b", "c"]);
    }

    #[test]
    fn no_match_gives_empty_list() {
        let tree = ItemTree::flat(["a", "b"]);
        assert!(build_match_list(&tree, tree.root(), "zz", &session()).is_empty());
    }

    #[test]
    fn descends_one_level_per_finished_word() {
        let tree = read_items("git\n\tcommit\n\t\t--amend\n\tpush\nls\n".as_bytes()).unwrap();
        let s = session();
        assert_eq!(list_for(&tree, "", &s).unwrap(), vec!["git", "ls"]);
        assert_eq!(list_for(&tree, "g", &s).unwrap(), vec!["git"]);
        assert_eq!(list_for(&tree, "git ", &s).unwrap(), vec!["commit", "push"]);
        assert_eq!(list_for(&tree, "git p", &s).unwrap(), vec!["push"]);
        assert_eq!(list_for(&tree, "git commit --", &s).unwrap(), vec!["--amend"]);
    }

    #[test]
    fn finished_word_without_match_yields_nothing() {
        let tree = read_items("git\n\tcommit\n".as_bytes()).unwrap();
        let s = session();
        assert!(list_for(&tree, "hg ", &s).is_none());
        assert!(list_for(&tree, "git nope ", &s).is_none());
    }

    #[test]
    fn finished_leaf_has_nothing_below() {
        let tree = read_items("open\n".as_bytes()).unwrap();
        assert!(list_for(&tree, "open ", &session()).is_none());
    }

    #[test]
    fn argument_mode_stays_on_option_list_after_leaf() {
        let tree = read_items("ls\n\t-l\n\t-a\n\t-h\n".as_bytes()).unwrap();
        let mut s = session();
        assert!(list_for(&tree, "ls -l ", &s).is_none());
        s.keep_args = true;
        assert_eq!(list_for(&tree, "ls -l -", &s).unwrap(), vec!["-l", "-a", "-h"]);
    }

    #[test]
    fn cursor_in_middle_uses_text_before_it() {
        let tree = read_items("git\n\tcommit\n\tpush\n".as_bytes()).unwrap();
        let s = session();
        let text = "git pu trailing";
        let head = resolve_subtree(&tree, text, 6, &s).unwrap();
        assert_eq!(current_word(text, 6, &s.delimiters), "pu");
        let got = build_match_list(&tree, Some(head), "pu", &s);
        assert_eq!(names(&tree, &got), vec!["push"]);
    }

    #[test]
    fn case_insensitive_mode() {
        let tree = ItemTree::flat(["Makefile", "main.rs"]);
        let mut s = session();
        assert_eq!(names(&tree, &build_match_list(&tree, tree.root(), "ma", &s)), vec!["main.rs"]);
        s.case = CaseMode::Insensitive;
        assert_eq!(
            names(&tree, &build_match_list(&tree, tree.root(), "ma", &s)),
            vec!["Makefile", "main.rs"]
        );
    }

    #[test]
    fn description_mode_matches_descriptions() {
        let tree = read_items("ff\tfirefox\nvi\teditor\n".as_bytes()).unwrap();
        let mut s = session();
        assert!(build_match_list(&tree, tree.root(), "fire", &s).is_empty());
        s.descriptions = true;
        assert_eq!(names(&tree, &build_match_list(&tree, tree.root(), "fire", &s)), vec!["ff"]);
    }

    #[test]
    fn word_helpers_respect_delimiters() {
        let d = Delimiters::new(" /");
        assert_eq!(word_start("cat src/ma", 10, &d), 8);
        assert_eq!(current_word("cat src/ma", 10, &d), "ma");
        assert_eq!(current_word("cat ", 4, &d), "");
        assert_eq!(current_word("", 0, &d), "");
    }

    #[test]
    fn multibyte_delimiters_keep_words_whole() {
        let s = Session {
            delimiters: Delimiters::new(" é"),
            ..Session::default()
        };
        let d = &s.delimiters;
        assert_eq!(current_word("⩀", "⩀".len(), d), "⩀");
        assert_eq!(current_word("xéab", "xéab".len(), d), "ab");
        assert_eq!(word_start("üb", "üb".len(), d), 0);

        let tree = read_items("git\n\tcommit\n\tcheckout\n".as_bytes()).unwrap();
        assert_eq!(list_for(&tree, "gitécom", &s).unwrap(), vec!["commit"]);
        assert!(list_for(&tree, "⩀", &s).unwrap().is_empty());

        let flat = ItemTree::flat(["aébc", "xbc"]);
        let got = build_match_list(&flat, flat.root(), "bc", &s);
        assert_eq!(names(&flat, &got), vec!["aébc", "xbc"]);
    }
}
