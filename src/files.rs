//! File name completion, used when the item tree has nothing for the text under the
//! cursor.
//!
//! The token to complete is the run of non-whitespace before the cursor. Once found, its
//! start is remembered on the buffer so that repeated completions keep replacing the same
//! token.

use glob::{MatchOptions, glob_with};

use crate::buffer::EditBuffer;
use crate::item::ItemTree;

/// Start of the whitespace-delimited token ending at the cursor, reusing the remembered
/// anchor while it is still behind the cursor.
pub fn token_start(buffer: &EditBuffer) -> usize {
    if let Some(anchor) = buffer.file_anchor {
        if anchor <= buffer.cursor {
            return anchor;
        }
    }
    let bytes = buffer.text().as_bytes();
    let mut beg = buffer.cursor;
    while beg > 0 && !bytes[beg - 1].is_ascii_whitespace() {
        beg -= 1;
    }
    beg
}

/// Glob `token*` and return the matches as a flat list, or `None` when nothing matched
/// or the token cannot be completed at all. Sets the buffer's file anchor.
pub fn complete(buffer: &mut EditBuffer) -> Option<ItemTree> {
    let beg = token_start(buffer);
    buffer.file_anchor = Some(beg);

    let token = &buffer.text()[beg..buffer.cursor];
    // room for the wildcard and a terminator
    if token.len() + 2 > buffer.capacity() {
        return None;
    }
    let pattern = format!("{token}*");

    let options = MatchOptions {
        require_literal_leading_dot: true,
        ..MatchOptions::new()
    };
    let paths = match glob_with(&pattern, options) {
        Ok(paths) => paths,
        Err(err) => {
            tracing::debug!(%pattern, %err, "bad file pattern");
            return None;
        }
    };
    let names: Vec<String> = paths
        .filter_map(Result::ok)
        .map(|p| p.to_string_lossy().into_owned())
        .collect();
    tracing::trace!(%pattern, found = names.len(), "file completion");

    if names.is_empty() {
        None
    } else {
        Some(ItemTree::flat(names))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn buffer_with(text: &str) -> EditBuffer {
        let mut b = EditBuffer::default();
        b.insert(text);
        b
    }

    fn listed(tree: &ItemTree) -> Vec<String> {
        tree.siblings(tree.root()).map(|(_, it)| it.text.clone()).collect()
    }

    #[test]
    fn globs_token_before_cursor() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("readme.txt"), "").unwrap();
        fs::write(dir.path().join("rebuild.sh"), "").unwrap();
        fs::write(dir.path().join("other"), "").unwrap();
        let base = dir.path().display().to_string();

        let mut b = buffer_with(&format!("cat {base}/re"));
        let tree = complete(&mut b).unwrap();
        assert_eq!(
            listed(&tree),
            vec![format!("{base}/readme.txt"), format!("{base}/rebuild.sh")]
        );
        assert_eq!(b.file_anchor, Some(4));
        assert!(tree.preorder().iter().all(|&id| tree.get(id).child.is_none()));
    }

    #[test]
    fn hidden_files_need_a_leading_dot() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(".hidden"), "").unwrap();
        let base = dir.path().display().to_string();

        let mut b = buffer_with(&format!("{base}/"));
        assert!(complete(&mut b).is_none());

        let mut b = buffer_with(&format!("{base}/.h"));
        let tree = complete(&mut b).unwrap();
        assert_eq!(listed(&tree), vec![format!("{base}/.hidden")]);
    }

    #[test]
    fn nothing_found_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let mut b = buffer_with(&format!("ls {}/zzz", dir.path().display()));
        assert!(complete(&mut b).is_none());
    }

    #[test]
    fn oversized_token_fails_silently() {
        let mut b = EditBuffer::with_capacity(10);
        assert!(b.insert("abcdefghi"));
        assert!(complete(&mut b).is_none());
    }

    #[test]
    fn anchor_is_reused_while_behind_cursor() {
        let mut b = buffer_with("vi some/path");
        assert_eq!(token_start(&b), 3);
        b.file_anchor = Some(8);
        assert_eq!(token_start(&b), 8);
        b.cursor = 5;
        assert_eq!(token_start(&b), 3);
    }
}
