//! Completion candidates parsed from indented input.
//!
//! Every input line is `TAB* text [TAB+ description]`. The number of leading tabs is the
//! nesting level: a line one level deeper than the previous one starts that line's child
//! list, a line at the same level continues the sibling list, and a shallower line
//! continues the list of the ancestor at its level.
//!
//! Nodes live in an arena and refer to each other by [`ItemId`], so the tree is dropped
//! as a whole.

use std::io::BufRead;

use crate::error::StartupError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(usize);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Item {
    pub text: String,
    pub description: Option<String>,
    pub level: usize,
    pub parent: Option<ItemId>,
    pub child: Option<ItemId>,
    pub prev: Option<ItemId>,
    pub next: Option<ItemId>,
}

impl Item {
    fn new(level: usize, text: &str, description: Option<&str>) -> Self {
        Item {
            text: text.to_string(),
            description: description.map(str::to_string),
            level,
            parent: None,
            child: None,
            prev: None,
            next: None,
        }
    }

    /// Text used for matching and display: the description in description mode, when
    /// the item has one.
    pub fn display_text(&self, descriptions: bool) -> &str {
        match (&self.description, descriptions) {
            (Some(d), true) => d,
            _ => &self.text,
        }
    }
}

/// One parsed input line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Line {
    pub level: usize,
    pub text: String,
    pub description: Option<String>,
}

/// Split a raw input line into level, text and description. Returns `None` for lines
/// that carry no text.
pub fn parse_line(raw: &str) -> Option<Line> {
    let raw = raw.trim_end_matches(['\n', '\r']);
    let level = raw.bytes().take_while(|&b| b == b'\t').count();
    let mut fields = raw[level..].split('\t').filter(|f| !f.is_empty());
    let text = fields.next()?;
    if text.trim().is_empty() {
        return None;
    }
    let description = fields.next().map(str::to_string);
    Some(Line {
        level,
        text: text.to_string(),
        description,
    })
}

#[derive(Clone, Debug, Default)]
pub struct ItemTree {
    items: Vec<Item>,
    last: Option<ItemId>,
}

impl ItemTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree from already parsed lines. Line numbers in errors count from 1 in
    /// the order the lines are given.
    pub fn build<I>(lines: I) -> Result<Self, StartupError>
    where
        I: IntoIterator<Item = Line>,
    {
        let mut tree = ItemTree::new();
        for (idx, line) in lines.into_iter().enumerate() {
            tree.push(line.level, &line.text, line.description.as_deref())
                .ok_or_else(|| StartupError::Indentation {
                    line: idx + 1,
                    text: line.text.clone(),
                })?;
        }
        Ok(tree)
    }

    /// A single list of siblings without nesting.
    pub fn flat<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tree = ItemTree::new();
        for t in texts {
            // level never changes, so the push cannot fail
            let _ = tree.push(0, t.as_ref(), None);
        }
        tree
    }

    /// Append the next item in input order. Returns `None` when `level` does not
    /// continue any open list, i.e. the indentation is inconsistent.
    pub fn push(&mut self, level: usize, text: &str, description: Option<&str>) -> Option<ItemId> {
        let id = ItemId(self.items.len());
        let mut item = Item::new(level, text, description);

        if let Some(prev) = self.last {
            let prev_level = self.items[prev.0].level;
            if level < prev_level {
                let mut anchor = Some(prev);
                for _ in level..prev_level {
                    anchor = anchor.and_then(|a| self.items[a.0].parent);
                }
                let anchor = anchor?;
                item.parent = self.items[anchor.0].parent;
                item.prev = Some(anchor);
                self.items[anchor.0].next = Some(id);
            } else if level == prev_level {
                item.parent = self.items[prev.0].parent;
                item.prev = Some(prev);
                self.items[prev.0].next = Some(id);
            } else {
                item.parent = Some(prev);
                self.items[prev.0].child = Some(id);
            }
        }

        self.items.push(item);
        self.last = Some(id);
        Some(id)
    }

    pub fn root(&self) -> Option<ItemId> {
        if self.items.is_empty() {
            None
        } else {
            Some(ItemId(0))
        }
    }

    pub fn get(&self, id: ItemId) -> &Item {
        &self.items[id.0]
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate a sibling list starting at `head`.
    pub fn siblings(&self, head: Option<ItemId>) -> Siblings<'_> {
        Siblings {
            tree: self,
            next: head,
        }
    }

    /// Depth-first, parent before children, siblings in order.
    pub fn preorder(&self) -> Vec<ItemId> {
        let mut out = Vec::with_capacity(self.items.len());
        let mut stack: Vec<ItemId> = self.root().into_iter().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            let item = self.get(id);
            if let Some(n) = item.next {
                stack.push(n);
            }
            if let Some(c) = item.child {
                stack.push(c);
            }
        }
        out
    }
}

pub struct Siblings<'a> {
    tree: &'a ItemTree,
    next: Option<ItemId>,
}

impl<'a> Iterator for Siblings<'a> {
    type Item = (ItemId, &'a Item);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        let item = self.tree.get(id);
        self.next = item.next;
        Some((id, item))
    }
}

/// Read the whole input stream into a tree. Invalid UTF-8 is replaced rather than
/// rejected; lines without text are skipped but still counted for error positions.
pub fn read_items<R: BufRead>(mut reader: R) -> Result<ItemTree, StartupError> {
    let mut tree = ItemTree::new();
    let mut buf = Vec::new();
    let mut lineno = 0usize;
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        lineno += 1;
        let raw = String::from_utf8_lossy(&buf);
        let Some(line) = parse_line(&raw) else {
            continue;
        };
        tree.push(line.level, &line.text, line.description.as_deref())
            .ok_or_else(|| StartupError::Indentation {
                line: lineno,
                text: line.text.clone(),
            })?;
    }
    tracing::debug!(items = tree.len(), "parsed completion items");
    Ok(tree)
}
