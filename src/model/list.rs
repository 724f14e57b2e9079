// File: ./src/model/list.rs
//! The ordered todo list and its backing file.
//!
//! Item order is the list's state: it is both the display order and the
//! order written back. Nothing here reorders implicitly; only `sort_list`
//! does. File access is a plain whole-file read and a destructive
//! whole-file overwrite, with no locking.
use crate::error::{ListError, Result};
use crate::model::item::Item;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoList {
    items: Vec<Item>,
    source_path: Option<PathBuf>,
}

impl TodoList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the list from `path`. The path is stored in absolute form so a
    /// later working-directory change does not redirect writes.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = absolute_path(path.as_ref())?;
        let mut list = Self {
            items: Vec::new(),
            source_path: Some(path),
        };
        list.load_source()?;
        Ok(list)
    }

    pub fn from_text(text: &str) -> Self {
        let mut list = Self::new();
        list.extend_from_text(text);
        list
    }

    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    /// Attaches a backing file to a list built from text (or retargets an
    /// existing one). Items are left untouched.
    pub fn set_source_path<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.source_path = Some(absolute_path(path.as_ref())?);
        Ok(())
    }

    /// Drops the in-memory items and parses the backing file again.
    pub fn reload(&mut self) -> Result<()> {
        let path = self.source_path.as_ref().ok_or(ListError::NoSourcePath)?;
        log::info!("Reloading todo list from {}", path.display());
        self.items.clear();
        self.load_source()
    }

    /// Invalid UTF-8 is replaced with U+FFFD rather than refusing the file;
    /// writing back stores the replacement characters.
    fn load_source(&mut self) -> Result<()> {
        let path = self.source_path.as_ref().ok_or(ListError::NoSourcePath)?;
        let bytes = fs::read(path).map_err(|e| ListError::read(path, e))?;
        let text = String::from_utf8_lossy(&bytes);
        self.items.extend(text.lines().filter_map(Item::parse));
        log::debug!("Loaded {} item(s) from {}", self.items.len(), path.display());
        Ok(())
    }

    fn extend_from_text(&mut self, text: &str) {
        self.items.extend(text.lines().filter_map(Item::parse));
    }

    /// Appends the parsed line. Blank input is ignored; returns whether an
    /// item was added. Input spanning several lines adds one item per
    /// non-blank line, so what is written back reads back the same.
    pub fn add_item(&mut self, line: &str) -> bool {
        let before = self.items.len();
        self.extend_from_text(line);
        self.items.len() > before
    }

    /// Removes every item whose text equals `text`, duplicates included.
    /// Returns the number removed.
    pub fn remove_item(&mut self, text: &str) -> usize {
        self.retain_counting(|item| item.text != text)
    }

    pub fn remove_completed_items(&mut self) -> usize {
        self.retain_counting(|item| !item.is_completed)
    }

    fn retain_counting<F: FnMut(&Item) -> bool>(&mut self, keep: F) -> usize {
        let before = self.items.len();
        self.items.retain(keep);
        before - self.items.len()
    }

    /// Completes every item whose text equals `text`. Returns how many matched.
    pub fn mark_completed_by_text(&mut self, text: &str) -> usize {
        self.complete_matching(|item| item.text == text)
    }

    /// Completes every item whose rendered line equals `full_line`.
    ///
    /// This is how a UI maps a displayed label back to the model. Identical
    /// lines are indistinguishable, so all of them are completed.
    pub fn mark_completed_by_full_line(&mut self, full_line: &str) -> usize {
        self.complete_matching(|item| item.matches_line(full_line))
    }

    fn complete_matching<F: Fn(&Item) -> bool>(&mut self, pred: F) -> usize {
        let mut hits = 0;
        for item in self.items.iter_mut() {
            if pred(item) {
                item.complete();
                hits += 1;
            }
        }
        hits
    }

    /// Sort by the item ordering: open items first, then priority, then
    /// text. The ordering compares every field, so items that tie are
    /// identical and their relative order cannot be observed.
    pub fn sort_list(&mut self) {
        self.items.sort();
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }

    pub fn num_items(&self) -> usize {
        self.items.len()
    }

    pub fn has_items(&self) -> bool {
        !self.items.is_empty()
    }

    /// One line per item joined by `\n`, without a trailing newline.
    pub fn serialize(&self) -> String {
        self.to_string()
    }

    /// Overwrites the backing file with `serialize()`. Not atomic: a failure
    /// midway can leave the file truncated.
    pub fn write_to_file(&self) -> Result<()> {
        let path = self.source_path.as_ref().ok_or(ListError::NoSourcePath)?;
        fs::write(path, self.serialize()).map_err(|e| ListError::write(path, e))?;
        log::info!("Wrote {} item(s) to {}", self.items.len(), path.display());
        Ok(())
    }
}

fn absolute_path(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path).map_err(|e| ListError::read(path, e))
}

impl fmt::Display for TodoList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{}", item)?;
        }
        Ok(())
    }
}

impl FromStr for TodoList {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::from_text(s))
    }
}
