// File: src/controller.rs
//! Glue between a front end (tray menu, CLI) and the todo list.
//!
//! Every user action goes through here: the controller mutates the list,
//! writes it back, and re-reads the file so what gets rendered next is what
//! is on disk. Rendering itself is left to the caller via `entries()`.
use crate::config::Config;
use crate::context::AppContext;
use crate::model::{Item, TodoList};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// One renderable row: the label is the item's full line, which is also
/// the key `check_off` matches against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub label: String,
    pub enabled: bool,
}

impl Entry {
    fn from_item(item: &Item) -> Self {
        Self {
            label: item.to_line(),
            enabled: !item.is_completed,
        }
    }
}

#[derive(Debug)]
pub struct IndicatorController {
    pub list: TodoList,
    pub config: Config,
}

impl IndicatorController {
    /// Resolves the todo file (see `Config::resolve_todo_path`) and loads it,
    /// creating an empty file first if there is none yet.
    pub fn open(
        ctx: &dyn AppContext,
        config: Config,
        path_override: Option<PathBuf>,
    ) -> Result<Self> {
        let path = config.resolve_todo_path(ctx, path_override)?;
        ensure_file(&path)?;
        let list = TodoList::from_file(&path)?;
        log::debug!("Opened {} with {} item(s)", path.display(), list.num_items());
        Ok(Self { list, config })
    }

    pub fn path(&self) -> Option<&Path> {
        self.list.source_path()
    }

    /// Rows in render order. The list itself is not reordered.
    pub fn entries(&self) -> Vec<Entry> {
        let mut items: Vec<&Item> = self
            .list
            .iter()
            .filter(|item| !(self.config.hide_completed && item.is_completed))
            .collect();
        if self.config.sort_on_load {
            items.sort();
        }
        items.into_iter().map(Entry::from_item).collect()
    }

    /// Completes the item(s) rendered as `label`. Returns how many matched.
    pub fn check_off(&mut self, label: &str) -> Result<usize> {
        let hits = self.list.mark_completed_by_full_line(label);
        if hits == 0 {
            log::debug!("No entry matches '{}'", label);
            return Ok(0);
        }
        self.persist()?;
        Ok(hits)
    }

    /// Completes by body text rather than full line.
    pub fn complete_text(&mut self, text: &str) -> Result<usize> {
        let hits = self.list.mark_completed_by_text(text);
        if hits > 0 {
            self.persist()?;
        }
        Ok(hits)
    }

    pub fn add(&mut self, line: &str) -> Result<bool> {
        if !self.list.add_item(line) {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    pub fn remove(&mut self, text: &str) -> Result<usize> {
        let removed = self.list.remove_item(text);
        if removed > 0 {
            self.persist()?;
        }
        Ok(removed)
    }

    /// Drops completed items from the file.
    pub fn archive(&mut self) -> Result<usize> {
        let removed = self.list.remove_completed_items();
        if removed > 0 {
            self.persist()?;
        }
        Ok(removed)
    }

    /// Sorts the file contents themselves, not just the rendering.
    pub fn sort(&mut self) -> Result<()> {
        self.list.sort_list();
        self.persist()
    }

    pub fn refresh(&mut self) -> Result<()> {
        self.list.reload()?;
        Ok(())
    }

    /// Opens the file with the configured editor and waits for it, then
    /// reloads. `xdg-open` style launchers may return before editing ends;
    /// `refresh` picks up later changes.
    pub fn edit(&mut self) -> Result<()> {
        let path = self
            .path()
            .map(Path::to_path_buf)
            .ok_or_else(|| anyhow::anyhow!("Todo list has no backing file"))?;
        let mut parts = self.config.editor.split_whitespace();
        let program = parts
            .next()
            .ok_or_else(|| anyhow::anyhow!("No editor configured"))?;

        let status = Command::new(program)
            .args(parts)
            .arg(&path)
            .status()
            .with_context(|| format!("Failed to launch editor '{}'", self.config.editor))?;
        if !status.success() {
            log::warn!("Editor '{}' exited with {}", self.config.editor, status);
        }
        self.refresh()
    }

    fn persist(&mut self) -> Result<()> {
        self.list.write_to_file()?;
        self.list.reload()?;
        Ok(())
    }
}

fn ensure_file(path: &Path) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {:?}", parent))?;
    }
    fs::write(path, "").with_context(|| format!("Failed to create {}", path.display()))?;
    log::info!("Created empty todo file {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::TestContext;

    fn open_with(ctx: &TestContext, content: &str, config: Config) -> IndicatorController {
        let path = ctx.get_data_dir().unwrap().join("todo.txt");
        fs::write(&path, content).unwrap();
        IndicatorController::open(ctx, config, Some(path)).unwrap()
    }

    fn labels(entries: &[Entry]) -> Vec<&str> {
        entries.iter().map(|e| e.label.as_str()).collect()
    }

    #[test]
    fn test_entries_sorted_and_disabled() {
        let ctx = TestContext::new();
        let c = open_with(&ctx, "x done\nplain\n(A) urgent", Config::default());
        let entries = c.entries();
        assert_eq!(labels(&entries), vec!["(A) urgent", "plain", "x done"]);
        assert!(entries[0].enabled);
        assert!(!entries[2].enabled);
        // Rendering does not reorder the list.
        assert_eq!(c.list.items()[0].text, "done");
    }

    #[test]
    fn test_entries_hide_completed_unsorted() {
        let ctx = TestContext::new();
        let config = Config {
            hide_completed: true,
            sort_on_load: false,
            ..Config::default()
        };
        let c = open_with(&ctx, "b\nx done\na", config);
        assert_eq!(labels(&c.entries()), vec!["b", "a"]);
    }

    #[test]
    fn test_check_off_writes_back() {
        let ctx = TestContext::new();
        let mut c = open_with(&ctx, "(A) call mom\nbuy milk", Config::default());
        assert_eq!(c.check_off("(A) call mom").unwrap(), 1);

        let on_disk = fs::read_to_string(c.path().unwrap()).unwrap();
        assert_eq!(on_disk, "x (A) call mom\nbuy milk");
        assert_eq!(c.check_off("nothing like this").unwrap(), 0);
    }

    #[test]
    fn test_add_archive_remove() {
        let ctx = TestContext::new();
        let mut c = open_with(&ctx, "x old\nkeep", Config::default());
        assert!(c.add("(B) new").unwrap());
        assert!(!c.add("  ").unwrap());
        assert_eq!(c.archive().unwrap(), 1);
        assert_eq!(c.remove("keep").unwrap(), 1);

        let on_disk = fs::read_to_string(c.path().unwrap()).unwrap();
        assert_eq!(on_disk, "(B) new");
    }

    #[test]
    fn test_refresh_sees_external_edit() {
        let ctx = TestContext::new();
        let mut c = open_with(&ctx, "one", Config::default());
        fs::write(c.path().unwrap(), "one\ntwo\n\n").unwrap();
        c.refresh().unwrap();
        assert_eq!(c.list.num_items(), 2);
    }

    #[test]
    fn test_open_creates_missing_file() {
        let ctx = TestContext::new();
        let path = ctx.root.join("nested").join("todo.txt");
        let c = IndicatorController::open(&ctx, Config::default(), Some(path.clone())).unwrap();
        assert!(path.exists());
        assert!(!c.list.has_items());
    }
}
