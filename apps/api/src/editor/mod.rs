#![allow(dead_code)]

//! In-progress resume editing state: a single-writer document with a linear
//! undo/redo history of full snapshots, a focused section, and a dirty flag
//! for the autosave layer.
//!
//! The history is strictly linear. A new edit after an undo truncates every
//! "future" snapshot; there is no branching and no merge.

pub mod autosave;

use crate::models::resume::{move_section, Resume, SectionKind};

/// Snapshots retained before the oldest is dropped. Editing sessions are
/// short-lived, so a bounded window is plenty.
const MAX_HISTORY: usize = 100;

pub struct EditorSession {
    history: Vec<Resume>,
    cursor: usize,
    focused: Option<SectionKind>,
    dirty: bool,
}

impl EditorSession {
    pub fn new(resume: Resume) -> Self {
        Self {
            history: vec![resume],
            cursor: 0,
            focused: None,
            dirty: false,
        }
    }

    /// The document as of the current history position.
    pub fn current(&self) -> &Resume {
        &self.history[self.cursor]
    }

    pub fn focused(&self) -> Option<SectionKind> {
        self.focused
    }

    pub fn focus(&mut self, section: Option<SectionKind>) {
        self.focused = section;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Called after a successful persist.
    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    /// Applies one edit as a new snapshot. Any redo states beyond the
    /// current position are discarded first.
    pub fn apply<F>(&mut self, edit: F)
    where
        F: FnOnce(&mut Resume),
    {
        let mut next = self.current().clone();
        edit(&mut next);

        self.history.truncate(self.cursor + 1);
        self.history.push(next);
        self.cursor += 1;
        self.dirty = true;

        if self.history.len() > MAX_HISTORY {
            self.history.remove(0);
            self.cursor -= 1;
        }
    }

    /// Replaces the whole document (AI regeneration, template switch from a
    /// saved draft). Recorded as a normal edit so it participates in undo.
    pub fn replace(&mut self, resume: Resume) {
        self.apply(|doc| *doc = resume);
    }

    /// Drag-and-drop reorder: moves the section at `from` to `to` and
    /// renumbers every section in the same snapshot.
    pub fn reorder_section(&mut self, from: usize, to: usize) {
        self.apply(|doc| move_section(&mut doc.sections, from, to));
    }

    pub fn set_template(&mut self, template_id: &str) {
        let template_id = template_id.to_string();
        self.apply(move |doc| doc.template_id = template_id);
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.history.len()
    }

    /// Steps back one snapshot. Returns false at the start of history.
    pub fn undo(&mut self) -> bool {
        if !self.can_undo() {
            return false;
        }
        self.cursor -= 1;
        self.dirty = true;
        true
    }

    /// Steps forward one snapshot. Returns false when no redo state exists.
    pub fn redo(&mut self) -> bool {
        if !self.can_redo() {
            return false;
        }
        self.cursor += 1;
        self.dirty = true;
        true
    }
}
