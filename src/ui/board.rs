// ============================================
// src/ui/board.rs
// The visible list of V-speed entries
// ============================================

use crate::quiz::SpeedTerm;

/// Longest answer an entry will hold.
pub const MAX_ENTRY_DIGITS: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    Pending,
    Correct,
    Incorrect,
}

#[derive(Debug, Clone)]
pub struct Entry {
    pub label: &'static str,
    pub meaning: &'static str,
    pub text: String,
    pub mark: Mark,
}

/// View model of the quiz screen. The renderer only reads it.
#[derive(Debug, Default)]
pub struct Board {
    entries: Vec<Entry>,
    focus: Option<usize>,
    completion_prompt: bool,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the list for a new round and focus the first entry.
    pub fn render_round(&mut self, terms: &[SpeedTerm]) {
        self.entries = terms
            .iter()
            .map(|t| Entry {
                label: t.label,
                meaning: t.meaning,
                text: String::new(),
                mark: Mark::Pending,
            })
            .collect();
        self.focus = if self.entries.is_empty() { None } else { Some(0) };
    }

    pub fn mark_entry(&mut self, index: usize, mark: Mark) {
        if let Some(entry) = self.entries.get_mut(index) {
            entry.mark = mark;
        }
    }

    /// Recolor every entry at once, e.g. red after a wrong answer.
    pub fn flash_all(&mut self, mark: Mark) {
        for entry in &mut self.entries {
            entry.mark = mark;
        }
    }

    /// Move focus to `index`; past the end clears focus.
    pub fn focus(&mut self, index: usize) {
        self.focus = (index < self.entries.len()).then_some(index);
    }

    pub fn focused(&self) -> Option<usize> {
        self.focus
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn current_text(&self) -> &str {
        self.focus
            .and_then(|i| self.entries.get(i))
            .map(|e| e.text.as_str())
            .unwrap_or("")
    }

    pub fn push_digit(&mut self, c: char) {
        if let Some(entry) = self.focused_entry() {
            if entry.text.len() < MAX_ENTRY_DIGITS {
                entry.text.push(c);
            }
        }
    }

    pub fn erase(&mut self) {
        if let Some(entry) = self.focused_entry() {
            entry.text.pop();
        }
    }

    pub fn clear_entry(&mut self) {
        if let Some(entry) = self.focused_entry() {
            entry.text.clear();
        }
    }

    pub fn show_completion_prompt(&mut self) {
        self.completion_prompt = true;
        self.focus = None;
    }

    pub fn dismiss_completion_prompt(&mut self) {
        self.completion_prompt = false;
    }

    pub fn is_prompt_visible(&self) -> bool {
        self.completion_prompt
    }

    fn focused_entry(&mut self) -> Option<&mut Entry> {
        self.focus.and_then(|i| self.entries.get_mut(i))
    }
}
