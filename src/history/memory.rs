//! In-memory history stack.
//!
//! Behaves like a browser session history: pushing drops any forward
//! entries, back/forward move a cursor without touching the entries.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::history::platform::History;

#[derive(Debug)]
struct Stack {
    entries: Vec<String>,
    cursor: usize,
}

/// History backed by a vector of paths.
#[derive(Debug)]
pub struct MemoryHistory {
    stack: Mutex<Stack>,
}

impl MemoryHistory {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            stack: Mutex::new(Stack {
                entries: vec![initial.into()],
                cursor: 0,
            }),
        }
    }

    fn stack(&self) -> MutexGuard<'_, Stack> {
        self.stack.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Step back one entry. Returns false at the start of history.
    pub fn back(&self) -> bool {
        let mut stack = self.stack();
        if stack.cursor == 0 {
            return false;
        }
        stack.cursor -= 1;
        true
    }

    /// Step forward one entry. Returns false at the end of history.
    pub fn forward(&self) -> bool {
        let mut stack = self.stack();
        if stack.cursor + 1 >= stack.entries.len() {
            return false;
        }
        stack.cursor += 1;
        true
    }

    pub fn entries(&self) -> Vec<String> {
        self.stack().entries.clone()
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new("/")
    }
}

impl History for MemoryHistory {
    fn location(&self) -> String {
        let stack = self.stack();
        stack.entries[stack.cursor].clone()
    }

    fn push(&self, path: &str) {
        let mut stack = self.stack();
        let keep = stack.cursor + 1;
        stack.entries.truncate(keep);
        stack.entries.push(path.to_string());
        stack.cursor = keep;
    }

    fn replace(&self, path: &str) {
        let mut stack = self.stack();
        let cursor = stack.cursor;
        stack.entries[cursor] = path.to_string();
    }
}
