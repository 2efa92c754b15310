/// Stack of visited paths. Home always sits at the bottom so "back" has
/// somewhere to land even when the app started on a deep link.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<String>,
}

impl Default for History {
    fn default() -> Self {
        Self {
            entries: vec!["/".to_string()],
        }
    }
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a navigation. Pushing the current path again is ignored.
    pub fn push(&mut self, path: impl Into<String>) {
        let path = path.into();
        if self.current() != path {
            self.entries.push(path);
        }
    }

    /// Swap the current entry for `path` without growing the stack.
    pub fn replace(&mut self, path: impl Into<String>) {
        let path = path.into();
        if self.entries.len() > 1 {
            self.entries.pop();
        }
        self.push(path);
    }

    /// Pop the current entry and return the one beneath it, or `None` when
    /// already at the bottom.
    pub fn back(&mut self) -> Option<&str> {
        if self.entries.len() <= 1 {
            return None;
        }
        self.entries.pop();
        self.entries.last().map(String::as_str)
    }

    /// Path on top of the stack. The bottom entry is never popped, so this
    /// is `/` at worst.
    pub fn current(&self) -> &str {
        self.entries.last().map(String::as_str).unwrap_or("/")
    }

    pub fn depth(&self) -> usize {
        self.entries.len()
    }
}
