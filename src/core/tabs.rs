//! Open editor tabs, in display order, and which one is active.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tabs {
    open: Vec<String>,
    active: Option<usize>,
}

impl Tabs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open_tabs(&self) -> &[String] {
        &self.open
    }

    pub fn active(&self) -> Option<&str> {
        self.active.and_then(|i| self.open.get(i)).map(String::as_str)
    }

    /// Open `name` (if needed) and make it active
    pub fn open(&mut self, name: &str) {
        let idx = match self.open.iter().position(|t| t == name) {
            Some(idx) => idx,
            None => {
                self.open.push(name.to_string());
                self.open.len() - 1
            }
        };
        self.active = Some(idx);
    }

    /// Activate an already open tab; returns false if it is not open
    pub fn activate(&mut self, name: &str) -> bool {
        match self.open.iter().position(|t| t == name) {
            Some(idx) => {
                self.active = Some(idx);
                true
            }
            None => false,
        }
    }

    /// Close `name`. If it was active, the tab to its right (else left) takes over.
    pub fn close(&mut self, name: &str) -> bool {
        let Some(idx) = self.open.iter().position(|t| t == name) else {
            return false;
        };
        self.open.remove(idx);

        self.active = match self.active {
            _ if self.open.is_empty() => None,
            Some(active) if active == idx => Some(idx.min(self.open.len() - 1)),
            Some(active) if active > idx => Some(active - 1),
            other => other,
        };
        true
    }

    /// Follow a file rename
    pub fn rename(&mut self, old: &str, new: &str) {
        if let Some(tab) = self.open.iter_mut().find(|t| t.as_str() == old) {
            *tab = new.to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_is_idempotent() {
        let mut tabs = Tabs::new();
        tabs.open("a.py");
        tabs.open("b.py");
        tabs.open("a.py");
        assert_eq!(tabs.open_tabs(), &["a.py", "b.py"]);
        assert_eq!(tabs.active(), Some("a.py"));
    }

    #[test]
    fn test_close_active_prefers_right_neighbour() {
        let mut tabs = Tabs::new();
        for name in ["a", "b", "c"] {
            tabs.open(name);
        }
        tabs.activate("b");
        assert!(tabs.close("b"));
        assert_eq!(tabs.active(), Some("c"));
        assert!(tabs.close("c"));
        assert_eq!(tabs.active(), Some("a"));
        assert!(tabs.close("a"));
        assert_eq!(tabs.active(), None);
        assert!(!tabs.close("a"));
    }

    #[test]
    fn test_close_other_keeps_active() {
        let mut tabs = Tabs::new();
        for name in ["a", "b", "c"] {
            tabs.open(name);
        }
        tabs.close("a");
        assert_eq!(tabs.active(), Some("c"));
    }

    #[test]
    fn test_rename_follows_file() {
        let mut tabs = Tabs::new();
        tabs.open("old.py");
        tabs.rename("old.py", "new.py");
        assert_eq!(tabs.active(), Some("new.py"));
    }
}
