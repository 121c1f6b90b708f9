/// Top-level page sections
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Chat,
    KnowledgeBase,
}

impl Page {
    pub const ALL: [Page; 2] = [Page::Chat, Page::KnowledgeBase];

    pub fn title(&self) -> &'static str {
        match self {
            Page::Chat => "Chat",
            Page::KnowledgeBase => "Knowledge Base",
        }
    }

    pub fn index(&self) -> usize {
        Page::ALL.iter().position(|p| p == self).unwrap_or(0)
    }
}

/// Which tab/page is active. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navigation {
    active: Page,
}

impl Default for Navigation {
    fn default() -> Self {
        Self { active: Page::Chat }
    }
}

impl Navigation {
    pub fn active(&self) -> Page {
        self.active
    }

    pub fn is_active(&self, page: Page) -> bool {
        self.active == page
    }

    pub fn activate(&mut self, page: Page) {
        self.active = page;
    }

    /// Cycle to the next tab
    pub fn next(&mut self) {
        let idx = (self.active.index() + 1) % Page::ALL.len();
        self.active = Page::ALL[idx];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activate_is_exclusive() {
        let mut nav = Navigation::default();
        assert!(nav.is_active(Page::Chat));

        nav.activate(Page::KnowledgeBase);
        assert!(nav.is_active(Page::KnowledgeBase));
        assert!(!nav.is_active(Page::Chat));
    }

    #[test]
    fn test_next_wraps() {
        let mut nav = Navigation::default();
        nav.next();
        assert_eq!(nav.active(), Page::KnowledgeBase);
        nav.next();
        assert_eq!(nav.active(), Page::Chat);
    }
}
