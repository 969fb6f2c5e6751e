use opsbot_types::{HistoryEntry, Role};

/// Append-only record of the conversation held by one widget
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationHistory {
    entries: Vec<HistoryEntry>,
}

impl ConversationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, role: Role, content: impl Into<String>) {
        self.entries.push(HistoryEntry {
            role,
            content: content.into(),
        });
    }

    /// The most recent `size` entries, oldest first
    pub fn window(&self, size: usize) -> Vec<HistoryEntry> {
        let start = self.entries.len().saturating_sub(size);
        self.entries[start..].to_vec()
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history_of(count: usize) -> ConversationHistory {
        let mut history = ConversationHistory::new();
        for i in 0..count {
            let role = if i % 2 == 0 { Role::User } else { Role::Assistant };
            history.push(role, format!("turn {}", i));
        }
        history
    }

    #[test]
    fn test_window_shorter_than_limit() {
        let history = history_of(3);
        let window = history.window(10);
        assert_eq!(window.len(), 3);
        assert_eq!(window[0].content, "turn 0");
    }

    #[test]
    fn test_window_is_order_preserving_suffix() {
        let history = history_of(15);
        let window = history.window(10);

        assert_eq!(window.len(), 10);
        assert_eq!(window.as_slice(), &history.entries()[5..]);
        assert_eq!(window.first().unwrap().content, "turn 5");
        assert_eq!(window.last().unwrap().content, "turn 14");
    }

    #[test]
    fn test_zero_window_is_empty() {
        assert!(history_of(4).window(0).is_empty());
    }

    #[test]
    fn test_clear() {
        let mut history = history_of(4);
        history.clear();
        assert!(history.is_empty());
        assert_eq!(history.len(), 0);
    }
}
