/// What a keydown in the message field should do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Submit,
    InsertNewline,
    Ignore,
}

impl KeyAction {
    pub fn from_key(key: &str, shift: bool) -> Self {
        match (key, shift) {
            ("Enter", false) => KeyAction::Submit,
            ("Enter", true) => KeyAction::InsertNewline,
            _ => KeyAction::Ignore,
        }
    }

    /// Whether the browser's default handling must be suppressed
    pub fn prevents_default(&self) -> bool {
        matches!(self, KeyAction::Submit)
    }
}
