use opsbot_types::Sender;

/// State of the backend as last observed by the health probe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    Online,
    Offline,
}

impl ConnectionStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ConnectionStatus::Online => "Connected",
            ConnectionStatus::Offline => "Offline",
        }
    }
}

/// The page surface the controller drives.
///
/// Methods take `&self`; implementations own handles with interior
/// mutability (DOM nodes, or `RefCell`s in tests). Rendering failures are
/// the implementation's to log, the controller never sees them.
pub trait ChatView {
    /// Enable or disable both the input field and the send control
    fn set_controls_enabled(&self, enabled: bool);

    fn set_loading(&self, visible: bool);

    /// Append one bubble holding already-rendered HTML and scroll to it
    fn append_bubble(&self, sender: Sender, html: &str);

    fn clear_transcript(&self);

    fn transcript_len(&self) -> usize;

    /// Empty the input field and shrink it back to its natural height
    fn reset_input(&self);

    fn focus_input(&self);

    /// Blocking yes/no prompt
    fn confirm(&self, prompt: &str) -> bool;

    fn set_status(&self, status: ConnectionStatus);
}
