//! UI panel modules extracted from the main app update loop.

/// Read-only detail panel for the selected user.
pub(super) mod detail_panel;
/// Transient notice toasts.
pub(super) mod notices;
/// Add/edit overlay window.
pub(super) mod session_window;
/// Bottom status bar content.
pub(super) mod status_bar;
/// Title, search, and global actions.
pub(super) mod top_bar;
/// Central list of user cards.
pub(super) mod user_list;
