//! Input events understood by the navigator

/// An abstract user intent
///
/// Which events are meaningful depends on the current mode; the rest are
/// ignored without changing state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEvent {
    /// Move selection or field cursor up
    MoveUp,
    /// Move selection or field cursor down
    MoveDown,
    /// Open the selected group, go up, or edit the selected profile
    Activate,
    /// Start creating a profile in the current group
    StartCreate,
    /// Edit the selected profile
    StartEdit,
    /// Ask to delete the selected profile
    StartDelete,
    /// Open an SSH session to the selected profile
    Connect,
    /// Open an SFTP session to the selected profile
    ConnectSftp,
    /// Leave the application
    Quit,
    /// Type a character into the focused field
    AppendChar(char),
    /// Delete the last character of the focused field
    Backspace,
    /// Show or hide the password while it is focused
    ToggleSecretVisibility,
    /// Abandon the current edit or confirmation
    Cancel,
    /// Save the edit buffer
    Submit,
    /// Accept a deletion
    Confirm,
    /// Reject a deletion
    Deny,
}
