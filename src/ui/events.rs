//! Application-level events

/// Events delivered over the app channel by spawned tasks and timers.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Reply delivery succeeded; payload is the raw text (acknowledgment).
    ReplyAccepted(String),

    /// Reply delivery failed; message is shown in a blocking alert.
    ReplyFailed(String),

    /// Request to quit the application.
    Quit,
}
