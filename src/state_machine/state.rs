use std::fmt;

/// The phases of the polling loop.
///
/// STARTUP → POLLING ⇄ COOLDOWN. There is no terminal phase; the loop only
/// ends on shutdown or when startup fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Startup,
    Polling,
    Cooldown,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Startup => write!(f, "STARTUP"),
            Phase::Polling => write!(f, "POLLING"),
            Phase::Cooldown => write!(f, "COOLDOWN"),
        }
    }
}

/// What one polling cycle did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The API reported nothing new.
    Idle,
    /// This many status changes were turned into messages.
    Notified(usize),
    /// The cycle was aborted; holds the failure message sent to the chat.
    Failed(String),
}
