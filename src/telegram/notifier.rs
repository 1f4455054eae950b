use tracing::{debug, error};

use super::client::ChatSender;

/// Wraps a [`ChatSender`] so that delivery failures stop here.
///
/// The notifier is also how every other failure gets reported, so a failed
/// send is logged and dropped. It never triggers another send.
pub struct Notifier<S> {
    sender: S,
}

impl<S: ChatSender> Notifier<S> {
    pub fn new(sender: S) -> Self {
        Self { sender }
    }

    /// Send `message`, returning whether it was delivered.
    pub async fn notify(&self, message: &str) -> bool {
        match self.sender.send_message(message).await {
            Ok(()) => {
                debug!(%message, "message sent");
                true
            }
            Err(e) => {
                error!(error = %e, %message, "failed to send message");
                false
            }
        }
    }
}
