pub mod client;
pub mod notifier;
pub mod types;

pub use client::{ChatSender, TelegramClient};
pub use notifier::Notifier;
