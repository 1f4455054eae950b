pub mod client;
pub mod response;
pub mod types;

pub use client::{HomeworkSource, PracticumClient};
pub use response::check_response;
pub use types::Homework;
