use std::str::FromStr;

use serde_json::Value;

use crate::error::CycleError;
use crate::practicum::Homework;

/// Review states the homework API reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl HomeworkStatus {
    /// Fixed verdict text shown to the student.
    pub fn verdict(&self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "Your work has been reviewed: the reviewer liked it. Hooray!",
            HomeworkStatus::Reviewing => "Your work has been taken for review by the reviewer.",
            HomeworkStatus::Rejected => "Your work has been reviewed: the reviewer has comments.",
        }
    }
}

/// Exact, case-sensitive match on the API's status codes.
impl FromStr for HomeworkStatus {
    type Err = CycleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approved" => Ok(HomeworkStatus::Approved),
            "reviewing" => Ok(HomeworkStatus::Reviewing),
            "rejected" => Ok(HomeworkStatus::Rejected),
            other => Err(CycleError::UnknownStatus {
                status: other.to_string(),
            }),
        }
    }
}

/// Turn one work-item into the sentence sent to the chat.
///
/// Fails with [`CycleError::Shape`] when the item lacks a string
/// `homework_name` or `status`, and with [`CycleError::UnknownStatus`] when
/// the status is not one of the known codes.
pub fn parse_status(item: &Value) -> Result<String, CycleError> {
    let homework = Homework::from_value(item)?;
    let status: HomeworkStatus = homework.status.parse()?;
    Ok(format!(
        "Changed review status for \"{}\". {}",
        homework.homework_name,
        status.verdict()
    ))
}
